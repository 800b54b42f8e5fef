pub mod auth;
pub mod booking;
pub mod catalog;
pub mod favorite;
pub mod health;
pub mod image;
pub mod suggestion;
