pub mod booking;
pub mod city;
pub mod event;
pub mod favorite;
pub mod place;
pub mod suggestion;
pub mod user;
