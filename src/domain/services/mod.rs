pub mod images;
pub mod validation;
