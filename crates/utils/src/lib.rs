pub mod image;
pub mod response;
