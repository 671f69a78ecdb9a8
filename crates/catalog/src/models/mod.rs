pub mod category;
pub mod image;
pub mod product;
