pub mod config;
pub mod error_message;
pub mod image_url;
