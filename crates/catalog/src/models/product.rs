use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{category::non_empty, image::ProductImage};

/// Product as stored by the catalog backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Single image path or a JSON-encoded array of paths
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    pub fn image_source(&self) -> Option<&str> {
        non_empty(&self.file_path)
    }

    pub fn primary_image(&self) -> Option<&ProductImage> {
        ProductImage::primary(&self.images)
    }
}
