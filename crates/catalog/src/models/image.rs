use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Role an image plays on the product page
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageType {
    #[default]
    Main,
    Detail,
    Additional,
}

/// An image attached to a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct ProductImage {
    pub file_path: String,
    #[serde(default)]
    pub image_type: ImageType,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub image_key: Option<String>,
}

impl ProductImage {
    /// The `main` image with the lowest display order, falling back to the
    /// lowest display order overall.
    pub fn primary(images: &[ProductImage]) -> Option<&ProductImage> {
        let usable = move || images.iter().filter(|img| !img.file_path.is_empty());

        usable()
            .filter(|img| img.image_type == ImageType::Main)
            .min_by_key(|img| img.display_order)
            .or_else(|| usable().min_by_key(|img| img.display_order))
    }

    /// Images in display order. Ties keep their stored order.
    pub fn ordered(images: &[ProductImage]) -> Vec<&ProductImage> {
        let mut ordered: Vec<&ProductImage> = images
            .iter()
            .filter(|img| !img.file_path.is_empty())
            .collect();
        ordered.sort_by_key(|img| img.display_order);
        ordered
    }
}
