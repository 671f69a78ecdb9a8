use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Product category as stored by the catalog backend.
///
/// Every field is optional because records reach us from several API
/// versions. Empty strings are treated the same as missing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Stable category code, e.g. `safety_helmet`
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl Category {
    pub fn code(&self) -> Option<&str> {
        non_empty(&self.code)
    }

    pub fn display_name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Path stored on the record, `image` before `image_path`
    pub fn stored_image(&self) -> Option<&str> {
        non_empty(&self.image).or_else(|| non_empty(&self.image_path))
    }

    /// Only the `image` field, which is what the admin screens edit
    pub fn admin_image(&self) -> Option<&str> {
        non_empty(&self.image)
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
