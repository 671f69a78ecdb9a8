//! Image path resolution for stored catalog images.
//!
//! Image references were stored under several conventions over time. Every
//! one of them resolves to a single public form rooted at `/images/`, and
//! anything that cannot be resolved becomes an inline SVG placeholder so the
//! caller always has something renderable.

use serde_json::Value;

/// Public root that every stored image path resolves under.
pub const IMAGES_PREFIX: &str = "/images/";

const STATIC_IMAGES_PREFIX: &str = "/static/images/";
const PUBLIC_ASSETS_PREFIX: &str = "/public-assets/product-images/";

pub const DEFAULT_PLACEHOLDER_TEXT: &str = "No Image";
pub const DEFAULT_PLACEHOLDER_WIDTH: u32 = 400;
pub const DEFAULT_PLACEHOLDER_HEIGHT: u32 = 300;

const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;charset=utf-8,";

/// Resolve a stored image path into a displayable URL.
///
/// Rules are checked in order and the first match wins:
/// absent/empty, absolute URL, canonical `/images/`, legacy `/static/images/`,
/// legacy `/public-assets/product-images/`, bare relative filename. Any other
/// absolute path yields a placeholder.
pub fn resolve_image_url(path: Option<&str>) -> String {
    resolve_image_url_sized(path, DEFAULT_PLACEHOLDER_WIDTH, DEFAULT_PLACEHOLDER_HEIGHT)
}

/// Same rules as [`resolve_image_url`], with placeholders drawn at the given size.
pub fn resolve_image_url_sized(path: Option<&str>, width: u32, height: u32) -> String {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return placeholder_image(DEFAULT_PLACEHOLDER_TEXT, width, height);
    };

    if path.starts_with("http") || path.starts_with(IMAGES_PREFIX) {
        return path.to_string();
    }

    if let Some(rest) = path.strip_prefix(STATIC_IMAGES_PREFIX) {
        return format!("{IMAGES_PREFIX}{rest}");
    }

    if let Some(rest) = path.strip_prefix(PUBLIC_ASSETS_PREFIX) {
        return format!("{IMAGES_PREFIX}{rest}");
    }

    if !path.starts_with('/') {
        return format!("{IMAGES_PREFIX}{path}");
    }

    tracing::debug!(path, "Unrecognized image path, using placeholder");
    placeholder_image(DEFAULT_PLACEHOLDER_TEXT, width, height)
}

/// Extract the primary image path from a stored value.
///
/// Products keep either a single path or a JSON array of paths whose first
/// entry is the primary image. Plain paths are not valid JSON and come back
/// unchanged. Any other JSON value comes back in its string form, so `null`
/// yields `"null"`. An empty array has no primary image.
pub fn main_image_path(raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|r| !r.is_empty())?;

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(paths)) => paths.first().map(stringify),
        Ok(value) => Some(stringify(&value)),
        Err(_) => Some(raw.to_string()),
    }
}

/// Every image path in a stored value, primary first. Empty and `null`
/// array entries are skipped.
pub fn image_paths(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(paths)) => paths
            .iter()
            .filter(|p| !p.is_null())
            .map(stringify)
            .filter(|p| !p.is_empty())
            .collect(),
        _ => main_image_path(Some(raw)).into_iter().collect(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build the placeholder SVG document.
pub fn placeholder_svg(text: &str, width: u32, height: u32) -> String {
    format!(
        concat!(
            r##"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"##,
            r##"<rect width="100%" height="100%" fill="#f5f5f5"/>"##,
            r##"<text x="50%" y="50%" text-anchor="middle" dy=".3em" fill="#666666" "##,
            r##"font-family="Arial, sans-serif" font-size="16">{text}</text>"##,
            r##"</svg>"##
        ),
        width = width,
        height = height,
        text = escape_xml(text),
    )
}

/// Build the placeholder as a percent-encoded `data:image/svg+xml` URL.
pub fn placeholder_image(text: &str, width: u32, height: u32) -> String {
    let svg = placeholder_svg(text, width, height);
    format!("{SVG_DATA_URL_PREFIX}{}", urlencoding::encode(&svg))
}

/// Placeholder at the default 400x300 size.
pub fn default_placeholder(text: &str) -> String {
    placeholder_image(text, DEFAULT_PLACEHOLDER_WIDTH, DEFAULT_PLACEHOLDER_HEIGHT)
}

pub fn is_placeholder(url: &str) -> bool {
    url.starts_with("data:image/svg+xml")
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
