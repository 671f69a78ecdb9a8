//! Image URLs for catalog records.

use std::sync::Arc;

use catalog::models::{category::Category, image::ProductImage, product::Product};
use tracing::debug;
use utils::image::{
    IMAGES_PREFIX, image_paths, is_placeholder, main_image_path, placeholder_image,
    resolve_image_url_sized,
};

use super::config::AssetConfig;

const NO_PRODUCT_IMAGE: &str = "No Product Image";
const NO_CATEGORY_IMAGE: &str = "No Category Image";

/// Resolves the image URL of categories and products. Every method returns a
/// renderable URL; missing images become placeholders.
#[derive(Debug, Clone)]
pub struct ImageUrlService {
    config: Arc<AssetConfig>,
}

impl ImageUrlService {
    pub fn new(config: AssetConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    pub fn placeholder(&self, text: &str) -> String {
        placeholder_image(
            text,
            self.config.placeholder_width,
            self.config.placeholder_height,
        )
    }

    /// Resolve a stored path, drawing any placeholder at the configured size.
    pub fn resolve(&self, path: Option<&str>) -> String {
        resolve_image_url_sized(
            path,
            self.config.placeholder_width,
            self.config.placeholder_height,
        )
    }

    /// Primary image of a product.
    ///
    /// `file_path` wins when present; otherwise the attached images are used.
    pub fn product_image_url(&self, product: &Product) -> String {
        if let Some(source) = product.image_source() {
            return match main_image_path(Some(source)).filter(|p| !p.is_empty()) {
                Some(path) => self.resolve(Some(&path)),
                None => self.placeholder(NO_PRODUCT_IMAGE),
            };
        }

        match product.primary_image() {
            Some(image) => self.resolve(Some(&image.file_path)),
            None => {
                debug!(product_id = ?product.id, "Product has no image");
                self.placeholder(NO_PRODUCT_IMAGE)
            }
        }
    }

    /// Every image of a product for the detail gallery, primary first.
    /// Never empty.
    pub fn product_gallery_urls(&self, product: &Product) -> Vec<String> {
        let mut urls: Vec<String> = image_paths(product.image_source())
            .iter()
            .map(|path| self.resolve(Some(path)))
            .collect();

        if urls.is_empty() {
            urls = ProductImage::ordered(&product.images)
                .into_iter()
                .map(|image| self.resolve(Some(&image.file_path)))
                .collect();
        }

        if urls.is_empty() {
            urls.push(self.placeholder(NO_PRODUCT_IMAGE));
        }

        urls
    }

    /// Category image for the public storefront. A category code maps to a
    /// fixed file under `/images/categories/`.
    pub fn category_image_url(&self, category: &Category) -> String {
        if let Some(url) = category_code_url(category) {
            return url;
        }

        match category.stored_image() {
            Some(path) => self.resolve(Some(path)),
            None => self.category_placeholder(category),
        }
    }

    /// Category image for the admin screens, which only look at `image`.
    pub fn admin_category_image_url(&self, category: &Category) -> String {
        if let Some(url) = category_code_url(category) {
            return url;
        }

        match category.admin_image() {
            Some(path) => self.resolve(Some(path)),
            None => self.category_placeholder(category),
        }
    }

    /// Turn a resolved URL into an absolute one on the backend origin.
    /// Absolute and data URLs are returned as they are.
    pub fn absolute_url(&self, resolved: &str) -> String {
        if !resolved.starts_with('/') || is_placeholder(resolved) {
            return resolved.to_string();
        }

        // Join relative to the base path so a backend mounted under a
        // sub-path keeps its prefix.
        let mut base = self.config.backend_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        match base.join(resolved.trim_start_matches('/')) {
            Ok(url) => url.to_string(),
            Err(e) => {
                debug!(resolved, error = %e, "Could not join image path onto backend url");
                resolved.to_string()
            }
        }
    }

    fn category_placeholder(&self, category: &Category) -> String {
        self.placeholder(category.display_name().unwrap_or(NO_CATEGORY_IMAGE))
    }
}

fn category_code_url(category: &Category) -> Option<String> {
    category
        .code()
        .map(|code| format!("{IMAGES_PREFIX}categories/{code}.jpg"))
}

#[cfg(test)]
mod tests {
    use catalog::models::image::ImageType;
    use url::Url;

    use super::*;

    fn service() -> ImageUrlService {
        ImageUrlService::new(AssetConfig::new(
            Url::parse("https://shop.example.com").unwrap(),
        ))
    }

    fn category(code: Option<&str>, image: Option<&str>, image_path: Option<&str>) -> Category {
        Category {
            id: Some(1),
            name: Some("Safety Helmets".to_string()),
            code: code.map(str::to_string),
            image: image.map(str::to_string),
            image_path: image_path.map(str::to_string),
        }
    }

    fn product_image(path: &str, image_type: ImageType, display_order: i32) -> ProductImage {
        ProductImage {
            file_path: path.to_string(),
            image_type,
            display_order,
            image_key: None,
        }
    }

    #[test]
    fn test_product_image_from_json_array() {
        let product = Product {
            file_path: Some(r#"["/static/images/h1.jpg","/static/images/h2.jpg"]"#.to_string()),
            ..Default::default()
        };
        assert_eq!(service().product_image_url(&product), "/images/h1.jpg");
    }

    #[test]
    fn test_product_image_from_plain_path() {
        let product = Product {
            file_path: Some("gloves/g1.png".to_string()),
            ..Default::default()
        };
        assert_eq!(service().product_image_url(&product), "/images/gloves/g1.png");
    }

    #[test]
    fn test_product_without_image_gets_placeholder() {
        let service = service();
        let url = service.product_image_url(&Product::default());
        assert_eq!(url, service.placeholder(NO_PRODUCT_IMAGE));

        let empty_array = Product {
            file_path: Some("[]".to_string()),
            ..Default::default()
        };
        assert_eq!(
            service.product_image_url(&empty_array),
            service.placeholder(NO_PRODUCT_IMAGE)
        );
    }

    #[test]
    fn test_product_image_falls_back_to_attached_images() {
        let product = Product {
            images: vec![
                product_image("detail.jpg", ImageType::Detail, 0),
                product_image("/public-assets/product-images/main.jpg", ImageType::Main, 1),
            ],
            ..Default::default()
        };
        assert_eq!(service().product_image_url(&product), "/images/main.jpg");
    }

    #[test]
    fn test_gallery_resolves_every_path() {
        let product = Product {
            file_path: Some(r#"["a.jpg","/static/images/b.jpg","https://cdn.example.com/c.jpg"]"#.to_string()),
            ..Default::default()
        };
        assert_eq!(
            service().product_gallery_urls(&product),
            vec![
                "/images/a.jpg".to_string(),
                "/images/b.jpg".to_string(),
                "https://cdn.example.com/c.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_gallery_uses_attached_images_in_order() {
        let product = Product {
            images: vec![
                product_image("second.jpg", ImageType::Detail, 2),
                product_image("first.jpg", ImageType::Main, 1),
            ],
            ..Default::default()
        };
        assert_eq!(
            service().product_gallery_urls(&product),
            vec!["/images/first.jpg".to_string(), "/images/second.jpg".to_string()]
        );
    }

    #[test]
    fn test_gallery_is_never_empty() {
        let service = service();
        let urls = service.product_gallery_urls(&Product::default());
        assert_eq!(urls, vec![service.placeholder(NO_PRODUCT_IMAGE)]);
    }

    #[test]
    fn test_category_code_wins_over_stored_path() {
        let category = category(Some("safety_helmet"), Some("/static/images/x.jpg"), None);
        assert_eq!(
            service().category_image_url(&category),
            "/images/categories/safety_helmet.jpg"
        );
        assert_eq!(
            service().admin_category_image_url(&category),
            "/images/categories/safety_helmet.jpg"
        );
    }

    #[test]
    fn test_category_stored_paths() {
        let service = service();
        let legacy = category(None, None, Some("/static/images/gloves.jpg"));
        assert_eq!(service.category_image_url(&legacy), "/images/gloves.jpg");
        // Admin screens ignore image_path.
        assert_eq!(
            service.admin_category_image_url(&legacy),
            service.placeholder("Safety Helmets")
        );

        let with_image = category(Some(""), Some("boots.jpg"), None);
        assert_eq!(service.admin_category_image_url(&with_image), "/images/boots.jpg");
    }

    #[test]
    fn test_category_placeholder_label() {
        let service = service();
        let unnamed = Category::default();
        assert_eq!(
            service.category_image_url(&unnamed),
            service.placeholder(NO_CATEGORY_IMAGE)
        );
    }

    #[test]
    fn test_absolute_url() {
        let service = service();
        assert_eq!(
            service.absolute_url("/images/a.jpg"),
            "https://shop.example.com/images/a.jpg"
        );
        assert_eq!(
            service.absolute_url("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
        let placeholder = service.placeholder("X");
        assert_eq!(service.absolute_url(&placeholder), placeholder);
    }

    #[test]
    fn test_absolute_url_keeps_base_sub_path() {
        for base in ["https://host.example.com/shop", "https://host.example.com/shop/"] {
            let service = ImageUrlService::new(AssetConfig::new(Url::parse(base).unwrap()));
            assert_eq!(
                service.absolute_url("/images/a.jpg"),
                "https://host.example.com/shop/images/a.jpg"
            );
        }
    }

    #[test]
    fn test_absolute_url_from_api_url_with_sub_path() {
        let config = AssetConfig::from_lookup(|key| {
            (key == "STOREFRONT_API_URL").then(|| "https://host.example.com/shop/api".to_string())
        })
        .unwrap();
        let service = ImageUrlService::new(config);
        assert_eq!(
            service.absolute_url("/images/categories/safety_boots.jpg"),
            "https://host.example.com/shop/images/categories/safety_boots.jpg"
        );
    }

    #[test]
    fn test_product_with_empty_primary_entry_gets_product_placeholder() {
        let service = service();
        let product = Product {
            file_path: Some(r#"[""]"#.to_string()),
            ..Default::default()
        };
        assert_eq!(
            service.product_image_url(&product),
            service.placeholder(NO_PRODUCT_IMAGE)
        );
    }

    #[test]
    fn test_resolved_placeholders_use_configured_size() {
        let mut config = AssetConfig::new(Url::parse("http://localhost:8000").unwrap());
        config.placeholder_width = 200;
        config.placeholder_height = 100;
        let service = ImageUrlService::new(config);

        let category = Category {
            image_path: Some("/unknown/gloves.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(
            service.category_image_url(&category),
            placeholder_image("No Image", 200, 100)
        );
        assert_eq!(service.resolve(None), placeholder_image("No Image", 200, 100));
    }

    #[test]
    fn test_placeholder_uses_configured_size() {
        let mut config = AssetConfig::new(Url::parse("http://localhost:8000").unwrap());
        config.placeholder_width = 200;
        config.placeholder_height = 100;
        let service = ImageUrlService::new(config);
        assert_eq!(service.placeholder("X"), placeholder_image("X", 200, 100));
    }
}
