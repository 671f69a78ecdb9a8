//! Routes that resolve stored image paths for any UI layer.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Json as ResponseJson, Response},
    routing::{get, post},
};
use catalog::models::{category::Category, product::Product};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::{
    image::{DEFAULT_PLACEHOLDER_TEXT, image_paths, main_image_path, placeholder_svg},
    response::ApiResponse,
};

use crate::{AppState, error::ApiError};

const MAX_PLACEHOLDER_SIZE: u32 = 4096;

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawQuery {
    pub raw: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceholderQuery {
    pub text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct ResolvedImage {
    pub url: String,
    pub absolute_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
pub struct ProductImageUrls {
    pub main: String,
    pub gallery: Vec<String>,
}

/// GET /api/images/resolve?path=
pub async fn resolve_image(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<ResponseJson<ApiResponse<ResolvedImage>>, ApiError> {
    let Query(query) = query?;

    let url = state.images.resolve(query.path.as_deref());
    let absolute_url = state.images.absolute_url(&url);

    Ok(ResponseJson(ApiResponse::success(ResolvedImage {
        url,
        absolute_url,
    })))
}

/// GET /api/images/main?raw=
pub async fn main_image(
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Result<ResponseJson<ApiResponse<Option<String>>>, ApiError> {
    let Query(query) = query?;
    Ok(ResponseJson(ApiResponse::success(main_image_path(
        query.raw.as_deref(),
    ))))
}

/// GET /api/images/gallery?raw=
pub async fn gallery(
    State(state): State<AppState>,
    query: Result<Query<RawQuery>, QueryRejection>,
) -> Result<ResponseJson<ApiResponse<Vec<String>>>, ApiError> {
    let Query(query) = query?;

    let mut urls: Vec<String> = image_paths(query.raw.as_deref())
        .iter()
        .map(|path| state.images.resolve(Some(path)))
        .collect();
    if urls.is_empty() {
        urls.push(state.images.placeholder(DEFAULT_PLACEHOLDER_TEXT));
    }

    Ok(ResponseJson(ApiResponse::success(urls)))
}

/// GET /api/images/placeholder?text=&width=&height=
/// Serves the placeholder SVG itself
pub async fn placeholder(
    State(state): State<AppState>,
    query: Result<Query<PlaceholderQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let config = state.images.config();

    let width = checked_size("width", query.width.unwrap_or(config.placeholder_width))?;
    let height = checked_size("height", query.height.unwrap_or(config.placeholder_height))?;
    let text = query
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_PLACEHOLDER_TEXT);

    let svg = placeholder_svg(text, width, height);
    Ok(([(CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

fn checked_size(name: &str, value: u32) -> Result<u32, ApiError> {
    if (1..=MAX_PLACEHOLDER_SIZE).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!(
            "{name} must be between 1 and {MAX_PLACEHOLDER_SIZE}"
        )))
    }
}

/// POST /api/images/product
pub async fn product_images(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<ProductImageUrls>>, ApiError> {
    let Json(product) = payload?;

    let urls = ProductImageUrls {
        main: state.images.product_image_url(&product),
        gallery: state.images.product_gallery_urls(&product),
    };

    Ok(ResponseJson(ApiResponse::success(urls)))
}

/// POST /api/images/category
pub async fn category_image(
    State(state): State<AppState>,
    payload: Result<Json<Category>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<String>>, ApiError> {
    let Json(category) = payload?;
    Ok(ResponseJson(ApiResponse::success(
        state.images.category_image_url(&category),
    )))
}

/// POST /api/images/admin/category
pub async fn admin_category_image(
    State(state): State<AppState>,
    payload: Result<Json<Category>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<String>>, ApiError> {
    let Json(category) = payload?;
    Ok(ResponseJson(ApiResponse::success(
        state.images.admin_category_image_url(&category),
    )))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().nest(
        "/images",
        Router::new()
            .route("/resolve", get(resolve_image))
            .route("/main", get(main_image))
            .route("/gallery", get(gallery))
            .route("/placeholder", get(placeholder))
            .route("/product", post(product_images))
            .route("/category", post(category_image))
            .route("/admin/category", post(admin_category_image)),
    )
}
