use axum::{Router, response::Json as ResponseJson, routing::get};
use utils::response::ApiResponse;

use crate::AppState;

pub mod images;

pub async fn health_check() -> ResponseJson<ApiResponse<String>> {
    ResponseJson(ApiResponse::success("OK".to_string()))
}

pub fn router(state: AppState) -> Router {
    let api = Router::new().merge(images::router(&state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
}
