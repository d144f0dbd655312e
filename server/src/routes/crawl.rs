use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::crawl_handlers::{crawl_form, crawl_json, health, index};
use crate::handlers::download_handlers::download;
use crate::state::AppState;

pub fn crawl_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/crawl", post(crawl_form))
        .route("/download/{id}/{kind}", get(download))
        .route("/api/crawl", post(crawl_json))
        .route("/health", get(health))
        .with_state(state)
}
