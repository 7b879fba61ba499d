use super::handlers;
use super::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/pages/new", get(handlers::pages::new_page))
        .route("/pages/new", post(handlers::pages::create_page))
        .route("/pages/preview", post(handlers::pages::preview))
        .route("/pages/alltags", get(handlers::pages::all_tags))
        .route("/pages/tag/:tag", get(handlers::pages::tag))
        .route("/pages/:slug", get(handlers::pages::page))
}

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/slug", get(handlers::api::slug))
}
