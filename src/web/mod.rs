mod error;
mod extractors;
mod handlers;
mod routes;
mod state;

pub use error::{AppError, AppResult};
pub use extractors::CurrentViewer;
pub use state::AppState;

use crate::Config;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// The full application router, without a listener attached.
pub fn router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.config.assets.dir);

    Router::new()
        .merge(routes::page_routes())
        .merge(routes::api_routes())
        .nest_service("/assets", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
