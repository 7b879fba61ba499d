use crate::models::Viewer;
use crate::web::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The viewer named by the trusted proxy header, or an anonymous viewer.
pub struct CurrentViewer(pub Viewer);

impl FromRequestParts<Arc<AppState>> for CurrentViewer {
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let auth = &state.config.auth;
        let username = parts
            .headers
            .get(auth.user_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let viewer = match username {
            Some(name) if auth.is_admin(name) => Viewer::admin(name),
            Some(name) => Viewer::user(name),
            None => Viewer::anonymous(),
        };

        Box::pin(async move { Ok(CurrentViewer(viewer)) })
    }
}
