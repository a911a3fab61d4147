//! Static front-end assets.

use std::path::Path;

use axum::extract::Request;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use moviehunt_core::asset_cache::CachePolicy;
use tower_http::services::ServeDir;

/// Set `Cache-Control` on successful asset responses according to
/// [`CachePolicy::for_path`].
pub async fn cache_headers(req: Request, next: Next) -> Response {
    let policy = CachePolicy::for_path(req.uri().path());
    let mut response = next.run(req).await;

    let status = response.status();
    if status.is_success() || status.as_u16() == 304 {
        if let Ok(value) = HeaderValue::from_str(&policy.header_value()) {
            response.headers_mut().insert(CACHE_CONTROL, value);
        }
    }
    response
}

/// Router serving `dir` for any path no other route claims.
pub fn static_router<S>(dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let files = ServeDir::new(dir).append_index_html_on_directories(true);
    Router::new()
        .fallback_service(files)
        .layer(middleware::from_fn(cache_headers))
}
