use crate::utils::rest_handlers::download_result_handler;
use crate::utils::rest_handlers::static_page_handler;
use crate::utils::rest_handlers::upload_convert_handler;
use crate::utils::server_config::server_config::ServerConfig;
use axum::extract::DefaultBodyLimit;
use axum::routing::*;
use tokio::sync::Semaphore;

use std::sync::Arc;

pub type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub blocking_limiter: Arc<Semaphore>,
}

pub fn create_app(state: SharedState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(static_page_handler::index_handler))
        .route("/static/js/app.js", get(static_page_handler::app_js_handler))
        .route(
            "/static/css/style.css",
            get(static_page_handler::style_css_handler),
        )
        .route(
            "/upload",
            post(upload_convert_handler::upload_convert_handler),
        )
        .route(
            "/download/{filename}",
            get(download_result_handler::download_result_handler),
        )
        .route("/healthcheck", get(health_check))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// axum handler for any request that fails to match the router routes.
/// This implementation responds with HTTP status code NOT FOUND (404).
pub async fn fallback(uri: axum::http::Uri) -> impl axum::response::IntoResponse {
    eprint!("fallback");
    (axum::http::StatusCode::NOT_FOUND, uri.to_string())
}

pub async fn health_check() -> Result<String, axum::http::StatusCode> {
    Ok("Health : Ok".into())
}
