use super::handlers;
use crate::analysis::ToothAnalyzer;
use crate::config::Configuration;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::{BoxError, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::timeout::error::Elapsed;
use tower::ServiceBuilder;

/// Shared handler state. The analyzer is immutable and internally stateless,
/// so concurrent requests never interact.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ToothAnalyzer>,
}

pub fn build_router(state: AppState, configuration: &Configuration) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(Duration::from_secs(configuration.request_timeout_secs))
        .concurrency_limit(configuration.max_concurrent_scans);

    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/health", get(handlers::health))
        .route("/api/analyzer/info", get(handlers::analyzer_info))
        .route("/api/feedback", post(handlers::feedback))
        .layer(middleware)
        .layer(DefaultBodyLimit::max(configuration.max_body_bytes))
        .with_state(state)
}

async fn handle_middleware_error(error: BoxError) -> Response {
    if error.is::<Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "success": false, "error": "request timed out" })),
        )
            .into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": format!("middleware failure: {error}") })),
        )
            .into_response()
    }
}
