use super::response::{ApiError, ApiMessage, ApiSuccess};
use super::routes::AppState;
use crate::analysis::decode::decode_image;
use crate::analysis::{AnalysisReport, AnalyzerInfo};
use axum::extract::State;
use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub analyzer_ready: bool,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
    pub rating: Option<u8>,
}

/// Main endpoint: decode the base64 capture, score it, return the report.
/// The scoring is CPU-bound, so it runs on the blocking pool.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiSuccess<AnalysisReport>>, ApiError> {
    let analyzer = state.analyzer.clone();
    let report = tokio::task::spawn_blocking(move || {
        let image = decode_image(&request.image)?;
        analyzer.analyze(&image)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))?
    .inspect_err(|e| debug!("Analysis rejected: {}", e))?;

    info!(
        "Scan {} complete: grade {} in {} ms",
        report.scan_id,
        report.overall.grade.as_str(),
        report.processing_time_ms
    );

    Ok(Json(ApiSuccess::new(
        report,
        "Analysis completed successfully",
    )))
}

/// Fixed liveness payload; no side effects.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        analyzer_ready: state.analyzer.ready(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Static description of the heuristic analyzer.
pub async fn analyzer_info(State(state): State<AppState>) -> Json<ApiSuccess<AnalyzerInfo>> {
    Json(ApiSuccess::new(
        state.analyzer.info(),
        "Analyzer information retrieved",
    ))
}

/// Accepts user feedback and logs it. Nothing is stored.
pub async fn feedback(Json(request): Json<FeedbackRequest>) -> Json<ApiMessage> {
    info!(
        "Feedback received (rating: {:?}): {}",
        request.rating, request.feedback
    );
    Json(ApiMessage::new("Feedback submitted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalyzerConfig, ToothAnalyzer};
    use crate::config::Configuration;
    use crate::server::routes::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use std::io::Cursor;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let analyzer = ToothAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let state = AppState {
            analyzer: Arc::new(analyzer),
        };
        build_router(state, &Configuration::default())
    }

    fn png_data_url(width: u32, height: u32, pixel: [u8; 3]) -> String {
        let rgb = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(width, height, Rgb(pixel));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .expect("Failed to encode test image");
        format!("data:image/png;base64,{}", STANDARD.encode(&buffer))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["analyzer_ready"], true);
    }

    #[tokio::test]
    async fn test_analyze_accepts_clean_capture() {
        let payload = png_data_url(256, 256, [235, 235, 235]);
        let response = test_router()
            .oneshot(json_request(
                "/api/analyze",
                serde_json::json!({ "image": payload }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["result"]["overall"]["grade"], "A+");
        assert_eq!(json["result"]["teeth_detected"], true);
        assert!(json["result"]["metrics"]["yellowness"]["score"].is_number());
    }

    #[tokio::test]
    async fn test_analyze_rejects_garbage_payload() {
        let response = test_router()
            .oneshot(json_request(
                "/api/analyze",
                serde_json::json!({ "image": "!!!not-base64!!!" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_rejects_undersized_capture() {
        let payload = png_data_url(64, 64, [235, 235, 235]);
        let response = test_router()
            .oneshot(json_request(
                "/api/analyze",
                serde_json::json!({ "image": payload }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyzer_info_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/analyzer/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["result"]["metrics"][0], "yellowness");
    }

    #[tokio::test]
    async fn test_feedback_endpoint() {
        let response = test_router()
            .oneshot(json_request(
                "/api/feedback",
                serde_json::json!({ "feedback": "great scan", "rating": 5 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
    }
}
