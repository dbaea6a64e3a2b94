use crate::error::AnalysisError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::json;

/// Success envelope for endpoints that return a payload.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub result: T,
    pub message: String,
}

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(result: T, message: &str) -> Self {
        Self {
            success: true,
            result,
            message: message.to_string(),
        }
    }
}

/// Success envelope for endpoints with no payload.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Request-level failure surfaced as a structured JSON body; the handler
/// never panics on a bad capture.
#[derive(Debug)]
pub enum ApiError {
    Analysis(AnalysisError),
    Internal(String),
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        ApiError::Analysis(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Analysis(AnalysisError::InvalidImage(message)) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            ApiError::Analysis(error @ AnalysisError::AnalyzerUnavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, error.to_string())
            }
            ApiError::Analysis(error @ AnalysisError::InvalidConfig(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            }
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        (
            status,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_image_maps_to_bad_request() {
        let response =
            ApiError::Analysis(AnalysisError::InvalidImage("bad capture".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unavailable_maps_to_service_unavailable() {
        let response = ApiError::Analysis(AnalysisError::AnalyzerUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ApiSuccess::new(42, "done");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["result"], 42);
        assert_eq!(json["message"], "done");
    }
}
