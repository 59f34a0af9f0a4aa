use crate::domain::error::FolpError;
use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Respond with an already serialized JSON body, byte for byte
pub fn json_body(body: String) -> Response {
    (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response()
}

pub fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for FolpError {
    fn into_response(self) -> Response {
        match &self {
            FolpError::Validation(_) | FolpError::InvalidJson(_) | FolpError::InvalidWolframType(_) => {
                error_body(StatusCode::BAD_REQUEST, &self.to_string())
            }
            FolpError::UpstreamFailed { details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": self.to_string(), "details": details })),
            )
                .into_response(),
            _ => {
                if self.is_upstream() {
                    tracing::warn!(error = %self, "upstream failure reached the caller");
                } else {
                    tracing::error!(error = %self, "request failed");
                }
                error_body(StatusCode::INTERNAL_SERVER_ERROR, &self.to_string())
            }
        }
    }
}
