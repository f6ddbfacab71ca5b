use crate::utils::error::ConverterError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

impl IntoResponse for ConverterError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_client_error() {
            tracing::warn!(code = self.error_code(), "Rejected request: {}", self);
        } else {
            tracing::error!(code = self.error_code(), "Request failed: {}", self);
        }

        let mut body = json!({
            "error": self.error_code(),
            "message": self.user_friendly_message(),
        });
        if let ConverterError::InvalidUnit { rejected, .. } = &self {
            body["invalid_units"] = json!(rejected);
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ConverterError {
    fn from(rejection: JsonRejection) -> Self {
        ConverterError::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}
