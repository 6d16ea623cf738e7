use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use tracing::error;

/// JSON error body: `{ statusCode, message, error }`.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    message: serde_json::Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<serde_json::Value>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => Self::new(
                StatusCode::BAD_REQUEST,
                errors.into_iter().map(|f| f.message).collect::<Vec<_>>(),
            ),
            ServiceError::Model(ModelError::Validation(msg)) => Self::new(StatusCode::BAD_REQUEST, vec![msg]),
            e @ ServiceError::Conflict(_) => Self::new(StatusCode::CONFLICT, e.to_string()),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            other => Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        }
        let body = serde_json::json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
            "error": self.status.canonical_reason().unwrap_or("Error"),
        });
        (self.status, Json(body)).into_response()
    }
}
