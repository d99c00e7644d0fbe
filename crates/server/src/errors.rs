use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// JSON error body: `{"message": ..., "error": <kind>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, error, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", message)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = %self.message, "request failed");
        } else {
            warn!(status = %self.status, message = %self.message, "request rejected");
        }
        let body = serde_json::json!({"message": self.message, "error": self.error});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::InvalidInput(_) => Self::bad_request(message),
            ServiceError::DuplicateUsername(_) => Self::bad_request(message),
            ServiceError::Unauthorized => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", message),
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", message),
            ServiceError::Unavailable(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", message),
            ServiceError::Token(inner) => inner.into(),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let message = e.to_string();
        match e {
            AuthError::MissingToken => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", message),
            AuthError::InvalidToken(_) | AuthError::Expired => Self::new(StatusCode::FORBIDDEN, "Forbidden", message),
            AuthError::TokenError(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", message),
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        Self::bad_request(r.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
