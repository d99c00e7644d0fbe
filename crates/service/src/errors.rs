use thiserror::Error;

use crate::auth::errors::AuthError;

/// Store and service outcomes surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    /// The payload names the username for logs; the client message does not.
    #[error("Username already exists. Please choose a different username.")]
    DuplicateUsername(String),
    #[error("Invalid username or password")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
    #[error(transparent)]
    Token(#[from] AuthError),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::InvalidInput(msg.into()) }

    pub fn not_found(msg: impl Into<String>) -> Self { Self::NotFound(msg.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidInput(_) => 2001,
            ServiceError::DuplicateUsername(_) => 2002,
            ServiceError::Unauthorized => 2003,
            ServiceError::NotFound(_) => 2004,
            ServiceError::Unavailable(_) => 2101,
            ServiceError::Token(e) => e.code(),
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => ServiceError::InvalidInput(msg),
            models::errors::ModelError::Seed(msg) => ServiceError::Unavailable(msg),
        }
    }
}
