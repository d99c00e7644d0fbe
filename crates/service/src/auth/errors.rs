use thiserror::Error;

/// Bearer credential failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not logged in")]
    MissingToken,
    #[error("User not authenticated: {0}")]
    InvalidToken(String),
    #[error("Token expired")]
    Expired,
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::InvalidToken(_) => 1002,
            AuthError::Expired => 1003,
            AuthError::TokenError(_) => 1102,
        }
    }
}
