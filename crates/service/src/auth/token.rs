use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use models::user::Role;
use tracing::debug;

use super::domain::{Claims, IssuedToken};
use super::errors::AuthError;

// ~100 years; keeps `now + ttl` in range.
const MAX_TTL_SECS: i64 = 100 * 365 * 24 * 3600;

/// Signs and verifies bearer credentials with a shared HS256 secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, issuer: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            ttl: Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(MAX_TTL_SECS)),
        }
    }

    pub fn issue(&self, username: &str, role: Role) -> Result<IssuedToken, AuthError> {
        self.issue_at(username, role, Utc::now())
    }

    /// Issue a credential as if the clock read `now`.
    pub fn issue_at(&self, username: &str, role: Role, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::TokenError("expiry out of range".into()))?;
        let claims = Claims {
            sub: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature, issuer and expiry; return the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                debug!(err = %e, "token rejected");
                match e.kind() {
                    ErrorKind::ExpiredSignature => Err(AuthError::Expired),
                    _ => Err(AuthError::InvalidToken(e.to_string())),
                }
            }
        }
    }
}
