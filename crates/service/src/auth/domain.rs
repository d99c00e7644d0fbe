use chrono::{DateTime, Utc};
use models::user::Role;
use serde::{Deserialize, Serialize};

/// JWT payload carried by a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl Claims {
    pub fn username(&self) -> &str { &self.sub }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Login result (session)
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub username: String,
    pub role: Role,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
