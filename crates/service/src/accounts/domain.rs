use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Username/password pair as submitted by a client. Either field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsInput {
    pub fn new(username: &str, password: &str) -> Self {
        Self { username: Some(username.to_string()), password: Some(password.to_string()) }
    }

    /// Presence check shared by register and login.
    pub fn require(self) -> Result<(String, String), ServiceError> {
        let username = self.username.filter(|u| !u.is_empty());
        let password = self.password.filter(|p| !p.is_empty());
        match (username, password) {
            (Some(u), Some(p)) => Ok((u, p)),
            (None, None) => Err(ServiceError::invalid("Both username and password are required")),
            (None, Some(_)) => Err(ServiceError::invalid("Username is required")),
            (Some(_), None) => Err(ServiceError::invalid("Password is required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(input: CredentialsInput) -> String {
        match input.require() {
            Err(ServiceError::InvalidInput(m)) => m,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_are_named() {
        assert_eq!(message(CredentialsInput::default()), "Both username and password are required");
        assert_eq!(
            message(CredentialsInput { username: None, password: Some("secret1".into()) }),
            "Username is required"
        );
        assert_eq!(
            message(CredentialsInput { username: Some("alice".into()), password: Some(String::new()) }),
            "Password is required"
        );
        assert_eq!(
            message(CredentialsInput { username: Some(String::new()), password: None }),
            "Both username and password are required"
        );
    }

    #[test]
    fn whitespace_counts_as_present() {
        let (u, p) = CredentialsInput::new("   ", " ").require().unwrap();
        assert_eq!((u.as_str(), p.as_str()), ("   ", " "));
    }

    #[test]
    fn present_fields_pass_through() {
        let (u, p) = CredentialsInput::new("alice", "secret1").require().unwrap();
        assert_eq!((u.as_str(), p.as_str()), ("alice", "secret1"));
    }
}
