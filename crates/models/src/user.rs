use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered account. The password is kept as plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl Account {
    pub fn customer(username: &str, password: &str) -> Self {
        Self { username: username.to_string(), password: password.to_string(), role: Role::Customer }
    }
}

pub fn validate_password_len(password: &str, min_len: usize) -> Result<(), ModelError> {
    if password.chars().count() < min_len {
        return Err(ModelError::Validation(format!("Password must be at least {min_len} characters long")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"customer\"");
        assert_eq!(Role::Customer.to_string(), "customer");
    }

    #[test]
    fn password_never_serialized() {
        let a = Account::customer("alice", "hunter22");
        let v = serde_json::to_value(&a).unwrap();
        assert!(v.get("password").is_none());
        assert_eq!(v["role"], "customer");
    }

    #[test]
    fn password_length_counts_chars() {
        assert!(validate_password_len("abcde", 6).is_err());
        assert!(validate_password_len("abcdef", 6).is_ok());
        assert!(validate_password_len("ééééé", 6).is_err());
    }
}
