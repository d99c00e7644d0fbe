//! Account store: registered users keyed by username.
//!
//! Passwords are stored and compared as plaintext.

pub mod domain;

use models::user::{validate_password_len, Account};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::storage::map_store::MapStore;

pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct AccountStore {
    accounts: MapStore<String, Account>,
    min_password_len: usize,
}

impl Default for AccountStore {
    fn default() -> Self { Self::new(DEFAULT_MIN_PASSWORD_LEN) }
}

impl AccountStore {
    pub fn new(min_password_len: usize) -> Self {
        Self { accounts: MapStore::default(), min_password_len }
    }

    /// Register a new customer account.
    ///
    /// The duplicate check runs before the password length rule.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<Account, ServiceError> {
        match (username.is_empty(), password.is_empty()) {
            (true, true) => return Err(ServiceError::invalid("Both username and password are required")),
            (true, false) => return Err(ServiceError::invalid("Username is required")),
            (false, true) => return Err(ServiceError::invalid("Password is required")),
            (false, false) => {}
        }
        let min_len = self.min_password_len;
        let account = self
            .accounts
            .update_map(|m| {
                if m.contains_key(username) {
                    debug!("username taken");
                    return Err(ServiceError::DuplicateUsername(username.to_string()));
                }
                validate_password_len(password, min_len)?;
                let account = Account::customer(username, password);
                m.insert(username.to_string(), account.clone());
                Ok(account)
            })
            .await?;
        info!(username = %account.username, role = %account.role, "user_registered");
        Ok(account)
    }

    /// True iff an account with exactly this username and password exists.
    pub async fn authenticate(&self, username: &str, password: &str) -> bool {
        self.accounts
            .check(&username.to_string(), |a| a.password == password)
            .await
    }

    pub async fn exists(&self, username: &str) -> bool {
        self.accounts.contains_key(&username.to_string()).await
    }

    pub async fn get(&self, username: &str) -> Option<Account> {
        self.accounts.get(&username.to_string()).await
    }

    pub async fn count(&self) -> usize {
        self.accounts.len().await
    }
}
