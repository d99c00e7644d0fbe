use std::sync::Arc;

use tracing::{info, instrument, warn};

use models::user::Account;

use super::domain::{Claims, LoginSession};
use super::errors::AuthError;
use super::token::TokenIssuer;
use crate::accounts::{domain::CredentialsInput, AccountStore};
use crate::errors::ServiceError;

/// Register/login/authorize workflows independent of web framework
#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<AccountStore>,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(accounts: Arc<AccountStore>, tokens: Arc<TokenIssuer>) -> Self { Self { accounts, tokens } }

    /// Register a new account from possibly-incomplete client input.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountStore, domain::CredentialsInput};
    /// use service::auth::{AuthService, TokenIssuer};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(AccountStore::default()), Arc::new(TokenIssuer::new("secret", "book-reviews-api", 3600)));
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// let acc = rt.block_on(svc.register(CredentialsInput::new("alice", "secret1"))).unwrap();
    /// assert_eq!(acc.username, "alice");
    /// ```
    pub async fn register(&self, input: CredentialsInput) -> Result<Account, ServiceError> {
        let (username, password) = input.require()?;
        self.accounts.register(&username, &password).await
    }

    /// Authenticate and issue a bearer credential.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountStore, domain::CredentialsInput};
    /// use service::auth::{AuthService, TokenIssuer};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(AccountStore::default()), Arc::new(TokenIssuer::new("secret", "book-reviews-api", 3600)));
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// rt.block_on(svc.register(CredentialsInput::new("u", "Passw0rd"))).unwrap();
    /// let session = rt.block_on(svc.login(CredentialsInput::new("u", "Passw0rd"))).unwrap();
    /// assert_eq!(session.username, "u");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn login(&self, input: CredentialsInput) -> Result<LoginSession, ServiceError> {
        let (username, password) = input.require()?;
        if !self.accounts.authenticate(&username, &password).await {
            warn!("login rejected");
            return Err(ServiceError::Unauthorized);
        }
        let role = self.accounts.get(&username).await.map(|a| a.role).unwrap_or_default();
        let issued = self.tokens.issue(&username, role)?;
        info!(expires_at = %issued.expires_at, "user_logged_in");
        Ok(LoginSession { username, role, token: issued.token, expires_at: issued.expires_at })
    }

    /// Verify a presented bearer credential. Runs on every authenticated request.
    pub fn authorize(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;
        self.tokens.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::user::Role;

    fn svc() -> AuthService {
        AuthService::new(Arc::new(AccountStore::default()), Arc::new(TokenIssuer::new("test-secret", "book-reviews-api", 3600)))
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() -> Result<(), anyhow::Error> {
        let svc = svc();
        svc.register(CredentialsInput::new("alice", "secret1")).await?;
        let session = svc.login(CredentialsInput::new("alice", "secret1")).await?;
        assert_eq!(session.username, "alice");
        assert_eq!(session.role, Role::Customer);
        assert!(session.expires_at > Utc::now());

        let claims = svc.authorize(Some(&session.token))?;
        assert_eq!(claims.username(), "alice");
        Ok(())
    }

    #[tokio::test]
    async fn bad_credentials_unauthorized() -> Result<(), anyhow::Error> {
        let svc = svc();
        svc.register(CredentialsInput::new("alice", "secret1")).await?;
        let wrong = svc.login(CredentialsInput::new("alice", "secret2")).await;
        assert!(matches!(wrong, Err(ServiceError::Unauthorized)));
        let unknown = svc.login(CredentialsInput::new("mallory", "secret1")).await;
        assert!(matches!(unknown, Err(ServiceError::Unauthorized)));
        Ok(())
    }

    #[tokio::test]
    async fn login_missing_fields_is_invalid_input() {
        let svc = svc();
        let res = svc.login(CredentialsInput { username: Some("alice".into()), password: None }).await;
        assert!(matches!(res, Err(ServiceError::InvalidInput(ref m)) if m == "Password is required"));
    }

    #[test]
    fn authorize_requires_token() {
        let svc = svc();
        assert!(matches!(svc.authorize(None), Err(AuthError::MissingToken)));
        assert!(matches!(svc.authorize(Some("  ")), Err(AuthError::MissingToken)));
        assert!(matches!(svc.authorize(Some("abc")), Err(AuthError::InvalidToken(_))));
    }
}
