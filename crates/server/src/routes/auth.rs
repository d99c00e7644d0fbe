use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::Serialize;

use models::user::Role;
use service::accounts::domain::CredentialsInput;
use service::auth::{domain::Claims, errors::AuthError, AuthService};
use service::catalog::CatalogStore;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<CatalogStore>,
    pub auth: AuthService,
}

#[derive(Serialize)]
pub struct RegisterOutput { pub message: String, pub username: String }

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput {
    pub message: String,
    pub username: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeOutput { pub username: String, pub role: Role, pub expires_at: Option<DateTime<Utc>> }

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::CredentialsRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Missing fields, short password or duplicate username")))]
pub async fn register(
    State(state): State<ServerState>,
    body: Result<Json<CredentialsInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterOutput>), JsonApiError> {
    let Json(input) = body?;
    let account = state.auth.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterOutput { message: "User successfully registered".into(), username: account.username }),
    ))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::CredentialsRequest, responses((status = 200, description = "Logged In", body = crate::openapi::LoginResponse), (status = 400, description = "Missing fields"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<CredentialsInput>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let Json(input) = body?;
    let session = state.auth.login(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    let out = LoginOutput {
        message: "User successfully logged in".into(),
        username: session.username,
        access_token: session.token,
        expires_at: session.expires_at,
    };
    Ok((jar, Json(out)))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", security(("bearer" = [])), responses((status = 200, description = "Current session"), (status = 401, description = "Not logged in"), (status = 403, description = "Invalid or expired token")))]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<MeOutput> {
    Json(MeOutput { expires_at: claims.expires_at(), username: claims.sub, role: claims.role })
}

/// Pull the bearer credential from `Authorization: Bearer <token>`, falling back to the `auth_token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Result<Option<String>, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Authorization header is not valid ASCII".into()))?;
        return match value.strip_prefix("Bearer ") {
            Some(token) => Ok(Some(token.trim().to_string())),
            None => Err(AuthError::InvalidToken("expected Bearer scheme".into())),
        };
    }
    let jar = CookieJar::from_headers(headers);
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty()))
}

/// Middleware for `/auth/*`: verifies the credential (signature, issuer, expiry)
/// and attaches its claims to the request. Missing → 401, invalid/expired → 403.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let token = extract_token(req.headers())?;
    let claims = state.auth.authorize(token.as_deref()).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), err = %e, "bearer credential rejected");
        e
    })?;
    tracing::debug!(username = %claims.sub, "bearer credential accepted");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
