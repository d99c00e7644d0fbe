#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use models::book::Book;
use serde_json::Value;
use service::accounts::AccountStore;
use service::auth::{AuthService, TokenIssuer};
use service::catalog::CatalogStore;
use tower::Service;

use server::routes::{self, ServerState};

pub const SECRET: &str = "test-secret";
pub const ISSUER: &str = "book-reviews-api";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

pub fn issuer() -> TokenIssuer { TokenIssuer::new(SECRET, ISSUER, 3600) }

pub fn state_with(catalog: CatalogStore) -> ServerState {
    ServerState {
        catalog: Arc::new(catalog),
        auth: AuthService::new(Arc::new(AccountStore::default()), Arc::new(issuer())),
    }
}

/// Catalog holding the single book ISBN "123" {title: "T", author: "A"} plus two Austen titles.
pub fn small_catalog() -> CatalogStore {
    CatalogStore::seeded(vec![
        Book::new("123", "A", "T").expect("book"),
        Book::new("8", "Jane Austen", "Pride and Prejudice").expect("book"),
        Book::new("11", "Jane Austen", "Emma").expect("book"),
    ])
}

pub fn build_app() -> Router {
    routes::build_router(state_with(small_catalog()), cors())
}

pub fn build_app_with(catalog: CatalogStore) -> Router {
    routes::build_router(state_with(catalog), cors())
}

pub fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    Ok(b.body(Body::from(serde_json::to_vec(&body)?))?)
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    Ok(b.body(Body::empty())?)
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<Response<Body>> {
    Ok(app.clone().call(req).await?)
}

pub async fn body_json(resp: Response<Body>) -> anyhow::Result<Value> {
    let bytes = resp.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn body_text(resp: Response<Body>) -> anyhow::Result<String> {
    let bytes = resp.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Register + login through the router and return the issued access token.
pub async fn login_as(app: &Router, username: &str, password: &str) -> anyhow::Result<String> {
    let creds = serde_json::json!({"username": username, "password": password});
    let _ = send(app, json_request("POST", "/register", creds.clone(), None)?).await?;
    let resp = send(app, json_request("POST", "/login", creds, None)?).await?;
    let body = body_json(resp).await?;
    Ok(body["accessToken"].as_str().unwrap_or_default().to_string())
}
