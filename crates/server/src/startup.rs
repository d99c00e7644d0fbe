use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::{
    accounts::AccountStore,
    auth::{AuthService, TokenIssuer},
    runtime,
};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the stores and auth service from configuration.
pub async fn build_state(cfg: &AppConfig) -> ServerState {
    let secret = if cfg.auth.uses_dev_secret() {
        warn!("no JWT secret configured (auth.jwt_secret / JWT_SECRET); using development default");
        DEV_JWT_SECRET.to_string()
    } else {
        cfg.auth.jwt_secret.clone()
    };
    let tokens = Arc::new(TokenIssuer::new(&secret, &cfg.auth.issuer, cfg.auth.token_ttl_secs));
    let accounts = Arc::new(AccountStore::new(cfg.auth.min_password_len));
    let catalog = Arc::new(runtime::load_catalog(cfg.catalog.seed_path.as_deref()).await);

    ServerState { catalog, auth: AuthService::new(accounts, tokens) }
}

/// Build the router for an already-loaded configuration.
pub async fn build_app(cfg: &AppConfig) -> Router {
    let state = build_state(cfg).await;
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let bind = cfg.server.bind_addr();
    let app = build_app(&cfg).await;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {bind}: {e}")))?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting bookshelf server");
    axum::serve(listener, app).await?;
    Ok(())
}
