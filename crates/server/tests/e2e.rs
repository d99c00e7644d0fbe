use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

mod support;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = support::build_app();
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().cookie_store(true).build()?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()?.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_login_cookie_authorizes_review() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client()?;
    let username = format!("user_{}", uuid::Uuid::new_v4().simple());

    let res = c.post(format!("{}/register", app.base_url))
        .json(&json!({"username": username, "password": "S3curePass!"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    // Login -> set-cookie, kept by the client's cookie store
    let res = c.post(format!("{}/login", app.base_url))
        .json(&json!({"username": username, "password": "S3curePass!"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.headers().get("set-cookie").is_some());

    let res = c.put(format!("{}/auth/review/123", app.base_url))
        .json(&json!({"review": "great"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["username"], username.as_str());

    // Logout drops the cookie; the protected route refuses again
    let res = c.post(format!("{}/logout", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.delete(format!("{}/auth/review/123", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_protected_without_token_denied() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()?.put(format!("{}/auth/review/123", app.base_url))
        .json(&json!({"review": "x"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}
