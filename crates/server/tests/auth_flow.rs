use axum::http::StatusCode;
use serde_json::json;

mod support;
use support::*;

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let app = build_app();
    let creds = json!({"username": "alice", "password": "secret1"});

    // Register
    let resp = send(&app, json_request("POST", "/register", creds.clone(), None)?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await?;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["message"], "User successfully registered");

    // Login
    let resp = send(&app, json_request("POST", "/login", creds, None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    // Must set cookie
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(cookie.starts_with("auth_token="));
    let body = body_json(resp).await?;
    assert_eq!(body["username"], "alice");
    let token = body["accessToken"].as_str().unwrap_or_default();
    assert_eq!(issuer().verify(token)?.sub, "alice");
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_username() -> anyhow::Result<()> {
    let app = build_app();
    let creds = json!({"username": "bob", "password": "secret1"});
    let first = send(&app, json_request("POST", "/register", creds.clone(), None)?).await?;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = send(&app, json_request("POST", "/register", creds, None)?).await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(second).await?["message"],
        "Username already exists. Please choose a different username."
    );
    Ok(())
}

#[tokio::test]
async fn whitespace_username_counts_as_present() -> anyhow::Result<()> {
    let app = build_app();
    let resp = send(&app, json_request("POST", "/register", json!({"username": "  ", "password": "secret1"}), None)?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = send(&app, json_request("POST", "/register", json!({"username": "", "password": "secret1"}), None)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await?["message"], "Username is required");
    Ok(())
}

#[tokio::test]
async fn test_register_missing_fields_and_short_password() -> anyhow::Result<()> {
    let app = build_app();
    let cases = [
        (json!({}), "Both username and password are required"),
        (json!({"password": "secret1"}), "Username is required"),
        (json!({"username": "carol"}), "Password is required"),
        (json!({"username": "carol", "password": "short"}), "Password must be at least 6 characters long"),
    ];
    for (body, message) in cases {
        let resp = send(&app, json_request("POST", "/register", body, None)?).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await?["message"], message);
    }
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    let app = build_app();
    let _ = send(&app, json_request("POST", "/register", json!({"username": "dave", "password": "StrongPass123"}), None)?).await?;

    let resp = send(&app, json_request("POST", "/login", json!({"username": "dave", "password": "wrong"}), None)?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await?["message"], "Invalid username or password");

    let resp = send(&app, json_request("POST", "/login", json!({"username": "dave"}), None)?).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_me_reports_token_subject() -> anyhow::Result<()> {
    let app = build_app();
    let token = login_as(&app, "erin", "secret1").await?;
    let resp = send(&app, empty_request("GET", "/auth/me", Some(&token))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["username"], "erin");
    assert_eq!(body["role"], "customer");
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_cookie() -> anyhow::Result<()> {
    let app = build_app();
    let resp = send(&app, empty_request("POST", "/logout", None)?).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    Ok(())
}
