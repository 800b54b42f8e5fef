mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_register_then_login_returns_profile() {
    let app = TestApp::new().await;

    let res = app.post("/register", json!({"name": "Rana", "email": "rana@example.com", "password": "cedars"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await, json!({"ok": true}));

    let res = app.post("/login", json!({"email": "rana@example.com", "password": "cedars"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["user"]["name"], "Rana");
    assert_eq!(body["user"]["email"], "rana@example.com");
    assert!(body["user"]["id"].as_i64().is_some());

    // Only id, name and email leave the server.
    let user = body["user"].as_object().unwrap();
    assert_eq!(user.len(), 3);
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("password_hash"));
}

#[tokio::test]
async fn test_password_is_not_stored_in_plain_text() {
    let app = TestApp::new().await;
    app.register_and_login("Karim", "karim@example.com", "byblos-1").await;

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE email = 'karim@example.com'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_ne!(stored, "byblos-1");
    assert!(stored.starts_with("$argon2"));
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let app = TestApp::new().await;

    for payload in [
        json!({"email": "a@example.com", "password": "pw"}),
        json!({"name": "A", "password": "pw"}),
        json!({"name": "A", "email": "a@example.com"}),
        json!({"name": "  ", "email": "a@example.com", "password": "pw"}),
    ] {
        let res = app.post("/register", payload).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_body(res).await["error"], "All fields required");
    }

    assert_eq!(app.count("SELECT COUNT(*) FROM users").await, 0);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.register_and_login("Maya", "maya@example.com", "pw").await;

    let res = app.post("/register", json!({"name": "Other Maya", "email": "maya@example.com", "password": "pw2"})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["error"], "Email already exists");

    assert_eq!(app.count("SELECT COUNT(*) FROM users").await, 1);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    app.register_and_login("Omar", "omar@example.com", "right").await;

    let res = app.post("/login", json!({"email": "omar@example.com"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Email and password required");

    let res = app.post("/login", json!({"email": "omar@example.com", "password": "wrong"})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse_body(res).await["error"], "Invalid credentials");

    // Unknown email gets the same answer as a wrong password.
    let res = app.post("/login", json!({"email": "nobody@example.com", "password": "right"})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse_body(res).await["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "ok");
}

#[tokio::test]
async fn test_password_whitespace_is_significant() {
    let app = TestApp::new().await;

    let res = app.post("/register", json!({"name": "Lina", "email": "lina@example.com", "password": " cedar "})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.post("/login", json!({"email": "lina@example.com", "password": "cedar"})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.post("/login", json!({"email": "lina@example.com", "password": " cedar "})).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Blank is still missing.
    let res = app.post("/login", json!({"email": "lina@example.com", "password": "   "})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
