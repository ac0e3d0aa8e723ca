mod common;

use auth::TokenService;
use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

async fn register(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/api/v1/auth/register")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn login(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/api/v1/auth/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = register(&app, "nicola@example.com", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["role"], "USER");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;
    let response = register(&app, "nicola@example.com", "pass_word!2").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = register(&app, "not-an-email", "pass_word!").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_login_success_issues_verifiable_token() {
    let app = TestApp::spawn().await;

    let registered: serde_json::Value = register(&app, "nicola@example.com", "pass_word!")
        .await
        .json()
        .await
        .unwrap();
    let user_id = registered["data"]["id"].as_str().unwrap().to_string();

    let response = login(&app, "nicola@example.com", "pass_word!").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"]["id"], user_id.as_str());
    assert!(body["data"]["expires_at"].is_string());

    let token = body["data"]["token"].as_str().unwrap();
    let claims = TokenService::new()
        .verify(token, &app.token_settings.secret)
        .expect("Issued token does not verify");
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "nicola@example.com");
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;

    let wrong_password = login(&app, "nicola@example.com", "wrong_password").await;
    let unknown_user = login(&app, "nobody@example.com", "pass_word!").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_user: serde_json::Value = unknown_user.json().await.unwrap();
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_profile_of_authenticated_user() {
    let app = TestApp::spawn().await;

    register(&app, "nicola@example.com", "pass_word!").await;
    let body: serde_json::Value = login(&app, "nicola@example.com", "pass_word!")
        .await
        .json()
        .await
        .unwrap();
    let token = body["data"]["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/v1/users/me", token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], "nicola@example.com");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_profile_of_unknown_subject_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.create_test_token("999999", "ghost@example.com", Duration::minutes(15));

    let response = app
        .get_authenticated("/api/v1/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database"]
async fn test_list_users() {
    let app = TestApp::spawn().await;

    register(&app, "first@example.com", "pass_word!").await;
    register(&app, "second@example.com", "pass_word!").await;
    let token = app.create_test_token("1", "first@example.com", Duration::minutes(15));

    let response = app
        .get_authenticated("/api/v1/users", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("password_hash").is_none()));
}
