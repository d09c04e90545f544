//! Integration tests for admin authentication and session expiry.
//!
//! These tests require:
//! - The retail backend reachable at `TWILL_API_BASE_URL`
//! - The admin service running (cargo run -p twill-admin)
//! - Operator credentials in `TWILL_ADMIN_USERNAME` / `TWILL_ADMIN_PASSWORD`
//!
//! Run with: cargo test -p twill-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use twill_core::UserRole;
use twill_integration_tests::{admin_base_url, session_client, sign_in};

#[tokio::test]
#[ignore = "Requires running admin service and backend credentials"]
async fn test_login_returns_expiration() {
    let client = session_client();
    let body = sign_in(&client).await;

    let _role: UserRole = serde_json::from_value(body["user"]["role"].clone())
        .expect("role was not a valid wire value");
    assert!(body["tokenExpiration"].is_string());
    // The bearer token must never be exposed to the browser
    assert!(body.get("token").is_none());
}

#[tokio::test]
#[ignore = "Requires running admin service and backend credentials"]
async fn test_privileged_route_requires_session() {
    let base_url = admin_base_url();
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base_url}/inventory/summary"))
        .send()
        .await
        .expect("Summary request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("Rejection was not JSON");
    assert_eq!(body["loginRequired"], json!(true));
}

#[tokio::test]
#[ignore = "Requires running admin service and backend credentials"]
async fn test_session_info_reports_validity() {
    let client = session_client();
    sign_in(&client).await;

    let resp = client
        .get(format!("{}/auth/session", admin_base_url()))
        .send()
        .await
        .expect("Session info request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Session info was not JSON");
    assert_eq!(body["valid"], json!(true));
    assert!(body["secondsLeft"].is_number());
}

#[tokio::test]
#[ignore = "Requires running admin service and backend credentials"]
async fn test_logout_invalidates_session() {
    let client = session_client();
    sign_in(&client).await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Logout request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // The session cookie is still in the jar, but its auth state is gone
    let resp = client
        .get(format!("{base_url}/inventory/summary"))
        .send()
        .await
        .expect("Summary request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin service and backend credentials"]
async fn test_bad_credentials_rejected() {
    let client = session_client();

    let resp = client
        .post(format!("{}/auth/login", admin_base_url()))
        .json(&json!({ "username": "nobody", "password": "wrong-password" }))
        .send()
        .await
        .expect("Login request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
