//! Shared helpers for Twill integration tests.
//!
//! These tests drive running storefront/admin instances over HTTP. They are
//! `#[ignore]`d by default because they need:
//! - The retail backend reachable at `TWILL_API_BASE_URL`
//! - `cargo run -p twill-storefront` and/or `cargo run -p twill-admin`
//! - Operator credentials in `TWILL_ADMIN_USERNAME` / `TWILL_ADMIN_PASSWORD`

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the storefront service (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin service (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A cookie-holding client for session-based admin tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Sign in to the admin service with the operator credentials from the
/// environment; the session cookie lands in the client's jar.
///
/// # Panics
///
/// Panics if credentials are missing or the login request fails.
pub async fn sign_in(client: &Client) -> Value {
    let username =
        std::env::var("TWILL_ADMIN_USERNAME").expect("TWILL_ADMIN_USERNAME must be set");
    let password =
        std::env::var("TWILL_ADMIN_PASSWORD").expect("TWILL_ADMIN_PASSWORD must be set");

    let response = client
        .post(format!("{}/auth/login", admin_base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Login request failed");

    assert!(
        response.status().is_success(),
        "login failed with status {}",
        response.status()
    );

    response.json().await.expect("Login response was not JSON")
}
