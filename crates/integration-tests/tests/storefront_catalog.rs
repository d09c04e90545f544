//! Integration tests for the public storefront catalog.
//!
//! These tests require:
//! - The retail backend reachable at `TWILL_API_BASE_URL`
//! - The storefront running (cargo run -p twill-storefront)
//!
//! Run with: cargo test -p twill-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use twill_integration_tests::storefront_base_url;

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_health_endpoints() {
    let base_url = storefront_base_url();
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Health request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Readiness request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_product_listing_shape() {
    let base_url = storefront_base_url();

    let resp = reqwest::get(format!("{base_url}/products"))
        .await
        .expect("Listing request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Listing was not JSON");
    assert!(body["products"].is_array());
    assert!(body["page"].is_number());
    assert!(body["totalPages"].is_number());
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_search_filter_passthrough() {
    let base_url = storefront_base_url();

    // A search narrows the result set; every hit should mention the term
    // somewhere the backend indexes (name, sku, description)
    let resp = reqwest::get(format!("{base_url}/products?search=shirt&limit=5"))
        .await
        .expect("Search request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Search result was not JSON");
    let products = body["products"].as_array().expect("products array");
    assert!(products.len() <= 5);
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_unknown_product_is_404() {
    let base_url = storefront_base_url();

    let resp = reqwest::get(format!("{base_url}/products/99999999"))
        .await
        .expect("Detail request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront and backend"]
async fn test_home_payload() {
    let base_url = storefront_base_url();

    let resp = reqwest::get(format!("{base_url}/"))
        .await
        .expect("Home request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Home payload was not JSON");
    assert!(body["featured"].is_array());
    assert!(body["categories"].is_array());
}
