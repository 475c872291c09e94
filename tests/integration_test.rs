//! Integration tests for the URL shortener API
//!
//! These tests verify the entire application stack including:
//! - HTTP routing
//! - Request/response handling
//! - Database operations
//! - Error handling

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tower::ServiceExt;

// Import from the main crate
use snip::database::{AppState, UrlStore};
use snip::route::create_app;

const TEST_BASE_URL: &str = "http://localhost:8080";

/// Helper function to create a test application with a temporary database
///
/// The state is returned alongside the router so tests can inspect the
/// store directly (e.g. to check persisted click counts).
fn setup_test_app() -> (axum::Router, AppState, NamedTempFile) {
    // Create a temporary database file
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_db.path().to_str().unwrap();

    // Open the store
    let store = UrlStore::open(db_path).expect("Failed to initialize test database");
    let state = AppState {
        store,
        base_url: TEST_BASE_URL.to_string(),
    };

    // Create the app
    let app = create_app(state.clone());

    (app, state, temp_db)
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

/// Helper to POST a URL to the shorten endpoint
async fn shorten(app: &axum::Router, original_url: &str) -> (StatusCode, Value) {
    let payload = json!({ "originalUrl": original_url });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/short")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response_json(response.into_body()).await;
    (status, body)
}

#[tokio::test]
async fn test_shorten_url_success() {
    let (app, _state, _temp_db) = setup_test_app();

    let (status, body) = shorten(&app, "https://example.com/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "URL generated successfully");
    assert_eq!(body["originalUrl"], "https://example.com/test");

    // Alias is exactly 8 characters
    let short_url = body["shortUrl"].as_str().unwrap();
    assert_eq!(short_url.len(), 8);

    // The full link is built from the configured base URL
    assert_eq!(
        body["myUrl"].as_str().unwrap(),
        format!("{}/{}", TEST_BASE_URL, short_url)
    );

    // The QR code arrives as a PNG data URL
    assert!(body["qrCodeImg"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_shorten_same_url_twice_returns_same_alias() {
    let (app, _state, _temp_db) = setup_test_app();

    let (status, first) = shorten(&app, "https://example.com/duplicate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "URL generated successfully");

    let (status, second) = shorten(&app, "https://example.com/duplicate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "URL already exists");

    // Same alias both times
    assert_eq!(first["shortUrl"], second["shortUrl"]);
    assert_eq!(first["myUrl"], second["myUrl"]);
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let (app, _state, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/short")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "Original URL is required");
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let (app, _state, _temp_db) = setup_test_app();

    let (status, body) = shorten(&app, "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Original URL is required");
}

#[tokio::test]
async fn test_redirect_adds_https_scheme() {
    let (app, _state, _temp_db) = setup_test_app();

    // Submit a URL without a scheme, as the API accepts it
    let (_, body) = shorten(&app, "example.com").await;
    let short_url = body["shortUrl"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/{}", short_url))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "https://example.com"
    );
}

#[tokio::test]
async fn test_redirect_keeps_explicit_scheme() {
    let (app, _state, _temp_db) = setup_test_app();

    let (_, body) = shorten(&app, "http://example.com/page").await;
    let short_url = body["shortUrl"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/{}", short_url))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "http://example.com/page"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (app, _state, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/doesnotexist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["error"], "URL not found");
}

#[tokio::test]
async fn test_redirect_increments_clicks() {
    let (app, state, _temp_db) = setup_test_app();

    let (_, body) = shorten(&app, "https://example.com/counted").await;
    let short_url = body["shortUrl"].as_str().unwrap().to_string();

    // Two successful redirects
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/{}", short_url))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    // The count is persisted, one per redirect
    let record = state
        .store
        .find_by_short_url(&short_url)
        .unwrap()
        .expect("record should exist");
    assert_eq!(record.clicks, 2);
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state, _temp_db) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    assert_eq!(&bytes[..], b"Server is running");
}
