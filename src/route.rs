//! Route definitions for the URL shortener
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers. It creates the Axum router with the application state.

use axum::routing::{get, post};
use axum::Router;

use crate::database::AppState;
use crate::handler::{health_check, redirect_url, shorten_url};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Plain-text liveness message
/// - `GET /{alias}` - Redirects to the original URL (public endpoint)
/// - `POST /api/short` - Shortens a URL
///
/// # Arguments
///
/// * `state` - Application state containing the store handle and base URL
///
/// # Example Usage
///
/// ```no_run
/// # use snip::database::{AppState, UrlStore};
/// # use snip::route::create_app;
/// let store = UrlStore::open("data.db").unwrap();
/// let state = AppState {
///     store,
///     base_url: "http://localhost:8080".to_string(),
/// };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new().route("/short", post(shorten_url));

    Router::new()
        // Liveness probe
        .route("/", get(health_check))
        // Public redirect endpoint - converts short URL to original URL
        .route("/{alias}", get(redirect_url))
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
