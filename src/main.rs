//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Opens the alias store
//! - Starts the HTTP server with graceful shutdown support

use axum::http::{HeaderValue, Method};
use dotenvy::dotenv;
use std::env;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Module declarations
mod database;
mod error;
mod handler;
mod model;
mod qr;
mod route;

use database::{AppState, UrlStore};
use route::create_app;

/// Application entry point
///
/// This asynchronous main function:
/// 1. Loads environment variables from .env file
/// 2. Reads configuration (PORT, DATABASE_URL, URL, ALLOWED_ORIGIN)
/// 3. Opens the alias store
/// 4. Creates the application state and router
/// 5. Starts the HTTP server with graceful shutdown handling
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `DATABASE_URL` - Path to database file (default: "data.db")
/// - `URL` - Public base URL for short links (default: "http://localhost")
/// - `ALLOWED_ORIGIN` - Single allowed CORS origin (default: any origin)
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("snip=debug,tower_http=debug")
        .init();

    // Read and parse the server port from environment
    let port_str = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port_str.parse().unwrap_or(8080);

    // Read the database file path from environment
    let db_name = env::var("DATABASE_URL").unwrap_or_else(|_| "data.db".to_string());

    // Public base URL that short links are built from
    let public_url = env::var("URL").unwrap_or_else(|_| "http://localhost".to_string());
    let base_url = format!("{}:{}", public_url, port);

    // Open the alias store at the specified path
    let store = UrlStore::open(&db_name).expect("Failed to initialize database");

    // Application state captured by every handler
    let state = AppState {
        store,
        base_url,
    };

    // Create the Axum router with request tracing and CORS applied
    let app = create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    // Print startup information
    println!("🚀 Server running at http://localhost:{}", port);
    println!("📂 Using database: {}", db_name);

    // Start the server with graceful shutdown support
    // The server will continue running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Builds the CORS layer from the environment
///
/// When `ALLOWED_ORIGIN` is set (and is a valid header value), only that
/// origin may call the API, with credentials allowed. Otherwise any origin
/// may call with GET/POST.
fn cors_layer() -> CorsLayer {
    let methods = [Method::GET, Method::POST];

    match env::var("ALLOWED_ORIGIN")
        .ok()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_credentials(true),
        None => CorsLayer::new().allow_origin(Any).allow_methods(methods),
    }
}

/// Handles graceful shutdown signals
///
/// This function listens for shutdown signals and returns when one is received:
/// - SIGINT (Ctrl+C) - Interrupt signal from terminal
/// - SIGTERM - Termination signal (common in Docker/Kubernetes)
///
/// When a signal is received the function returns, triggering server
/// shutdown; open connections are allowed to complete and pending database
/// writes are committed before the process exits.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
