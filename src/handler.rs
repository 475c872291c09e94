//! HTTP request handlers for the URL shortener
//!
//! This module implements the core business logic for:
//! - Shortening a URL (with deduplication and QR code rendering)
//! - Redirecting an alias to its original destination, counting the click
//! - Reporting liveness

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use rand::{distr::Alphanumeric, Rng};
use tracing::info;

use crate::database::AppState;
use crate::error::AppError;
use crate::model::{ShortenRequest, ShortenResponse};
use crate::qr;

/// Length of generated aliases
const ALIAS_LEN: usize = 8;

/// Shortens a URL, reusing an existing alias for repeat submissions
///
/// This handler:
/// 1. Rejects an absent or empty `originalUrl` with a 400
/// 2. Looks the URL up by exact string match
/// 3. If known: re-renders the QR code and returns the alias that was
///    already allocated, without writing anything
/// 4. If new: generates a random 8-character alias, renders the QR code,
///    and persists the record with zero clicks
///
/// The QR code is rendered before the insert, so a rendering failure never
/// leaves a stored record behind.
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{ message, myUrl, qrCodeImg, shortUrl, originalUrl }`
/// - **400 Bad Request** - `originalUrl` missing or empty
/// - **500 Internal Server Error** - store or rendering failure
///
/// # Note
///
/// The alias is not checked for collisions; at 8 alphanumeric characters a
/// collision would overwrite an existing record's table entry. The alias
/// space (62^8) keeps this out of practical reach.
pub async fn shorten_url(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    let original_url = payload
        .original_url
        .filter(|url| !url.is_empty())
        .ok_or(AppError::MissingOriginalUrl)?;

    info!("received URL to shorten: {original_url}");

    // Repeat submission: hand back the alias allocated the first time
    if let Some(existing) = state.store.find_by_original_url(&original_url)? {
        let my_url = format!("{}/{}", state.base_url, existing.short_url);
        let qr_code_img = qr::data_url(&existing.original_url)?;

        info!(
            "using existing short URL: {} for original URL: {}",
            my_url, existing.original_url
        );

        return Ok(Json(ShortenResponse {
            message: "URL already exists".to_string(),
            my_url,
            qr_code_img,
            short_url: existing.short_url,
            original_url: existing.original_url,
        }));
    }

    // Generate a random 8-character alias
    let alias: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ALIAS_LEN)
        .map(char::from)
        .collect();

    let my_url = format!("{}/{}", state.base_url, alias);
    let qr_code_img = qr::data_url(&original_url)?;

    let record = state.store.create(original_url, alias)?;

    info!(
        "created new short URL: {} for original URL: {}",
        my_url, record.original_url
    );

    Ok(Json(ShortenResponse {
        message: "URL generated successfully".to_string(),
        my_url,
        qr_code_img,
        short_url: record.short_url,
        original_url: record.original_url,
    }))
}

/// Redirects an alias to its original destination
///
/// When a user visits `http://localhost:8080/x8FbQ2wZ`, this handler:
/// 1. Looks up "x8FbQ2wZ" in the store
/// 2. Increments the record's click count (persisted before responding)
/// 3. Sends a 302 Found redirect to the stored URL, prefixing `https://`
///    when the stored value carries no scheme
///
/// # Path Parameters
///
/// - `alias` - The 8-character short URL identifier
///
/// # Response
///
/// - **302 Found** - `Location` set to the scheme-normalized original URL
/// - **404 Not Found** - alias does not exist
/// - **500 Internal Server Error** - store failure
pub async fn redirect_url(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .store
        .find_by_short_url(&alias)?
        .ok_or(AppError::AliasNotFound)?;

    state.store.increment_clicks(&record)?;

    let target = normalize_scheme(&record.original_url);
    info!("redirecting to: {target}");

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}

/// Liveness endpoint
pub async fn health_check() -> &'static str {
    "Server is running"
}

/// Prefixes `https://` when the stored URL carries no scheme
///
/// Stored URLs are kept exactly as submitted, so "example.com/page" is a
/// valid record; browsers need an absolute URL in the Location header.
fn normalize_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}
