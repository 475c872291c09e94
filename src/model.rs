//! Data models for the URL shortener application
//!
//! This module defines the stored record structure and the request/response
//! payloads of the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a URL record stored in the database
///
/// One record per shortened URL. Only `clicks` is ever mutated after
/// creation; the URLs themselves are immutable.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UrlRecord {
    /// The original long URL exactly as submitted (not normalized; the
    /// scheme may be absent)
    pub original_url: String,

    /// The 8-character alias identifying this record (e.g. "x8FbQ2wZ")
    pub short_url: String,

    /// Timestamp when this record was created
    pub created_at: DateTime<Utc>,

    /// Number of times this alias has been redirected
    /// Defaults to 0 if not present during deserialization
    #[serde(default)]
    pub clicks: u64,
}

/// Request payload for shortening a URL
///
/// # Example
/// ```json
/// { "originalUrl": "https://example.com/very/long/url" }
/// ```
///
/// The field is optional so that an empty body still reaches the handler,
/// which rejects it with a 400 rather than a generic deserialization error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to be shortened
    pub original_url: Option<String>,
}

/// Response returned by the shorten endpoint
///
/// The same shape is used whether the URL was just created or already known;
/// `message` distinguishes the two cases.
///
/// # Example
/// ```json
/// {
///   "message": "URL generated successfully",
///   "myUrl": "http://localhost:8080/x8FbQ2wZ",
///   "qrCodeImg": "data:image/png;base64,iVBOR...",
///   "shortUrl": "x8FbQ2wZ",
///   "originalUrl": "https://example.com/very/long/url"
/// }
/// ```
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    /// "URL generated successfully" or "URL already exists"
    pub message: String,

    /// The complete short link, built from the configured base URL
    pub my_url: String,

    /// QR code of the original URL, as a PNG data URL
    pub qr_code_img: String,

    /// The bare 8-character alias
    pub short_url: String,

    /// The original URL that was shortened
    pub original_url: String,
}
