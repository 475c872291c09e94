//! Handler-boundary error type
//!
//! Store and rendering failures bubble up as plain `Result` values; this
//! module maps them to HTTP responses in exactly one place. Clients only
//! ever see three shapes: a 400 for missing input, a 404 for an unknown
//! alias, and a generic 500 for everything internal. Failure detail is
//! logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;
use crate::qr::QrError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Original URL is required")]
    MissingOriginalUrl,

    #[error("URL not found")]
    AliasNotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Qr(#[from] QrError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingOriginalUrl => {
                (StatusCode::BAD_REQUEST, "Original URL is required")
            }
            AppError::AliasNotFound => (StatusCode::NOT_FOUND, "URL not found"),
            AppError::Store(err) => {
                tracing::error!("store failure: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
            AppError::Qr(err) => {
                tracing::error!("QR rendering failure: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
