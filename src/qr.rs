//! QR code rendering for shortened URLs
//!
//! Renders a URL into a PNG image and wraps it as a base64 data URL, ready
//! to drop into an `<img src=...>` tag on the client.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use thiserror::Error;

/// Failures while rendering a QR code image
#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR encoding error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG encoding error: {0}")]
    Png(#[from] image::ImageError),
}

/// Renders `contents` as a QR code and returns it as a PNG data URL
///
/// The image is re-rendered on every call; nothing is cached.
pub fn data_url(contents: &str) -> Result<String, QrError> {
    let code = QrCode::new(contents.as_bytes())?;
    let image = code.render::<Luma<u8>>().build();

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png.get_ref())
    ))
}
