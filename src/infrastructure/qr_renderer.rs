//! QR code rendering for short URLs.

use qrcode::{EcLevel, QrCode, render::svg};

/// Content type of the images produced by [`QrRenderer`].
pub const QR_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("Cannot encode empty text")]
    EmptyInput,

    #[error("QR encoding failed: {0}")]
    Encoding(#[from] qrcode::types::QrError),
}

/// Encodes text as a QR code SVG image.
///
/// Deterministic: the same text and size always yield the same bytes.
#[derive(Debug, Clone, Copy)]
pub struct QrRenderer {
    min_dimension: u32,
}

impl QrRenderer {
    pub fn new(min_dimension: u32) -> Self {
        Self { min_dimension }
    }

    /// Renders `text` as a square SVG of at least `min_dimension` pixels,
    /// with a quiet zone and medium error correction.
    pub fn render(&self, text: &str) -> Result<Vec<u8>, QrError> {
        if text.is_empty() {
            return Err(QrError::EmptyInput);
        }

        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)?;

        let image = code
            .render::<svg::Color<'_>>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .quiet_zone(true)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(image.into_bytes())
    }
}
