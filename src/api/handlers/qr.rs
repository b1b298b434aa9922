//! Handler for QR code images.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::qr_renderer::QR_CONTENT_TYPE;
use crate::state::AppState;

/// Returns a QR code encoding the link's short URL.
///
/// # Endpoint
///
/// `GET /qr/{code}`
///
/// Fetching the image does not count as a visit.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
/// Returns 410 Gone if the link is deactivated or expired.
pub async fn qr_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.registry.resolve(&code).await?;
    let short_url = state.registry.short_url(&link.short_code);

    let image = state.qr.render(&short_url).map_err(|e| {
        AppError::internal(
            "Failed to render QR code",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, QR_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}_qr.svg\"", link.short_code),
            ),
        ],
        image,
    ))
}
