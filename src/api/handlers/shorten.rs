//! Handler for link creation.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::links::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "custom_alias": "my-link",   // optional
///   "expires_in_days": 7         // optional, or "expires_at": "<RFC 3339>"
/// }
/// ```
///
/// # Response
///
/// 201 Created with the link, including `short_url` and `is_active`.
///
/// # Errors
///
/// - 400 for an invalid URL, alias or expiry
/// - 409 if the custom alias is already taken
/// - 503 if no free generated code could be found
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.registry.create(payload.into()).await?;
    let short_url = state.registry.short_url(&link.short_code);

    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}
