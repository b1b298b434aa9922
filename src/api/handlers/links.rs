//! Handlers for link listing and deactivation.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::links::{LinkListResponse, LinkResponse, MessageResponse};
use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::error::AppError;
use crate::state::AppState;

/// Lists links newest first, including deactivated ones.
///
/// # Endpoint
///
/// `GET /urls`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total) = tokio::try_join!(
        state.registry.list(offset, limit),
        state.registry.count(),
    )?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.registry.short_url(&link.short_code);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta::new(params.page(), params.page_size(), total),
        items,
    }))
}

/// Deactivates a short link.
///
/// # Endpoint
///
/// `DELETE /url/{code}`
///
/// # Behavior
///
/// - The link is kept; `is_active` becomes false and redirects return 410 Gone.
/// - The code is never reissued, and analytics remain available.
/// - Deactivating an already inactive link succeeds again.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn deactivate_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.registry.deactivate(&code).await?;

    Ok(Json(MessageResponse {
        message: format!("URL {} has been deactivated", code),
    }))
}
