//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{error, warn};
use url::Url;

use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Visit Tracking
///
/// The visit (timestamp, client IP, `User-Agent`, `Referer`) is pushed onto a
/// bounded channel and persisted by the visit worker. If the queue is full the
/// visit is dropped with a warning; the redirect is never delayed.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
/// Returns 410 Gone if the link is deactivated or expired.
///
/// The stored URL is kept as submitted; the `Location` header carries its
/// serialized form, so non-ASCII paths and hosts go out percent-encoded.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.registry.resolve(&code).await?;
    let location = Url::parse(&link.original_url).map_err(|e| {
        error!(code = %link.short_code, error = %e, "Stored URL no longer parses");
        AppError::internal("Stored URL is invalid", json!({ "code": link.short_code }))
    })?;

    let event = VisitEvent::new(
        link.id,
        link.short_code,
        state.registry.now(),
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if let Err(e) = state.visit_sender.try_send(event) {
        let (reason, event) = match e {
            TrySendError::Full(event) => ("queue_full", event),
            TrySendError::Closed(event) => ("queue_closed", event),
        };
        warn!(code = %event.short_code, reason, "Visit dropped");
        metrics::counter!("visits_dropped_total", "reason" => reason).increment(1);
    }

    metrics::counter!("redirects_total").increment(1);

    Ok(Redirect::temporary(location.as_str()))
}
