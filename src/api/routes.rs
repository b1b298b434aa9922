//! API route configuration.

use crate::api::handlers::{
    deactivate_handler, health_handler, list_links_handler, qr_handler, redirect_handler,
    root_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `GET    /`                 - Service info
/// - `GET    /health`           - Storage and visit queue health
/// - `POST   /shorten`          - Create a short link
/// - `GET    /analytics/{code}` - Link statistics (also `/stats/{code}`)
/// - `GET    /qr/{code}`        - QR code of the short URL
/// - `GET    /urls`             - Paginated link list
/// - `DELETE /url/{code}`       - Deactivate a link
/// - `GET    /{code}`           - Redirect to the original URL
///
/// Static segments win over `/{code}`, which is why those words are reserved
/// as aliases.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/analytics/{code}", get(stats_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/qr/{code}", get(qr_handler))
        .route("/urls", get(list_links_handler))
        .route("/url/{code}", delete(deactivate_handler))
        .route("/{code}", get(redirect_handler))
}
