//! DTOs describing short links in responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pagination::PaginationMeta;
use crate::domain::entities::ShortLink;

/// Public view of a short link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl LinkResponse {
    pub fn new(link: ShortLink, short_url: String) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
            created_at: link.created_at,
            expires_at: link.expires_at,
            is_active: link.is_active,
        }
    }
}

/// Paginated list of links, newest first.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkResponse>,
}

/// Confirmation returned after deactivating a link.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
