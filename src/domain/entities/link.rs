//! Short link entity representing a code-to-URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its lifecycle metadata.
///
/// `short_code` is unique across all links regardless of `is_active`; codes are
/// never recycled after deactivation. Links are never physically deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
            expires_at,
            is_active,
        }
    }

    /// Returns true if the link has an expiry at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
