//! Visit entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link redirect succeeds.
///
/// Visits are append-only: created once per redirect, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    pub id: i64,
    pub link_id: i64,
    pub visited_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}

impl VisitRecord {
    /// Creates a new VisitRecord instance.
    ///
    /// All client metadata is optional since headers may be absent.
    pub fn new(
        id: i64,
        link_id: i64,
        visited_at: DateTime<Utc>,
        user_agent: Option<String>,
        ip_address: Option<String>,
        referer: Option<String>,
    ) -> Self {
        Self {
            id,
            link_id,
            visited_at,
            user_agent,
            ip_address,
            referer,
        }
    }
}

/// Input data for recording a visit.
///
/// `visited_at` is captured when the redirect happens, not when the record is
/// persisted, so queued visits keep their real timestamps.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub link_id: i64,
    pub visited_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}

impl NewVisit {
    /// Creates a visit with no client metadata.
    pub fn bare(link_id: i64, visited_at: DateTime<Utc>) -> Self {
        Self {
            link_id,
            visited_at,
            user_agent: None,
            ip_address: None,
            referer: None,
        }
    }
}
