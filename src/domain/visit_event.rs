//! Visit event model for asynchronous visit recording.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewVisit;

/// A redirect captured by the HTTP layer, waiting to be persisted.
///
/// Sent over a bounded channel from the redirect handler to
/// [`crate::application::services::visit_worker::run_visit_worker`] so the
/// redirect response never waits on the visit insert.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub link_id: i64,
    pub short_code: String,
    pub visited_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}

impl VisitEvent {
    /// Creates a new visit event.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = VisitEvent::new(
    ///     42,
    ///     "abc123".to_string(),
    ///     Utc::now(),
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     Some("https://google.com"),
    /// );
    /// ```
    pub fn new(
        link_id: i64,
        short_code: String,
        visited_at: DateTime<Utc>,
        ip_address: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            short_code,
            visited_at,
            ip_address,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

impl From<VisitEvent> for NewVisit {
    fn from(event: VisitEvent) -> Self {
        NewVisit {
            link_id: event.link_id,
            visited_at: event.visited_at,
            user_agent: event.user_agent,
            ip_address: event.ip_address,
            referer: event.referer,
        }
    }
}
