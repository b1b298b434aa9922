//! DTOs for recorded visits.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::VisitRecord;
use crate::domain::repositories::DimensionCount;

/// Individual visit information.
///
/// Optional fields are omitted from JSON when `None`.
#[derive(Debug, Serialize)]
pub struct VisitInfo {
    pub visited_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
}

impl From<VisitRecord> for VisitInfo {
    fn from(visit: VisitRecord) -> Self {
        Self {
            visited_at: visit.visited_at,
            user_agent: visit.user_agent,
            ip_address: visit.ip_address,
            referer: visit.referer,
        }
    }
}

/// Visit count for one referer or user agent; `value` is null when the header
/// was absent.
#[derive(Debug, Serialize)]
pub struct BreakdownEntry {
    pub value: Option<String>,
    pub count: i64,
}

impl From<DimensionCount> for BreakdownEntry {
    fn from(group: DimensionCount) -> Self {
        Self {
            value: group.value,
            count: group.count,
        }
    }
}
