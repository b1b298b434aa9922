//! DTOs for link analytics.

use serde::Serialize;

use super::clicks::{BreakdownEntry, VisitInfo};
use super::links::LinkResponse;
use super::pagination::PaginationMeta;

/// Link information with its click total and visit history.
///
/// `pagination` is present only when the request asked for a page.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub url_info: LinkResponse,
    pub total_clicks: i64,
    pub analytics: Vec<VisitInfo>,
    pub top_referers: Vec<BreakdownEntry>,
    pub top_user_agents: Vec<BreakdownEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}
