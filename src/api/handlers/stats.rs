//! Handler for link analytics.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::links::LinkResponse;
use crate::api::dto::pagination::{PaginationMeta, StatsQueryParams};
use crate::api::dto::stats::StatsResponse;
use crate::domain::repositories::VisitQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Returns link information, click total, visit history and breakdowns.
///
/// # Endpoint
///
/// `GET /analytics/{code}` (also served as `GET /stats/{code}`)
///
/// # Query Parameters
///
/// - `page`, `page_size` (optional): page through the visits; without them
///   every visit is returned
/// - `order` (optional): `asc` (default, oldest first) or `desc`
///
/// Deactivated and expired links still report their history.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<StatsResponse>, AppError> {
    let mut query = VisitQuery::all().with_order(params.order.into());

    let paged = params.pagination.is_requested();
    if paged {
        let (offset, limit) = params
            .pagination
            .validate_and_get_offset_limit()
            .map_err(|e| AppError::bad_request(e, json!({})))?;
        query = query.paged(offset, limit);
    }

    let stats = state.registry.stats(&code, query).await?;

    let pagination = paged.then(|| {
        PaginationMeta::new(
            params.pagination.page(),
            params.pagination.page_size(),
            stats.total_clicks,
        )
    });

    let short_url = state.registry.short_url(&stats.link.short_code);

    Ok(Json(StatsResponse {
        url_info: LinkResponse::new(stats.link, short_url),
        total_clicks: stats.total_clicks,
        analytics: stats.visits.into_iter().map(Into::into).collect(),
        top_referers: stats.top_referers.into_iter().map(Into::into).collect(),
        top_user_agents: stats.top_user_agents.into_iter().map(Into::into).collect(),
        pagination,
    }))
}
