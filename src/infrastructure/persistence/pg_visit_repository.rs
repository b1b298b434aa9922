//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, VisitRecord};
use crate::domain::repositories::{
    DimensionCount, SortOrder, VisitDimension, VisitQuery, VisitRepository,
};
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    visited_at: DateTime<Utc>,
    user_agent: Option<String>,
    ip_address: Option<String>,
    referer: Option<String>,
}

impl From<VisitRow> for VisitRecord {
    fn from(r: VisitRow) -> Self {
        VisitRecord::new(
            r.id,
            r.link_id,
            r.visited_at,
            r.user_agent,
            r.ip_address,
            r.referer,
        )
    }
}

/// PostgreSQL repository for visit records.
///
/// Inserts are plain appends; click totals are `COUNT(*)` at query time, so
/// concurrent redirects never contend on the parent row.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<VisitRecord, AppError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (link_id, visited_at, user_agent, ip_address, referer)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, link_id, visited_at, user_agent, ip_address, referer
            "#,
        )
        .bind(new_visit.link_id)
        .bind(new_visit.visited_at)
        .bind(&new_visit.user_agent)
        .bind(&new_visit.ip_address)
        .bind(&new_visit.referer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visits WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_for_link(
        &self,
        link_id: i64,
        query: VisitQuery,
    ) -> Result<Vec<VisitRecord>, AppError> {
        // LIMIT NULL means no limit in PostgreSQL.
        let sql = match query.order {
            SortOrder::Ascending => {
                r#"
                SELECT id, link_id, visited_at, user_agent, ip_address, referer
                FROM visits
                WHERE link_id = $1
                ORDER BY visited_at ASC, id ASC
                LIMIT $2 OFFSET $3
                "#
            }
            SortOrder::Descending => {
                r#"
                SELECT id, link_id, visited_at, user_agent, ip_address, referer
                FROM visits
                WHERE link_id = $1
                ORDER BY visited_at DESC, id DESC
                LIMIT $2 OFFSET $3
                "#
            }
        };

        let rows = sqlx::query_as::<_, VisitRow>(sql)
            .bind(link_id)
            .bind(query.limit)
            .bind(query.offset.max(0))
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn breakdown(
        &self,
        link_id: i64,
        dimension: VisitDimension,
        limit: i64,
    ) -> Result<Vec<DimensionCount>, AppError> {
        let sql = match dimension {
            VisitDimension::Referer => {
                r#"
                SELECT referer AS value, COUNT(*) AS count
                FROM visits
                WHERE link_id = $1
                GROUP BY referer
                ORDER BY count DESC, value ASC NULLS LAST
                LIMIT $2
                "#
            }
            VisitDimension::UserAgent => {
                r#"
                SELECT user_agent AS value, COUNT(*) AS count
                FROM visits
                WHERE link_id = $1
                GROUP BY user_agent
                ORDER BY count DESC, value ASC NULLS LAST
                LIMIT $2
                "#
            }
        };

        let rows = sqlx::query_as::<_, (Option<String>, i64)>(sql)
            .bind(link_id)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(value, count)| DimensionCount { value, count })
            .collect())
    }
}
