//! Repository trait for visit records.

use crate::domain::entities::{NewVisit, VisitRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Sort direction for visit listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Ordering and paging of a visit listing.
///
/// Visits are always ordered by `visited_at` with `id` as tie-breaker, so the
/// same query yields the same sequence.
#[derive(Debug, Clone, Default)]
pub struct VisitQuery {
    pub order: SortOrder,
    pub offset: i64,
    /// `None` returns every visit past `offset`.
    pub limit: Option<i64>,
}

impl VisitQuery {
    /// All visits, oldest first.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the query to one page.
    pub fn paged(mut self, offset: i64, limit: i64) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// Sets the sort direction.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

/// Attribute by which visits can be grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitDimension {
    Referer,
    UserAgent,
}

/// Number of visits sharing one value of a [`VisitDimension`].
///
/// `value` is `None` for visits where the attribute was not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionCount {
    pub value: Option<String>,
    pub count: i64,
}

/// Storage interface for visit records.
///
/// Visits are append-only; concurrent inserts for the same link need no
/// coordination and click totals are always counted at query time.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryVisitRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `link_id` does not reference a link.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record(&self, new_visit: NewVisit) -> Result<VisitRecord, AppError>;

    /// Counts visits for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError>;

    /// Lists visits for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_for_link(
        &self,
        link_id: i64,
        query: VisitQuery,
    ) -> Result<Vec<VisitRecord>, AppError>;

    /// Groups a link's visits by `dimension`, most frequent first, ties broken
    /// by value. At most `limit` groups are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn breakdown(
        &self,
        link_id: i64,
        dimension: VisitDimension,
        limit: i64,
    ) -> Result<Vec<DimensionCount>, AppError>;
}
