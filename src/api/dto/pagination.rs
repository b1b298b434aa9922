//! Pagination and ordering query parameters.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::repositories::SortOrder;

pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse numbers from query strings, which keeps working
/// when the struct is flattened into another query type.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Returns true if the client asked for a specific page.
    pub fn is_requested(&self) -> bool {
        self.page.is_some() || self.page_size.is_some()
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates pagination parameters and converts to offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 25
    ///
    /// # Returns
    ///
    /// `(offset, limit)`, or a message if `page` is 0 or `page_size` is
    /// outside `1..=1000`.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let page_size = self.page_size();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {}", MAX_PAGE_SIZE));
        }

        let offset = (page as i64 - 1) * page_size as i64;
        let limit = page_size as i64;

        Ok((offset, limit))
    }
}

/// Sort direction as accepted in query strings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderParam {
    #[default]
    Asc,
    Desc,
}

impl From<OrderParam> for SortOrder {
    fn from(order: OrderParam) -> Self {
        match order {
            OrderParam::Asc => SortOrder::Ascending,
            OrderParam::Desc => SortOrder::Descending,
        }
    }
}

/// Query parameters of the analytics endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde(default)]
    pub order: OrderParam,
}

/// Pagination metadata included in paged responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = (total_items.max(0) as u64).div_ceil(page_size.max(1) as u64) as u32;
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}
