use serde::{Deserialize, Serialize};
use validator::Validate;

/// Highest page a listing accepts.
pub const MAX_PAGE: i64 = 1_000_000;

/// Query parameters accepted by every paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParam {
    #[validate(range(min = 1, max = 1_000_000, message = "page must be between 1 and 1000000"))]
    pub page: i64,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    pub sort_column: Option<String>,
    pub sort_order: Option<String>,
}

impl PaginationParam {
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// A page of results along with navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
    pub total_page: i64,
    pub total_data: i64,
    pub next_page: Option<i64>,
    pub previous_page: Option<i64>,
    pub page: i64,
    pub limit: i64,
    pub data: Vec<T>,
}

impl<T> PaginationResult<T> {
    pub fn new(count: i64, page: i64, limit: i64, data: Vec<T>) -> Self {
        let total_page = if limit > 0 {
            (count + limit - 1) / limit
        } else {
            0
        };
        let next_page = (page < total_page).then_some(page + 1);
        let previous_page = (page > 1).then_some(page - 1);

        Self {
            total_page,
            total_data: count,
            next_page,
            previous_page,
            page,
            limit,
            data,
        }
    }
}
