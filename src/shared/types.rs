use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
/// Both fields are optional; without them the full list is returned.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Number of items per page (default: 10, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

impl PaginationQuery {
    pub fn is_requested(&self) -> bool {
        self.page.is_some() || self.page_size.is_some()
    }

    /// Number of items to skip; saturates for huge page numbers
    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1).saturating_mul(self.limit())
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Slice an already-ordered list down to the requested page
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        if !self.is_requested() {
            return items;
        }
        items
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit()).unwrap_or(0))
            .collect()
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_absent_returns_everything() {
        let query = PaginationQuery::default();
        assert_eq!(query.apply((1..=25).collect::<Vec<_>>()).len(), 25);
    }

    #[test]
    fn test_pagination_second_page() {
        let query = PaginationQuery {
            page: Some(2),
            page_size: None,
        };
        assert_eq!(
            query.apply((1..=25).collect::<Vec<_>>()),
            (11..=20).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_pagination_clamps_page_size() {
        let query = PaginationQuery {
            page: Some(0),
            page_size: Some(1000),
        };
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_pagination_huge_page_is_empty_not_a_panic() {
        let query = PaginationQuery {
            page: Some(i64::MAX),
            page_size: Some(10),
        };
        assert_eq!(query.offset(), i64::MAX);
        assert!(query.apply(vec![1, 2, 3]).is_empty());

        let query = PaginationQuery {
            page: Some(i64::MIN),
            page_size: Some(i64::MAX),
        };
        assert_eq!(query.apply(vec![1, 2, 3]), vec![1, 2, 3]);
    }
}
