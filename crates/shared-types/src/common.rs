use serde::{Deserialize, Serialize};

/// Default page size for list screens.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Largest page size the backend accepts.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            1
        };

        Self {
            data: items,
            meta: PaginationMeta {
                page,
                limit,
                total,
                total_pages,
                has_next: page < total_pages,
                has_prev: page > 1,
            },
        }
    }

    /// Wrap an unpaginated list as a single page.
    pub fn single_page(items: Vec<T>) -> Self {
        let total = items.len() as i64;
        Self::new(items, 1, total.max(1), total)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Page/limit query sent with every list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: i64,
    pub limit: i64,
}

impl ListQuery {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let (page, limit) = normalize_pagination(page, limit);
        Self { page, limit }
    }

    pub fn first() -> Self {
        Self::new(None, None)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::first()
    }
}

/// Helper to normalize pagination params with safe defaults.
pub fn normalize_pagination(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}
