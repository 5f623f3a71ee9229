//! Shared pagination types

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_LIMIT: i32 = 20;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: i32 = 100;

/// Pagination parameters as received from the transport.
///
/// Values are carried verbatim; call [`PaginationParams::normalized`] before
/// using them against storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: i32,
    pub limit: i32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PaginationParams {
    pub fn new(page: i32, limit: i32) -> Self {
        Self { page, limit }
    }

    /// Clamp page to >= 1 and limit to `1..=MAX_PAGE_LIMIT` (0 or negative means default).
    pub fn normalized(self) -> Self {
        let page = self.page.max(1);
        let limit = if self.limit < 1 {
            DEFAULT_PAGE_LIMIT
        } else {
            self.limit.min(MAX_PAGE_LIMIT)
        };

        Self { page, limit }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }
}

/// One page of results together with the pagination that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResult<T> {
    pub data: Vec<T>,
    pub page: i32,
    pub limit: i32,
    pub total: i64,
}

impl<T> PaginationResult<T> {
    pub fn new(data: Vec<T>, total: i64, pagination: &PaginationParams) -> Self {
        Self {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total,
        }
    }

    /// The following page, if any items remain after this one
    pub fn next_page(&self) -> Option<i32> {
        if self.limit <= 0 {
            return None;
        }
        let seen = i64::from(self.page) * i64::from(self.limit);
        (seen < self.total).then(|| self.page + 1)
    }

    /// Convert the items, keeping the pagination
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationResult<U> {
        PaginationResult {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_defaults() {
        let p = PaginationParams::new(0, 0).normalized();
        assert_eq!(p, PaginationParams::new(1, DEFAULT_PAGE_LIMIT));

        let p = PaginationParams::new(-3, -1).normalized();
        assert_eq!(p, PaginationParams::new(1, DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn test_normalized_caps_limit() {
        let p = PaginationParams::new(4, 500).normalized();
        assert_eq!(p.page, 4);
        assert_eq!(p.limit, MAX_PAGE_LIMIT);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PaginationParams::new(1, 20).offset(), 0);
        assert_eq!(PaginationParams::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_next_page() {
        let params = PaginationParams::new(1, 2);
        let result = PaginationResult::new(vec![1, 2], 5, &params);
        assert_eq!(result.next_page(), Some(2));

        let params = PaginationParams::new(3, 2);
        let result = PaginationResult::new(vec![5], 5, &params);
        assert_eq!(result.next_page(), None);
    }

    #[test]
    fn test_map_keeps_pagination() {
        let params = PaginationParams::new(2, 10);
        let result = PaginationResult::new(vec![1, 2, 3], 13, &params).map(|n| n * 10);
        assert_eq!(result.data, vec![10, 20, 30]);
        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 10);
        assert_eq!(result.total, 13);
    }
}
