/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Number of rows skipped before this page starts, `None` when it
    /// overflows `usize`.
    pub fn offset(&self) -> Option<usize> {
        (self.page.max(1) - 1).checked_mul(self.per_page)
    }

    /// Total number of pages needed to show `total` rows.
    pub fn total_pages(&self, total: usize) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        total.div_ceil(self.per_page)
    }
}
