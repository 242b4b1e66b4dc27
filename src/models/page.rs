use serde::Serialize;

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Page numbers start at 1; `per_page` is clamped to `1..=MAX_PER_PAGE`.
    pub fn new(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(default_per_page)
                .clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PER_PAGE)
    }
}

/// Listing options shared by `list` and `search`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub pagination: Pagination,
    pub include_drafts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page,
            per_page: pagination.per_page,
            total,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.per_page.max(1)))
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps() {
        let p = Pagination::new(Some(0), Some(1000), 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, MAX_PER_PAGE);

        let p = Pagination::new(None, Some(0), 10);
        assert_eq!(p.per_page, 1);
    }

    #[test]
    fn test_offset() {
        let p = Pagination::new(Some(3), Some(20), 10);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.limit(), 20);
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::new(vec![1, 2], Pagination::new(Some(2), Some(2), 10), 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_prev());
        assert!(page.has_next());

        let last = Page::new(vec![5], Pagination::new(Some(3), Some(2), 10), 5);
        assert!(!last.has_next());

        let empty: Page<u8> = Page::new(Vec::new(), Pagination::default(), 0);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
        assert!(!empty.has_prev());
    }
}
