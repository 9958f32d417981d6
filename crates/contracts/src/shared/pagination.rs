use serde::{Deserialize, Serialize};

/// Pagination block of a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// Position of a list view inside a server-side collection.
///
/// `current_page` is 1-based. `total_pages` is 0 for an empty collection,
/// yet the current page never drops below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDescriptor {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
}

impl PageDescriptor {
    pub fn new(current_page: u32, page_size: u32, total_items: u64) -> Self {
        let mut descriptor = Self {
            current_page,
            page_size: page_size.max(1),
            total_items,
        };
        descriptor.current_page = descriptor.clamp_page(current_page);
        descriptor
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = self.total_items.div_ceil(size);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Clamp any requested page into `1..=max(total_pages, 1)`
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages().max(1))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// 1-based index range of the rows shown, `None` when the page is empty
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.total_items == 0 {
            return None;
        }
        let size = u64::from(self.page_size.max(1));
        let start = u64::from(self.current_page.saturating_sub(1)) * size + 1;
        let end = (start + size - 1).min(self.total_items);
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PageDescriptor::new(1, 10, 0).total_pages(), 0);
        assert_eq!(PageDescriptor::new(1, 10, 1).total_pages(), 1);
        assert_eq!(PageDescriptor::new(1, 10, 10).total_pages(), 1);
        assert_eq!(PageDescriptor::new(1, 10, 11).total_pages(), 2);
    }

    #[test]
    fn test_current_page_is_clamped() {
        assert_eq!(PageDescriptor::new(0, 10, 35).current_page, 1);
        assert_eq!(PageDescriptor::new(9, 10, 35).current_page, 4);
        assert_eq!(PageDescriptor::new(3, 10, 0).current_page, 1);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let d = PageDescriptor::new(2, 0, 5);
        assert_eq!(d.page_size, 1);
        assert_eq!(d.total_pages(), 5);
    }

    #[test]
    fn test_visible_range() {
        assert_eq!(PageDescriptor::new(1, 10, 0).visible_range(), None);
        assert_eq!(PageDescriptor::new(2, 10, 15).visible_range(), Some((11, 15)));
        assert!(PageDescriptor::new(2, 10, 15).has_previous());
        assert!(!PageDescriptor::new(2, 10, 15).has_next());
    }

    #[test]
    fn test_visible_range_of_hand_built_descriptor() {
        let zeroed = PageDescriptor {
            current_page: 0,
            page_size: 0,
            total_items: 3,
        };
        assert_eq!(zeroed.visible_range(), Some((1, 1)));
    }
}
