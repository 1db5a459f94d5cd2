//! Page window calculation for list views.

use serde::Serialize;

/// Rows shown on one page of a list.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Requested page of a list query, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Rows skipped before this page; saturates for out-of-range pages.
    pub fn offset(&self) -> i64 {
        let skipped = self.page.saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Number of pages needed for `total` rows.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Page numbers to render; `None` marks a gap shown as an ellipsis.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.min(last_page);

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Wraps one page of `items` out of `total` matching rows.
    pub fn new(items: Vec<T>, pagination: Pagination, total: usize) -> Self {
        let pages = get_pages(
            total_pages(total, pagination.per_page),
            pagination.page,
            2,
            2,
            4,
            2,
        );

        Self {
            items,
            pages,
            page: pagination.page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_becomes_first() {
        let pagination = Pagination::new(0, 20);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
        assert_eq!(Pagination::new(3, 20).offset(), 40);
    }

    #[test]
    fn huge_page_number_saturates() {
        let pagination = Pagination::new(usize::MAX, 20);
        assert_eq!(pagination.offset(), i64::MAX);
        assert_eq!(pagination.limit(), 20);

        let page = Paginated::new(Vec::<i32>::new(), pagination, 45);
        assert_eq!(page.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
    }

    #[test]
    fn short_lists_show_every_page() {
        assert_eq!(get_pages(3, 1, 2, 2, 4, 2), vec![Some(1), Some(2), Some(3)]);
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn long_lists_collapse_with_gaps() {
        let pages = get_pages(30, 15, 2, 2, 4, 2);
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages[2], None);
        assert!(pages.contains(&Some(15)));
        assert_eq!(pages.last(), Some(&Some(30)));
    }

    #[test]
    fn paginated_keeps_total() {
        let page = Paginated::new(vec![1, 2], Pagination::new(2, 2), 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.pages, vec![Some(1), Some(2), Some(3)]);
    }
}
