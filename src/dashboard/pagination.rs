//! Page slicing and page-number windows

use std::ops::RangeInclusive;

/// One page of a filtered record set. Pages are 1-based.
#[derive(Debug, PartialEq)]
pub struct PageView<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    /// 1-based index of the first shown item, 0 when the set is empty.
    pub first: usize,
    /// 1-based index of the last shown item.
    pub last: usize,
    pub total: usize,
}

/// Slice out the requested page, clamping the page number into the valid
/// range. An empty input still yields one (empty) page.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> PageView<'_, T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total);

    PageView {
        items: &items[start.min(total)..end],
        page,
        total_pages,
        first: if total == 0 { 0 } else { start + 1 },
        last: end,
        total,
    }
}

/// Page numbers to offer as shortcuts: at most `max_buttons` numbers
/// centered on the current page and clamped to `1..=total_pages`.
pub fn page_window(current: usize, total_pages: usize, max_buttons: usize) -> RangeInclusive<usize> {
    let max_buttons = max_buttons.max(1);
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);

    let mut start = current.saturating_sub(max_buttons / 2).max(1);
    let end = (start + max_buttons - 1).min(total_pages);
    if end + 1 - start < max_buttons {
        start = (end + 1).saturating_sub(max_buttons).max(1);
    }

    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_holds_the_remainder() {
        let items: Vec<u32> = (1..=101).collect();
        let view = paginate(&items, 5, 25);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.items, &[101]);
        assert_eq!(view.first, 101);
        assert_eq!(view.last, 101);
    }

    #[test]
    fn test_page_number_is_clamped() {
        let items: Vec<u32> = (1..=10).collect();
        let view = paginate(&items, 99, 25);
        assert_eq!(view.page, 1);
        assert_eq!(view.items.len(), 10);

        let view = paginate(&items, 0, 3);
        assert_eq!(view.page, 1);
        assert_eq!(view.items, &[1, 2, 3]);
    }

    #[test]
    fn test_empty_set_yields_one_empty_page() {
        let items: Vec<u32> = vec![];
        let view = paginate(&items, 1, 25);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.first, 0);
        assert_eq!(view.last, 0);
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_window_centers_on_current_page() {
        assert_eq!(page_window(5, 9, 5), 3..=7);
    }

    #[test]
    fn test_window_clamps_at_the_edges() {
        assert_eq!(page_window(1, 9, 5), 1..=5);
        assert_eq!(page_window(2, 9, 5), 1..=5);
        assert_eq!(page_window(9, 9, 5), 5..=9);
        // 101 records at 25 per page: the window never exceeds page 5.
        assert_eq!(page_window(5, 5, 5), 1..=5);
    }

    #[test]
    fn test_window_with_few_pages() {
        assert_eq!(page_window(1, 3, 5), 1..=3);
        assert_eq!(page_window(1, 1, 5), 1..=1);
    }
}
