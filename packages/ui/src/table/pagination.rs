//! Page strip model: a windowed run of page numbers around the current page.

use std::ops::Range;

/// Pages of context on each side of the current page.
pub const WINDOW: usize = 2;

/// One control in the page strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Previous { target: usize, disabled: bool },
    Page { number: usize, active: bool },
    Ellipsis,
    Next { target: usize, disabled: bool },
}

impl PageItem {
    /// Page a click should load, if the control is clickable.
    pub fn target(&self) -> Option<usize> {
        match *self {
            PageItem::Previous { target, disabled } | PageItem::Next { target, disabled } => {
                (!disabled).then_some(target)
            }
            PageItem::Page { number, .. } => Some(number),
            PageItem::Ellipsis => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    pub current: usize,
    pub total_pages: usize,
}

impl PaginationState {
    /// `current` is clamped into `1..=max(total_pages, 1)`.
    pub fn new(current: usize, total_pages: usize) -> Self {
        Self {
            current: current.clamp(1, total_pages.max(1)),
            total_pages,
        }
    }

    pub fn for_items(current: usize, item_count: usize, page_size: usize) -> Self {
        Self::new(current, Self::total_pages_for(item_count, page_size))
    }

    pub fn total_pages_for(item_count: usize, page_size: usize) -> usize {
        item_count.div_ceil(page_size.max(1))
    }

    /// Whether a strip is shown at all.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Index range of the current page within a list of `item_count` items.
    pub fn page_range(&self, item_count: usize, page_size: usize) -> Range<usize> {
        let page_size = page_size.max(1);
        let start = ((self.current - 1) * page_size).min(item_count);
        start..(start + page_size).min(item_count)
    }

    /// Controls in display order; empty when there is at most one page.
    pub fn items(&self) -> Vec<PageItem> {
        if !self.is_visible() {
            return Vec::new();
        }
        let (current, total) = (self.current, self.total_pages);
        let start = current.saturating_sub(WINDOW).max(1);
        let end = (current + WINDOW).min(total);

        let mut items = vec![PageItem::Previous {
            target: current.saturating_sub(1).max(1),
            disabled: current == 1,
        }];
        if start > 1 {
            items.push(PageItem::Page {
                number: 1,
                active: false,
            });
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend((start..=end).map(|number| PageItem::Page {
            number,
            active: number == current,
        }));
        if end < total {
            if end < total - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number: total,
                active: false,
            });
        }
        items.push(PageItem::Next {
            target: (current + 1).min(total),
            disabled: current == total,
        });
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<Option<usize>> {
        items
            .iter()
            .filter_map(|item| match item {
                PageItem::Page { number, .. } => Some(Some(*number)),
                PageItem::Ellipsis => Some(None),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_page_renders_nothing() {
        assert!(PaginationState::new(1, 0).items().is_empty());
        assert!(PaginationState::new(1, 1).items().is_empty());
        assert!(!PaginationState::new(1, 1).is_visible());
    }

    #[test]
    fn test_first_page_of_ten() {
        let items = PaginationState::new(1, 10).items();
        assert_eq!(items[0], PageItem::Previous { target: 1, disabled: true });
        assert!(items.contains(&PageItem::Page { number: 1, active: true }));
        assert_eq!(numbers(&items), vec![Some(1), Some(2), Some(3), None, Some(10)]);
        assert_eq!(*items.last().unwrap(), PageItem::Next { target: 2, disabled: false });
    }

    #[test]
    fn test_last_page_of_ten() {
        let items = PaginationState::new(10, 10).items();
        assert_eq!(items[0], PageItem::Previous { target: 9, disabled: false });
        assert_eq!(numbers(&items), vec![Some(1), None, Some(8), Some(9), Some(10)]);
        assert_eq!(*items.last().unwrap(), PageItem::Next { target: 10, disabled: true });
        assert_eq!(items.last().unwrap().target(), None);
    }

    #[test]
    fn test_middle_and_near_edges() {
        assert_eq!(
            numbers(&PaginationState::new(5, 10).items()),
            vec![Some(1), None, Some(3), Some(4), Some(5), Some(6), Some(7), None, Some(10)]
        );
        assert_eq!(
            numbers(&PaginationState::new(4, 10).items()),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), None, Some(10)]
        );
        assert_eq!(
            numbers(&PaginationState::new(2, 3).items()),
            vec![Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn test_no_duplicate_pages() {
        for total in 2..15 {
            for current in 1..=total {
                let pages: Vec<usize> = numbers(&PaginationState::new(current, total).items())
                    .into_iter()
                    .flatten()
                    .collect();
                let mut sorted = pages.clone();
                sorted.dedup();
                assert_eq!(pages, sorted, "page {current} of {total}");
                assert!(pages.iter().all(|p| (1..=total).contains(p)));
            }
        }
    }

    #[test]
    fn test_clamping_and_ranges() {
        assert_eq!(PaginationState::new(0, 5).current, 1);
        assert_eq!(PaginationState::new(9, 5).current, 5);
        assert_eq!(PaginationState::total_pages_for(0, 10), 0);
        assert_eq!(PaginationState::total_pages_for(21, 10), 3);

        let state = PaginationState::for_items(3, 21, 10);
        assert_eq!(state.page_range(21, 10), 20..21);
        assert_eq!(PaginationState::for_items(1, 0, 10).page_range(0, 10), 0..0);
    }
}
