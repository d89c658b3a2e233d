use digest_core::{pagination_window, PageItem};
use pretty_assertions::assert_eq;

/// Renders a window as `1 … 8 9 [10] 11 12 … 20` for compact assertions.
fn describe(items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page {
                number,
                current: true,
            } => format!("[{number}]"),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn single_page_has_no_window() {
    assert!(pagination_window(1, 1).is_empty());
    assert!(pagination_window(1, 0).is_empty());
}

#[test]
fn first_page_of_many() {
    assert_eq!(describe(&pagination_window(1, 20)), "[1] 2 3 … 20");
}

#[test]
fn middle_page_has_both_ellipses() {
    assert_eq!(
        describe(&pagination_window(10, 20)),
        "1 … 8 9 [10] 11 12 … 20"
    );
}

#[test]
fn window_covering_whole_range_has_no_ellipsis() {
    assert_eq!(describe(&pagination_window(3, 5)), "1 2 [3] 4 5");
}

#[test]
fn last_page_of_many() {
    assert_eq!(describe(&pagination_window(20, 20)), "1 … 18 19 [20]");
}

#[test]
fn ellipsis_marks_any_skipped_pages() {
    // Window 2..=6 touches page 1 directly.
    assert_eq!(describe(&pagination_window(4, 10)), "1 2 3 [4] 5 6 … 10");
    // Window 3..=7 skips page 2 only.
    assert_eq!(describe(&pagination_window(5, 8)), "1 … 3 4 [5] 6 7 8");
    assert_eq!(describe(&pagination_window(5, 9)), "1 … 3 4 [5] 6 7 … 9");
    assert_eq!(describe(&pagination_window(6, 8)), "1 … 4 5 [6] 7 8");
}

#[test]
fn two_pages() {
    assert_eq!(describe(&pagination_window(1, 2)), "[1] 2");
    assert_eq!(describe(&pagination_window(2, 2)), "1 [2]");
}

#[test]
fn window_never_exceeds_five_numbered_pages_around_current() {
    for total in 2..=30u32 {
        for current in 1..=total {
            let items = pagination_window(current, total);
            let numbers: Vec<u32> = items
                .iter()
                .filter_map(|item| match item {
                    PageItem::Page { number, .. } => Some(*number),
                    PageItem::Ellipsis => None,
                })
                .collect();
            assert_eq!(numbers.first(), Some(&1));
            assert_eq!(numbers.last(), Some(&total));
            assert!(numbers.windows(2).all(|pair| pair[0] < pair[1]));
            let current_count = items
                .iter()
                .filter(|item| matches!(item, PageItem::Page { current: true, .. }))
                .count();
            assert_eq!(current_count, 1);
        }
    }
}
