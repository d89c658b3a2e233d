/// Numbered pages shown on each side of the current page.
const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    Ellipsis,
}

/// Computes the page buttons around `current`.
///
/// At most five consecutive pages centred on `current`, clamped to
/// `1..=total`. The first and last page are always reachable; an ellipsis
/// stands in for the pages skipped between them and the window. Returns
/// nothing when there is at most one page.
pub fn pagination_window(current: u32, total: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }

    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = current.saturating_add(WINDOW_RADIUS).min(total);
    let page = |number: u32| PageItem::Page {
        number,
        current: number == current,
    };

    let mut items = Vec::with_capacity(9);
    if start > 1 {
        items.push(page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    items.extend((start..=end).map(page));

    if end < total {
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(page(total));
    }

    items
}
