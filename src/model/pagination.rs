//! Pure pagination math for the worksheet table
//!
//! Page numbers follow the sliding-window scheme from the dashboard
//! design: fixed first/last page, at most three interior numbers around
//! the current page, ellipses for the gaps.

/// Rows shown per worksheet page
pub const PAGE_SIZE: usize = 8;

/// One entry in the pagination footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

/// Number of pages needed for `row_count` rows, zero when empty
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}

/// Clamp a 1-based page number into `[1, max(1, total)]`
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// The rows visible on a 1-based page, clamped to the available rows
pub fn page_slice<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(rows.len());
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

/// Footer entries for `current` of `total` pages.
///
/// Up to 7 pages are listed in full. Beyond that: page 1, an ellipsis once
/// `current > 3`, the window `max(2, current-1)..=min(total-1, current+1)`,
/// an ellipsis while `current < total - 2`, then the last page.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageEntry> {
    let mut entries = Vec::new();
    if total == 0 {
        return entries;
    }

    if total <= 7 {
        for page in 1..=total {
            entries.push(PageEntry::Page(page));
        }
        return entries;
    }

    entries.push(PageEntry::Page(1));
    if current > 3 {
        entries.push(PageEntry::Ellipsis);
    }

    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    for page in start..=end {
        entries.push(PageEntry::Page(page));
    }

    if current < total - 2 {
        entries.push(PageEntry::Ellipsis);
    }
    entries.push(PageEntry::Page(total));

    entries
}

/// Derived view of one worksheet page, recomputed every render
#[derive(Debug)]
pub struct PageView<'a, T> {
    pub page_items: &'a [T],
    pub page_numbers: Vec<PageEntry>,
    pub current_page: usize,
    pub total_pages: usize,
}

impl<'a, T> PageView<'a, T> {
    pub fn build(rows: &'a [T], current_page: usize) -> Self {
        let total = total_pages(rows.len(), PAGE_SIZE);
        let current = clamp_page(current_page, total);
        Self {
            page_items: page_slice(rows, current, PAGE_SIZE),
            page_numbers: page_numbers(current, total),
            current_page: current,
            total_pages: total,
        }
    }
}
