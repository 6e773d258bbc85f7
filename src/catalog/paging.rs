//! Page arithmetic shared by the projector and the pagination bar.

/// Number of pages needed to show `total` items, `page_size` per page.
///
/// Zero items need zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Page numbers to offer in the pagination bar.
///
/// Empty when everything fits on a single page, so the bar is hidden.
pub fn page_numbers(total: usize, page_size: usize) -> Vec<usize> {
    let count = page_count(total, page_size);
    if count <= 1 {
        return Vec::new();
    }
    (1..=count).collect()
}

/// Contiguous slice for a 1-based `page`.
///
/// Pages past the end (and page 0) yield an empty slice rather than an error.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let start = index.saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
