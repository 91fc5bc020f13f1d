/// Fixed-size page slicing

/// One page borrowed from the filtered sequence
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// `max(1, ceil(count / page_size))`
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Slice page `current_page` (1-based) out of `filtered`.
///
/// Out-of-range pages yield an empty slice; clamping is the caller's job.
pub fn paginate<T>(filtered: &[T], page_size: usize, current_page: usize) -> Page<'_, T> {
    let total_pages = total_pages(filtered.len(), page_size);

    let items = match current_page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size).min(filtered.len());
            let end = start.saturating_add(page_size).min(filtered.len());
            &filtered[start..end]
        }
        None => &filtered[..0],
    };

    Page { items, total_pages }
}
