use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown, after clamping.
    pub page: usize,
    /// 0 only when there is nothing to show.
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Clamp `page` into `[1, total_pages]` and slice it out. An out-of-range
/// page shows the last page rather than an empty slice.
pub fn clamp_page(page: usize, len: usize, page_size: NonZeroUsize) -> usize {
    page.clamp(1, total_pages(len, page_size).max(1))
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: NonZeroUsize) -> Paginated<T> {
    let total_pages = total_pages(items.len(), page_size);
    let page = clamp_page(page, items.len(), page_size);
    let start = (page - 1) * page_size.get();
    let end = (start + page_size.get()).min(items.len());
    Paginated {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
    }
}
