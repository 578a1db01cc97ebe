use serde::Serialize;

/// Where the current page lands inside the filtered set, plus the metadata
/// the pagination controls render. With zero pages the controls are not
/// shown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    /// 1-based "showing X–Y of Z" bounds; `None` when nothing is shown.
    pub showing: Option<(usize, usize)>,
}

/// ceil(items / page_size); zero items means zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size)
}

/// Clamp a requested page into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice one page out of the filtered set and describe it.
pub fn paginate<T>(filtered: &[T], page_size: usize, current_page: usize) -> (&[T], PageView) {
    let total_items = filtered.len();
    let pages = total_pages(total_items, page_size);
    let page = clamp_page(current_page, pages);
    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);
    let showing = if total_items == 0 {
        None
    } else {
        Some((start + 1, end))
    };
    (
        &filtered[start..end],
        PageView {
            total_items,
            total_pages: pages,
            current_page: page,
            showing,
        },
    )
}
