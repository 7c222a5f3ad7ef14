use serde::{Deserialize, Serialize};

/// One page of a longer list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// Cut page `page` (1-based) of `items_per_page` items out of `data`.
///
/// A page past the end, page 0 and a page size of 0 all give an empty
/// `data` list; the totals still describe the whole input.
pub fn paginate<T: Clone>(data: &[T], page: usize, items_per_page: usize) -> PaginatedResult<T> {
    let total_items = data.len();
    let total_pages = if items_per_page == 0 {
        0
    } else {
        total_items.div_ceil(items_per_page)
    };

    let slice: &[T] = if page == 0 || items_per_page == 0 {
        &[]
    } else {
        let start = (page - 1).saturating_mul(items_per_page).min(total_items);
        let end = start.saturating_add(items_per_page).min(total_items);
        &data[start..end]
    };

    PaginatedResult {
        data: slice.to_vec(),
        total_items,
        total_pages,
        current_page: page,
        has_next_page: page < total_pages,
        has_prev_page: page > 1,
    }
}
