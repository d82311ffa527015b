use crate::domain::controllers::{filter, pagination, sort};
use crate::domain::entities::record::{Dataset, Value};
use crate::domain::entities::schema::Schema;
use crate::domain::entities::view::{DisplayRow, Navigation, ViewPage, ViewState};

/// Derives the visible page: filter, then sort, then slice the page window.
///
/// Pure and deterministic. The returned page index is clamped to the
/// available pages; callers write it back into their `ViewState`.
pub fn recompute(dataset: &Dataset, schema: &Schema, state: &ViewState) -> ViewPage {
    let records = dataset.records();
    let mut indices = filter::filter_indices(dataset, schema, &state.filter_query);
    sort::sort_indices(
        records,
        &mut indices,
        state.sort_field.as_deref(),
        state.sort_direction,
    );

    let filtered_count = indices.len();
    let page_size = state.page_size.max(1);
    let total_pages = pagination::total_pages(filtered_count, page_size);
    let page_index = state.page_index.min(total_pages - 1);

    let keep_rank = state
        .sort_field
        .as_deref()
        .is_some_and(|field| schema.is_rank_field(field));
    let rank_field = schema.rank_field.as_deref();

    let window = pagination::window(page_index, page_size, filtered_count);
    let rows = indices[window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, &load_index)| {
            let record = &records[load_index];
            let position = window.start + offset + 1;
            let display_rank = if keep_rank {
                stored_rank(record.get(rank_field.unwrap_or_default())).unwrap_or(position)
            } else {
                position
            };
            DisplayRow {
                record: record.clone(),
                display_rank,
                load_index,
            }
        })
        .collect();

    ViewPage {
        rows,
        page_index,
        total_pages,
        filtered_count,
        total_count: records.len(),
        navigation: Navigation::for_page(page_index, total_pages),
    }
}

fn stored_rank(value: &Value) -> Option<usize> {
    value
        .as_number()
        .filter(|rank| *rank >= 1.0)
        .map(|rank| rank as usize)
}
