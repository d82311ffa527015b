use crate::domain::entities::record::{Dataset, Record};
use crate::domain::entities::schema::Schema;
use crate::domain::entities::view::ViewState;

/// Stores the raw query and returns to the first page.
pub fn set_query(state: &mut ViewState, text: &str) {
    state.filter_query = text.to_string();
    state.page_index = 0;
}

pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case-insensitive substring match against any searchable field.
/// `needle` must already be normalized; an empty needle matches everything.
pub fn matches(record: &Record, schema: &Schema, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    schema
        .searchable_fields()
        .any(|field| record.get(&field.name).search_text().contains(needle))
}

/// Load indices of the records matching `query`, in load order.
pub fn filter_indices(dataset: &Dataset, schema: &Schema, query: &str) -> Vec<usize> {
    let needle = normalize_query(query);
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, schema, &needle))
        .map(|(idx, _)| idx)
        .collect()
}
