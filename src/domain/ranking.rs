use crate::domain::controllers::sort::compare_records;
use crate::domain::entities::record::{Dataset, Record, Value};
use crate::domain::entities::schema::Schema;

/// Orders freshly loaded records by the schema's initial order, assigns
/// 1-based ranks and derives first/last name parts.
pub fn prepare_dataset(records: Vec<Record>, schema: &Schema) -> Dataset {
    let mut indexed: Vec<(usize, Record)> = records.into_iter().enumerate().collect();
    indexed.sort_by(|(left_idx, left), (right_idx, right)| {
        schema
            .initial_order
            .iter()
            .map(|(field, direction)| {
                compare_records((0, left), (0, right), field, *direction)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| left_idx.cmp(right_idx))
    });

    let ranked = indexed
        .into_iter()
        .enumerate()
        .map(|(position, (_, mut record))| {
            if let Some(rank_field) = schema.rank_field.as_deref() {
                record.set(rank_field, Value::Number((position + 1) as f64));
            }
            if schema.field("first_name").is_some() {
                let (first, last) = split_name(&record.get("name").to_string());
                record.set("first_name", text_or_empty(first));
                record.set("last_name", text_or_empty(last));
            }
            record
        })
        .collect();

    Dataset::new(ranked)
}

/// First whitespace-separated token, then the remaining tokens joined by one space.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

fn text_or_empty(text: String) -> Value {
    if text.is_empty() {
        Value::Empty
    } else {
        Value::Text(text)
    }
}
