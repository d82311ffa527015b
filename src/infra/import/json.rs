use anyhow::{Context, Result};
use serde_json::{Map, Value as JsonValue};

use crate::domain::entities::record::{FieldKind, Record, Value};
use crate::domain::entities::schema::Schema;
use crate::infra::import::normalize_header;

const WRAPPER_KEYS: [&str; 3] = ["players", "records", "data"];

/// Parses a JSON array of flat objects, or an object wrapping one under
/// `players`, `records` or `data`.
pub fn records_from_json(text: &str, schema: &Schema) -> Result<Vec<Record>> {
    let payload: JsonValue = serde_json::from_str(text).context("invalid json payload")?;

    let items = match payload {
        JsonValue::Array(items) => items,
        JsonValue::Object(mut object) => WRAPPER_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(JsonValue::Array(items)) => Some(items),
                _ => None,
            })
            .context("json object has no record array")?,
        _ => anyhow::bail!("json payload must be an array of records"),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            JsonValue::Object(fields) => Ok(record_from_object(fields, schema)),
            _ => anyhow::bail!("record {} is not an object", idx + 1),
        })
        .collect()
}

fn record_from_object(fields: Map<String, JsonValue>, schema: &Schema) -> Record {
    let mut record = Record::new();
    for (key, value) in fields {
        let name = normalize_header(&key);
        let kind = schema.kind_of(&name);
        record.set(&name, json_to_value(value, kind));
    }
    record
}

fn json_to_value(value: JsonValue, kind: FieldKind) -> Value {
    match value {
        JsonValue::Null => Value::Empty,
        JsonValue::Bool(flag) => Value::Text(flag.to_string()),
        JsonValue::Number(number) => match (kind, number.as_f64()) {
            (FieldKind::Number | FieldKind::Rank, Some(number)) => Value::Number(number),
            _ => Value::parse(kind, &number.to_string()),
        },
        JsonValue::String(text) => Value::parse(kind, &text),
        other => Value::Text(other.to_string()),
    }
}
