use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Text,
    Date,
    /// Numeric position assigned at load time. Sorting by it keeps the stored values.
    Rank,
}

/// A single scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl Value {
    /// Coerces raw text by the declared field kind. Text that does not parse
    /// as the declared kind is kept as `Text` rather than dropped.
    pub fn parse(kind: FieldKind, raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Empty;
        }

        match kind {
            FieldKind::Number | FieldKind::Rank => parse_number(trimmed)
                .map(Value::Number)
                .unwrap_or_else(|| Value::Text(trimmed.to_string())),
            FieldKind::Date => parse_date(trimmed)
                .map(Value::Date)
                .unwrap_or_else(|| Value::Text(trimmed.to_string())),
            FieldKind::Text => Value::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Lowercased text used by substring search.
    pub fn search_text(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Number(value) => value.to_string(),
            Value::Text(value) => value.to_lowercase(),
            Value::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }

    /// Order used by the sort comparator: empty first, then numbers,
    /// dates and text. Text compares case-insensitively, so case variants tie.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (a, b) => a.type_order().cmp(&b.type_order()),
        }
    }

    fn type_order(&self) -> u8 {
        match self {
            Value::Empty => 0,
            Value::Number(_) => 1,
            Value::Date(_) => 2,
            Value::Text(_) => 3,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value}"),
            Value::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, format) {
            return Some(value);
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// One flat row of source data keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> &Value {
        static EMPTY: Value = Value::Empty;
        self.fields.get(name).unwrap_or(&EMPTY)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Immutable, load-ordered records. Replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Arc<Vec<Record>>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::new(records)
    }
}
