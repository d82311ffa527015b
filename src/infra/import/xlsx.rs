use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};

use crate::domain::entities::record::{parse_number, FieldKind, Record, Value};
use crate::domain::entities::schema::Schema;
use crate::infra::import::normalize_header;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Converts an Excel serial day number (1900 date system) to a timestamp.
pub fn excel_serial_to_date(serial: f64) -> Option<chrono::NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::try_milliseconds(millis)?)
}

fn cell_to_value(cell: &Data, kind: FieldKind) -> Value {
    let raw = cell_to_string(cell);
    if kind == FieldKind::Date {
        if let Some(serial) = parse_number(&raw) {
            if let Some(date) = excel_serial_to_date(serial) {
                return Value::Date(date);
            }
        }
    }
    Value::parse(kind, &raw)
}

/// Reads the first worksheet; its first non-empty row is the header.
pub fn read_workbook_records(xlsx_path: &Path, schema: &Schema) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open workbook: {}", xlsx_path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no worksheets")?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(|cell| matches!(cell, Data::Empty)));
    let Some(header_row) = rows.next() else {
        anyhow::bail!("sheet {sheet_name} is empty")
    };
    let names: Vec<String> = header_row
        .iter()
        .map(|cell| normalize_header(&cell_to_string(cell)))
        .collect();

    let records = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            let mut record = Record::new();
            for (name, cell) in names.iter().zip(row.iter()) {
                if name.is_empty() {
                    continue;
                }
                record.set(name, cell_to_value(cell, schema.kind_of(name)));
            }
            record
        })
        .collect();

    Ok(records)
}
