use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::record::Record;
use crate::domain::entities::schema::Schema;
use crate::infra::import::records_from_rows;

pub fn read_csv_records(csv_path: &Path, schema: &Schema) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|header| header.trim().is_empty()) {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("failed to parse csv record {}", row_idx + 1))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(records_from_rows(&headers, &rows, schema))
}
