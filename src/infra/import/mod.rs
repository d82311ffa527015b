pub mod csv;
pub mod json;
pub mod quiz_bank;
pub mod xlsx;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::entities::record::{Record, Value};
use crate::domain::entities::schema::Schema;
use crate::usecase::ports::source::{DatasetSource, LoadError};

/// Maps a source column header onto a schema field name:
/// `Join Date`, `joinDate` and `join_date` all become `join_date`.
pub fn normalize_header(header: &str) -> String {
    let mut name = String::new();
    let mut prev_lower = false;
    for ch in header.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !name.ends_with('_') && !name.is_empty() {
                name.push('_');
            }
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower && !name.ends_with('_') {
                name.push('_');
            }
            name.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            name.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    name.trim_end_matches('_').to_string()
}

/// Builds records from header + string rows, coercing each cell by the schema.
pub fn records_from_rows(headers: &[String], rows: &[Vec<String>], schema: &Schema) -> Vec<Record> {
    let names: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    rows.iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            let mut record = Record::new();
            for (col_idx, name) in names.iter().enumerate() {
                if name.is_empty() {
                    continue;
                }
                let raw = row.get(col_idx).map(String::as_str).unwrap_or("");
                record.set(name, Value::parse(schema.kind_of(name), raw));
            }
            record
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
    Workbook,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FileFormat::Json),
            "csv" => Some(FileFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(FileFormat::Workbook),
            _ => None,
        }
    }
}

/// Dataset source backed by a local JSON, CSV or workbook file.
pub struct FileSource {
    path: PathBuf,
    schema: Schema,
}

impl FileSource {
    pub fn new(path: PathBuf, schema: Schema) -> Self {
        Self { path, schema }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self, format: FileFormat) -> Result<Vec<Record>> {
        match format {
            FileFormat::Json => {
                let text = std::fs::read_to_string(&self.path)
                    .with_context(|| format!("failed to read json: {}", self.path.display()))?;
                self::json::records_from_json(&text, &self.schema)
            }
            FileFormat::Csv => self::csv::read_csv_records(&self.path, &self.schema),
            FileFormat::Workbook => self::xlsx::read_workbook_records(&self.path, &self.schema),
        }
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<Record>, LoadError> {
        std::fs::metadata(&self.path)
            .with_context(|| format!("failed to open dataset: {}", self.path.display()))
            .map_err(|err| LoadError::Transport(format!("{err:#}")))?;

        let format = FileFormat::from_path(&self.path).ok_or_else(|| {
            LoadError::Parse(format!("unsupported file type: {}", self.path.display()))
        })?;

        let records = self
            .read(format)
            .map_err(|err| LoadError::Parse(format!("{err:#}")))?;
        info!(path = %self.path.display(), records = records.len(), "read dataset file");
        Ok(records)
    }
}
