use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::quiz::{builtin_bank, parse_question_bank, Question};

/// Reads a question bank file; a missing file yields the built-in bank.
pub fn read_question_bank(path: &Path) -> Result<Vec<Question>> {
    if !path.exists() {
        info!(path = %path.display(), "no question bank file, using built-in questions");
        return Ok(builtin_bank());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;
    let bank = parse_question_bank(&text)
        .with_context(|| format!("invalid question bank: {}", path.display()))?;
    if bank.is_empty() {
        anyhow::bail!("question bank is empty: {}", path.display());
    }
    Ok(bank)
}
