use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::usecase::ports::kv::{KeyValueStore, StoreError};

pub const QUIZ_HISTORY_KEY: &str = "quiz_history";
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizHistoryEntry {
    pub name: String,
    pub score: usize,
    pub total: usize,
    pub seconds: u64,
    pub recorded_at: String,
}

pub struct QuizHistoryService {
    store: Arc<dyn KeyValueStore>,
}

impl QuizHistoryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> Result<Vec<QuizHistoryEntry>, StoreError> {
        let Some(blob) = self.store.get(QUIZ_HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_slice(&blob).map_err(|err| {
            warn!(error = %err, "quiz history blob is unreadable");
            StoreError::Message(format!(
                "quiz history is unreadable, clear it to start over: {err}"
            ))
        })
    }

    /// Appends `entry`. An unreadable stored history is reported, never overwritten.
    pub fn record(&self, entry: QuizHistoryEntry) -> Result<(), StoreError> {
        let mut entries = self.entries()?;
        entries.push(entry);
        let blob = serde_json::to_vec(&entries)
            .map_err(|err| StoreError::Message(format!("failed to encode quiz history: {err}")))?;
        self.store.set(QUIZ_HISTORY_KEY, &blob)
    }

    /// The last `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<QuizHistoryEntry>, StoreError> {
        let entries = self.entries()?;
        Ok(entries.into_iter().rev().take(limit).collect())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(QUIZ_HISTORY_KEY)
    }
}
