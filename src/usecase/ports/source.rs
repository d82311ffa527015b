use crate::domain::entities::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source could not be reached or read.
    Transport(String),
    /// The payload was read but is not a usable record sequence.
    Parse(String),
}

impl LoadError {
    pub fn reason(&self) -> &str {
        match self {
            LoadError::Transport(reason) | LoadError::Parse(reason) => reason,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Transport(reason) => write!(f, "failed to read dataset: {reason}"),
            LoadError::Parse(reason) => write!(f, "failed to parse dataset: {reason}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Fetch capability returning flat records in source order.
pub trait DatasetSource: Send + Sync {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Vec<Record>, LoadError>;
}
