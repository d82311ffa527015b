pub mod filter;
pub mod pagination;
pub mod sort;

/// Rejected controller input. The session ignores these and leaves state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    PageSizeZero,
    PageOutOfRange { target: usize, total_pages: usize },
    UnknownField(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::PageSizeZero => write!(f, "page size must be greater than zero"),
            ValidationError::PageOutOfRange {
                target,
                total_pages,
            } => write!(
                f,
                "page {target} out of range (total pages: {total_pages})"
            ),
            ValidationError::UnknownField(field) => write!(f, "unknown sort field: {field}"),
        }
    }
}

impl std::error::Error for ValidationError {}
