//! Error types for the diff crate.
//!
//! The diff engine itself is total. These errors belong to the boundary
//! that turns raw input into documents and enforces size ceilings.

/// Errors that can occur before or after a comparison runs.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// Content is not text, or a request could not be understood.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A document is larger than the configured bound.
    #[error("{what} exceeds limit: {actual} > {limit}")]
    SizeExceeded {
        what: String,
        actual: usize,
        limit: usize,
    },

    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl DiffError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::SizeExceeded { .. } => "size_exceeded",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
