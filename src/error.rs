//! Error types for qshift.

use thiserror::Error;

/// The main error type for qshift operations.
#[derive(Debug, Error)]
pub enum QshiftError {
    /// The source query library file does not exist.
    #[error("Source not found: {path}")]
    SourceNotFound { path: String },

    /// The source document does not have the expected structure.
    #[error("Invalid source format: {0}")]
    InvalidSourceFormat(String),

    /// A record's query clause is blank.
    #[error("Query is empty")]
    EmptyQuery,

    /// A record's query has no locatable RETURN clause boundary.
    #[error("Malformed query, no RETURN clause found: {0}")]
    MalformedQuery(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QshiftError {
    /// Create a source-not-found error for the given path.
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create an invalid-format error with a description of the violation.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidSourceFormat(message.into())
    }

    /// Create a malformed-query error carrying the offending query text.
    pub fn malformed(query: impl Into<String>) -> Self {
        Self::MalformedQuery(query.into())
    }

    /// Whether this error is scoped to a single record rather than the run.
    pub fn is_record_scoped(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::MalformedQuery(_))
    }
}

/// Result type alias for qshift operations.
pub type QshiftResult<T> = Result<T, QshiftError>;
