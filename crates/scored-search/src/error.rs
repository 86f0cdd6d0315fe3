//! Error types for the search facade

use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while building or executing a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Caller keywords are not valid query syntax. The only error the
    /// orchestrator recovers from, and only once (escape-and-retry).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid [`SearchOptions`](crate::SearchOptions): empty field list,
    /// zero hit bound, non-positive boost. Signaled before any execution.
    #[error("Invalid search options: {0}")]
    InvalidOptions(String),

    /// A requested search field does not exist in the index schema
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A ranked hit could not be resolved to a document within its own
    /// snapshot. Should not happen against a consistent index.
    #[error("Document not found in snapshot: {0}")]
    DocumentNotFound(String),

    /// Engine/storage failure from Tantivy
    #[error("Engine error: {0}")]
    Engine(#[from] tantivy::TantivyError),

    /// I/O error while opening or reading the index
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Returns the error type string (for structured logs and API responses)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::InvalidOptions(_) => "INVALID_OPTIONS",
            Self::UnknownField(_) => "UNKNOWN_FIELD",
            Self::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::Engine(_) => "ENGINE_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Returns whether this is a query-syntax failure, the one class the
    /// orchestrator retries with escaped keywords
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_type_mapping() {
        let cases: Vec<(SearchError, &str)> = vec![
            (
                SearchError::InvalidQuery("unbalanced quote".into()),
                "INVALID_QUERY",
            ),
            (
                SearchError::InvalidOptions("empty field list".into()),
                "INVALID_OPTIONS",
            ),
            (SearchError::UnknownField("tittle".into()), "UNKNOWN_FIELD"),
            (
                SearchError::DocumentNotFound("seg 0 doc 3".into()),
                "DOCUMENT_NOT_FOUND",
            ),
            (
                SearchError::Io(std::io::Error::other("disk full")),
                "IO_ERROR",
            ),
        ];
        for (err, expected) in &cases {
            assert_eq!(
                err.error_type(),
                *expected,
                "Error {err:?} should map to {expected}"
            );
        }
    }

    #[test]
    fn parse_classification() {
        assert!(SearchError::InvalidQuery("x".into()).is_parse());

        assert!(!SearchError::InvalidOptions("x".into()).is_parse());
        assert!(!SearchError::UnknownField("x".into()).is_parse());
        assert!(!SearchError::DocumentNotFound("x".into()).is_parse());
        assert!(!SearchError::Io(std::io::Error::other("x")).is_parse());
    }

    #[test]
    fn display_all_non_empty() {
        let all_errors: Vec<SearchError> = vec![
            SearchError::InvalidQuery(String::new()),
            SearchError::InvalidOptions(String::new()),
            SearchError::UnknownField(String::new()),
            SearchError::DocumentNotFound(String::new()),
            SearchError::Io(std::io::Error::other("")),
        ];
        for err in &all_errors {
            assert!(
                !err.to_string().is_empty(),
                "Error {err:?} should have non-empty Display"
            );
        }
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let search_err: SearchError = io_err.into();
        assert!(matches!(search_err, SearchError::Io(_)));
        assert_eq!(search_err.error_type(), "IO_ERROR");
    }
}
