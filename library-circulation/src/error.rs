//! Error kinds raised by circulation operations.

use thiserror::Error;

/// Coarse category of a [`LibraryError`], for callers that react by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input
    Validation,
    /// Referenced book or reader does not exist
    NotFound,
    /// Book or reader id is already registered
    AlreadyExists,
    /// A circulation rule was violated
    BusinessRule,
}

/// Error type for library circulation operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// Input failed validation (blank strings, zero counts, negative rates)
    #[error("validation error: {0}")]
    Validation(String),
    /// The requested book or reader is not registered
    #[error("not found: {0}")]
    NotFound(String),
    /// A book or reader with the same id already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),
    /// The operation is well-formed but breaks a circulation rule
    #[error("business rule violated: {0}")]
    BusinessRule(String),
}

impl LibraryError {
    /// The category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::BusinessRule(_) => ErrorKind::BusinessRule,
        }
    }

    /// The message without the kind prefix
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::AlreadyExists(msg)
            | Self::BusinessRule(msg) => msg,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(LibraryError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(LibraryError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(LibraryError::AlreadyExists("x".into()).kind(), ErrorKind::AlreadyExists);
        assert_eq!(LibraryError::BusinessRule("x".into()).kind(), ErrorKind::BusinessRule);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = LibraryError::NotFound("Book with id 'B-9' not found".to_string());
        assert_eq!(err.to_string(), "not found: Book with id 'B-9' not found");
        assert_eq!(err.message(), "Book with id 'B-9' not found");
    }
}
