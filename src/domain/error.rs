//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent failed lookups inside a tree snapshot.
///
/// Every other core operation is total over well-formed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found: {0}")]
    NotFound(String),

    #[error("node has no parent (root or absent): {0}")]
    NoParent(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
