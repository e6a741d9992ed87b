//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add input, seed and config context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid number '{input}': {reason}")]
    InvalidNumericInput { input: String, reason: String },

    #[error("invalid update '{line}': {reason}")]
    InvalidUpdate { line: String, reason: String },

    #[error("cannot load seed {path}: {message}")]
    Seed { path: PathBuf, message: String },

    #[error("no seed file given (use --seed or set `seed` in config)")]
    MissingSeed,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
