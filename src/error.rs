//! Error types for batch tokenization.
//!
//! The tokenizer performs no SQL validation: malformed statements pass
//! through opaquely and are rejected later by whatever executes them. The
//! errors here cover the few conditions the tokenizer itself can detect.

use thiserror::Error;

/// Result type for batch tokenization operations
pub type Result<T> = std::result::Result<T, BatchError>;

/// Errors that can occur while tokenizing a statement batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// More quoted literals in a single batch than the bank accepts.
    #[error("too many quoted literals in one batch (limit {limit})")]
    TooManyLiterals { limit: usize },

    /// An `exec`/`execute` statement with no usable procedure name.
    #[error("procedure call is missing a procedure name")]
    MissingProcedureName,
}
