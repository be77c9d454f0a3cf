//! Error types for capability operations.

use thiserror::Error;

/// Errors raised by primitive and derived collection operations.
///
/// Each kind is a distinct variant so callers can branch on "not found"
/// versus "empty" versus "arity" without string matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollError {
    #[error("Key not found")]
    KeyNotFound,

    #[error("Index out of range: {index} (length: {length})")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("Value not found")]
    ValueNotFound,

    #[error("Empty {0}")]
    Empty(&'static str),

    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("Expected at most {max} positional arguments, got {found}")]
    Arity { max: usize, found: usize },
}

impl CollError {
    /// True for the "lookup target absent" kinds (key or index).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CollError::KeyNotFound | CollError::IndexOutOfRange { .. }
        )
    }

    /// True when a removal found nothing left to remove.
    pub fn is_empty(&self) -> bool {
        matches!(self, CollError::Empty(_))
    }
}

pub type Result<T> = std::result::Result<T, CollError>;
