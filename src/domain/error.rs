//! Domain-level errors (no external dependencies)

use thiserror::Error;

use super::Key;

/// Domain errors represent rejected input or a broken tree.
///
/// Duplicate inserts and deletes of absent keys are deliberately absent
/// here: both are silent no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid key {input:?}: {reason}")]
    InvalidKey { input: String, reason: String },

    #[error("invariant violated at node {value}: {message}")]
    InvariantViolation { value: Key, message: String },
}

impl DomainError {
    pub(crate) fn invalid_key(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn violation(value: Key, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            value,
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
