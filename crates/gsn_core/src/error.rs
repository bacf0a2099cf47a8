//! Error types for the navigator core.

use crate::record::RecordKind;
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core record operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No record with the given identifier exists in the store.
    #[error("{kind} not found: {id}")]
    RecordNotFound {
        /// Record variant that was searched.
        kind: RecordKind,
        /// The identifier that was not found.
        id: String,
    },

    /// No dashboard task with the given identifier exists.
    #[error("task not found: {id}")]
    TaskNotFound {
        /// The identifier that was not found.
        id: u64,
    },

    /// An identifier appears more than once.
    #[error("duplicate {kind} identifier: {id}")]
    DuplicateId {
        /// Record variant.
        kind: RecordKind,
        /// The repeated identifier.
        id: String,
    },

    /// The field cannot be written after creation.
    #[error("field {field} is immutable")]
    ImmutableField {
        /// Name of the field.
        field: &'static str,
    },

    /// The field name does not exist on the record variant.
    #[error("unknown {kind} field: {name}")]
    UnknownField {
        /// Record variant.
        kind: RecordKind,
        /// The name that failed to resolve.
        name: String,
    },

    /// The record variant name is not recognised.
    #[error("unknown record kind: {name}")]
    UnknownKind {
        /// The name that failed to resolve.
        name: String,
    },

    /// A status label that is not part of the variant's enumeration.
    #[error("unknown status: {value}")]
    UnknownStatus {
        /// The rejected label.
        value: String,
    },

    /// A value could not be parsed for the field.
    #[error("invalid value {value:?} for field {field}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// An export was requested over an empty projection.
    #[error("nothing to export for {kind}")]
    NothingToExport {
        /// Record variant.
        kind: RecordKind,
    },

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Creates a not-found error.
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true if this error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::RecordNotFound { .. } | CoreError::TaskNotFound { .. }
        )
    }
}
