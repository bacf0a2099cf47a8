//! Error types for the sync engine.

use gsn_core::CoreError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during a sync cycle.
///
/// Re-entry while a cycle is running and a declined confirmation are not
/// errors; see [`SyncOutcome`](crate::SyncOutcome).
#[derive(Error, Debug)]
pub enum SyncError {
    /// The snapshot source failed.
    #[error("source error: {message}")]
    Source {
        /// Error message.
        message: String,
        /// Whether the fetch can be retried.
        retryable: bool,
    },

    /// The snapshot did not arrive within the fetch timeout.
    #[error("fetch timed out")]
    Timeout,

    /// The cycle was cancelled.
    #[error("sync cancelled")]
    Cancelled,

    /// The snapshot could not be applied to the store.
    #[error("store error: {0}")]
    Core(#[from] CoreError),
}

impl SyncError {
    /// Creates a retryable source error.
    pub fn source_retryable(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable source error.
    pub fn source_fatal(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if this error can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Source { retryable, .. } => *retryable,
            SyncError::Timeout => true,
            SyncError::Cancelled | SyncError::Core(_) => false,
        }
    }
}
