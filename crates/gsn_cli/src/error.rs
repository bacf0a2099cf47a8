//! CLI error type.

use gsn_assistant::AssistantError;
use gsn_core::CoreError;
use gsn_sync_engine::SyncError;
use thiserror::Error;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors reported by the `gsn` commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Record store or export failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Sync failure.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Assistant failure, shown as the user-facing message.
    #[error("{}", .0.user_message())]
    Assistant(#[from] AssistantError),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data file could not be read or written.
    #[error("data file error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arguments that parse but make no sense together.
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
