//! Toast notifications.
//!
//! The [`Notifier`] shows at most one toast at a time. A new toast
//! replaces the current one; a toast disappears after its time-to-live or
//! when dismissed, whichever comes first. Expiry is evaluated lazily
//! against [`tokio::time::Instant`], so a paused test clock controls it.

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

const HISTORY_CAPACITY: usize = 32;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An operation completed.
    Success,
    /// An operation failed.
    Error,
    /// Progress or neutral information.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        })
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Unique, increasing identifier.
    pub id: u64,
    /// Text shown to the user.
    pub message: String,
    /// Severity.
    pub severity: Severity,
    /// When the toast was shown.
    pub shown_at: Instant,
}

impl Toast {
    /// Returns true once `ttl` has elapsed since the toast was shown.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

/// Notifier configuration.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// How long a toast stays visible.
    pub toast_ttl: Duration,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            toast_ttl: Duration::from_secs(5),
        }
    }
}

impl NotifierConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time-to-live of toasts.
    pub fn with_toast_ttl(mut self, ttl: Duration) -> Self {
        self.toast_ttl = ttl;
        self
    }
}

/// Single-slot toast center.
#[derive(Debug)]
pub struct Notifier {
    config: NotifierConfig,
    next_id: AtomicU64,
    current: RwLock<Option<Toast>>,
    history: RwLock<VecDeque<Toast>>,
}

impl Notifier {
    /// Creates a notifier.
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(1),
            current: RwLock::new(None),
            history: RwLock::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Shows a toast, replacing the current one. Returns its identifier.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let toast = Toast {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        };
        debug!(id = toast.id, severity = %severity, message = %toast.message, "Toast shown");

        let id = toast.id;
        {
            let mut history = self.history.write();
            if history.len() == HISTORY_CAPACITY {
                history.pop_front();
            }
            history.push_back(toast.clone());
        }
        *self.current.write() = Some(toast);
        id
    }

    /// Shows a success toast.
    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Success)
    }

    /// Shows an error toast.
    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Error)
    }

    /// Shows an informational toast.
    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, Severity::Info)
    }

    /// Returns the visible toast, if any. Expired toasts are cleared.
    pub fn current(&self) -> Option<Toast> {
        let now = Instant::now();
        let mut current = self.current.write();
        if current
            .as_ref()
            .is_some_and(|toast| toast.is_expired(self.config.toast_ttl, now))
        {
            if let Some(expired) = current.take() {
                trace!(id = expired.id, "Toast expired");
            }
        }
        current.clone()
    }

    /// Dismisses the toast with this identifier.
    ///
    /// Returns false if it is no longer visible (replaced, expired or
    /// already dismissed).
    pub fn dismiss(&self, id: u64) -> bool {
        let mut current = self.current.write();
        match current.as_ref() {
            Some(toast) if toast.id == id => {
                *current = None;
                debug!(id, "Toast dismissed");
                true
            }
            _ => false,
        }
    }

    /// Returns every toast shown so far, oldest first, and clears the log.
    pub fn take_history(&self) -> Vec<Toast> {
        self.history.write().drain(..).collect()
    }

    /// Returns the messages shown so far, oldest first.
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.history
            .read()
            .iter()
            .map(|t| (t.severity, t.message.clone()))
            .collect()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NotifierConfig::default())
    }
}
