//! Sync engine state machine.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::source::SnapshotSource;
use chrono::{DateTime, Local};
use gsn_core::messages;
use gsn_core::{diff, DiffResult, Notifier, Record, SharedStore};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// The current state of the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Engine is idle, not syncing.
    Idle,
    /// A snapshot fetch is in flight.
    Syncing,
    /// The last cycle completed; held briefly before returning to idle.
    Success,
}

impl SyncState {
    /// Returns true if a cycle is running.
    pub fn is_active(&self) -> bool {
        matches!(self, SyncState::Syncing)
    }

    /// Returns true if the engine can start a new sync.
    pub fn can_start_sync(&self) -> bool {
        !self.is_active()
    }
}

/// Statistics about sync cycles.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Total number of sync cycles completed.
    pub cycles_completed: u64,
    /// Total number of failed cycles.
    pub failures: u64,
    /// Total number of retries.
    pub retries: u64,
    /// Completion time of the last successful cycle.
    pub last_sync_at: Option<DateTime<Local>>,
    /// Changes applied by the last successful cycle.
    pub last_changes: Option<DiffResult>,
    /// Last error message.
    pub last_error: Option<String>,
}

/// Result of a completed sync cycle.
#[derive(Debug, Clone)]
pub struct SyncCycleResult {
    /// Changes between the replaced store and the snapshot.
    pub changes: DiffResult,
    /// Number of fetch attempts, including the successful one.
    pub attempts: u32,
    /// Duration of the sync cycle.
    pub duration: Duration,
    /// Wall-clock completion time.
    pub completed_at: DateTime<Local>,
}

/// What happened to a sync request.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// The store was replaced by a fresh snapshot.
    Completed(SyncCycleResult),
    /// Another cycle was already running; nothing changed.
    AlreadySyncing,
    /// The user declined the confirmation; nothing changed.
    Declined,
}

impl SyncOutcome {
    /// Returns the cycle result if the sync ran to completion.
    pub fn completed(&self) -> Option<&SyncCycleResult> {
        match self {
            SyncOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

/// Asks the user whether a sync may replace local data.
pub trait SyncConfirmer {
    /// Returns true to proceed with `question` answered positively.
    fn confirm(&self, question: &str) -> bool;
}

impl SyncConfirmer for bool {
    fn confirm(&self, _question: &str) -> bool {
        *self
    }
}

impl<F: Fn(&str) -> bool> SyncConfirmer for F {
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

#[derive(Debug)]
struct Phase {
    state: SyncState,
    since: Instant,
}

impl Phase {
    fn enter(&mut self, state: SyncState) {
        self.state = state;
        self.since = Instant::now();
    }

    /// Drops an expired success hold back to idle.
    fn settle(&mut self, hold: Duration) {
        if self.state == SyncState::Success && self.since.elapsed() >= hold {
            self.enter(SyncState::Idle);
        }
    }
}

/// The sync engine keeps one store in line with its snapshot source.
///
/// A cycle fetches the full snapshot, diffs it against the store, replaces
/// the store and announces the change counts. Only one cycle runs at a
/// time; the store is left untouched by a failed cycle.
pub struct SyncEngine<R: Record, S: SnapshotSource<R>> {
    config: SyncConfig,
    source: S,
    store: SharedStore<R>,
    notifier: Arc<Notifier>,
    phase: RwLock<Phase>,
    stats: RwLock<SyncStats>,
    cancelled: AtomicBool,
    cancel_signal: Notify,
}

impl<R: Record, S: SnapshotSource<R>> SyncEngine<R, S> {
    /// Creates a new sync engine.
    pub fn new(
        config: SyncConfig,
        source: S,
        store: SharedStore<R>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            config,
            source,
            store,
            notifier,
            phase: RwLock::new(Phase {
                state: SyncState::Idle,
                since: Instant::now(),
            }),
            stats: RwLock::new(SyncStats::default()),
            cancelled: AtomicBool::new(false),
            cancel_signal: Notify::new(),
        }
    }

    /// Gets the current state.
    pub fn state(&self) -> SyncState {
        let mut phase = self.phase.write();
        phase.settle(self.config.success_hold);
        phase.state
    }

    /// Gets the current stats.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Gets the configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Gets the snapshot source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Gets the store this engine replaces.
    pub fn store(&self) -> &SharedStore<R> {
        &self.store
    }

    /// Label describing the last completed sync.
    pub fn last_sync_label(&self) -> String {
        messages::last_sync_label(self.stats.read().last_sync_at.as_ref())
    }

    /// Cancels the running cycle, if any.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.cancel_signal.notify_waiters();
    }

    fn check_cancelled(&self) -> SyncResult<()> {
        if self.cancelled.load(Ordering::SeqCst) {
            Err(SyncError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Moves to syncing unless a cycle is already running.
    fn try_begin(&self) -> bool {
        let mut phase = self.phase.write();
        phase.settle(self.config.success_hold);
        if !phase.state.can_start_sync() {
            return false;
        }
        phase.enter(SyncState::Syncing);
        true
    }

    /// Asks for confirmation, then runs a sync cycle.
    ///
    /// A request while a cycle is running returns
    /// [`SyncOutcome::AlreadySyncing`] without asking. A declined
    /// confirmation returns [`SyncOutcome::Declined`]. Neither has any side
    /// effect.
    pub async fn request_sync(&self, confirmer: &impl SyncConfirmer) -> SyncResult<SyncOutcome> {
        if self.state().is_active() {
            debug!(kind = %R::KIND, "Sync already running");
            return Ok(SyncOutcome::AlreadySyncing);
        }
        if !confirmer.confirm(&messages::sync_confirmation(R::KIND)) {
            debug!(kind = %R::KIND, "Sync declined");
            return Ok(SyncOutcome::Declined);
        }
        self.sync().await
    }

    /// Runs a sync cycle without asking for confirmation.
    ///
    /// On failure the engine returns to idle, the store is untouched, an
    /// error notification is shown and the error is returned.
    pub async fn sync(&self) -> SyncResult<SyncOutcome> {
        if !self.try_begin() {
            debug!(kind = %R::KIND, "Sync already running");
            return Ok(SyncOutcome::AlreadySyncing);
        }

        let start = Instant::now();
        self.cancelled.store(false, Ordering::SeqCst);
        info!(kind = %R::KIND, "Sync started");
        self.notifier.info(messages::SYNC_STARTED);

        match self.fetch_and_apply().await {
            Ok((changes, attempts)) => {
                let completed_at = Local::now();
                {
                    let mut stats = self.stats.write();
                    stats.cycles_completed += 1;
                    stats.last_sync_at = Some(completed_at);
                    stats.last_changes = Some(changes);
                    stats.last_error = None;
                }
                self.phase.write().enter(SyncState::Success);
                info!(
                    kind = %R::KIND,
                    added = changes.added,
                    updated = changes.updated,
                    removed = changes.removed,
                    attempts,
                    "Sync finished"
                );
                self.notifier.success(messages::sync_finished(&changes));
                Ok(SyncOutcome::Completed(SyncCycleResult {
                    changes,
                    attempts,
                    duration: start.elapsed(),
                    completed_at,
                }))
            }
            Err(e) => {
                warn!(kind = %R::KIND, error = %e, "Sync failed");
                {
                    let mut stats = self.stats.write();
                    stats.failures += 1;
                    stats.last_error = Some(e.to_string());
                }
                self.phase.write().enter(SyncState::Idle);
                self.notifier.error(messages::sync_failed(&e.to_string()));
                Err(e)
            }
        }
    }

    async fn fetch_and_apply(&self) -> SyncResult<(DiffResult, u32)> {
        let (snapshot, attempts) = self.fetch_with_retry().await?;
        self.check_cancelled()?;

        let mut store = self.store.write();
        let changes = diff(store.as_slice(), &snapshot);
        store.replace_all(snapshot)?;
        Ok((changes, attempts))
    }

    async fn fetch_with_retry(&self) -> SyncResult<(Vec<R>, u32)> {
        let retry = &self.config.retry;
        let max_attempts = retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let delay = retry.delay_for_attempt(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.check_cancelled()?;

            let fetch = tokio::time::timeout(self.config.fetch_timeout, self.source.fetch());
            let result = tokio::select! {
                result = fetch => result.unwrap_or(Err(SyncError::Timeout)),
                _ = self.cancel_signal.notified() => Err(SyncError::Cancelled),
            };
            attempt += 1;

            match result {
                Ok(snapshot) => return Ok((snapshot, attempt)),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(kind = %R::KIND, attempt, error = %e, "Fetch failed, retrying");
                    self.stats.write().retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
