//! Snapshot sources.
//!
//! A [`SnapshotSource`] delivers the full, authoritative list of one record
//! variant. The engine never merges: whatever the source returns replaces
//! the local store.

use crate::error::{SyncError, SyncResult};
use gsn_core::Record;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Latency of the built-in central system stand-in.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Delivers replacement snapshots for one record variant.
///
/// This trait abstracts the remote end of a sync, allowing for different
/// implementations (HTTP, file, scripted for testing, etc.).
pub trait SnapshotSource<R: Record>: Send + Sync {
    /// Fetches the current snapshot.
    fn fetch(&self) -> impl Future<Output = SyncResult<Vec<R>>> + Send;
}

/// Serves a fixed snapshot after a fixed delay.
#[derive(Debug, Clone)]
pub struct StaticSource<R> {
    snapshot: Vec<R>,
    latency: Duration,
}

impl<R: Record> StaticSource<R> {
    /// Creates a source serving `snapshot` after [`DEFAULT_LATENCY`].
    pub fn new(snapshot: Vec<R>) -> Self {
        Self {
            snapshot,
            latency: DEFAULT_LATENCY,
        }
    }

    /// Sets the delay before the snapshot is served.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Returns the snapshot served on every fetch.
    pub fn snapshot(&self) -> &[R] {
        &self.snapshot
    }
}

impl<R: Record> SnapshotSource<R> for StaticSource<R> {
    fn fetch(&self) -> impl Future<Output = SyncResult<Vec<R>>> + Send {
        async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            Ok(self.snapshot.clone())
        }
    }
}

/// A scripted response of a [`MockSource`].
#[derive(Debug, Clone)]
pub enum MockResponse<R> {
    /// Serve this snapshot.
    Snapshot(Vec<R>),
    /// Fail with a source error.
    Fail {
        /// Error message.
        message: String,
        /// Whether the failure is retryable.
        retryable: bool,
    },
    /// Never answer.
    Hang,
}

/// A scripted source for testing.
///
/// Responses are consumed in order; once the script runs out every fetch
/// fails with a fatal source error.
#[derive(Debug)]
pub struct MockSource<R> {
    responses: Mutex<VecDeque<MockResponse<R>>>,
    latency: Duration,
    calls: AtomicUsize,
}

impl<R: Record> MockSource<R> {
    /// Creates a mock source with an empty script.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sets the delay before each scripted response.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Appends a response to the script.
    pub fn push(&self, response: MockResponse<R>) {
        self.responses.lock().push_back(response);
    }

    /// Appends a snapshot to the script.
    pub fn push_snapshot(&self, snapshot: Vec<R>) {
        self.push(MockResponse::Snapshot(snapshot));
    }

    /// Appends a failure to the script.
    pub fn push_failure(&self, message: impl Into<String>, retryable: bool) {
        self.push(MockResponse::Fail {
            message: message.into(),
            retryable,
        });
    }

    /// Number of fetches made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }
}

impl<R: Record> Default for MockSource<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> SnapshotSource<R> for MockSource<R> {
    fn fetch(&self) -> impl Future<Output = SyncResult<Vec<R>>> + Send {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.responses.lock().pop_front();
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            match next {
                Some(MockResponse::Snapshot(snapshot)) => Ok(snapshot),
                Some(MockResponse::Fail { message, retryable }) => {
                    Err(SyncError::Source { message, retryable })
                }
                Some(MockResponse::Hang) => std::future::pending().await,
                None => Err(SyncError::source_fatal("no scripted response")),
            }
        }
    }
}
