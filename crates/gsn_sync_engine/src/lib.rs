//! # GSN Sync Engine
//!
//! Snapshot sync orchestrator for the GOTEC Sales Navigator.
//!
//! This crate provides:
//! - Sync state machine (idle → syncing → success → idle)
//! - Confirmation gate and re-entry guard
//! - Fetch timeout, retry with exponential backoff and cancellation
//! - Snapshot source abstraction with static and scripted sources
//! - List bundles tying a store, its query state and its engine together
//!
//! ## Architecture
//!
//! The central system is authoritative. A cycle fetches the full
//! snapshot of one list, diffs it against the local store, replaces the
//! store wholesale and announces the change counts. There is no merge and
//! no push.
//!
//! ## Key Invariants
//!
//! - At most one cycle runs per engine
//! - After a completed cycle the store equals the fetched snapshot
//! - A failed, declined or cancelled cycle leaves the store untouched
//! - Locks are never held across an await point

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod list;
mod source;
mod state;

pub use config::{RetryConfig, SyncConfig};
pub use error::{SyncError, SyncResult};
pub use list::{DemoNavigator, Navigator, RecordList};
pub use source::{MockResponse, MockSource, SnapshotSource, StaticSource, DEFAULT_LATENCY};
pub use state::{
    SyncConfirmer, SyncCycleResult, SyncEngine, SyncOutcome, SyncState, SyncStats,
};
