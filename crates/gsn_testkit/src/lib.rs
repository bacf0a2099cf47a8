//! # GSN Testkit
//!
//! Test utilities for the GOTEC Sales Navigator.
//!
//! This crate provides:
//! - Record fixtures and a fixed reference date
//! - Temporary data directories for file-based tests
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gsn_testkit::prelude::*;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn diff_counts_match(change in snapshot_change(proposal_strategy())) {
//!         prop_assert_eq!(gsn_core::diff(&change.old, &change.new), change.expected);
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
