//! # GSN Core
//!
//! Record model and list operations of the GOTEC Sales Navigator.
//!
//! This crate provides:
//! - Customer, machine and proposal records with typed field tables
//! - An ordered in-memory [`Store`] with unique identifiers
//! - The snapshot [`diff`] used by sync
//! - Filtered, searched and sorted projections ([`project`])
//! - Edit sessions and proposal creation
//! - Toast notifications with automatic expiry
//! - ROI estimates, CSV and HTML exports, `mailto:` links
//! - The dashboard task board and recent proposals panel
//!
//! ## Key Invariants
//!
//! - Identifiers are unique within a store and never change
//! - Projections never mutate the store
//! - Edits only reach the store on commit, replacing by identifier
//! - Diffing depends only on identifiers and content, not order

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
mod create;
mod diff;
mod edit;
mod error;
pub mod export;
pub mod format;
pub mod messages;
mod notify;
mod query;
mod record;
mod roi;
mod store;
mod tasks;

pub use create::{
    create_proposal, next_proposal_id, set_status, ProposalDraft, DEFAULT_PROPOSAL_PREFIX,
    DEFAULT_SALESPERSON,
};
pub use diff::{diff, DiffResult};
pub use edit::EditSession;
pub use error::{CoreError, CoreResult};
pub use notify::{Notifier, NotifierConfig, Severity, Toast};
pub use query::{
    compare_records, natural_cmp, parse_date, project, QueryState, SortDirection, SortSpec,
    StatusFilter,
};
pub use record::{
    ContactPerson, Customer, CustomerField, CustomerStatus, FieldKey, FieldKind, FieldValue,
    Machine, MachineField, MachineStatus, Proposal, ProposalField, ProposalStatus, Record,
    RecordKind, RecordStatus, SearchMode, PRIMARY_CONTACT_ROLE,
};
pub use roi::{RoiInput, RoiResults};
pub use store::{SharedStore, Store};
pub use tasks::{
    compare_tasks, recent_proposals, CompletionFilter, Task, TaskBoard, TaskPriority, TaskQuery,
    RECENT_PROPOSALS,
};
