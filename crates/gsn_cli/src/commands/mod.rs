//! CLI command implementations.
//!
//! Every command returns the text to print on stdout. Notifications raised
//! along the way are printed by `main` on stderr.

/// Runs `$body` with `$list` bound to the list selected by `$entity`.
macro_rules! on_list {
    ($navigator:expr, $entity:expr, |$list:ident| $body:expr) => {
        match $entity {
            $crate::commands::Entity::Customers => {
                let $list = &$navigator.customers;
                $body
            }
            $crate::commands::Entity::Machines => {
                let $list = &$navigator.machines;
                $body
            }
            $crate::commands::Entity::Proposals => {
                let $list = &$navigator.proposals;
                $body
            }
        }
    };
}

pub(crate) use on_list;

pub mod assistant;
pub mod edit;
pub mod export;
pub mod list;
pub mod proposal;
pub mod roi;
pub mod sync;
pub mod tasks;

use crate::error::CliResult;
use clap::{Args, ValueEnum};
use gsn_core::{Record, StatusFilter};
use gsn_sync_engine::{RecordList, SnapshotSource};

/// Which list a command works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    /// Customer companies.
    Customers,
    /// Installed machines.
    Machines,
    /// Commercial proposals.
    Proposals,
}

/// Output format of listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated columns.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Search, filter and sort applied before listing or exporting.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Free-text search term
    #[arg(long)]
    pub search: Option<String>,

    /// Keep only records with this status, or All
    #[arg(long)]
    pub status: Option<String>,

    /// Sort by field; repeat a field to flip to descending
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort: Vec<String>,
}

impl QueryArgs {
    /// Applies the arguments to the list's query state, as a user would
    /// through the search box, the status dropdown and the column headers.
    pub fn apply<R: Record, S: SnapshotSource<R>>(&self, list: &RecordList<R, S>) -> CliResult<()> {
        if let Some(term) = &self.search {
            list.set_search(term.as_str());
        }
        if let Some(status) = &self.status {
            list.set_status_filter(status.parse::<StatusFilter<R::Status>>()?);
        }
        for name in &self.sort {
            list.request_sort(name.parse::<R::Field>()?);
        }
        Ok(())
    }
}
