//! Proposal creation and status changes.

use crate::error::CoreResult;
use crate::record::{Proposal, ProposalStatus};
use crate::store::Store;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier prefix of generated proposals.
pub const DEFAULT_PROPOSAL_PREFIX: &str = "PROP-2024-";

/// Salesperson assigned to new proposals unless overridden.
pub const DEFAULT_SALESPERSON: &str = "João Chanoca";

/// User-supplied fields of a new proposal.
///
/// Identifier, creation date and status are assigned by
/// [`create_proposal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProposalDraft {
    /// Opportunity title.
    pub opportunity: String,
    /// Customer company name.
    pub customer_name: String,
    /// Free-form notes.
    pub observations: String,
    /// Promised delivery date, `YYYY-MM-DD`.
    pub delivery_deadline: String,
    /// Offered machine or solution.
    pub machine: String,
    /// Total value in EUR.
    pub total_value: f64,
    /// Account owner.
    pub salesperson: String,
}

impl Default for ProposalDraft {
    fn default() -> Self {
        Self {
            opportunity: String::new(),
            customer_name: String::new(),
            observations: String::new(),
            delivery_deadline: String::new(),
            machine: String::new(),
            total_value: 0.0,
            salesperson: DEFAULT_SALESPERSON.to_string(),
        }
    }
}

impl ProposalDraft {
    /// Creates a draft for an opportunity at a customer.
    pub fn new(opportunity: impl Into<String>, customer_name: impl Into<String>) -> Self {
        Self {
            opportunity: opportunity.into(),
            customer_name: customer_name.into(),
            ..Self::default()
        }
    }

    /// Sets the observations.
    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = observations.into();
        self
    }

    /// Sets the delivery deadline.
    pub fn with_delivery_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.delivery_deadline = deadline.into();
        self
    }

    /// Sets the offered machine.
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.machine = machine.into();
        self
    }

    /// Sets the total value.
    pub fn with_total_value(mut self, value: f64) -> Self {
        self.total_value = if value.is_finite() { value } else { 0.0 };
        self
    }

    /// Sets the salesperson.
    pub fn with_salesperson(mut self, salesperson: impl Into<String>) -> Self {
        self.salesperson = salesperson.into();
        self
    }
}

/// Computes the next identifier under `prefix`.
///
/// Takes the largest numeric suffix among identifiers starting with the
/// prefix, adds one and zero-pads to three digits. Identifiers with a
/// non-numeric suffix are ignored.
pub fn next_proposal_id(records: &[Proposal], prefix: &str) -> String {
    let highest = records
        .iter()
        .filter_map(|p| p.id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:03}", highest.saturating_add(1))
}

/// Creates a proposal from a draft and prepends it to the store.
///
/// The new proposal starts as [`ProposalStatus::Draft`], dated `today`.
pub fn create_proposal(
    store: &mut Store<Proposal>,
    draft: ProposalDraft,
    today: NaiveDate,
) -> CoreResult<Proposal> {
    let proposal = Proposal {
        id: next_proposal_id(store.as_slice(), DEFAULT_PROPOSAL_PREFIX),
        date: today.format("%Y-%m-%d").to_string(),
        opportunity: draft.opportunity,
        customer_name: draft.customer_name,
        observations: draft.observations,
        delivery_deadline: draft.delivery_deadline,
        status: ProposalStatus::Draft,
        machine: draft.machine,
        total_value: draft.total_value,
        salesperson: draft.salesperson,
    };
    store.prepend(proposal.clone())?;
    debug!(id = %proposal.id, "Proposal created");
    Ok(proposal)
}

/// Moves a proposal to another status.
pub fn set_status(
    store: &mut Store<Proposal>,
    id: &str,
    status: ProposalStatus,
) -> CoreResult<Proposal> {
    let mut proposal = store.require(id)?.clone();
    proposal.status = status;
    store.replace(proposal.clone())?;
    debug!(id = %id, status = %status, "Proposal status changed");
    Ok(proposal)
}
