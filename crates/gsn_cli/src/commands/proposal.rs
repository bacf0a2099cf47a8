//! Proposal commands: create, change status and compose mail.

use crate::data::Session;
use crate::error::CliResult;
use clap::Args;
use gsn_core::{ProposalDraft, ProposalStatus};

/// Fields of a new proposal.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Opportunity title
    #[arg(long)]
    pub opportunity: String,

    /// Customer company name
    #[arg(long)]
    pub customer: String,

    /// Offered machine or solution
    #[arg(long, default_value = "")]
    pub machine: String,

    /// Total value in EUR
    #[arg(long, default_value_t = 0.0)]
    pub value: f64,

    /// Promised delivery date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub deadline: String,

    /// Free-form notes
    #[arg(long, default_value = "")]
    pub observations: String,

    /// Account owner
    #[arg(long)]
    pub salesperson: Option<String>,
}

impl CreateArgs {
    fn into_draft(self) -> ProposalDraft {
        let draft = ProposalDraft::new(self.opportunity, self.customer)
            .with_machine(self.machine)
            .with_total_value(self.value)
            .with_delivery_deadline(self.deadline)
            .with_observations(self.observations);
        match self.salesperson {
            Some(salesperson) => draft.with_salesperson(salesperson),
            None => draft,
        }
    }
}

/// Creates a draft proposal at the top of the list.
pub fn create(session: &Session, args: CreateArgs) -> CliResult<String> {
    let created = session
        .navigator
        .proposals
        .create_proposal(args.into_draft(), session.today)?;
    Ok(serde_json::to_string_pretty(&created)?)
}

/// Moves a proposal to another status.
pub fn set_status(session: &Session, id: &str, status: &str) -> CliResult<String> {
    let status: ProposalStatus = status.parse()?;
    let updated = session.navigator.proposals.set_status(id, status)?;
    Ok(format!("{} is now {}", updated.id, updated.status))
}

/// Composes the mail presenting a proposal and prints its `mailto:` link.
pub fn mailto(session: &Session, id: &str) -> CliResult<String> {
    let customers = session.navigator.customers.records();
    let draft = session.navigator.proposals.mailto(id, &customers)?;
    Ok(draft.to_uri())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use gsn_core::CoreError;
    use gsn_sync_engine::SyncConfig;
    use gsn_testkit::fixtures::reference_date;

    fn session() -> Session {
        Session::open(None, reference_date(), SyncConfig::default()).unwrap()
    }

    fn args() -> CreateArgs {
        CreateArgs {
            opportunity: "Retrofit de torno".into(),
            customer: "Moldes RP".into(),
            machine: "HAMOO HT-2600".into(),
            value: 42_000.0,
            deadline: "2024-12-31".into(),
            observations: String::new(),
            salesperson: None,
        }
    }

    #[test]
    fn created_proposal_is_a_dated_draft() {
        let session = session();
        let before = session.navigator.proposals.len();
        let out = create(&session, args()).unwrap();
        let created: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(created["status"], "Draft");
        assert_eq!(created["date"], "2024-07-01");
        assert_eq!(created["salesperson"], "João Chanoca");
        assert_eq!(session.navigator.proposals.len(), before + 1);
        assert_eq!(
            session.navigator.proposals.records()[0].id,
            created["id"].as_str().unwrap()
        );
    }

    #[test]
    fn status_names_are_checked() {
        let session = session();
        let id = session.navigator.proposals.records()[0].id.clone();
        assert_eq!(
            set_status(&session, &id, "Accepted").unwrap(),
            format!("{id} is now Accepted")
        );
        assert!(matches!(
            set_status(&session, &id, "Won").unwrap_err(),
            CliError::Core(CoreError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn mailto_link_targets_the_customer() {
        let session = session();
        let proposal = session.navigator.proposals.records()[0].clone();
        let uri = mailto(&session, &proposal.id).unwrap();
        assert!(uri.starts_with("mailto:"));
        assert!(uri.contains("?subject=Proposta%20GOTEC"));
    }
}
