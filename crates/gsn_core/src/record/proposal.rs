//! Commercial proposals.

use super::{
    immutable, record_fields, record_status, FieldValue, Record, RecordKind, RecordStatus, SearchMode,
};
use crate::error::CoreResult;
use crate::query::{parse_date, SortDirection, SortSpec};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

record_status! {
    /// Lifecycle status of a proposal.
    pub enum ProposalStatus {
        /// Being written; the lowest-commitment state.
        Draft,
        /// Sent to the customer.
        Sent,
        /// Won.
        Accepted,
        /// Lost.
        Rejected,
        /// Validity ran out.
        Expired,
    }
}

record_fields! {
    /// Fields of a [`Proposal`].
    pub enum ProposalField for RecordKind::Proposal {
        /// Opportunity identifier.
        Id => ("id", "ID", Text),
        /// Opportunity date.
        Date => ("date", "Data Oportunidade", Date),
        /// Opportunity title.
        Opportunity => ("opportunity", "Oportunidade", Text),
        /// Customer company name.
        CustomerName => ("customerName", "Cliente", Text),
        /// Free-form notes.
        Observations => ("observations", "Observações", Text),
        /// Promised delivery date.
        DeliveryDeadline => ("deliveryDeadline", "Prazo de Entrega", Date),
        /// Lifecycle status.
        Status => ("status", "Estado", Text),
        /// Offered machine or solution.
        Machine => ("machine", "Máquina", Text),
        /// Total value in EUR.
        TotalValue => ("totalValue", "Valor Total", Number),
        /// Account owner.
        Salesperson => ("salesperson", "Comercial", Text),
    }
}

/// A commercial proposal for one opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Opportunity identifier (`PROP-YYYY-NNN`).
    pub id: String,
    /// Opportunity date, `YYYY-MM-DD`.
    pub date: String,
    /// Opportunity title.
    pub opportunity: String,
    /// Customer company name.
    pub customer_name: String,
    /// Free-form notes.
    pub observations: String,
    /// Promised delivery date, `YYYY-MM-DD`.
    pub delivery_deadline: String,
    /// Lifecycle status.
    pub status: ProposalStatus,
    /// Offered machine or solution.
    pub machine: String,
    /// Total value in EUR.
    pub total_value: f64,
    /// Account owner.
    pub salesperson: String,
}

impl Proposal {
    /// Returns true when the deadline has passed and the proposal is
    /// still open (neither accepted nor rejected).
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        let open = !matches!(
            self.status,
            ProposalStatus::Accepted | ProposalStatus::Rejected
        );
        open && parse_date(&self.delivery_deadline).is_some_and(|deadline| deadline < today)
    }
}

/// Parses a monetary amount leniently; unreadable input becomes zero.
pub(crate) fn parse_amount(value: &str) -> f64 {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl Record for Proposal {
    type Field = ProposalField;
    type Status = ProposalStatus;

    const KIND: RecordKind = RecordKind::Proposal;
    const SEARCH_MODE: SearchMode = SearchMode::AllKeywords;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ProposalStatus {
        self.status
    }

    fn field(&self, field: ProposalField) -> FieldValue<'_> {
        match field {
            ProposalField::Id => FieldValue::text(&self.id),
            ProposalField::Date => FieldValue::Date(&self.date),
            ProposalField::Opportunity => FieldValue::text(&self.opportunity),
            ProposalField::CustomerName => FieldValue::text(&self.customer_name),
            ProposalField::Observations => FieldValue::text(&self.observations),
            ProposalField::DeliveryDeadline => FieldValue::Date(&self.delivery_deadline),
            ProposalField::Status => FieldValue::text(self.status.as_str()),
            ProposalField::Machine => FieldValue::text(&self.machine),
            ProposalField::TotalValue => FieldValue::Number(self.total_value),
            ProposalField::Salesperson => FieldValue::text(&self.salesperson),
        }
    }

    fn set_field(&mut self, field: ProposalField, value: &str) -> CoreResult<()> {
        match field {
            ProposalField::Id => return immutable("id"),
            ProposalField::Date => self.date = value.to_string(),
            ProposalField::Opportunity => self.opportunity = value.to_string(),
            ProposalField::CustomerName => self.customer_name = value.to_string(),
            ProposalField::Observations => self.observations = value.to_string(),
            ProposalField::DeliveryDeadline => self.delivery_deadline = value.to_string(),
            ProposalField::Status => self.status = value.parse()?,
            ProposalField::Machine => self.machine = value.to_string(),
            ProposalField::TotalValue => self.total_value = parse_amount(value),
            ProposalField::Salesperson => self.salesperson = value.to_string(),
        }
        Ok(())
    }

    fn searchable_fields() -> &'static [ProposalField] {
        &[
            ProposalField::Id,
            ProposalField::Opportunity,
            ProposalField::CustomerName,
            ProposalField::Machine,
            ProposalField::Salesperson,
            ProposalField::Observations,
        ]
    }

    fn display_name(&self) -> &str {
        &self.opportunity
    }

    fn default_sort() -> Option<SortSpec<ProposalField>> {
        Some(SortSpec::new(ProposalField::Date, SortDirection::Descending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(status: ProposalStatus, deadline: &str) -> Proposal {
        Proposal {
            id: "PROP-2024-001".into(),
            date: "2024-06-15".into(),
            opportunity: "Fornecimento de Centro de Fresagem WEIDA".into(),
            customer_name: "Moldes RP".into(),
            observations: String::new(),
            delivery_deadline: deadline.into(),
            status,
            machine: "WEIDA GMILL 850".into(),
            total_value: 155000.0,
            salesperson: "João Chanoca".into(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn overdue_only_while_open() {
        let today = day("2024-09-01");
        assert!(proposal(ProposalStatus::Sent, "2024-08-30").is_overdue(today));
        assert!(proposal(ProposalStatus::Draft, "2024-08-30").is_overdue(today));
        assert!(!proposal(ProposalStatus::Accepted, "2024-08-30").is_overdue(today));
        assert!(!proposal(ProposalStatus::Rejected, "2024-08-30").is_overdue(today));
        assert!(!proposal(ProposalStatus::Sent, "2024-09-01").is_overdue(today));
        assert!(!proposal(ProposalStatus::Sent, "soon").is_overdue(today));
    }

    #[test]
    fn total_value_parses_leniently() {
        let mut p = proposal(ProposalStatus::Draft, "2024-08-30");
        p.set_field(ProposalField::TotalValue, "12500.5").unwrap();
        assert_eq!(p.total_value, 12500.5);
        p.set_field(ProposalField::TotalValue, "12,5").unwrap();
        assert_eq!(p.total_value, 12.5);
        p.set_field(ProposalField::TotalValue, "a lot").unwrap();
        assert_eq!(p.total_value, 0.0);
    }

    #[test]
    fn date_fields_are_typed() {
        let p = proposal(ProposalStatus::Draft, "2024-08-30");
        assert_eq!(p.field(ProposalField::DeliveryDeadline), FieldValue::Date("2024-08-30"));
        assert_eq!(p.field(ProposalField::TotalValue), FieldValue::Number(155000.0));
    }

    #[test]
    fn default_sort_is_newest_first() {
        let spec = Proposal::default_sort().unwrap();
        assert_eq!(spec.field, ProposalField::Date);
        assert_eq!(spec.direction, SortDirection::Descending);
    }
}
