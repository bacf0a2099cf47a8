//! Machines installed at customer sites.

use super::{
    immutable, record_fields, record_status, FieldValue, Record, RecordKind, RecordStatus, SearchMode,
};
use crate::error::CoreResult;
use serde::{Deserialize, Serialize};

record_status! {
    /// Operating status of an installed machine.
    pub enum MachineStatus {
        /// Running.
        Operational,
        /// Under maintenance.
        Maintenance,
        /// Stopped.
        Offline,
    }
}

record_fields! {
    /// Fields of a [`Machine`].
    pub enum MachineField for RecordKind::Machine {
        /// Asset identifier.
        AssetId => ("assetId", "ID", Text),
        /// Model designation.
        MachineModel => ("machineModel", "Modelo", Text),
        /// Manufacturer.
        MachineBrand => ("machineBrand", "Marca", Text),
        /// Owning customer.
        CustomerName => ("customerName", "Nome do Cliente", Text),
        /// Contact at the customer.
        ContactPerson => ("contactPerson", "Contacto", Text),
        /// Customer country.
        CustomerCountry => ("customerCountry", "País", Text),
        /// Customer e-mail.
        CustomerEmail => ("customerEmail", "Email", Text),
        /// Customer phone.
        CustomerPhone => ("customerPhone", "Telefone", Text),
        /// Account owner.
        Salesperson => ("salesperson", "Comercial", Text),
        /// Operating status.
        Status => ("status", "Estado da Máquina", Text),
    }
}

/// A machine installed at a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Asset identifier (`BRAND-NNN`).
    pub asset_id: String,
    /// Model designation.
    pub machine_model: String,
    /// Manufacturer.
    pub machine_brand: String,
    /// Owning customer.
    pub customer_name: String,
    /// Contact at the customer.
    pub contact_person: String,
    /// Customer country.
    pub customer_country: String,
    /// Customer e-mail.
    pub customer_email: String,
    /// Customer phone.
    pub customer_phone: String,
    /// Account owner.
    pub salesperson: String,
    /// Operating status.
    pub status: MachineStatus,
}

impl Record for Machine {
    type Field = MachineField;
    type Status = MachineStatus;

    const KIND: RecordKind = RecordKind::Machine;
    const SEARCH_MODE: SearchMode = SearchMode::AnyField;

    fn id(&self) -> &str {
        &self.asset_id
    }

    fn status(&self) -> MachineStatus {
        self.status
    }

    fn field(&self, field: MachineField) -> FieldValue<'_> {
        match field {
            MachineField::AssetId => FieldValue::text(&self.asset_id),
            MachineField::MachineModel => FieldValue::text(&self.machine_model),
            MachineField::MachineBrand => FieldValue::text(&self.machine_brand),
            MachineField::CustomerName => FieldValue::text(&self.customer_name),
            MachineField::ContactPerson => FieldValue::text(&self.contact_person),
            MachineField::CustomerCountry => FieldValue::text(&self.customer_country),
            MachineField::CustomerEmail => FieldValue::text(&self.customer_email),
            MachineField::CustomerPhone => FieldValue::text(&self.customer_phone),
            MachineField::Salesperson => FieldValue::text(&self.salesperson),
            MachineField::Status => FieldValue::text(self.status.as_str()),
        }
    }

    fn set_field(&mut self, field: MachineField, value: &str) -> CoreResult<()> {
        let slot = match field {
            MachineField::AssetId => return immutable("assetId"),
            MachineField::Status => {
                self.status = value.parse()?;
                return Ok(());
            }
            MachineField::MachineModel => &mut self.machine_model,
            MachineField::MachineBrand => &mut self.machine_brand,
            MachineField::CustomerName => &mut self.customer_name,
            MachineField::ContactPerson => &mut self.contact_person,
            MachineField::CustomerCountry => &mut self.customer_country,
            MachineField::CustomerEmail => &mut self.customer_email,
            MachineField::CustomerPhone => &mut self.customer_phone,
            MachineField::Salesperson => &mut self.salesperson,
        };
        *slot = value.to_string();
        Ok(())
    }

    fn searchable_fields() -> &'static [MachineField] {
        <MachineField as super::FieldKey>::ALL
    }

    fn display_name(&self) -> &str {
        &self.asset_id
    }
}
