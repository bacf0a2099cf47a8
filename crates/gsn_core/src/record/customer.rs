//! Customer companies.

use super::{
    immutable, record_fields, record_status, FieldValue, Record, RecordKind, RecordStatus, SearchMode,
};
use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Role given to a contact created through the primary contact field.
pub const PRIMARY_CONTACT_ROLE: &str = "Contacto Principal";

record_status! {
    /// Relationship status of a customer.
    pub enum CustomerStatus {
        /// Buying customer.
        Active,
        /// Prospect.
        Lead,
        /// Dormant account.
        Inactive,
    }
}

record_fields! {
    /// Fields of a [`Customer`].
    pub enum CustomerField for RecordKind::Customer {
        /// Identifier.
        Id => ("id", "ID", Text),
        /// Company name.
        Name => ("name", "Nome", Text),
        /// Primary contact name. Reads and writes index 0 of the contact list.
        PrimaryContact => ("contactPeople", "Pessoas de Contacto", Text),
        /// Country.
        Country => ("country", "País", Text),
        /// E-mail address.
        Email => ("email", "Email", Text),
        /// Phone number.
        Phone => ("phone", "Telefone", Text),
        /// Account owner.
        Salesperson => ("salesperson", "Comercial", Text),
        /// Relationship status.
        Status => ("status", "Estado", Text),
    }
}

/// A person to talk to at a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPerson {
    /// Full name.
    pub name: String,
    /// Role inside the company.
    pub role: String,
}

impl ContactPerson {
    /// Creates a contact.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// A customer company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Identifier (`CUST-NNN`).
    pub id: String,
    /// Company name.
    pub name: String,
    /// Contacts, primary first.
    pub contact_people: Vec<ContactPerson>,
    /// Country.
    pub country: String,
    /// E-mail address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Account owner.
    pub salesperson: String,
    /// Relationship status.
    pub status: CustomerStatus,
}

impl Customer {
    /// Returns the primary contact, if any.
    pub fn primary_contact(&self) -> Option<&ContactPerson> {
        self.contact_people.first()
    }
}

impl Record for Customer {
    type Field = CustomerField;
    type Status = CustomerStatus;

    const KIND: RecordKind = RecordKind::Customer;
    const SEARCH_MODE: SearchMode = SearchMode::AnyField;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> CustomerStatus {
        self.status
    }

    fn field(&self, field: CustomerField) -> FieldValue<'_> {
        match field {
            CustomerField::Id => FieldValue::text(&self.id),
            CustomerField::Name => FieldValue::text(&self.name),
            CustomerField::PrimaryContact => {
                FieldValue::text(self.primary_contact().map_or("", |c| c.name.as_str()))
            }
            CustomerField::Country => FieldValue::text(&self.country),
            CustomerField::Email => FieldValue::text(&self.email),
            CustomerField::Phone => FieldValue::text(&self.phone),
            CustomerField::Salesperson => FieldValue::text(&self.salesperson),
            CustomerField::Status => FieldValue::text(self.status.as_str()),
        }
    }

    fn set_field(&mut self, field: CustomerField, value: &str) -> CoreResult<()> {
        match field {
            CustomerField::Id => return immutable("id"),
            CustomerField::Name => self.name = value.to_string(),
            CustomerField::PrimaryContact => match self.contact_people.first_mut() {
                Some(contact) => contact.name = value.to_string(),
                None => self
                    .contact_people
                    .push(ContactPerson::new(value, PRIMARY_CONTACT_ROLE)),
            },
            CustomerField::Country => self.country = value.to_string(),
            CustomerField::Email => self.email = value.to_string(),
            CustomerField::Phone => self.phone = value.to_string(),
            CustomerField::Salesperson => self.salesperson = value.to_string(),
            CustomerField::Status => self.status = value.parse()?,
        }
        Ok(())
    }

    fn searchable_fields() -> &'static [CustomerField] {
        &[
            CustomerField::Id,
            CustomerField::Name,
            CustomerField::PrimaryContact,
            CustomerField::Country,
            CustomerField::Email,
            CustomerField::Phone,
            CustomerField::Salesperson,
        ]
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    // Every contact is searchable, not only the primary one.
    fn search_values(&self) -> Vec<Cow<'_, str>> {
        let mut values = vec![Cow::Borrowed(self.id.as_str()), Cow::Borrowed(self.name.as_str())];
        values.extend(
            self.contact_people
                .iter()
                .map(|c| Cow::Borrowed(c.name.as_str())),
        );
        values.extend([
            Cow::Borrowed(self.country.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Borrowed(self.phone.as_str()),
            Cow::Borrowed(self.salesperson.as_str()),
        ]);
        values
    }
}
