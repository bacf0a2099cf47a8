//! Edit sessions.
//!
//! An [`EditSession`] holds a private copy of one record. Changes never
//! reach the store until [`EditSession::commit`], which replaces the record
//! carrying the same identifier in place.

use crate::error::CoreResult;
use crate::record::Record;
use crate::store::Store;
use tracing::debug;

/// A transient working copy of one record.
///
/// Several sessions may be open at once on distinct records; each commits
/// independently and the last commit wins.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<R: Record> {
    /// Record as it was when the session opened.
    original: R,
    /// Working copy.
    draft: R,
}

impl<R: Record> EditSession<R> {
    /// Opens a session on a copy of `record`.
    pub fn open(record: &R) -> Self {
        Self {
            original: record.clone(),
            draft: record.clone(),
        }
    }

    /// Opens a session on the store record with the given identifier.
    pub fn open_by_id(store: &Store<R>, id: &str) -> CoreResult<Self> {
        store.require(id).map(Self::open)
    }

    /// Identifier of the edited record.
    #[must_use]
    pub fn id(&self) -> &str {
        self.original.id()
    }

    /// Returns the working copy.
    #[must_use]
    pub fn draft(&self) -> &R {
        &self.draft
    }

    /// Returns the record as it was when the session opened.
    #[must_use]
    pub fn original(&self) -> &R {
        &self.original
    }

    /// Returns true if the working copy differs from the original.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Writes one field of the working copy.
    pub fn set(&mut self, field: R::Field, value: &str) -> CoreResult<()> {
        self.draft.set_field(field, value)
    }

    /// Writes one field addressed by its wire name.
    pub fn set_by_name(&mut self, name: &str, value: &str) -> CoreResult<()> {
        let field = name.parse()?;
        self.set(field, value)
    }

    /// Returns the session with one field changed.
    pub fn change(mut self, field: R::Field, value: &str) -> CoreResult<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Writes the working copy back into the store, replacing the record
    /// with the same identifier and keeping its position.
    ///
    /// Fails with [`CoreError::RecordNotFound`](crate::CoreError::RecordNotFound)
    /// if the record is no longer in the store; the store is then untouched.
    pub fn commit(self, store: &mut Store<R>) -> CoreResult<R> {
        let id = self.id().to_string();
        store.replace(self.draft.clone())?;
        debug!(kind = %R::KIND, id = %id, dirty = self.is_dirty(), "Edit committed");
        Ok(self.draft)
    }

    /// Discards the session.
    pub fn cancel(self) {
        debug!(kind = %R::KIND, id = %self.id(), "Edit cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        ContactPerson, Customer, CustomerField, CustomerStatus, PRIMARY_CONTACT_ROLE,
    };

    fn customer(id: &str, contacts: Vec<ContactPerson>) -> Customer {
        Customer {
            id: id.into(),
            name: format!("Empresa {id}"),
            contact_people: contacts,
            country: "Portugal".into(),
            email: String::new(),
            phone: String::new(),
            salesperson: "João Chanoca".into(),
            status: CustomerStatus::Active,
        }
    }

    fn store() -> Store<Customer> {
        Store::new(vec![
            customer("CUST-001", vec![ContactPerson::new("Ricardo Pereira", "CEO")]),
            customer("CUST-002", vec![ContactPerson::new("Sofia Costa", "Compras")]),
            customer("CUST-003", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn edits_stay_private_until_commit() {
        let mut store = store();
        let before = store.clone();
        let session = EditSession::open_by_id(&store, "CUST-002")
            .unwrap()
            .change(CustomerField::Name, "Injetec SA")
            .unwrap();
        assert!(session.is_dirty());
        assert_eq!(store, before);

        session.commit(&mut store).unwrap();
        for (after, old) in store.iter().zip(before.iter()) {
            if after.id == "CUST-002" {
                assert_eq!(after.name, "Injetec SA");
            } else {
                assert_eq!(after, old);
            }
        }
        assert_eq!(store.as_slice()[1].id, "CUST-002");
    }

    #[test]
    fn primary_contact_writes_first_entry() {
        let store = store();
        let session = EditSession::open_by_id(&store, "CUST-001")
            .unwrap()
            .change(CustomerField::PrimaryContact, "Ana Pereira")
            .unwrap();
        assert_eq!(
            session.draft().contact_people,
            vec![ContactPerson::new("Ana Pereira", "CEO")]
        );
    }

    #[test]
    fn primary_contact_created_with_default_role() {
        let store = store();
        let mut session = EditSession::open_by_id(&store, "CUST-003").unwrap();
        session.set_by_name("contactPeople", "Jorge Antunes").unwrap();
        assert_eq!(
            session.draft().contact_people,
            vec![ContactPerson::new("Jorge Antunes", PRIMARY_CONTACT_ROLE)]
        );
    }

    #[test]
    fn commit_on_removed_record_is_not_found() {
        let mut store = store();
        let session = EditSession::open_by_id(&store, "CUST-001")
            .unwrap()
            .change(CustomerField::Country, "Espanha")
            .unwrap();
        store
            .replace_all(vec![customer("CUST-002", vec![])])
            .unwrap();
        let snapshot = store.clone();

        let err = session.commit(&mut store).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store, snapshot);
    }

    #[test]
    fn identifier_cannot_change() {
        let store = store();
        let mut session = EditSession::open_by_id(&store, "CUST-001").unwrap();
        assert!(session.set(CustomerField::Id, "CUST-999").is_err());
        assert!(!session.is_dirty());
        session.cancel();
    }
}
