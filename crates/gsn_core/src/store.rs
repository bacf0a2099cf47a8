//! In-memory record store.

use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// A store shared between a list view and its sync engine.
pub type SharedStore<R> = Arc<RwLock<Store<R>>>;

/// An ordered collection of records of one variant.
///
/// Insertion order is preserved and used as the default display order.
/// Identifiers are unique within a store. The store only changes through
/// whole-store replacement, single-record replacement or prepending.
#[derive(Debug, Clone, PartialEq)]
pub struct Store<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Store<R> {
    /// Creates a store, rejecting duplicate identifiers.
    pub fn new(records: Vec<R>) -> CoreResult<Self> {
        ensure_unique(&records)?;
        Ok(Self { records })
    }

    /// Creates an empty store.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Wraps the store for sharing.
    pub fn into_shared(self) -> SharedStore<R> {
        Arc::new(RwLock::new(self))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order.
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    /// Iterates records in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Looks up a record by identifier.
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Looks up a record by identifier, failing when absent.
    pub fn require(&self, id: &str) -> CoreResult<&R> {
        self.get(id).ok_or_else(|| CoreError::not_found(R::KIND, id))
    }

    /// Returns true if a record with this identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replaces the whole content with a snapshot.
    ///
    /// The store is left untouched when the snapshot repeats an identifier.
    pub fn replace_all(&mut self, snapshot: Vec<R>) -> CoreResult<()> {
        ensure_unique(&snapshot)?;
        self.records = snapshot;
        Ok(())
    }

    /// Replaces the record carrying the same identifier, keeping its
    /// position. Returns the previous version.
    pub fn replace(&mut self, record: R) -> CoreResult<R> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| CoreError::not_found(R::KIND, record.id()))?;
        Ok(std::mem::replace(slot, record))
    }

    /// Inserts a record at the front (most-recent-first).
    pub fn prepend(&mut self, record: R) -> CoreResult<()> {
        if self.contains(record.id()) {
            return Err(CoreError::DuplicateId {
                kind: R::KIND,
                id: record.id().to_string(),
            });
        }
        self.records.insert(0, record);
        Ok(())
    }

    /// Consumes the store, returning its records.
    pub fn into_vec(self) -> Vec<R> {
        self.records
    }
}

impl<R: Record> Default for Store<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, R: Record> IntoIterator for &'a Store<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn ensure_unique<R: Record>(records: &[R]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(CoreError::DuplicateId {
                kind: R::KIND,
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ContactPerson, Customer, CustomerStatus};

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.into(),
            name: name.into(),
            contact_people: vec![ContactPerson::new("Ana", "CEO")],
            country: "Portugal".into(),
            email: String::new(),
            phone: String::new(),
            salesperson: "João Chanoca".into(),
            status: CustomerStatus::Active,
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Store::new(vec![customer("C1", "A"), customer("C1", "B")]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { .. }));
    }

    #[test]
    fn replace_keeps_position() {
        let mut store =
            Store::new(vec![customer("C1", "A"), customer("C2", "B"), customer("C3", "C")])
                .unwrap();
        let old = store.replace(customer("C2", "Bee")).unwrap();
        assert_eq!(old.name, "B");
        let names: Vec<_> = store.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "Bee", "C"]);
    }

    #[test]
    fn replace_unknown_id_fails() {
        let mut store = Store::new(vec![customer("C1", "A")]).unwrap();
        let err = store.replace(customer("C9", "Z")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_all_validates_before_mutating() {
        let mut store = Store::new(vec![customer("C1", "A")]).unwrap();
        assert!(store
            .replace_all(vec![customer("C2", "B"), customer("C2", "B")])
            .is_err());
        assert_eq!(store.as_slice(), &[customer("C1", "A")]);
    }

    #[test]
    fn prepend_puts_record_first() {
        let mut store = Store::new(vec![customer("C1", "A")]).unwrap();
        store.prepend(customer("C2", "B")).unwrap();
        assert_eq!(store.as_slice()[0].id, "C2");
        assert!(store.prepend(customer("C1", "again")).is_err());
    }
}
