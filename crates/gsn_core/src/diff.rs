//! Snapshot comparison.
//!
//! [`diff`] classifies every identifier of two snapshots as added,
//! updated or removed. It is pure: the result depends only on the set of
//! (identifier, content) pairs on each side, never on iteration order.

use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;

/// Change counts between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DiffResult {
    /// Identifiers only present in the new snapshot.
    pub added: usize,
    /// Identifiers present in both with different content.
    pub updated: usize,
    /// Identifiers only present in the old snapshot.
    pub removed: usize,
}

impl DiffResult {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Sum of all three counts.
    pub fn total(&self) -> usize {
        self.added + self.updated + self.removed
    }

    /// Lists the non-zero categories, e.g. `2 adicionada(s), 1 removida(s)`.
    ///
    /// Returns `None` when nothing changed.
    pub fn change_list(&self) -> Option<String> {
        let parts: Vec<String> = [
            (self.added, "adicionada(s)"),
            (self.updated, "atualizada(s)"),
            (self.removed, "removida(s)"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{count} {label}"))
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Compares two snapshots by identifier.
///
/// A record present on both sides with identical content contributes to
/// none of the counts. If a side repeats an identifier the last
/// occurrence wins.
pub fn diff<R: Record>(old: &[R], new: &[R]) -> DiffResult {
    let old_by_id: HashMap<&str, &R> = old.iter().map(|r| (r.id(), r)).collect();
    let new_by_id: HashMap<&str, &R> = new.iter().map(|r| (r.id(), r)).collect();

    let mut result = DiffResult::default();
    for (id, record) in &new_by_id {
        match old_by_id.get(id) {
            None => result.added += 1,
            Some(previous) if *previous != *record => result.updated += 1,
            Some(_) => {}
        }
    }
    result.removed = old_by_id
        .keys()
        .filter(|id| !new_by_id.contains_key(*id))
        .count();
    result
}
