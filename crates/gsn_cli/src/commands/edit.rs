//! Edit command implementation.

use super::{on_list, Entity};
use crate::data::Session;
use crate::error::{CliError, CliResult};
use gsn_core::Record;
use gsn_sync_engine::{RecordList, SnapshotSource};

/// Runs the edit command: applies `field=value` assignments to one record
/// and saves it.
pub fn run(session: &Session, entity: Entity, id: &str, assignments: &[String]) -> CliResult<String> {
    if assignments.is_empty() {
        return Err(CliError::usage("nothing to change; pass field=value"));
    }
    let navigator = &session.navigator;
    on_list!(navigator, entity, |list| edit(list, id, assignments))
}

fn edit<R: Record, S: SnapshotSource<R>>(
    list: &RecordList<R, S>,
    id: &str,
    assignments: &[String],
) -> CliResult<String> {
    let mut session = list.open_edit(id)?;
    for assignment in assignments {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::usage(format!("expected field=value, got {assignment:?}")))?;
        session.set_by_name(field.trim(), value)?;
    }
    if !session.is_dirty() {
        session.cancel();
        return Ok(format!("{id} unchanged"));
    }
    let saved = list.commit_edit(session)?;
    Ok(serde_json::to_string_pretty(&saved)?)
}
