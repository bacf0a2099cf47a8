//! Sync command implementation.

use super::{on_list, Entity};
use crate::data::Session;
use crate::error::CliResult;
use gsn_core::Record;
use gsn_sync_engine::{RecordList, SnapshotSource, SyncConfirmer, SyncOutcome};
use std::io::{self, BufRead, Write};

/// Runs the sync command.
///
/// Without `assume_yes` the confirmation is read from stdin.
pub async fn run(session: &Session, entity: Entity, assume_yes: bool) -> CliResult<String> {
    let navigator = &session.navigator;
    let output = on_list!(navigator, entity, |list| {
        if assume_yes {
            cycle(list, &true).await?
        } else {
            cycle(list, &confirm_on_stdin).await?
        }
    });
    Ok(output)
}

async fn cycle<R: Record, S: SnapshotSource<R>>(
    list: &RecordList<R, S>,
    confirmer: &impl SyncConfirmer,
) -> CliResult<String> {
    let output = match list.request_sync(confirmer).await? {
        SyncOutcome::Completed(result) => format!(
            "{} added, {} updated, {} removed in {} attempt(s)\n{}",
            result.changes.added,
            result.changes.updated,
            result.changes.removed,
            result.attempts,
            list.last_sync_label()
        ),
        SyncOutcome::AlreadySyncing => "A sync is already running".to_string(),
        SyncOutcome::Declined => "Sync declined".to_string(),
    };
    Ok(output)
}

/// Asks `message` on stderr and reads a yes/no answer from stdin.
fn confirm_on_stdin(message: &str) -> bool {
    eprint!("{message} [s/N] ");
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
