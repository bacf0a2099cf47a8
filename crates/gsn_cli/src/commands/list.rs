//! List command implementation.

use super::{on_list, Entity, OutputFormat, QueryArgs};
use crate::data::Session;
use crate::error::{CliError, CliResult};
use gsn_core::{FieldKey, Record};
use gsn_sync_engine::{RecordList, SnapshotSource};

/// Runs the list command.
pub fn run(
    session: &Session,
    entity: Entity,
    query: &QueryArgs,
    overdue: bool,
    format: OutputFormat,
) -> CliResult<String> {
    if overdue && entity != Entity::Proposals {
        return Err(CliError::usage("--overdue only applies to proposals"));
    }
    let navigator = &session.navigator;
    if overdue {
        query.apply(&navigator.proposals)?;
        let today = session.today;
        let visible: Vec<_> = navigator
            .proposals
            .view()
            .into_iter()
            .filter(|p| p.is_overdue(today))
            .collect();
        return render(&visible, navigator.proposals.len(), format);
    }
    on_list!(navigator, entity, |list| view(list, query, format))
}

fn view<R: Record, S: SnapshotSource<R>>(
    list: &RecordList<R, S>,
    query: &QueryArgs,
    format: OutputFormat,
) -> CliResult<String> {
    query.apply(list)?;
    render(&list.view(), list.len(), format)
}

/// Renders records as a table or as JSON.
pub fn render<R: Record>(records: &[R], total: usize, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Text => {
            let mut lines = Vec::with_capacity(records.len() + 2);
            lines.push(
                R::Field::ALL
                    .iter()
                    .map(|f| f.label())
                    .collect::<Vec<_>>()
                    .join("\t"),
            );
            for record in records {
                lines.push(
                    R::Field::ALL
                        .iter()
                        .map(|f| record.field(*f).to_text().into_owned())
                        .collect::<Vec<_>>()
                        .join("\t"),
                );
            }
            lines.push(format!("{} of {} {}", records.len(), total, R::KIND));
            Ok(lines.join("\n"))
        }
    }
}
