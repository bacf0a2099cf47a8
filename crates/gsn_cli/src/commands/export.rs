//! Export command implementation.

use super::{on_list, Entity, QueryArgs};
use crate::data::Session;
use crate::error::{CliError, CliResult};
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes the visible records of a list as CSV.
pub fn csv(session: &Session, entity: Entity, query: &QueryArgs, path: &Path) -> CliResult<String> {
    let navigator = &session.navigator;
    let rows = on_list!(navigator, entity, |list| {
        query.apply(list)?;
        list.write_csv(path)?
    });
    info!(path = %path.display(), rows, "CSV written");
    Ok(format!("Exported {rows} record(s) to {}", path.display()))
}

/// Writes the visible proposals as a printable HTML report.
pub fn report(session: &Session, entity: Entity, query: &QueryArgs, path: &Path) -> CliResult<String> {
    if entity != Entity::Proposals {
        return Err(CliError::usage("reports are only available for proposals"));
    }
    let proposals = &session.navigator.proposals;
    query.apply(proposals)?;
    let html = proposals.report(&Local::now())?;
    fs::write(path, html)?;
    info!(path = %path.display(), "Report written");
    Ok(format!("Report written to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsn_core::{CoreError, Severity};
    use gsn_sync_engine::SyncConfig;
    use gsn_testkit::fixtures::{reference_date, with_temp_dir};

    fn session() -> Session {
        Session::open(None, reference_date(), SyncConfig::default()).unwrap()
    }

    #[test]
    fn csv_export_writes_the_visible_rows() {
        with_temp_dir(|dir| {
            let session = session();
            let query = QueryArgs {
                status: Some("Active".into()),
                ..QueryArgs::default()
            };
            let path = dir.file("clientes.csv");
            let out = csv(&session, Entity::Customers, &query, &path).unwrap();

            let visible = session.navigator.customers.view().len();
            assert_eq!(out, format!("Exported {visible} record(s) to {}", path.display()));
            let written = dir.read("clientes.csv");
            assert_eq!(written.lines().count(), visible + 1);
            assert!(written.trim_start_matches('\u{feff}').starts_with("ID,"));
        });
    }

    #[test]
    fn empty_export_is_refused() {
        with_temp_dir(|dir| {
            let session = session();
            let query = QueryArgs {
                search: Some("zzz-nothing-matches".into()),
                ..QueryArgs::default()
            };
            let err = csv(&session, Entity::Machines, &query, &dir.file("m.csv")).unwrap_err();
            assert!(matches!(err, CliError::Core(CoreError::NothingToExport { .. })));
            assert!(!dir.file("m.csv").exists());
            let messages = session.navigator.notifier().messages();
            assert_eq!(messages[0].0, Severity::Info);
        });
    }

    #[test]
    fn report_is_html() {
        with_temp_dir(|dir| {
            let session = session();
            let path = dir.file("propostas.html");
            report(&session, Entity::Proposals, &QueryArgs::default(), &path).unwrap();
            assert!(dir.read("propostas.html").contains("<table"));

            let err = report(&session, Entity::Customers, &QueryArgs::default(), &path).unwrap_err();
            assert!(matches!(err, CliError::Usage(_)));
        });
    }
}
