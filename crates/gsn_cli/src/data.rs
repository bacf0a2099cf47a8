//! Optional JSON persistence of the three lists between invocations.

use crate::error::CliResult;
use chrono::NaiveDate;
use gsn_core::{catalog, Customer, Machine, Proposal, TaskBoard};
use gsn_sync_engine::{DemoNavigator, SyncConfig};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Contents of a `--data` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Customer records.
    pub customers: Vec<Customer>,
    /// Installed machine records.
    pub machines: Vec<Machine>,
    /// Proposal records.
    pub proposals: Vec<Proposal>,
    /// Dashboard tasks. Older files without tasks load an empty board.
    #[serde(default)]
    pub tasks: TaskBoard,
}

impl DataSet {
    /// The seed catalog.
    pub fn seed(today: NaiveDate) -> Self {
        Self {
            customers: catalog::customers(),
            machines: catalog::machines(),
            proposals: catalog::proposals(today),
            tasks: TaskBoard::seed(today),
        }
    }

    /// Loads `path`, or the seed catalog when the file does not exist yet.
    pub fn load_or_seed(path: &Path, today: NaiveDate) -> CliResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Data file missing, starting from the catalog");
            return Ok(Self::seed(today));
        }
        let data: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
        debug!(
            path = %path.display(),
            customers = data.customers.len(),
            machines = data.machines.len(),
            proposals = data.proposals.len(),
            tasks = data.tasks.len(),
            "Loaded data file"
        );
        Ok(data)
    }

    /// Snapshot of the navigator's stores and the task board.
    pub fn capture(navigator: &DemoNavigator, tasks: &TaskBoard) -> Self {
        Self {
            customers: navigator.customers.records(),
            machines: navigator.machines.records(),
            proposals: navigator.proposals.records(),
            tasks: tasks.clone(),
        }
    }

    /// Writes the data set as pretty JSON.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!(path = %path.display(), "Saved data file");
        Ok(())
    }
}

/// The navigator a command runs against.
pub struct Session {
    /// The three lists.
    pub navigator: DemoNavigator,
    /// The dashboard task board.
    pub tasks: Mutex<TaskBoard>,
    /// Date used for new proposals and overdue checks.
    pub today: NaiveDate,
    data_path: Option<PathBuf>,
}

impl Session {
    /// Opens a session over `data_path`, or over the in-memory seed catalog.
    pub fn open(data_path: Option<PathBuf>, today: NaiveDate, config: SyncConfig) -> CliResult<Self> {
        let data = match &data_path {
            Some(path) => DataSet::load_or_seed(path, today)?,
            None => DataSet::seed(today),
        };
        let navigator = DemoNavigator::demo(
            data.customers,
            data.machines,
            data.proposals,
            today,
            config,
            Arc::new(gsn_core::Notifier::default()),
        )?;
        Ok(Self {
            navigator,
            tasks: Mutex::new(data.tasks),
            today,
            data_path,
        })
    }

    /// Writes the stores back to the data file, if there is one.
    pub fn persist(&self) -> CliResult<()> {
        match &self.data_path {
            Some(path) => DataSet::capture(&self.navigator, &self.tasks.lock()).save(path),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsn_core::ProposalStatus;
    use gsn_testkit::fixtures::{reference_date, with_temp_dir};

    #[test]
    fn missing_file_starts_from_the_catalog() {
        with_temp_dir(|dir| {
            let data = DataSet::load_or_seed(&dir.file("gsn.json"), reference_date()).unwrap();
            assert_eq!(data, DataSet::seed(reference_date()));
        });
    }

    #[test]
    fn session_changes_survive_a_reopen() {
        with_temp_dir(|dir| {
            let path = dir.file("gsn.json");
            let session =
                Session::open(Some(path.clone()), reference_date(), SyncConfig::default()).unwrap();
            let id = session.navigator.proposals.records()[0].id.clone();
            session
                .navigator
                .proposals
                .set_status(&id, ProposalStatus::Accepted)
                .unwrap();
            session.persist().unwrap();

            let json = dir.read_json("gsn.json");
            assert!(json["customers"].is_array());
            assert_eq!(json["proposals"][0]["status"], "Accepted");

            let reopened = Session::open(Some(path), reference_date(), SyncConfig::default()).unwrap();
            assert_eq!(
                reopened.navigator.proposals.store().read().require(&id).unwrap().status,
                ProposalStatus::Accepted
            );
        });
    }

    #[test]
    fn task_board_survives_a_reopen() {
        with_temp_dir(|dir| {
            let path = dir.file("gsn.json");
            let session =
                Session::open(Some(path.clone()), reference_date(), SyncConfig::default()).unwrap();
            session.tasks.lock().toggle(2).unwrap();
            session.persist().unwrap();

            let reopened = Session::open(Some(path), reference_date(), SyncConfig::default()).unwrap();
            let tasks = reopened.tasks.lock();
            assert_eq!(tasks.len(), 4);
            assert!(tasks.tasks()[1].completed);
        });
    }

    #[test]
    fn files_without_tasks_still_load() {
        with_temp_dir(|dir| {
            let mut json = serde_json::to_value(DataSet::seed(reference_date())).unwrap();
            json.as_object_mut().unwrap().remove("tasks");
            dir.write("old.json", &json.to_string());
            let data = DataSet::load_or_seed(&dir.file("old.json"), reference_date()).unwrap();
            assert!(data.tasks.is_empty());
            assert_eq!(data.proposals.len(), 5);
        });
    }

    #[test]
    fn in_memory_session_writes_nothing() {
        let session = Session::open(None, reference_date(), SyncConfig::default()).unwrap();
        assert!(session.persist().is_ok());
    }
}
