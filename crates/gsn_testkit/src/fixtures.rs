//! Test fixtures.
//!
//! Small record builders, the reference date the seed catalog is checked
//! against, and temporary directories for tests that touch files.

use chrono::NaiveDate;
use gsn_core::{
    ContactPerson, Customer, CustomerStatus, Machine, MachineStatus, Proposal, ProposalStatus,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The date fixtures and catalog-based tests treat as "today".
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date")
}

/// A customer with one contact.
pub fn customer(id: &str, name: &str, status: CustomerStatus) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        contact_people: vec![ContactPerson::new("Ana Silva", "Compras")],
        country: "Portugal".to_string(),
        email: format!("geral@{}.pt", name.to_lowercase().replace(' ', "")),
        phone: "+351 244 000 000".to_string(),
        salesperson: "João Chanoca".to_string(),
        status,
    }
}

/// An installed machine.
pub fn machine(asset_id: &str, model: &str, status: MachineStatus) -> Machine {
    Machine {
        asset_id: asset_id.to_string(),
        machine_model: model.to_string(),
        machine_brand: asset_id.split('-').next().unwrap_or_default().to_string(),
        customer_name: "Moldes RP".to_string(),
        contact_person: "Ricardo Pereira".to_string(),
        customer_country: "Portugal".to_string(),
        customer_email: "ricardo.p@moldesrp.pt".to_string(),
        customer_phone: "+351 244 123 456".to_string(),
        salesperson: "João Chanoca".to_string(),
        status,
    }
}

/// A proposal with the fields tests usually vary.
pub fn proposal(id: &str, status: ProposalStatus, deadline: &str, total_value: f64) -> Proposal {
    Proposal {
        id: id.to_string(),
        date: "2024-06-01".to_string(),
        opportunity: format!("Oportunidade {id}"),
        customer_name: "Moldes RP".to_string(),
        observations: String::new(),
        delivery_deadline: deadline.to_string(),
        status,
        machine: String::new(),
        total_value,
        salesperson: "João Chanoca".to_string(),
    }
}

/// A temporary directory removed on drop.
pub struct TempDataDir {
    dir: TempDir,
}

impl TempDataDir {
    /// Creates a new temporary directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the path of a file inside the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Reads a file inside the directory as UTF-8.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.file(name)).expect("Failed to read test file")
    }

    /// Reads a JSON file inside the directory.
    pub fn read_json(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(name)).expect("Failed to parse test file")
    }

    /// Writes a file inside the directory and returns its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a test with a temporary directory.
pub fn with_temp_dir<F, T>(f: F) -> T
where
    F: FnOnce(&TempDataDir) -> T,
{
    let dir = TempDataDir::new();
    f(&dir)
}
