//! Benchmark utilities.

use gsn_core::{ContactPerson, Customer, CustomerStatus, Proposal, ProposalStatus, RecordStatus};
use rand::seq::SliceRandom;
use rand::Rng;

const COMPANIES: &[&str] = &[
    "Moldes RP",
    "Injetec",
    "Polimoldes",
    "Iberomoldes",
    "Simoldes",
    "TJ Moldes",
    "Vipex",
    "Planimolde",
];

const COUNTRIES: &[&str] = &["Portugal", "Espanha", "França", "Alemanha"];

const MACHINES: &[&str] = &["WEIDA GMILL 850", "HAMOO HT-2600", "ZIMMERMANN FZ37", "YCM NXV1680A"];

/// Generate `count` customers with random names and statuses.
pub fn generate_customers(count: usize) -> Vec<Customer> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let company = COMPANIES.choose(&mut rng).copied().unwrap_or("GOTEC");
            Customer {
                id: format!("CUST-{:03}", i + 1),
                name: format!("{company} {i}"),
                contact_people: vec![ContactPerson::new(format!("Contacto {i}"), "Compras")],
                country: COUNTRIES.choose(&mut rng).copied().unwrap_or("Portugal").to_string(),
                email: format!("geral{i}@example.pt"),
                phone: format!("+351 244 {:03} {:03}", rng.gen_range(0..1000), rng.gen_range(0..1000)),
                salesperson: "João Chanoca".to_string(),
                status: *CustomerStatus::ALL.choose(&mut rng).unwrap_or(&CustomerStatus::Lead),
            }
        })
        .collect()
}

/// Generate `count` proposals with random dates, values and statuses.
pub fn generate_proposals(count: usize) -> Vec<Proposal> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let company = COMPANIES.choose(&mut rng).copied().unwrap_or("GOTEC");
            Proposal {
                id: format!("PROP-2024-{:03}", i + 1),
                date: format!("2024-{:02}-{:02}", rng.gen_range(1..=12), rng.gen_range(1..=28)),
                opportunity: format!("Oportunidade {i}"),
                customer_name: company.to_string(),
                observations: String::new(),
                delivery_deadline: format!("2025-{:02}-{:02}", rng.gen_range(1..=12), rng.gen_range(1..=28)),
                status: *ProposalStatus::ALL.choose(&mut rng).unwrap_or(&ProposalStatus::Draft),
                machine: MACHINES.choose(&mut rng).copied().unwrap_or_default().to_string(),
                total_value: rng.gen_range(10_000.0..500_000.0),
                salesperson: "João Chanoca".to_string(),
            }
        })
        .collect()
}

/// A copy of `records` with a fraction of them renamed and the last
/// tenth dropped, as a sync snapshot would look.
pub fn revise_customers(records: &[Customer], changed: f64) -> Vec<Customer> {
    let mut rng = rand::thread_rng();
    let keep = records.len() - records.len() / 10;
    records[..keep]
        .iter()
        .map(|c| {
            let mut c = c.clone();
            if rng.gen_bool(changed) {
                c.name.push_str(" (rev)");
            }
            c
        })
        .collect()
}
