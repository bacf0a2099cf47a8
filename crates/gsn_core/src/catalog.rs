//! Seed data.
//!
//! The initial lists a new navigator starts from, and the snapshot served
//! by the central system on the next sync. The snapshots differ from the
//! seeds by a few additions, edits and removals per list.

use crate::record::{
    ContactPerson, Customer, CustomerStatus, Machine, MachineStatus, Proposal, ProposalStatus,
};
use chrono::{Duration, NaiveDate};

const SALESPERSON: &str = "João Chanoca";

fn customer(
    id: &str,
    name: &str,
    contacts: &[(&str, &str)],
    country: &str,
    email: &str,
    phone: &str,
    status: CustomerStatus,
) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        contact_people: contacts
            .iter()
            .map(|(name, role)| ContactPerson::new(*name, *role))
            .collect(),
        country: country.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        salesperson: SALESPERSON.to_string(),
        status,
    }
}

/// Customers of a fresh navigator.
#[rustfmt::skip]
pub fn customers() -> Vec<Customer> {
    vec![
        customer("CUST-001", "Moldes RP", &[("Ricardo Pereira", "CEO")], "Portugal", "ricardo.p@moldesrp.pt", "+351 244 123 456", CustomerStatus::Active),
        customer("CUST-002", "Injetec", &[("Sofia Costa", "Compras"), ("Manuel Dias", "Produção")], "Portugal", "sofia.c@injetec.pt", "+351 244 789 123", CustomerStatus::Active),
        customer("CUST-003", "Precision Tools", &[("André Martins", "Gerente")], "Espanha", "andre.m@precision-tools.com", "+34 912 345 678", CustomerStatus::Lead),
        customer("CUST-004", "Metalúrgica Central", &[("Carla Dias", "Administração")], "Portugal", "carla.d@metalurgica-central.pt", "+351 239 987 654", CustomerStatus::Inactive),
        customer("CUST-005", "CNC Solutions", &[("Bruno Alves", "Engenharia")], "Portugal", "bruno.a@cncsolutions.pt", "+351 244 321 654", CustomerStatus::Lead),
        customer("CUST-006", "Polimoldes", &[("Teresa Mendes", "Diretora Técnica")], "Portugal", "teresa.m@polimoldes.pt", "+351 244 654 987", CustomerStatus::Active),
    ]
}

/// Customers served by the central system.
///
/// Against [`customers`]: CUST-002 and CUST-003 changed, CUST-004 is gone
/// and CUST-007 is new.
pub fn customer_snapshot() -> Vec<Customer> {
    let mut snapshot = customers();
    snapshot.retain(|c| c.id != "CUST-004");
    for c in &mut snapshot {
        match c.id.as_str() {
            "CUST-002" => c.contact_people[0].name = "Sofia C. Almeida".to_string(),
            "CUST-003" => {
                c.name = "Precision Tools SL".to_string();
                c.status = CustomerStatus::Active;
            }
            _ => {}
        }
    }
    snapshot.push(customer(
        "CUST-007",
        "Tecnoforma",
        &[("Jorge Antunes", "Diretor")],
        "Portugal",
        "jorge.a@tecnoforma.pt",
        "+351 261 123 789",
        CustomerStatus::Lead,
    ));
    snapshot
}

fn machine(
    asset_id: &str,
    model: &str,
    brand: &str,
    owner: &Customer,
    status: MachineStatus,
) -> Machine {
    Machine {
        asset_id: asset_id.to_string(),
        machine_model: model.to_string(),
        machine_brand: brand.to_string(),
        customer_name: owner.name.clone(),
        contact_person: owner
            .primary_contact()
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        customer_country: owner.country.clone(),
        customer_email: owner.email.clone(),
        customer_phone: owner.phone.clone(),
        salesperson: owner.salesperson.clone(),
        status,
    }
}

/// Installed machines of a fresh navigator.
pub fn machines() -> Vec<Machine> {
    let owners = customers();
    vec![
        machine("WEIDA-001", "GMILL 850", "WEIDA", &owners[0], MachineStatus::Operational),
        machine("ZODEL-001", "GZK4232", "ZODEL", &owners[3], MachineStatus::Operational),
        machine("CHENH-001", "JM168-MK6", "CHEN HSONG", &owners[1], MachineStatus::Offline),
        machine("DONGS-001", "VTC 850", "DONGS", &owners[5], MachineStatus::Maintenance),
        machine("HDCNC-001", "SGA-3063AHD", "HDCNC", &owners[4], MachineStatus::Operational),
    ]
}

/// Installed machines served by the central system.
///
/// Against [`machines`]: CHENH-001 and DONGS-001 are back in operation,
/// ZODEL-001 is gone and NOVICK-001 is new.
pub fn machine_snapshot() -> Vec<Machine> {
    let owners = customers();
    let mut snapshot = machines();
    snapshot.retain(|m| m.asset_id != "ZODEL-001");
    for m in &mut snapshot {
        if m.asset_id == "CHENH-001" || m.asset_id == "DONGS-001" {
            m.status = MachineStatus::Operational;
        }
    }
    snapshot.push(machine(
        "NOVICK-001",
        "A5 Wire EDM",
        "NOVICK",
        &owners[2],
        MachineStatus::Operational,
    ));
    snapshot
}

#[allow(clippy::too_many_arguments)]
fn proposal(
    id: &str,
    date: &str,
    opportunity: &str,
    customer_name: &str,
    observations: &str,
    deadline: String,
    status: ProposalStatus,
    machine: &str,
    total_value: f64,
) -> Proposal {
    Proposal {
        id: id.to_string(),
        date: date.to_string(),
        opportunity: opportunity.to_string(),
        customer_name: customer_name.to_string(),
        observations: observations.to_string(),
        delivery_deadline: deadline,
        status,
        machine: machine.to_string(),
        total_value,
        salesperson: SALESPERSON.to_string(),
    }
}

/// The postponed HDCNC deal, whose deadline passed twenty days ago.
fn postponed_grinding(today: NaiveDate) -> Proposal {
    proposal(
        "PROP-2024-005",
        "2024-03-01",
        "Proposta de Retificação HDCNC",
        "CNC Solutions",
        "Cliente adiou investimento. Fazer follow-up no Q4.",
        (today - Duration::days(20)).format("%Y-%m-%d").to_string(),
        ProposalStatus::Expired,
        "HDCNC SGA-3063AHD",
        62000.0,
    )
}

/// Proposals of a fresh navigator, as of `today`.
pub fn proposals(today: NaiveDate) -> Vec<Proposal> {
    vec![
        proposal(
            "PROP-2024-001",
            "2024-06-15",
            "Fornecimento de Centro de Fresagem WEIDA",
            "Moldes RP",
            "Cliente necessita de upgrade de equipamento para aumentar produção de moldes complexos.",
            "2024-08-30".into(),
            ProposalStatus::Sent,
            "WEIDA GMILL 850",
            155000.0,
        ),
        proposal(
            "PROP-2024-002",
            "2024-05-20",
            "Upgrade de injetora CHEN HSONG",
            "Injetec",
            "Proposta para substituição de injetora antiga por modelo mais eficiente energeticamente.",
            "2024-07-15".into(),
            ProposalStatus::Accepted,
            "CHEN HSONG JM268-MK6",
            85000.0,
        ),
        proposal(
            "PROP-2024-003",
            "2024-06-25",
            "Sistema de medição on-machine",
            "Precision Tools",
            "Reduzir tempo de setup e controlo de qualidade manual. Demonstração agendada.",
            "2024-09-01".into(),
            ProposalStatus::Draft,
            "HAMOO Probe + Laser",
            12500.0,
        ),
        proposal(
            "PROP-2024-004",
            "2024-04-10",
            "Solução de corte automático ZODEL",
            "Metalúrgica Central",
            "Proposta rejeitada. Cliente optou por solução concorrente com preço inferior.",
            "2024-06-10".into(),
            ProposalStatus::Rejected,
            "ZODEL GZK4232",
            48000.0,
        ),
        postponed_grinding(today),
    ]
}

/// Proposals served by the central system, as of `today`.
///
/// Against [`proposals`]: PROP-2024-001 and PROP-2024-003 moved forward,
/// PROP-2024-004 is gone and PROP-2024-006 is new.
pub fn proposal_snapshot(today: NaiveDate) -> Vec<Proposal> {
    let mut snapshot = proposals(today);
    snapshot.retain(|p| p.id != "PROP-2024-004");
    for p in &mut snapshot {
        match p.id.as_str() {
            "PROP-2024-001" => {
                p.observations.push_str(" PO recebido.");
                p.status = ProposalStatus::Accepted;
            }
            "PROP-2024-003" => {
                p.date = "2024-06-28".to_string();
                p.observations =
                    "Reduzir tempo de setup e controlo de qualidade manual. Proposta enviada após demo."
                        .to_string();
                p.status = ProposalStatus::Sent;
            }
            _ => {}
        }
    }
    snapshot.push(proposal(
        "PROP-2024-006",
        "2024-06-29",
        "Torno Vertical DONGS VTC 850",
        "Polimoldes",
        "Novo projeto para peças de grande dimensão. Proposta em elaboração.",
        "2024-09-20".into(),
        ProposalStatus::Draft,
        "DONGS VTC 850",
        210000.0,
    ));
    snapshot
}
