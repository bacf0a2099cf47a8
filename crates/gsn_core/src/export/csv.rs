//! CSV export.
//!
//! Rows are joined by `\n` and the document starts with a UTF-8 byte
//! order mark so spreadsheet tools pick the right encoding. Text cells are
//! double-quoted with inner quotes doubled; dates render as `dd/mm/yyyy`.

use crate::error::{CoreError, CoreResult};
use crate::format::format_date_pt;
use crate::record::{Customer, Machine, Proposal, Record, RecordKind, RecordStatus};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

const BOM: char = '\u{feff}';

/// A record with a fixed CSV column layout.
pub trait CsvExport: Record {
    /// Header row.
    const HEADERS: &'static [&'static str];

    /// Cells of one row, already escaped, in header order.
    fn csv_row(&self) -> Vec<String>;
}

/// Quotes a text cell, doubling inner quotes.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl CsvExport for Proposal {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Data Oportunidade",
        "Cliente",
        "Observações",
        "Prazo de Entrega",
        "Estado",
        "Máquina",
        "Valor Total",
        "Comercial",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            quote(&self.id),
            format_date_pt(&self.date),
            quote(&self.customer_name),
            quote(&self.observations),
            format_date_pt(&self.delivery_deadline),
            self.status.as_str().to_string(),
            quote(&self.machine),
            self.total_value.to_string(),
            quote(&self.salesperson),
        ]
    }
}

impl CsvExport for Customer {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Nome",
        "Pessoas de Contacto",
        "País",
        "Email",
        "Telefone",
        "Comercial",
        "Estado",
    ];

    fn csv_row(&self) -> Vec<String> {
        let contacts = self
            .contact_people
            .iter()
            .map(|c| format!("{} ({})", c.name, c.role))
            .collect::<Vec<_>>()
            .join("; ");
        vec![
            quote(&self.id),
            quote(&self.name),
            quote(&contacts),
            quote(&self.country),
            quote(&self.email),
            quote(&self.phone),
            quote(&self.salesperson),
            self.status.as_str().to_string(),
        ]
    }
}

impl CsvExport for Machine {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Modelo",
        "Marca",
        "Nome do Cliente",
        "Contacto",
        "País",
        "Email",
        "Telefone",
        "Comercial",
        "Estado da Máquina",
    ];

    fn csv_row(&self) -> Vec<String> {
        vec![
            quote(&self.asset_id),
            quote(&self.machine_model),
            quote(&self.machine_brand),
            quote(&self.customer_name),
            quote(&self.contact_person),
            quote(&self.customer_country),
            quote(&self.customer_email),
            quote(&self.customer_phone),
            quote(&self.salesperson),
            self.status.as_str().to_string(),
        ]
    }
}

/// Renders a projection as CSV, byte order mark included.
///
/// Fails with [`CoreError::NothingToExport`] when `records` is empty.
pub fn to_csv<R: CsvExport>(records: &[&R]) -> CoreResult<String> {
    if records.is_empty() {
        return Err(CoreError::NothingToExport { kind: R::KIND });
    }
    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(R::HEADERS.join(","));
    rows.extend(records.iter().map(|r| r.csv_row().join(",")));

    let mut out = String::new();
    out.push(BOM);
    out.push_str(&rows.join("\n"));
    Ok(out)
}

/// Writes a projection as CSV to `path`. Returns the number of data rows.
pub fn write_csv<R: CsvExport>(path: impl AsRef<Path>, records: &[&R]) -> CoreResult<usize> {
    let csv = to_csv(records)?;
    fs::write(path.as_ref(), csv)?;
    debug!(kind = %R::KIND, rows = records.len(), path = %path.as_ref().display(), "CSV written");
    Ok(records.len())
}

/// Download name of an export, e.g. `gotec_propostas_2024-06-29.csv`.
pub fn export_file_name(kind: RecordKind, today: NaiveDate) -> String {
    format!("gotec_{}_{}.csv", kind.plural_pt(), today.format("%Y-%m-%d"))
}
