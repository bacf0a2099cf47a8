//! Exports of a list projection.
//!
//! - [`csv`]: spreadsheet export with a UTF-8 byte order mark
//! - [`report`]: printable HTML table of proposals
//! - [`mailto`]: `mailto:` link presenting one proposal to its customer

pub mod csv;
pub mod mailto;
pub mod report;

pub use self::csv::{export_file_name, to_csv, write_csv, CsvExport};
pub use self::mailto::{proposal_mailto, MailDraft};
pub use self::report::render_report;
