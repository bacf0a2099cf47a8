//! Printable HTML report of proposals.

use crate::error::{CoreError, CoreResult};
use crate::format::{format_date_pt, format_datetime_pt, format_eur};
use crate::record::{Proposal, Record, RecordStatus};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

const TITLE: &str = "Relatório de Propostas GOTEC";

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif; margin: 2rem; color: #333; }
h1 { color: #c00; border-bottom: 2px solid #c00; padding-bottom: 5px; }
p { color: #555; font-size: 12px; }
table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: left; font-size: 11px; white-space: nowrap; }
th { background-color: #f2f2f2; font-weight: 600; }
tr:nth-child(even) { background-color: #f9f9f9; }
.currency { text-align: right; }
@media print { body { margin: 1cm; } }";

/// Escapes text for use inside HTML elements and attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the proposals as a standalone HTML document ready to print.
///
/// Fails with [`CoreError::NothingToExport`] when `proposals` is empty.
pub fn render_report<Tz>(proposals: &[&Proposal], generated_at: &DateTime<Tz>) -> CoreResult<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if proposals.is_empty() {
        return Err(CoreError::NothingToExport {
            kind: Proposal::KIND,
        });
    }

    let mut html = String::new();
    // Writing to a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{TITLE}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <h1>{TITLE}</h1>\n<p>Gerado em: {}</p>\n<table>\n<thead>\n<tr>\
         <th>ID</th><th>Data Oport.</th><th>Cliente</th><th>Estado</th><th class=\"currency\">Valor Total</th>\
         </tr>\n</thead>\n<tbody>\n",
        format_datetime_pt(generated_at)
    );
    for p in proposals {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"currency\">{}</td></tr>",
            escape_html(&p.id),
            format_date_pt(&p.date),
            escape_html(&p.customer_name),
            p.status.as_str(),
            format_eur(p.total_value),
        );
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    Ok(html)
}
