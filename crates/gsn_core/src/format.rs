//! Portuguese (pt-PT) display formatting.

use crate::query::parse_date;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Separator between digit groups and before the currency sign.
const NBSP: char = '\u{a0}';

/// Formats a stored date as `dd/mm/yyyy`.
///
/// Unparseable input renders as `Invalid Date`.
pub fn format_date_pt(value: &str) -> String {
    parse_date(value).map_or_else(
        || "Invalid Date".to_string(),
        |date| date.format("%d/%m/%Y").to_string(),
    )
}

/// Formats a timestamp as `dd/mm/yyyy, hh:mm:ss`.
pub fn format_datetime_pt<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Formats an amount in euros, e.g. `155 000,00 €`.
///
/// Digits are grouped by thousands only from five integer digits up
/// (`8000,00 €`, `12 500,00 €`).
pub fn format_eur(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}{NBSP}€");
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + 4);
    if int_part.len() >= 5 {
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(NBSP);
            }
            grouped.push(digit);
        }
    } else {
        grouped.push_str(int_part);
    }

    let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part}{NBSP}€")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn plain(s: String) -> String {
        s.replace(NBSP, " ")
    }

    #[test]
    fn eur_grouping() {
        assert_eq!(plain(format_eur(155000.0)), "155 000,00 €");
        assert_eq!(plain(format_eur(12500.0)), "12 500,00 €");
        assert_eq!(plain(format_eur(8000.0)), "8000,00 €");
        assert_eq!(plain(format_eur(1234567.891)), "1 234 567,89 €");
        assert_eq!(plain(format_eur(0.0)), "0,00 €");
        assert_eq!(plain(format_eur(-15000.5)), "-15 000,50 €");
    }

    #[test]
    fn eur_uses_non_breaking_spaces() {
        assert_eq!(format_eur(62000.0), "62\u{a0}000,00\u{a0}€");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date_pt("2024-06-15"), "15/06/2024");
        assert_eq!(format_date_pt(""), "Invalid Date");
        let at = Utc.with_ymd_and_hms(2024, 6, 29, 9, 5, 3).unwrap();
        assert_eq!(format_datetime_pt(&at), "29/06/2024, 09:05:03");
    }
}
