//! Filtered, searched and sorted projections of a store.
//!
//! [`project`] applies, in this order:
//! 1. the status filter (skipped for [`StatusFilter::All`]),
//! 2. the free-text search, matched per the record's [`SearchMode`],
//! 3. a stable sort on one field.
//!
//! The projection borrows from the input and has no side effects, so
//! repeated calls with unchanged inputs return the same sequence.

use crate::error::{CoreError, CoreResult};
use crate::record::{FieldValue, Record, RecordStatus, SearchMode};
use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Orients an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        })
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    /// Field compared.
    pub field: F,
    /// Direction applied.
    pub direction: SortDirection,
}

impl<F> SortSpec<F> {
    /// Creates a sort specification.
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Ascending sort on `field`.
    pub fn ascending(field: F) -> Self {
        Self::new(field, SortDirection::Ascending)
    }
}

/// Categorical status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<S> {
    /// Keep every record.
    #[default]
    All,
    /// Keep records with exactly this status.
    Only(S),
}

impl<S: RecordStatus> StatusFilter<S> {
    /// Returns true if a record with `status` passes the filter.
    pub fn matches(&self, status: S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl<S: RecordStatus> FromStr for StatusFilter<S> {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl<S: RecordStatus> fmt::Display for StatusFilter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Search, filter and sort configuration of one list view.
///
/// Owned by the view; never mutates the store.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<R: Record> {
    /// Free-text search term.
    pub search_term: String,
    /// Status filter.
    pub status_filter: StatusFilter<R::Status>,
    /// Active sort, if any.
    pub sort: Option<SortSpec<R::Field>>,
}

impl<R: Record> QueryState<R> {
    /// Creates the initial query of a list: no search, no filter, the
    /// variant's default sort.
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            sort: R::default_sort(),
        }
    }

    /// Sets the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Sets the status filter.
    pub fn with_status(mut self, filter: StatusFilter<R::Status>) -> Self {
        self.status_filter = filter;
        self
    }

    /// Sets the sort.
    pub fn with_sort(mut self, sort: Option<SortSpec<R::Field>>) -> Self {
        self.sort = sort;
        self
    }

    /// Requests a sort on `field`.
    ///
    /// Re-requesting the active field while ascending flips it to
    /// descending; any other request sorts ascending.
    pub fn request_sort(&mut self, field: R::Field) {
        let direction = match self.sort {
            Some(active)
                if active.field == field && active.direction == SortDirection::Ascending =>
            {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortSpec::new(field, direction));
    }

    /// Requests a sort by field name.
    pub fn request_sort_by_name(&mut self, name: &str) -> CoreResult<()> {
        let field = name.parse()?;
        self.request_sort(field);
        Ok(())
    }

    /// Restores the initial query.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<R: Record> Default for QueryState<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces the filtered, sorted projection to render.
pub fn project<'a, R: Record>(records: &'a [R], query: &QueryState<R>) -> Vec<&'a R> {
    let matcher = SearchMatcher::new(&query.search_term, R::SEARCH_MODE);
    let mut result: Vec<&R> = records
        .iter()
        .filter(|r| query.status_filter.matches(r.status()))
        .filter(|r| matcher.matches(*r))
        .collect();

    if let Some(spec) = query.sort {
        // `sort_by` is stable, so ties keep store order.
        result.sort_by(|a, b| compare_records(*a, *b, spec));
    }
    result
}

/// Compares two records on one field, honouring the direction.
///
/// Dates that fail to parse always sort after valid dates, whatever the
/// direction.
pub fn compare_records<R: Record>(a: &R, b: &R, spec: SortSpec<R::Field>) -> Ordering {
    match (a.field(spec.field), b.field(spec.field)) {
        (FieldValue::Date(x), FieldValue::Date(y)) => match (parse_date(x), parse_date(y)) {
            (Some(x), Some(y)) => spec.direction.apply(x.cmp(&y)),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        },
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            spec.direction.apply(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
        }
        (x, y) => spec.direction.apply(natural_cmp(&x.to_text(), &y.to_text())),
    }
}

/// Parses a stored date: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

struct SearchMatcher {
    mode: SearchMode,
    phrase: String,
    keywords: Vec<String>,
}

impl SearchMatcher {
    fn new(term: &str, mode: SearchMode) -> Self {
        let phrase = term.trim().to_lowercase();
        let keywords = phrase.split_whitespace().map(str::to_string).collect();
        Self {
            mode,
            phrase,
            keywords,
        }
    }

    fn matches<R: Record>(&self, record: &R) -> bool {
        if self.phrase.is_empty() {
            return true;
        }
        let values = record.search_values();
        match self.mode {
            SearchMode::AnyField => values
                .iter()
                .any(|v| v.to_lowercase().contains(&self.phrase)),
            SearchMode::AllKeywords => {
                let haystack = values.join(" ").to_lowercase();
                self.keywords.iter().all(|kw| haystack.contains(kw.as_str()))
            }
        }
    }
}

/// Natural, locale-aware string comparison.
///
/// Digit runs compare by numeric value (`"A2" < "A10"`). Letters compare
/// case- and accent-insensitively first; accents, then case, only break
/// ties.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_cmp_by(a, b, fold_char)
        .then_with(|| natural_cmp_by(a, b, |c| c.to_lowercase().next().unwrap_or(c)))
        .then_with(|| a.cmp(b))
}

fn natural_cmp_by(a: &str, b: &str, key: impl Fn(char) -> char + Copy) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (x, y) {
                    (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(x), Chunk::Text(y)) => x.chars().map(key).cmp(y.chars().map(key)),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

/// Lowercases and strips the Latin diacritics used in Portuguese and Spanish.
fn fold_char(c: char) -> char {
    let c = c.to_lowercase().next().unwrap_or(c);
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        ContactPerson, Customer, CustomerField, CustomerStatus, Proposal, ProposalField,
        ProposalStatus,
    };

    fn customer(id: &str, name: &str, contact: &str, status: CustomerStatus) -> Customer {
        Customer {
            id: id.into(),
            name: name.into(),
            contact_people: vec![ContactPerson::new(contact, "CEO")],
            country: "Portugal".into(),
            email: format!("{}@example.pt", id.to_lowercase()),
            phone: String::new(),
            salesperson: "Rita Sousa".into(),
            status,
        }
    }

    fn proposal(id: &str, deadline: &str, value: f64, observations: &str) -> Proposal {
        Proposal {
            id: id.into(),
            date: "2024-06-01".into(),
            opportunity: "Centro de Fresagem".into(),
            customer_name: "Moldes RP".into(),
            observations: observations.into(),
            delivery_deadline: deadline.into(),
            status: ProposalStatus::Sent,
            machine: "WEIDA GMILL 850".into(),
            total_value: value,
            salesperson: "João Chanoca".into(),
        }
    }

    fn ids<R: Record>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn filter_and_search_compose() {
        let customers = vec![
            customer("C1", "Moldes RP", "João Silva", CustomerStatus::Active),
            customer("C2", "Injetec", "JOÃO Costa", CustomerStatus::Lead),
            customer("C3", "Polimoldes", "Teresa Mendes", CustomerStatus::Active),
            customer("C4", "Tecnoforma", "joão antunes", CustomerStatus::Active),
        ];
        let query = QueryState::<Customer>::new()
            .with_status(StatusFilter::Only(CustomerStatus::Active))
            .with_search("joão");
        assert_eq!(ids(&project(&customers, &query)), ["C1", "C4"]);
    }

    #[test]
    fn any_field_search_matches_whole_phrase() {
        let customers = vec![
            customer("C1", "Moldes RP", "Ricardo Pereira", CustomerStatus::Active),
            customer("C2", "Injetec", "Sofia Costa", CustomerStatus::Active),
        ];
        let query = QueryState::<Customer>::new().with_search("ricardo pereira");
        assert_eq!(ids(&project(&customers, &query)), ["C1"]);
        // Words split across fields do not match in single-field mode.
        let query = QueryState::<Customer>::new().with_search("injetec sofia");
        assert!(project(&customers, &query).is_empty());
    }

    #[test]
    fn keyword_search_requires_every_keyword() {
        let proposals = vec![
            proposal("PROP-2024-001", "2024-08-30", 1.0, "PO recebido"),
            proposal("PROP-2024-002", "2024-08-30", 1.0, "aguarda demo"),
        ];
        let query = QueryState::<Proposal>::new().with_search("  weida   recebido ");
        assert_eq!(ids(&project(&proposals, &query)), ["PROP-2024-001"]);
        let query = QueryState::<Proposal>::new().with_search("weida inexistente");
        assert!(project(&proposals, &query).is_empty());
    }

    #[test]
    fn blank_search_keeps_everything() {
        let proposals = vec![proposal("P1", "2024-01-01", 1.0, "")];
        let query = QueryState::<Proposal>::new().with_search("   ");
        assert_eq!(project(&proposals, &query).len(), 1);
    }

    #[test]
    fn invalid_dates_sort_last_in_both_directions() {
        let proposals = vec![
            proposal("A", "2024-01-01", 1.0, ""),
            proposal("B", "not-a-date", 1.0, ""),
            proposal("C", "2024-06-01", 1.0, ""),
        ];
        let mut query = QueryState::<Proposal>::new().with_sort(None);
        query.request_sort(ProposalField::DeliveryDeadline);
        let sorted: Vec<_> = project(&proposals, &query)
            .iter()
            .map(|p| p.delivery_deadline.clone())
            .collect();
        assert_eq!(sorted, ["2024-01-01", "2024-06-01", "not-a-date"]);

        query.request_sort(ProposalField::DeliveryDeadline);
        assert_eq!(ids(&project(&proposals, &query)), ["C", "A", "B"]);
    }

    #[test]
    fn numbers_sort_numerically() {
        let proposals = vec![
            proposal("A", "2024-01-01", 85000.0, ""),
            proposal("B", "2024-01-01", 12500.0, ""),
            proposal("C", "2024-01-01", 155000.0, ""),
        ];
        let query = QueryState::<Proposal>::new()
            .with_sort(Some(SortSpec::ascending(ProposalField::TotalValue)));
        assert_eq!(ids(&project(&proposals, &query)), ["B", "A", "C"]);
    }

    #[test]
    fn sort_toggle_rule() {
        let mut query = QueryState::<Customer>::new();
        assert_eq!(query.sort, None);

        query.request_sort(CustomerField::Name);
        assert_eq!(query.sort, Some(SortSpec::new(CustomerField::Name, SortDirection::Ascending)));
        query.request_sort(CustomerField::Name);
        assert_eq!(query.sort, Some(SortSpec::new(CustomerField::Name, SortDirection::Descending)));
        query.request_sort(CustomerField::Country);
        assert_eq!(
            query.sort,
            Some(SortSpec::new(CustomerField::Country, SortDirection::Ascending))
        );
        query.request_sort(CustomerField::Country);
        query.request_sort(CustomerField::Country);
        assert_eq!(
            query.sort,
            Some(SortSpec::new(CustomerField::Country, SortDirection::Ascending))
        );
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let customers = vec![
            customer("C1", "Same", "A", CustomerStatus::Active),
            customer("C2", "Same", "B", CustomerStatus::Active),
            customer("C3", "Same", "C", CustomerStatus::Active),
        ];
        let query = QueryState::<Customer>::new()
            .with_sort(Some(SortSpec::new(CustomerField::Name, SortDirection::Descending)));
        assert_eq!(ids(&project(&customers, &query)), ["C1", "C2", "C3"]);
    }

    #[test]
    fn natural_order() {
        assert_eq!(natural_cmp("CUST-2", "CUST-10"), Ordering::Less);
        assert_eq!(natural_cmp("ábaco", "Bola"), Ordering::Less);
        assert_eq!(natural_cmp("Metalúrgica", "metalurgica"), Ordering::Greater);
        assert_eq!(natural_cmp("abc", "abc"), Ordering::Equal);
        assert_eq!(natural_cmp("item 007", "item 7"), Ordering::Less);
    }

    #[test]
    fn parses_dates_and_timestamps() {
        assert!(parse_date("2024-06-15").is_some());
        assert_eq!(
            parse_date("2024-06-15T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
        assert!(parse_date("15/06/2024").is_none());
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!("All".parse::<StatusFilter<CustomerStatus>>().unwrap(), StatusFilter::All);
        assert_eq!(
            "lead".parse::<StatusFilter<CustomerStatus>>().unwrap(),
            StatusFilter::Only(CustomerStatus::Lead)
        );
        assert!("nope".parse::<StatusFilter<CustomerStatus>>().is_err());
    }
}
