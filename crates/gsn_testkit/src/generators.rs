//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random records and stores that
//! keep identifiers unique, plus snapshot pairs with known change counts.

use gsn_core::{
    ContactPerson, Customer, CustomerStatus, DiffResult, FieldKey, Machine, MachineStatus,
    Proposal, ProposalStatus, QueryState, Record, RecordKind, RecordStatus, SortDirection,
    SortSpec, StatusFilter,
};
use proptest::prelude::*;

/// Test-side access to the parts of a record generators need to control.
pub trait GeneratedRecord: Record {
    /// Returns the record with a new identifier.
    fn with_id(self, id: String) -> Self;

    /// Returns the record with different content and the same identifier.
    fn revised(self) -> Self;
}

impl GeneratedRecord for Customer {
    fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    fn revised(mut self) -> Self {
        self.name.push_str(" (rev.)");
        self
    }
}

impl GeneratedRecord for Machine {
    fn with_id(mut self, id: String) -> Self {
        self.asset_id = id;
        self
    }

    fn revised(mut self) -> Self {
        self.machine_model.push_str(" (rev.)");
        self
    }
}

impl GeneratedRecord for Proposal {
    fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    fn revised(mut self) -> Self {
        self.observations.push_str(" (rev.)");
        self
    }
}

/// Identifier prefix used for generated records of each variant.
pub fn id_prefix(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Customer => "CUST-",
        RecordKind::Machine => "ASSET-",
        RecordKind::Proposal => "PROP-2024-",
    }
}

/// Strategy for short words, accented letters included.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-zçãéó]{1,8}( [A-Za-zçãéó]{1,8}){0,2}").expect("Invalid regex")
}

/// Strategy for `YYYY-MM-DD` dates, with the occasional unreadable value.
pub fn date_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => (2020i32..2027, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
        1 => Just(String::new()),
        1 => Just("sem data".to_string()),
    ]
}

/// Strategy for EUR amounts with cents.
pub fn amount_strategy() -> impl Strategy<Value = f64> {
    (0u32..50_000_000).prop_map(|cents| f64::from(cents) / 100.0)
}

/// Strategy for any status of a variant.
pub fn status_strategy<S: RecordStatus>() -> impl Strategy<Value = S> {
    prop::sample::select(S::ALL.to_vec())
}

/// Strategy for customers. Identifiers are left empty.
pub fn customer_strategy() -> impl Strategy<Value = Customer> {
    (
        text_strategy(),
        prop::collection::vec((text_strategy(), text_strategy()), 0..3),
        text_strategy(),
        "[a-z]{1,8}@[a-z]{1,8}\\.pt",
        "\\+351 [0-9]{3} [0-9]{3} [0-9]{3}",
        status_strategy::<CustomerStatus>(),
    )
        .prop_map(|(name, contacts, country, email, phone, status)| Customer {
            id: String::new(),
            name,
            contact_people: contacts
                .into_iter()
                .map(|(name, role)| ContactPerson::new(name, role))
                .collect(),
            country,
            email,
            phone,
            salesperson: "João Chanoca".to_string(),
            status,
        })
}

/// Strategy for installed machines. Identifiers are left empty.
pub fn machine_strategy() -> impl Strategy<Value = Machine> {
    (
        "[A-Z]{2,6}",
        "[A-Z]{1,4}[ -]?[0-9]{2,4}",
        text_strategy(),
        text_strategy(),
        status_strategy::<MachineStatus>(),
    )
        .prop_map(|(brand, model, customer_name, contact_person, status)| Machine {
            asset_id: String::new(),
            machine_model: model,
            machine_brand: brand,
            customer_name,
            contact_person,
            customer_country: "Portugal".to_string(),
            customer_email: String::new(),
            customer_phone: String::new(),
            salesperson: "João Chanoca".to_string(),
            status,
        })
}

/// Strategy for proposals. Identifiers are left empty.
pub fn proposal_strategy() -> impl Strategy<Value = Proposal> {
    (
        date_strategy(),
        text_strategy(),
        text_strategy(),
        text_strategy(),
        date_strategy(),
        status_strategy::<ProposalStatus>(),
        amount_strategy(),
    )
        .prop_map(
            |(date, opportunity, customer_name, observations, deadline, status, total_value)| {
                Proposal {
                    id: String::new(),
                    date,
                    opportunity,
                    customer_name,
                    observations,
                    delivery_deadline: deadline,
                    status,
                    machine: String::new(),
                    total_value,
                    salesperson: "João Chanoca".to_string(),
                }
            },
        )
}

/// Gives every record a distinct identifier, numbered from `first`.
pub fn number_records<R: GeneratedRecord>(records: Vec<R>, first: usize) -> Vec<R> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.with_id(format!("{}{:03}", id_prefix(R::KIND), first + i)))
        .collect()
}

/// Strategy for record lists with unique identifiers.
pub fn store_strategy<R, S>(records: S, max_len: usize) -> impl Strategy<Value = Vec<R>>
where
    R: GeneratedRecord,
    S: Strategy<Value = R>,
{
    prop::collection::vec(records, 0..=max_len).prop_map(|rs| number_records(rs, 1))
}

/// What happens to a record between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordChange {
    /// Carried over unchanged.
    Keep,
    /// Carried over with different content.
    Update,
    /// Dropped.
    Remove,
    /// Only present in the new snapshot.
    Add,
}

fn record_change_strategy() -> impl Strategy<Value = RecordChange> {
    prop_oneof![
        3 => Just(RecordChange::Keep),
        2 => Just(RecordChange::Update),
        2 => Just(RecordChange::Remove),
        1 => Just(RecordChange::Add),
    ]
}

/// Two snapshots and the diff expected between them.
#[derive(Debug, Clone)]
pub struct SnapshotChange<R> {
    /// The snapshot before.
    pub old: Vec<R>,
    /// The snapshot after.
    pub new: Vec<R>,
    /// Change counts from `old` to `new`.
    pub expected: DiffResult,
}

/// Strategy for snapshot pairs with known change counts.
///
/// Each generated record is assigned one [`RecordChange`]; added records
/// only appear in the new snapshot.
pub fn snapshot_change<R, S>(records: S) -> impl Strategy<Value = SnapshotChange<R>>
where
    R: GeneratedRecord,
    S: Strategy<Value = R>,
{
    prop::collection::vec((records, record_change_strategy()), 0..16).prop_map(|entries| {
        let mut expected = DiffResult::default();
        let mut old = Vec::with_capacity(entries.len());
        let mut new = Vec::with_capacity(entries.len());
        for (i, (record, change)) in entries.into_iter().enumerate() {
            let record = record.with_id(format!("{}{:03}", id_prefix(R::KIND), i + 1));
            match change {
                RecordChange::Keep => {
                    old.push(record.clone());
                    new.push(record);
                }
                RecordChange::Update => {
                    expected.updated += 1;
                    old.push(record.clone());
                    new.push(record.revised());
                }
                RecordChange::Remove => {
                    expected.removed += 1;
                    old.push(record);
                }
                RecordChange::Add => {
                    expected.added += 1;
                    new.push(record);
                }
            }
        }
        SnapshotChange { old, new, expected }
    })
}

/// Strategy for query states over a variant.
pub fn query_strategy<R: Record>() -> impl Strategy<Value = QueryState<R>> {
    let filter = prop_oneof![
        1 => Just(StatusFilter::All),
        2 => status_strategy::<R::Status>().prop_map(StatusFilter::Only),
    ];
    let sort = prop::option::of((
        prop::sample::select(R::Field::ALL.to_vec()),
        prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)],
    ))
    .prop_map(|sort| sort.map(|(field, direction)| SortSpec::new(field, direction)));
    let search = prop_oneof![
        Just(String::new()),
        prop::string::string_regex("[a-zç]{1,3}( [a-z]{1,2})?").expect("Invalid regex"),
    ];

    (search, filter, sort).prop_map(|(search, filter, sort)| {
        QueryState::new()
            .with_search(search)
            .with_status(filter)
            .with_sort(sort)
    })
}
