//! Integration tests for list bundles syncing against scripted sources.

use gsn_core::{
    catalog, diff, Customer, CustomerField, Notifier, Proposal, ProposalDraft, ProposalStatus,
    Severity, StatusFilter,
};
use gsn_sync_engine::{
    DemoNavigator, MockSource, RecordList, RetryConfig, SyncConfig, SyncError, SyncOutcome,
    SyncState,
};
use gsn_testkit::prelude::*;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn quick_config() -> SyncConfig {
    SyncConfig::new().with_retry(RetryConfig::no_retry())
}

fn customer_list(source: MockSource<Customer>) -> RecordList<Customer, MockSource<Customer>> {
    RecordList::new(
        catalog::customers(),
        source,
        quick_config(),
        Arc::new(Notifier::default()),
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn catalog_sync_round_trip() {
    let nav = DemoNavigator::from_catalog(reference_date(), quick_config()).unwrap();

    let outcome = nav.proposals.request_sync(&true).await.unwrap();
    let result = outcome.completed().unwrap();
    assert_eq!(
        (result.changes.added, result.changes.updated, result.changes.removed),
        (1, 2, 1)
    );
    assert!(result.duration >= gsn_sync_engine::DEFAULT_LATENCY);
    assert_eq!(
        nav.proposals.records(),
        catalog::proposal_snapshot(reference_date())
    );
    assert_eq!(nav.proposals.sync_state(), SyncState::Success);

    // The other lists are untouched.
    assert_eq!(nav.customers.records(), catalog::customers());
    assert_eq!(nav.machines.sync_state(), SyncState::Idle);
    assert!(nav.machines.last_sync_label().starts_with("Nunca"));

    tokio::time::advance(Duration::from_secs(3)).await;
    assert_eq!(nav.proposals.sync_state(), SyncState::Idle);
}

#[tokio::test(start_paused = true)]
async fn open_edit_loses_to_a_sync_that_removes_its_record() {
    let source = MockSource::new();
    source.push_snapshot(catalog::customer_snapshot());
    let list = customer_list(source);

    let removed = list
        .open_edit("CUST-004")
        .unwrap()
        .change(CustomerField::Name, "Metalúrgica Central SA")
        .unwrap();
    let kept = list
        .open_edit("CUST-001")
        .unwrap()
        .change(CustomerField::Country, "Espanha")
        .unwrap();

    list.sync().await.unwrap();

    assert!(list.commit_edit(removed).unwrap_err().is_not_found());
    let saved = list.commit_edit(kept).unwrap();
    assert_eq!(saved.country, "Espanha");

    let mut expected = catalog::customer_snapshot();
    expected[0].country = "Espanha".to_string();
    assert_eq!(list.records(), expected);
}

#[tokio::test(start_paused = true)]
async fn sync_keeps_the_query_state() {
    let source = MockSource::new();
    source.push_snapshot(catalog::customer_snapshot());
    let list = customer_list(source);
    list.set_status_filter(StatusFilter::Only(gsn_core::CustomerStatus::Active));
    let before: Vec<String> = list.view().into_iter().map(|c| c.id).collect();
    assert_eq!(before, ["CUST-001", "CUST-002", "CUST-006"]);

    list.sync().await.unwrap();
    let after: Vec<String> = list.view().into_iter().map(|c| c.id).collect();
    assert_eq!(after, ["CUST-001", "CUST-002", "CUST-003", "CUST-006"]);
}

#[tokio::test(start_paused = true)]
async fn failure_then_success() {
    let source = MockSource::new();
    source.push_failure("gateway timeout", false);
    source.push_snapshot(catalog::customer_snapshot());
    let list = customer_list(source);

    let err = list.request_sync(&true).await.unwrap_err();
    assert!(matches!(err, SyncError::Source { .. }));
    assert_eq!(list.records(), catalog::customers());
    assert_eq!(list.sync_state(), SyncState::Idle);

    let outcome = list.request_sync(&true).await.unwrap();
    assert!(matches!(outcome, SyncOutcome::Completed(_)));
    let stats = list.engine().stats();
    assert_eq!((stats.cycles_completed, stats.failures), (1, 1));
    assert!(stats.last_error.is_none());

    let severities: Vec<Severity> = list
        .notifier()
        .messages()
        .into_iter()
        .map(|(s, _)| s)
        .collect();
    assert_eq!(
        severities,
        [Severity::Info, Severity::Error, Severity::Info, Severity::Success]
    );
}

#[tokio::test(start_paused = true)]
async fn created_proposals_survive_until_the_next_sync() {
    let source = MockSource::new();
    source.push_snapshot(catalog::proposal_snapshot(reference_date()));
    let list: RecordList<Proposal, _> = RecordList::new(
        catalog::proposals(reference_date()),
        source,
        quick_config(),
        Arc::new(Notifier::default()),
    )
    .unwrap();

    let created = list
        .create_proposal(
            ProposalDraft::new("Retificadora HDCNC", "Polimoldes").with_total_value(70000.0),
            reference_date(),
        )
        .unwrap();
    assert_eq!(created.id, "PROP-2024-006");
    list.set_status(&created.id, ProposalStatus::Sent).unwrap();

    // The central system does not know the local draft; its own
    // PROP-2024-006 replaces it.
    let outcome = list.sync().await.unwrap();
    let changes = outcome.completed().unwrap().changes;
    assert_eq!(changes, diff(&{
        let mut local = catalog::proposals(reference_date());
        let mut sent = created.clone();
        sent.status = ProposalStatus::Sent;
        local.insert(0, sent);
        local
    }, &catalog::proposal_snapshot(reference_date())));
    assert_eq!(list.records(), catalog::proposal_snapshot(reference_date()));
}

proptest! {
    #[test]
    fn sync_leaves_store_equal_to_snapshot(change in snapshot_change(customer_strategy())) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let source = MockSource::new();
        source.push_snapshot(change.new.clone());
        let list = RecordList::new(
            change.old.clone(),
            source,
            quick_config(),
            Arc::new(Notifier::default()),
        )
        .unwrap();

        let outcome = rt.block_on(list.sync()).unwrap();
        prop_assert_eq!(outcome.completed().unwrap().changes, change.expected);
        prop_assert_eq!(list.records(), change.new);
    }
}
