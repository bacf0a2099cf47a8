//! List bundles.
//!
//! A [`RecordList`] ties together everything one list view owns: the
//! store, the query state, the sync engine and the shared notifier. The
//! [`Navigator`] holds one list per record variant.

use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::source::{SnapshotSource, StaticSource};
use crate::state::{SyncConfirmer, SyncEngine, SyncOutcome, SyncState};
use chrono::{DateTime, NaiveDate, TimeZone};
use gsn_core::export::{proposal_mailto, render_report, to_csv, write_csv, CsvExport, MailDraft};
use gsn_core::{
    catalog, create_proposal, messages, project, set_status, CoreError, CoreResult, Customer,
    EditSession, Machine, Notifier, Proposal, ProposalDraft, ProposalStatus, QueryState, Record,
    RecordStatus, SharedStore, SortSpec, StatusFilter, Store,
};
use parking_lot::RwLock;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Store, query, sync engine and notifier of one list view.
pub struct RecordList<R: Record, S: SnapshotSource<R>> {
    store: SharedStore<R>,
    query: RwLock<QueryState<R>>,
    engine: SyncEngine<R, S>,
    notifier: Arc<Notifier>,
}

impl<R: Record, S: SnapshotSource<R>> RecordList<R, S> {
    /// Creates a list over `records`, synced from `source`.
    pub fn new(
        records: Vec<R>,
        source: S,
        config: SyncConfig,
        notifier: Arc<Notifier>,
    ) -> SyncResult<Self> {
        let store = Store::new(records)?.into_shared();
        let engine = SyncEngine::new(config, source, Arc::clone(&store), Arc::clone(&notifier));
        Ok(Self {
            store,
            query: RwLock::new(QueryState::new()),
            engine,
            notifier,
        })
    }

    /// Gets the store.
    pub fn store(&self) -> &SharedStore<R> {
        &self.store
    }

    /// Gets the sync engine.
    pub fn engine(&self) -> &SyncEngine<R, S> {
        &self.engine
    }

    /// Gets the notifier.
    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    /// Copies every record, in store order.
    pub fn records(&self) -> Vec<R> {
        self.store.read().as_slice().to_vec()
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Returns the current query state.
    pub fn query(&self) -> QueryState<R> {
        self.query.read().clone()
    }

    /// Replaces the query state.
    pub fn set_query(&self, query: QueryState<R>) {
        *self.query.write() = query;
    }

    /// Sets the free-text search term.
    pub fn set_search(&self, term: impl Into<String>) {
        self.query.write().search_term = term.into();
    }

    /// Sets the status filter.
    pub fn set_status_filter(&self, filter: StatusFilter<R::Status>) {
        self.query.write().status_filter = filter;
    }

    /// Requests a sort on `field`, toggling direction when already active.
    pub fn request_sort(&self, field: R::Field) -> Option<SortSpec<R::Field>> {
        let mut query = self.query.write();
        query.request_sort(field);
        query.sort
    }

    /// Restores the initial query state.
    pub fn reset_query(&self) {
        self.query.write().reset();
    }

    /// Projects the store through the current query.
    pub fn view(&self) -> Vec<R> {
        let store = self.store.read();
        let query = self.query.read();
        let visible: Vec<R> = project(store.as_slice(), &query)
            .into_iter()
            .cloned()
            .collect();
        debug!(kind = %R::KIND, total = store.len(), visible = visible.len(), "Projected list");
        visible
    }

    /// Opens an edit session on a stored record.
    pub fn open_edit(&self, id: &str) -> CoreResult<EditSession<R>> {
        EditSession::open_by_id(&self.store.read(), id)
    }

    /// Commits an edit session and announces the update.
    ///
    /// Fails with [`CoreError::RecordNotFound`] if a sync removed the record
    /// while the session was open.
    pub fn commit_edit(&self, session: EditSession<R>) -> CoreResult<R> {
        let saved = session.commit(&mut self.store.write())?;
        self.notifier.success(messages::record_updated(&saved));
        Ok(saved)
    }

    /// Gets the sync state.
    pub fn sync_state(&self) -> SyncState {
        self.engine.state()
    }

    /// Label describing the last completed sync.
    pub fn last_sync_label(&self) -> String {
        self.engine.last_sync_label()
    }

    /// Asks for confirmation, then syncs. See [`SyncEngine::request_sync`].
    pub async fn request_sync(&self, confirmer: &impl SyncConfirmer) -> SyncResult<SyncOutcome> {
        self.engine.request_sync(confirmer).await
    }

    /// Syncs without asking for confirmation.
    pub async fn sync(&self) -> SyncResult<SyncOutcome> {
        self.engine.sync().await
    }

    fn announce_export<T>(&self, result: CoreResult<T>, done: &str) -> CoreResult<T> {
        match &result {
            Ok(_) => {
                self.notifier.success(done);
            }
            Err(CoreError::NothingToExport { kind }) => {
                self.notifier.info(messages::nothing_to_export(*kind));
            }
            Err(_) => {}
        }
        result
    }
}

impl<R: CsvExport, S: SnapshotSource<R>> RecordList<R, S> {
    /// Renders the visible records as CSV.
    pub fn export_csv(&self) -> CoreResult<String> {
        let visible = self.view();
        let rows: Vec<&R> = visible.iter().collect();
        self.announce_export(to_csv(&rows), messages::CSV_EXPORTED)
    }

    /// Writes the visible records as CSV to `path`. Returns the row count.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> CoreResult<usize> {
        let visible = self.view();
        let rows: Vec<&R> = visible.iter().collect();
        self.announce_export(write_csv(path, &rows), messages::CSV_EXPORTED)
    }
}

impl<S: SnapshotSource<Proposal>> RecordList<Proposal, S> {
    /// Creates a draft proposal at the top of the list.
    pub fn create_proposal(&self, draft: ProposalDraft, today: NaiveDate) -> CoreResult<Proposal> {
        let created = create_proposal(&mut self.store.write(), draft, today)?;
        self.notifier
            .success(messages::proposal_created(&created.opportunity));
        Ok(created)
    }

    /// Moves a proposal to another status.
    pub fn set_status(&self, id: &str, status: ProposalStatus) -> CoreResult<Proposal> {
        let updated = set_status(&mut self.store.write(), id, status)?;
        self.notifier.success(messages::status_changed(status.as_str()));
        Ok(updated)
    }

    /// Proposals past their deadline and still open, in store order.
    pub fn overdue(&self, today: NaiveDate) -> Vec<Proposal> {
        self.store
            .read()
            .iter()
            .filter(|p| p.is_overdue(today))
            .cloned()
            .collect()
    }

    /// Renders the visible proposals as a printable HTML report.
    pub fn report<Tz>(&self, generated_at: &DateTime<Tz>) -> CoreResult<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let visible = self.view();
        let rows: Vec<&Proposal> = visible.iter().collect();
        self.announce_export(render_report(&rows, generated_at), messages::REPORT_EXPORTED)
    }

    /// Composes the mail presenting a proposal to its customer.
    pub fn mailto(&self, id: &str, customers: &[Customer]) -> CoreResult<MailDraft> {
        let draft = proposal_mailto(self.store.read().require(id)?, customers);
        self.notifier.info(messages::mail_opened(id));
        Ok(draft)
    }
}

/// The three lists of the navigator, sharing one notifier.
pub struct Navigator<C, M, P>
where
    C: SnapshotSource<Customer>,
    M: SnapshotSource<Machine>,
    P: SnapshotSource<Proposal>,
{
    /// Customer list.
    pub customers: RecordList<Customer, C>,
    /// Installed machine list.
    pub machines: RecordList<Machine, M>,
    /// Proposal list.
    pub proposals: RecordList<Proposal, P>,
    notifier: Arc<Notifier>,
}

/// A navigator synced from the built-in central system snapshots.
pub type DemoNavigator =
    Navigator<StaticSource<Customer>, StaticSource<Machine>, StaticSource<Proposal>>;

impl<C, M, P> Navigator<C, M, P>
where
    C: SnapshotSource<Customer>,
    M: SnapshotSource<Machine>,
    P: SnapshotSource<Proposal>,
{
    /// Bundles three lists. They should share `notifier`.
    pub fn new(
        customers: RecordList<Customer, C>,
        machines: RecordList<Machine, M>,
        proposals: RecordList<Proposal, P>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            customers,
            machines,
            proposals,
            notifier,
        }
    }

    /// Gets the shared notifier.
    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }
}

impl DemoNavigator {
    /// Creates a navigator over the given records, synced from the catalog
    /// snapshots.
    pub fn demo(
        customers: Vec<Customer>,
        machines: Vec<Machine>,
        proposals: Vec<Proposal>,
        today: NaiveDate,
        config: SyncConfig,
        notifier: Arc<Notifier>,
    ) -> SyncResult<Self> {
        Ok(Self::new(
            RecordList::new(
                customers,
                StaticSource::new(catalog::customer_snapshot()),
                config.clone(),
                Arc::clone(&notifier),
            )?,
            RecordList::new(
                machines,
                StaticSource::new(catalog::machine_snapshot()),
                config.clone(),
                Arc::clone(&notifier),
            )?,
            RecordList::new(
                proposals,
                StaticSource::new(catalog::proposal_snapshot(today)),
                config,
                Arc::clone(&notifier),
            )?,
            notifier,
        ))
    }

    /// Creates a navigator over the seed catalog.
    pub fn from_catalog(today: NaiveDate, config: SyncConfig) -> SyncResult<Self> {
        Self::demo(
            catalog::customers(),
            catalog::machines(),
            catalog::proposals(today),
            today,
            config,
            Arc::new(Notifier::default()),
        )
    }
}
