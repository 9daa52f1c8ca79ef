//! Table session: one paginated table with persistent selection.
//!
//! # Responsibility
//! - Own the selection store, the current page window and load state.
//! - Recompute the visible selection after every load or mutation.
//! - Discard page responses superseded by a newer request.
//!
//! # Invariants
//! - Navigation and failed loads never touch the selection store.
//! - Rejected bulk input never touches the selection store.
//! - `rendered` always equals the reconciled selection of `records`.
//! - `current_page` is the page of `records`; it advances only when a
//!   response is applied or fails, never while a load is in flight.

use crate::model::page::{BulkCount, PageNumber, PageSize};
use crate::model::record::Identified;
use crate::provider::{FetchedPage, PageProvider, PageRequest, ProviderError, ProviderResult};
use crate::selection::diff::{apply_toggles, derive_toggles, RowToggle};
use crate::selection::input::{parse_bulk_count, BulkInputError};
use crate::selection::reconcile::{selected_ids_on_page, selected_on_page};
use crate::selection::store::SelectionStore;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

/// Identifier type of the records served by provider `P`.
pub type RecordIdOf<P> = <<P as PageProvider>::Record as Identified>::Id;

pub type SessionResult<T> = Result<T, SessionError>;

/// Session-level failure.
#[derive(Debug)]
pub enum SessionError {
    /// Page fetch failed; selection state is unchanged.
    Load(ProviderError),
    /// Bulk count rejected; selection state is unchanged.
    BulkInput(BulkInputError),
}

impl SessionError {
    /// Message suitable for direct display to users.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(err) => err.user_message().to_string(),
            Self::BulkInput(err) => err.to_string(),
        }
    }

    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Load(err) => err.code(),
            Self::BulkInput(_) => "bulk_input",
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "page load failed: {err}"),
            Self::BulkInput(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::BulkInput(err) => Some(err),
        }
    }
}

impl From<ProviderError> for SessionError {
    fn from(value: ProviderError) -> Self {
        Self::Load(value)
    }
}

impl From<BulkInputError> for SessionError {
    fn from(value: BulkInputError) -> Self {
        Self::BulkInput(value)
    }
}

/// Page window load state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No load requested yet.
    Idle,
    Loading { page: PageNumber },
    Ready,
    /// Last load failed; holds the user-facing message.
    Failed { message: String },
}

/// Handle for an in-flight page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    seq: u64,
    page: PageNumber,
}

impl PageTicket {
    pub fn page(&self) -> PageNumber {
        self.page
    }
}

/// Result of completing a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response became the current page window.
    Applied,
    /// A newer request superseded this one; the response was dropped.
    Discarded,
}

/// One paginated table with persistent cross-page selection.
pub struct TableSession<P: PageProvider> {
    session_id: Uuid,
    provider: P,
    page_size: PageSize,
    store: SelectionStore<RecordIdOf<P>>,
    current_page: PageNumber,
    records: Vec<P::Record>,
    total_count: u64,
    load_state: LoadState,
    rendered: HashSet<RecordIdOf<P>>,
    latest_ticket: u64,
}

impl<P: PageProvider> TableSession<P> {
    /// Creates a session on page 1 without fetching.
    pub fn new(provider: P, page_size: PageSize) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            provider,
            page_size,
            store: SelectionStore::new(),
            current_page: PageNumber::FIRST,
            records: Vec::new(),
            total_count: 0,
            load_state: LoadState::Idle,
            rendered: HashSet::new(),
            latest_ticket: 0,
        }
    }

    /// Creates a session and loads page 1.
    ///
    /// Callers that need the session even when the first load fails should
    /// use [`TableSession::new`] followed by [`TableSession::load_page`].
    pub fn open(provider: P, page_size: PageSize) -> SessionResult<Self> {
        let mut session = Self::new(provider, page_size);
        session.load_page(PageNumber::FIRST)?;
        Ok(session)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    /// Records of the current page window.
    pub fn records(&self) -> &[P::Record] {
        &self.records
    }

    /// Total records reported by the provider's last successful load.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u64 {
        self.page_size.total_pages(self.total_count)
    }

    /// Zero-based global index of the current page's first row.
    pub fn first_index(&self) -> u64 {
        self.page_size
            .first_index(self.current_page)
            .unwrap_or(u64::MAX)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn store(&self) -> &SelectionStore<RecordIdOf<P>> {
        &self.store
    }

    /// Marks `page` as the requested page and returns a ticket for its
    /// response. Any earlier outstanding ticket becomes stale.
    ///
    /// The current window stays in place until the response is completed,
    /// so mutations made meanwhile apply to the rows still on screen.
    pub fn begin_page_load(&mut self, page: PageNumber) -> PageTicket {
        self.latest_ticket += 1;
        self.load_state = LoadState::Loading { page };
        PageTicket {
            seq: self.latest_ticket,
            page,
        }
    }

    /// Applies a page response unless a newer load has started since
    /// `ticket` was issued.
    ///
    /// # Errors
    /// - `SessionError::Load` when `result` is a provider failure; the window
    ///   is cleared and the selection store keeps its state.
    pub fn complete_page_load(
        &mut self,
        ticket: PageTicket,
        result: ProviderResult<FetchedPage<P::Record>>,
    ) -> SessionResult<LoadOutcome> {
        if ticket.seq != self.latest_ticket {
            debug!(
                "event=page_load module=session status=discarded session={} page={} current_page={}",
                self.session_id, ticket.page, self.current_page
            );
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(fetched) => {
                self.current_page = ticket.page;
                self.records = fetched.records;
                self.total_count = fetched.total_count;
                self.load_state = LoadState::Ready;
                self.refresh_rendered();
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                self.current_page = ticket.page;
                self.records.clear();
                self.rendered.clear();
                self.load_state = LoadState::Failed {
                    message: err.user_message().to_string(),
                };
                Err(SessionError::Load(err))
            }
        }
    }

    /// Fetches `page` and makes it the current window.
    pub fn load_page(&mut self, page: PageNumber) -> SessionResult<()> {
        let started_at = Instant::now();
        let ticket = self.begin_page_load(page);
        let result = self
            .provider
            .fetch_page(PageRequest::new(page, self.page_size));

        match self.complete_page_load(ticket, result) {
            Ok(_) => {
                info!(
                    "event=page_load module=session status=ok session={} page={} records={} total={} selected_on_page={} duration_ms={}",
                    self.session_id,
                    page,
                    self.records.len(),
                    self.total_count,
                    self.rendered.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=page_load module=session status=error session={} page={} error_code={} duration_ms={} error={}",
                    self.session_id,
                    page,
                    err.code(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Handles a paginator event carrying a 0-based page index.
    pub fn on_page_event(&mut self, zero_based_index: u32) -> SessionResult<()> {
        let page = PageNumber::from_zero_based(zero_based_index).unwrap_or(self.current_page);
        self.load_page(page)
    }

    /// Loads the following page; returns `false` when already on the last.
    pub fn next_page(&mut self) -> SessionResult<bool> {
        match self.current_page.next() {
            Some(next) if u64::from(next.get()) <= self.total_pages() => {
                self.load_page(next)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Loads the preceding page; returns `false` when already on page 1.
    pub fn previous_page(&mut self) -> SessionResult<bool> {
        match self.current_page.previous() {
            Some(previous) => {
                self.load_page(previous)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Selected records of the current page, in page order.
    pub fn selected_on_page(&self) -> Vec<&P::Record> {
        selected_on_page(&self.records, self.current_page, self.page_size, &self.store)
    }

    /// Whether `id` is checked in the current render.
    pub fn is_checked(&self, id: &RecordIdOf<P>) -> bool {
        self.rendered.contains(id)
    }

    /// Total selected records across all pages, for display.
    pub fn selected_count(&self) -> u64 {
        self.store.selected_count()
    }

    /// Header text, e.g. `Selected: 19 rows`.
    pub fn selection_summary(&self) -> String {
        format!("Selected: {} rows", self.selected_count())
    }

    /// Sets one row's selection explicitly.
    pub fn toggle_row(&mut self, id: RecordIdOf<P>, selected: bool) {
        self.store.toggle_row_selection(id, selected);
        self.refresh_rendered();
        debug!(
            "event=row_toggle module=session status=ok session={} page={} selected={} total_selected={}",
            self.session_id,
            self.current_page,
            selected,
            self.store.selected_count()
        );
    }

    /// Applies the widget's new set of checked rows for the current page.
    ///
    /// Emits and applies one toggle per page row whose checked status
    /// changed relative to the last render.
    pub fn apply_selection_change(
        &mut self,
        now_checked: impl IntoIterator<Item = RecordIdOf<P>>,
    ) -> Vec<RowToggle<RecordIdOf<P>>> {
        let now_checked: HashSet<RecordIdOf<P>> = now_checked.into_iter().collect();
        let page_ids: Vec<RecordIdOf<P>> =
            self.records.iter().map(Identified::record_id).collect();
        let toggles = derive_toggles(&page_ids, &self.rendered, &now_checked);

        apply_toggles(&mut self.store, &toggles);
        self.refresh_rendered();
        debug!(
            "event=selection_change module=session status=ok session={} page={} toggles={} total_selected={}",
            self.session_id,
            self.current_page,
            toggles.len(),
            self.store.selected_count()
        );
        toggles
    }

    /// Validates a bulk count and selects that many records starting at the
    /// first row of the current page.
    ///
    /// # Errors
    /// - `SessionError::BulkInput` for absent, non-numeric or non-positive
    ///   input; the store is left unmodified.
    pub fn submit_bulk_input(&mut self, input: Option<&str>) -> SessionResult<BulkCount> {
        let count = parse_bulk_count(input).map_err(|err| {
            warn!(
                "event=bulk_select module=session status=rejected session={} detail={}",
                self.session_id,
                err.detail()
            );
            err
        })?;
        self.select_first(count);
        Ok(count)
    }

    /// Selects `count` records starting at the first row of the current page.
    pub fn select_first(&mut self, count: BulkCount) {
        self.store.set_bulk_selection(count, self.current_page);
        self.refresh_rendered();
        info!(
            "event=bulk_select module=session status=ok session={} count={} starting_page={}",
            self.session_id, count, self.current_page
        );
    }

    /// Drops every selection.
    pub fn clear_selection(&mut self) {
        self.store.clear();
        self.refresh_rendered();
        info!(
            "event=selection_clear module=session status=ok session={}",
            self.session_id
        );
    }

    fn refresh_rendered(&mut self) {
        self.rendered =
            selected_ids_on_page(&self.records, self.current_page, self.page_size, &self.store)
                .into_iter()
                .collect();
    }
}
