use std::time::{Duration, Instant};

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::aggregate::ResultAggregator;
use crate::debounce::InputDebouncer;
use crate::query::QueryState;
use crate::view_model::AppViewModel;
use crate::{Effect, Page, Query, RecordDetail, RequestId};

/// Consecutive genre-filtered pages that may come back empty before the
/// automatic scan pauses and waits for the next sentinel signal.
pub const DEFAULT_SCAN_AHEAD_LIMIT: u32 = 5;

/// Broad class of a failed request, deciding how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Network, timeout or malformed response. Retrying may help.
    Transport,
    /// The upstream rejected the request. Retrying without new input will not help.
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReason {
    pub class: FailureClass,
    pub detail: String,
}

impl ErrorReason {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Transport,
            detail: detail.into(),
        }
    }

    pub fn upstream(detail: impl Into<String>) -> Self {
        Self {
            class: FailureClass::Upstream,
            detail: detail.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.class == FailureClass::Transport
    }

    pub fn user_message(&self) -> String {
        match self.class {
            FailureClass::Transport => {
                "Unable to load results. Please check your connection.".to_string()
            }
            FailureClass::Upstream if self.detail.trim().is_empty() => {
                "No matches for your search.".to_string()
            }
            FailureClass::Upstream => self.detail.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    LoadingFirstPage,
    LoadingNextPage,
    IdleWithData,
    Error(ErrorReason),
    Exhausted,
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::LoadingFirstPage | LoadState::LoadingNextPage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading { id: String },
    Loaded(RecordDetail),
    Failed { id: String, reason: ErrorReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input: String,
    debouncer: InputDebouncer,
    query: QueryState,
    results: ResultAggregator,
    load: LoadState,
    cursor: u32,
    has_more: bool,
    total_available: u32,
    upstream_total: u32,
    scanned_upstream: usize,
    empty_scans: u32,
    scan_ahead_limit: u32,
    next_request_id: RequestId,
    in_flight: Option<RequestId>,
    detail: DetailState,
    detail_request: Option<RequestId>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_quiet_period(crate::DEFAULT_QUIET_PERIOD)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quiet_period(quiet_period: Duration) -> Self {
        Self {
            input: String::new(),
            debouncer: InputDebouncer::new(quiet_period),
            query: QueryState::new(),
            results: ResultAggregator::new(),
            load: LoadState::Idle,
            cursor: 1,
            has_more: false,
            total_available: 0,
            upstream_total: 0,
            scanned_upstream: 0,
            empty_scans: 0,
            scan_ahead_limit: DEFAULT_SCAN_AHEAD_LIMIT,
            next_request_id: 1,
            in_flight: None,
            detail: DetailState::Closed,
            detail_request: None,
            dirty: false,
        }
    }

    /// Caps automatic genre scanning at `limit` empty pages in a row; zero
    /// disables it, leaving every further page to the sentinel.
    pub fn with_scan_ahead_limit(mut self, limit: u32) -> Self {
        self.scan_ahead_limit = limit;
        self
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            query: self.query.current().cloned(),
            records: self.results.records().to_vec(),
            load_state: self.load.clone(),
            has_more: self.has_more,
            total_available: self.total_available,
            page: self.cursor,
            detail: self.detail.clone(),
            dirty: self.dirty,
        }
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.current()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Instant at which the pending input commits, for scheduling the next tick.
    pub fn input_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Returns whether anything changed since the last call, then clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn record_input(&mut self, text: String, at: Instant) {
        self.debouncer.push(text.clone(), at);
        self.input = text;
        self.mark_dirty();
    }

    pub(crate) fn poll_input(&mut self, now: Instant) -> Option<String> {
        self.debouncer.poll(now)
    }

    pub(crate) fn force_commit_input(&mut self) -> String {
        let text = self.input.clone();
        self.debouncer.force_commit(text)
    }

    /// Committed query the next edit builds on.
    pub(crate) fn base_query(&self) -> Query {
        self.query.current_or_default()
    }

    /// Stores `query`; on a fingerprint change, resets the results and fetches page 1.
    pub(crate) fn submit_query(&mut self, query: Query) -> Vec<Effect> {
        let Some(change) = self.query.set_query(query) else {
            return Vec::new();
        };
        engine_info!(
            "Fingerprint changed term={:?} kind={:?} year={:?} genre={:?}",
            change.current.search_term(),
            change.current.kind(),
            change.current.year(),
            change.current.genre()
        );
        if !self.debouncer.is_pending() {
            self.input = change.current.text().to_string();
        }

        self.results.clear();
        self.cursor = 1;
        self.has_more = false;
        self.total_available = 0;
        self.upstream_total = 0;
        self.scanned_upstream = 0;
        self.empty_scans = 0;
        self.load = LoadState::LoadingFirstPage;
        self.mark_dirty();
        vec![self.issue_page_request()]
    }

    /// Sentinel signal: fetch the next page only when idle with more to load.
    pub(crate) fn request_next_page(&mut self) -> Vec<Effect> {
        if self.load != LoadState::IdleWithData || !self.has_more {
            return Vec::new();
        }
        self.empty_scans = 0;
        vec![self.advance_cursor()]
    }

    /// Re-issues the failed page under a fresh tag.
    pub(crate) fn retry(&mut self) -> Vec<Effect> {
        if !matches!(self.load, LoadState::Error(_)) || self.query.current().is_none() {
            return Vec::new();
        }
        self.load = if self.cursor <= 1 {
            LoadState::LoadingFirstPage
        } else {
            LoadState::LoadingNextPage
        };
        self.mark_dirty();
        vec![self.issue_page_request()]
    }

    pub(crate) fn apply_page(
        &mut self,
        request_id: RequestId,
        result: Result<Page, ErrorReason>,
    ) -> Vec<Effect> {
        if self.in_flight != Some(request_id) {
            engine_debug!(
                "Discarding stale page response request_id={} current={:?}",
                request_id,
                self.in_flight
            );
            return Vec::new();
        }
        self.in_flight = None;
        self.mark_dirty();

        let page = match result {
            Ok(page) => page,
            Err(reason) => {
                engine_warn!(
                    "Page {} failed ({:?}): {}",
                    self.cursor,
                    reason.class,
                    reason.detail
                );
                self.has_more = false;
                self.load = LoadState::Error(reason);
                return Vec::new();
            }
        };

        let genre_filtered = self
            .query
            .current()
            .is_some_and(|query| query.genre().is_some());
        // Only page 1 may lower the upstream total. A later page past the end
        // reports zero matches and must not wipe the known total.
        if page.page_number <= 1 {
            self.scanned_upstream = 0;
            self.upstream_total = page.upstream_total;
        } else if page.upstream_total > 0 {
            self.upstream_total = page.upstream_total;
        }
        self.scanned_upstream += page.upstream_len;
        let upstream_len = page.upstream_len;
        let page_number = page.page_number;

        let outcome = self.results.merge(page);
        let merged_len = self.results.len();

        // Pagination follows raw upstream records scanned, so overlapping
        // pages whose duplicates were absorbed still run out.
        self.has_more =
            upstream_len > 0 && self.scanned_upstream < self.upstream_total as usize;
        self.total_available = if genre_filtered {
            u32::try_from(merged_len).unwrap_or(u32::MAX)
        } else {
            self.upstream_total
        };

        engine_debug!(
            "Merged page {} added={} duplicates={} len={} scanned={}/{} has_more={}",
            page_number,
            outcome.added,
            outcome.duplicates,
            merged_len,
            self.scanned_upstream,
            self.upstream_total,
            self.has_more
        );

        if !self.has_more {
            self.load = LoadState::Exhausted;
            return Vec::new();
        }
        self.load = LoadState::IdleWithData;

        if !genre_filtered || outcome.added > 0 {
            self.empty_scans = 0;
            return Vec::new();
        }
        // A filtered page that kept nothing leaves no new item for the sentinel
        // to observe, so scan ahead a bounded number of pages.
        if self.empty_scans >= self.scan_ahead_limit {
            let found = if self.results.is_empty() {
                "no matches yet"
            } else {
                "no new matches"
            };
            engine_info!(
                "Genre scan paused at page {} after {} empty pages, {}",
                page_number,
                self.empty_scans,
                found
            );
            return Vec::new();
        }
        self.empty_scans += 1;
        vec![self.advance_cursor()]
    }

    pub(crate) fn open_record(&mut self, id: String) -> Vec<Effect> {
        let id = id.trim().to_string();
        self.mark_dirty();
        if id.is_empty() {
            engine_warn!("Rejected detail lookup with empty identifier");
            self.detail_request = None;
            self.detail = DetailState::Failed {
                id,
                reason: ErrorReason::upstream("Invalid identifier"),
            };
            return Vec::new();
        }

        let request_id = self.next_request();
        self.detail_request = Some(request_id);
        self.detail = DetailState::Loading { id: id.clone() };
        vec![Effect::FetchDetail { request_id, id }]
    }

    pub(crate) fn apply_detail(
        &mut self,
        request_id: RequestId,
        result: Result<RecordDetail, ErrorReason>,
    ) {
        if self.detail_request != Some(request_id) {
            engine_debug!("Discarding stale detail response request_id={}", request_id);
            return;
        }
        self.detail_request = None;
        let id = match &self.detail {
            DetailState::Loading { id } => id.clone(),
            _ => String::new(),
        };
        self.detail = match result {
            Ok(detail) => DetailState::Loaded(detail),
            Err(reason) => DetailState::Failed { id, reason },
        };
        self.mark_dirty();
    }

    pub(crate) fn close_detail(&mut self) {
        if self.detail == DetailState::Closed {
            return;
        }
        self.detail = DetailState::Closed;
        self.detail_request = None;
        self.mark_dirty();
    }

    fn advance_cursor(&mut self) -> Effect {
        self.cursor += 1;
        self.load = LoadState::LoadingNextPage;
        self.mark_dirty();
        self.issue_page_request()
    }

    fn issue_page_request(&mut self) -> Effect {
        let request_id = self.next_request();
        self.in_flight = Some(request_id);
        Effect::FetchPage {
            request_id,
            query: self.query.current_or_default(),
            page: self.cursor,
        }
    }

    fn next_request(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}
