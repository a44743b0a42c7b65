//! # Paginated fetch coordinator
//!
//! [`Paginator`] drives an infinite-scroll list against a remote list endpoint:
//! it loads the first page for a filter set, appends following pages on demand
//! and tracks when the result set is exhausted.
//!
//! ## [`PageSource`] trait
//!
//! The remote endpoint, seen as one async method returning a [`Page`] for a
//! filter set and a [`PageParam`]. The `api` crate implements it over HTTP; tests
//! implement it with scripted responses.
//!
//! ## Operations
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`fetch_initial`](Paginator::fetch_initial) | Request page 1 for new filters; on success replace the buffer and reset [`PageState`]. |
//! | [`fetch_more`](Paginator::fetch_more) | Request page `current + 1` with the last filters; on success append. |
//! | [`refresh`](Paginator::refresh) | `fetch_initial` again with the last filters (after a mutation). |
//! | [`reset`](Paginator::reset) | Drop the buffer and invalidate the request in flight. |
//!
//! ## Concurrency
//!
//! Only one request runs at a time. A call made while another is pending is
//! dropped (not queued) and reports [`FetchOutcome::Skipped`]. The in-flight
//! marker is held by an RAII guard, so it is released on success, on error and
//! when the future is dropped half-way.
//!
//! Every request carries a sequence number. [`reset`](Paginator::reset) bumps
//! the sequence, so a response that arrives afterwards no longer matches and is
//! discarded ([`FetchOutcome::Stale`]) instead of repopulating the list.
//!
//! A failed request leaves the buffer and [`PageState`] exactly as they were,
//! so repeating the same trigger is a safe retry.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::{Page, PageParam};

/// A remote list endpoint.
pub trait PageSource {
    type Item;
    type Filters: Clone;
    type Error;

    fn fetch_page(
        &self,
        filters: &Self::Filters,
        page: PageParam,
    ) -> impl Future<Output = Result<Page<Self::Item>, Self::Error>>;
}

/// Pagination bookkeeping. `current == 0` means nothing has been loaded yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
    pub has_more: bool,
}

impl PageState {
    pub fn empty(page_size: u32) -> Self {
        Self {
            current: 0,
            page_size,
            total: 0,
            has_more: false,
        }
    }

    /// State after page `current` of a `total`-item result set has loaded.
    pub fn after(current: u32, page_size: u32, total: u64) -> Self {
        Self {
            current,
            page_size,
            total,
            has_more: u64::from(current) * u64::from(page_size) < total,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.current > 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FetchingInitial,
    FetchingMore,
    /// Loaded, and the last page has been reached.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Another request is still pending.
    InFlight,
    /// `has_more` is false.
    Exhausted,
    /// `fetch_more` before any successful `fetch_initial`.
    NotStarted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was merged; `fetched` items arrived.
    Applied { fetched: usize },
    /// No request was issued.
    Skipped(SkipReason),
    /// The response arrived after a reset and was discarded.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FetchKind {
    Initial,
    More,
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    seq: u64,
    kind: FetchKind,
}

struct Inner<T, F> {
    items: Vec<T>,
    page: PageState,
    filters: Option<F>,
    in_flight: Option<InFlight>,
    /// Sequence number of the most recent request (or reset).
    latest: u64,
}

impl<T, F> Inner<T, F> {
    fn begin(&mut self, kind: FetchKind) -> u64 {
        self.latest += 1;
        self.in_flight = Some(InFlight {
            seq: self.latest,
            kind,
        });
        self.latest
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-flight marker on drop, unless a reset already handed it to
/// a newer request.
struct InFlightGuard<'a, T, F> {
    inner: &'a Mutex<Inner<T, F>>,
    seq: u64,
}

impl<T, F> Drop for InFlightGuard<'_, T, F> {
    fn drop(&mut self) {
        let mut inner = lock(self.inner);
        if inner.in_flight.is_some_and(|f| f.seq == self.seq) {
            inner.in_flight = None;
        }
    }
}

/// Coordinates "first page" and "load more" requests for one list.
///
/// All methods take `&self`; each view owns its own instance.
pub struct Paginator<S: PageSource> {
    source: S,
    page_size: u32,
    inner: Mutex<Inner<S::Item, S::Filters>>,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            source,
            page_size,
            inner: Mutex::new(Inner {
                items: Vec::new(),
                page: PageState::empty(page_size),
                filters: None,
                in_flight: None,
                latest: 0,
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Load page 1 for `filters`, replacing the buffer on success.
    pub async fn fetch_initial(&self, filters: S::Filters) -> Result<FetchOutcome, S::Error> {
        let seq = {
            let mut inner = lock(&self.inner);
            if inner.in_flight.is_some() {
                tracing::debug!("fetch_initial dropped: request in flight");
                return Ok(FetchOutcome::Skipped(SkipReason::InFlight));
            }
            inner.begin(FetchKind::Initial)
        };
        let _guard = InFlightGuard {
            inner: &self.inner,
            seq,
        };

        let param = PageParam::first(self.page_size);
        let result = self.source.fetch_page(&filters, param).await;

        let mut inner = lock(&self.inner);
        if inner.latest != seq {
            tracing::debug!(seq, "discarding stale first page");
            return Ok(FetchOutcome::Stale);
        }
        let page = result?;
        let fetched = page.data.len();
        inner.items = page.data;
        inner.page = PageState::after(1, self.page_size, page.total);
        inner.filters = Some(filters);
        tracing::debug!(fetched, total = page.total, "first page loaded");
        Ok(FetchOutcome::Applied { fetched })
    }

    /// Load the next page with the last filters and append it.
    pub async fn fetch_more(&self) -> Result<FetchOutcome, S::Error> {
        let (seq, filters, next) = {
            let mut inner = lock(&self.inner);
            if inner.in_flight.is_some() {
                return Ok(FetchOutcome::Skipped(SkipReason::InFlight));
            }
            let Some(filters) = inner.filters.clone() else {
                return Ok(FetchOutcome::Skipped(SkipReason::NotStarted));
            };
            if !inner.page.has_more {
                return Ok(FetchOutcome::Skipped(SkipReason::Exhausted));
            }
            let next = inner.page.current + 1;
            (inner.begin(FetchKind::More), filters, next)
        };
        let _guard = InFlightGuard {
            inner: &self.inner,
            seq,
        };

        let param = PageParam {
            current: next,
            page_size: self.page_size,
        };
        let result = self.source.fetch_page(&filters, param).await;

        let mut inner = lock(&self.inner);
        if inner.latest != seq {
            tracing::debug!(seq, page = next, "discarding stale page");
            return Ok(FetchOutcome::Stale);
        }
        let page = result?;
        let fetched = page.data.len();
        inner.items.extend(page.data);
        inner.page = PageState::after(next, self.page_size, page.total);
        tracing::debug!(page = next, fetched, total = page.total, "page appended");
        Ok(FetchOutcome::Applied { fetched })
    }

    /// Reload page 1 with the last filters. Skipped if nothing was loaded yet.
    pub async fn refresh(&self) -> Result<FetchOutcome, S::Error> {
        let filters = lock(&self.inner).filters.clone();
        match filters {
            Some(filters) => self.fetch_initial(filters).await,
            None => Ok(FetchOutcome::Skipped(SkipReason::NotStarted)),
        }
    }

    /// Empty the list and invalidate any pending response.
    pub fn reset(&self) {
        let mut inner = lock(&self.inner);
        inner.latest += 1;
        inner.in_flight = None;
        inner.items.clear();
        inner.filters = None;
        inner.page = PageState::empty(self.page_size);
    }

    pub fn page_state(&self) -> PageState {
        lock(&self.inner).page
    }

    pub fn has_more(&self) -> bool {
        lock(&self.inner).page.has_more
    }

    pub fn is_fetching(&self) -> bool {
        lock(&self.inner).in_flight.is_some()
    }

    pub fn phase(&self) -> Phase {
        let inner = lock(&self.inner);
        match inner.in_flight {
            Some(InFlight {
                kind: FetchKind::Initial,
                ..
            }) => Phase::FetchingInitial,
            Some(InFlight {
                kind: FetchKind::More,
                ..
            }) => Phase::FetchingMore,
            None if inner.page.is_loaded() && !inner.page.has_more => Phase::Exhausted,
            None => Phase::Idle,
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filters of the last successful `fetch_initial`.
    pub fn filters(&self) -> Option<S::Filters> {
        lock(&self.inner).filters.clone()
    }

    /// Snapshot of the buffer.
    pub fn items(&self) -> Vec<S::Item>
    where
        S::Item: Clone,
    {
        lock(&self.inner).items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    type Response = Result<Page<&'static str>, String>;

    /// Answers requests from a script in request order, yielding once before
    /// returning so concurrent callers can observe the pending request.
    #[derive(Default)]
    struct ScriptedSource {
        responses: Mutex<VecDeque<Response>>,
        requests: Mutex<Vec<(String, PageParam)>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Response>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::default(),
            }
        }

        fn requests(&self) -> Vec<(String, PageParam)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl PageSource for ScriptedSource {
        type Item = &'static str;
        type Filters = String;
        type Error = String;

        async fn fetch_page(&self, filters: &String, page: PageParam) -> Response {
            self.requests.lock().unwrap().push((filters.clone(), page));
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err("no scripted response".to_string()));
            tokio::task::yield_now().await;
            response
        }
    }

    fn page(data: Vec<&'static str>, total: u64) -> Response {
        Ok(Page { data, total })
    }

    #[tokio::test]
    async fn test_initial_fetch_replaces_buffer() {
        let source = ScriptedSource::new(vec![
            page(vec!["A", "B"], 2),
            page(vec!["C", "D"], 2),
        ]);
        let paginator = Paginator::new(source, 8);

        paginator.fetch_initial("fiction".to_string()).await.unwrap();
        assert_eq!(paginator.items(), vec!["A", "B"]);

        let outcome = paginator.fetch_initial("poetry".to_string()).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { fetched: 2 });
        assert_eq!(paginator.items(), vec!["C", "D"]);
        assert_eq!(paginator.filters().as_deref(), Some("poetry"));
        assert_eq!(paginator.page_state().current, 1);
    }

    #[tokio::test]
    async fn test_double_fetch_more_issues_one_request() {
        let source = ScriptedSource::new(vec![
            page(vec!["a"; 8], 20),
            page(vec!["b"; 8], 20),
            page(vec!["c"; 4], 20),
        ]);
        let paginator = Paginator::new(source, 8);
        paginator.fetch_initial(String::new()).await.unwrap();

        let (first, second) = tokio::join!(paginator.fetch_more(), paginator.fetch_more());
        assert_eq!(first.unwrap(), FetchOutcome::Applied { fetched: 8 });
        assert_eq!(second.unwrap(), FetchOutcome::Skipped(SkipReason::InFlight));

        // One request for page 1, exactly one for page 2.
        let requests = paginator.source().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].1.current, 2);
        assert_eq!(paginator.len(), 16);
    }

    #[tokio::test]
    async fn test_fetch_initial_while_pending_is_dropped() {
        let source = ScriptedSource::new(vec![page(vec!["A"], 1), page(vec!["B"], 1)]);
        let paginator = Paginator::new(source, 8);

        let (first, second) = tokio::join!(
            paginator.fetch_initial("one".to_string()),
            paginator.fetch_initial("two".to_string())
        );
        assert_eq!(first.unwrap(), FetchOutcome::Applied { fetched: 1 });
        assert_eq!(second.unwrap(), FetchOutcome::Skipped(SkipReason::InFlight));
        assert_eq!(paginator.items(), vec!["A"]);
        assert_eq!(paginator.source().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_has_more_tracks_total() {
        let source = ScriptedSource::new(vec![page(vec!["x"; 8], 10), page(vec!["y"; 2], 10)]);
        let paginator = Paginator::new(source, 8);

        paginator.fetch_initial(String::new()).await.unwrap();
        assert!(paginator.has_more());
        assert_eq!(paginator.phase(), Phase::Idle);

        paginator.fetch_more().await.unwrap();
        let state = paginator.page_state();
        assert_eq!(state.current, 2);
        assert!(!state.has_more);
        assert_eq!(paginator.phase(), Phase::Exhausted);

        let outcome = paginator.fetch_more().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Skipped(SkipReason::Exhausted));
        assert_eq!(paginator.source().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_is_left_on_new_search() {
        let source = ScriptedSource::new(vec![page(vec!["x"], 1), page(vec!["y"; 8], 30)]);
        let paginator = Paginator::new(source, 8);

        paginator.fetch_initial("a".to_string()).await.unwrap();
        assert_eq!(paginator.phase(), Phase::Exhausted);

        paginator.fetch_initial("b".to_string()).await.unwrap();
        assert_eq!(paginator.phase(), Phase::Idle);
        assert!(paginator.has_more());
    }

    #[tokio::test]
    async fn test_failed_fetch_more_keeps_state_and_allows_retry() {
        let source = ScriptedSource::new(vec![
            page(vec!["a"; 8], 12),
            Err("connection reset".to_string()),
            page(vec!["b"; 4], 12),
        ]);
        let paginator = Paginator::new(source, 8);
        paginator.fetch_initial("q".to_string()).await.unwrap();
        let before = paginator.page_state();

        let err = paginator.fetch_more().await.unwrap_err();
        assert_eq!(err, "connection reset");
        assert_eq!(paginator.len(), 8);
        assert_eq!(paginator.page_state(), before);
        assert!(!paginator.is_fetching());

        let outcome = paginator.fetch_more().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { fetched: 4 });
        assert_eq!(paginator.len(), 12);
        assert!(!paginator.has_more());

        // The retry asked for the same page again.
        let requests = paginator.source().requests();
        assert_eq!(requests[1].1, requests[2].1);
        assert_eq!(requests[2].0, "q");
    }

    #[tokio::test]
    async fn test_failed_initial_keeps_previous_results() {
        let source = ScriptedSource::new(vec![page(vec!["A", "B"], 2), Err("boom".to_string())]);
        let paginator = Paginator::new(source, 8);
        paginator.fetch_initial("old".to_string()).await.unwrap();

        assert!(paginator.fetch_initial("new".to_string()).await.is_err());
        assert_eq!(paginator.items(), vec!["A", "B"]);
        assert_eq!(paginator.filters().as_deref(), Some("old"));
        assert!(!paginator.is_fetching());
    }

    #[tokio::test]
    async fn test_response_after_reset_is_discarded() {
        let source = ScriptedSource::new(vec![page(vec!["late"], 1), page(vec!["fresh"], 1)]);
        let paginator = Paginator::new(source, 8);

        let (outcome, _) = tokio::join!(paginator.fetch_initial("a".to_string()), async {
            paginator.reset()
        });
        assert_eq!(outcome.unwrap(), FetchOutcome::Stale);
        assert!(paginator.is_empty());
        assert!(!paginator.page_state().is_loaded());

        paginator.fetch_initial("b".to_string()).await.unwrap();
        assert_eq!(paginator.items(), vec!["fresh"]);
    }

    #[tokio::test]
    async fn test_stale_guard_does_not_release_newer_request() {
        let source = ScriptedSource::new(vec![page(vec!["old"], 1), page(vec!["new"], 1)]);
        let paginator = Paginator::new(source, 8);

        let (stale, (fresh, skipped)) = tokio::join!(paginator.fetch_initial("a".to_string()), async {
            paginator.reset();
            tokio::join!(
                paginator.fetch_initial("b".to_string()),
                paginator.fetch_more()
            )
        });
        assert_eq!(stale.unwrap(), FetchOutcome::Stale);
        assert_eq!(fresh.unwrap(), FetchOutcome::Applied { fetched: 1 });
        assert_eq!(skipped.unwrap(), FetchOutcome::Skipped(SkipReason::InFlight));
        assert_eq!(paginator.items(), vec!["new"]);
    }

    #[tokio::test]
    async fn test_fetch_more_before_initial() {
        let paginator = Paginator::new(ScriptedSource::default(), 8);
        let outcome = paginator.fetch_more().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Skipped(SkipReason::NotStarted));
        assert_eq!(paginator.phase(), Phase::Idle);
        assert!(paginator.source().requests().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_reuses_filters() {
        let source = ScriptedSource::new(vec![page(vec!["A"], 1), page(vec!["A2"], 1)]);
        let paginator = Paginator::new(source, 8);
        assert_eq!(
            paginator.refresh().await.unwrap(),
            FetchOutcome::Skipped(SkipReason::NotStarted)
        );

        paginator.fetch_initial("mine".to_string()).await.unwrap();
        paginator.refresh().await.unwrap();
        assert_eq!(paginator.items(), vec!["A2"]);
        let requests = paginator.source().requests();
        assert_eq!(requests[1], ("mine".to_string(), PageParam::first(8)));
    }
}
