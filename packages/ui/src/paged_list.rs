//! Dioxus binding for [`shelf::Paginator`].
//!
//! The paginator keeps the list state; this hook owns one per view, runs its
//! operations on the Dioxus executor and bumps a revision signal so the view
//! re-renders when the list or the phase changes. Failures go to the notice
//! stack and leave the list as it was.

use std::future::Future;
use std::rc::Rc;

use api::ApiError;
use dioxus::prelude::*;
use shelf::{FetchOutcome, PageSource, PageState, Paginator, Phase};

use crate::notifications::{notify_error, use_notifications, Notifications};

/// Sources a view can page through.
pub trait ListSource: PageSource<Error = ApiError, Item: 'static, Filters: 'static> + 'static {}

impl<S> ListSource for S where S: PageSource<Error = ApiError, Item: 'static, Filters: 'static> + 'static {}

pub struct PagedList<S: ListSource> {
    paginator: CopyValue<Rc<Paginator<S>>>,
    revision: Signal<u64>,
    notices: Signal<Notifications>,
    label: &'static str,
}

impl<S: ListSource> Clone for PagedList<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ListSource> Copy for PagedList<S> {}

/// Create the list state for a view. `label` names the list in error notices
/// ("Loading books: ...").
pub fn use_paged_list<S>(
    label: &'static str,
    page_size: u32,
    make_source: impl FnOnce() -> S,
) -> PagedList<S>
where
    S: ListSource,
{
    let notices = use_notifications();
    let revision = use_signal(|| 0u64);
    let paginator = use_hook(|| CopyValue::new(Rc::new(Paginator::new(make_source(), page_size))));
    PagedList {
        paginator,
        revision,
        notices,
        label,
    }
}

impl<S: ListSource> PagedList<S> {
    fn paginator(&self) -> Rc<Paginator<S>> {
        Rc::clone(&self.paginator.read())
    }

    fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Rc<Paginator<S>>) -> Fut + 'static,
        Fut: Future<Output = Result<FetchOutcome, ApiError>> + 'static,
    {
        let paginator = self.paginator();
        let mut revision = self.revision;
        let mut notices = self.notices;
        let label = self.label;
        spawn(async move {
            let pending = op(paginator);
            // Re-render once the request is marked in flight.
            *revision.write() += 1;
            match pending.await {
                Ok(FetchOutcome::Applied { fetched }) => {
                    tracing::debug!("{label}: {fetched} items");
                }
                Ok(outcome) => tracing::debug!("{label}: {outcome:?}"),
                Err(e) => notify_error(&mut notices, label, &e),
            }
            *revision.write() += 1;
        });
    }

    /// Load the first page for `filters`, replacing the list.
    pub fn load(&self, filters: S::Filters) {
        self.run(move |p| async move { p.fetch_initial(filters).await });
    }

    /// Append the next page, if any.
    pub fn load_more(&self) {
        self.run(|p| async move { p.fetch_more().await });
    }

    /// Reload the first page with the current filters.
    pub fn refresh(&self) {
        self.run(|p| async move { p.refresh().await });
    }

    pub fn reset(&self) {
        self.paginator().reset();
        let mut revision = self.revision;
        *revision.write() += 1;
    }

    /// Current items. Subscribes the caller to list changes.
    pub fn items(&self) -> Vec<S::Item>
    where
        S::Item: Clone,
    {
        let _ = self.revision.read();
        self.paginator().items()
    }

    pub fn phase(&self) -> Phase {
        let _ = self.revision.read();
        self.paginator().phase()
    }

    pub fn page_state(&self) -> PageState {
        let _ = self.revision.read();
        self.paginator().page_state()
    }

    pub fn has_more(&self) -> bool {
        self.page_state().has_more
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.phase(), Phase::FetchingInitial | Phase::FetchingMore)
    }

    /// Bumped on every change; usable as an effect dependency.
    pub fn revision(&self) -> u64 {
        (self.revision)()
    }
}
