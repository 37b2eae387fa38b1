/*
[INPUT]:  User intents (load, refresh, load more, retry) and an OrderQuery collaborator
[OUTPUT]: PaginationState snapshots published on a watch channel
[POS]:    Controller layer - incremental pagination and filter refresh
[UPDATE]: When fetch triggering, merge rules, or stale suppression change
*/

pub mod error;
pub mod state;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::query::OrderQuery;

pub use error::{ControllerError, ErrorKind, ErrorMapper, default_error_mapper};
pub use state::{ApplyOutcome, FetchTicket, FilterSelection, PaginationState};

/// Handle of a spawned fetch; resolves once its result has been applied or discarded.
pub type FetchHandle = JoinHandle<()>;

type Decision = std::result::Result<Option<FetchTicket>, ControllerError>;

/// Owns the pagination state of one order list screen.
///
/// Operations return immediately. When they start a fetch it runs on the
/// ambient Tokio runtime, so they must be called from within one. All state
/// writes go through the watch sender, which serializes them and notifies
/// subscribers in the same step.
#[derive(Clone)]
pub struct OrderListController {
    query: Arc<dyn OrderQuery>,
    state: Arc<watch::Sender<PaginationState>>,
    error_mapper: ErrorMapper,
}

impl OrderListController {
    pub fn new(query: Arc<dyn OrderQuery>, page_size: u32) -> Self {
        Self::with_error_mapper(query, page_size, default_error_mapper())
    }

    pub fn with_error_mapper(
        query: Arc<dyn OrderQuery>,
        page_size: u32,
        error_mapper: ErrorMapper,
    ) -> Self {
        let (state, _) = watch::channel(PaginationState::new(page_size));
        Self {
            query,
            state: Arc::new(state),
            error_mapper,
        }
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> PaginationState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<PaginationState> {
        self.state.subscribe()
    }

    pub fn page_size(&self) -> u32 {
        self.state.borrow().page_size()
    }

    /// Fetch `page` of `filter`.
    ///
    /// No-op while a fetch for the same filter is in flight. A filter other
    /// than the active one starts a new session, which must begin at page 1.
    pub fn load(
        &self,
        filter: FilterSelection,
        page: u32,
        limit: u32,
    ) -> Result<Option<FetchHandle>, ControllerError> {
        if page == 0 {
            return Err(ControllerError::InvalidPage { page });
        }
        self.issue(limit, |state| {
            if state.active_filter() != filter {
                if page != 1 {
                    return Err(ControllerError::SessionMismatch {
                        requested: filter,
                        active: state.active_filter(),
                        page,
                    });
                }
                state.reset_session(filter);
            } else if state.in_flight().is_some() {
                return Ok(None);
            }
            Ok(Some(state.begin_fetch(page)))
        })
    }

    /// Start over at page 1 of `filter`, superseding whatever is in flight.
    ///
    /// No-op only while a page-1 fetch of `filter` is running on an already
    /// cleared list.
    pub fn refresh(
        &self,
        filter: FilterSelection,
        limit: u32,
    ) -> Result<Option<FetchHandle>, ControllerError> {
        self.issue(limit, |state| {
            let restarting = state.in_flight().is_some_and(|in_flight| {
                in_flight.filter == filter && in_flight.page == 1 && state.items().is_empty()
            });
            if restarting {
                return Ok(None);
            }
            state.reset_session(filter);
            Ok(Some(state.begin_fetch(1)))
        })
    }

    /// Fetch the page after the last one loaded, if there is one.
    pub fn load_more(
        &self,
        filter: FilterSelection,
        limit: u32,
    ) -> Result<Option<FetchHandle>, ControllerError> {
        self.issue(limit, |state| {
            if state.is_loading()
                || state.total_pages() == 0
                || !state.can_load_more()
                || state.active_filter() != filter
            {
                return Ok(None);
            }
            let next = state.current_page() + 1;
            Ok(Some(state.begin_fetch(next)))
        })
    }

    /// Re-issue the fetch that last failed for the active filter.
    pub fn retry(&self, limit: u32) -> Result<Option<FetchHandle>, ControllerError> {
        self.issue(limit, |state| {
            if state.last_error().is_none() || state.in_flight().is_some() {
                return Ok(None);
            }
            let page = state.failed_page().unwrap_or(1);
            Ok(Some(state.begin_fetch(page)))
        })
    }

    fn issue<F>(&self, limit: u32, decide: F) -> Result<Option<FetchHandle>, ControllerError>
    where
        F: FnOnce(&mut PaginationState) -> Decision,
    {
        if limit == 0 {
            return Err(ControllerError::InvalidLimit);
        }

        let mut decision: Decision = Ok(None);
        self.state.send_if_modified(|state| {
            decision = decide(state);
            matches!(decision, Ok(Some(_)))
        });

        Ok(decision?.map(|ticket| self.spawn_fetch(ticket, limit)))
    }

    fn spawn_fetch(&self, ticket: FetchTicket, limit: u32) -> FetchHandle {
        let query = Arc::clone(&self.query);
        let state = Arc::clone(&self.state);
        let error_mapper = Arc::clone(&self.error_mapper);

        debug!(
            filter = %ticket.filter,
            page = ticket.page,
            limit,
            generation = ticket.generation,
            "fetching orders"
        );

        tokio::spawn(async move {
            let result = query
                .fetch_orders(ticket.filter.status_param(), ticket.page, limit)
                .await
                .map_err(|err| {
                    warn!(filter = %ticket.filter, page = ticket.page, error = %err, "order fetch failed");
                    error_mapper(&err)
                });

            let mut outcome = ApplyOutcome::Stale;
            state.send_if_modified(|current| {
                outcome = match result {
                    Ok(page) => current.apply_success(ticket, page),
                    Err(kind) => current.apply_failure(ticket, kind),
                };
                outcome == ApplyOutcome::Applied
            });

            if outcome == ApplyOutcome::Stale {
                debug!(
                    filter = %ticket.filter,
                    page = ticket.page,
                    generation = ticket.generation,
                    "discarding stale order page"
                );
            }
        })
    }
}
