/*
[INPUT]:  Fetched order pages, filter selections, and fetch tickets
[OUTPUT]: PaginationState snapshots with derived presentation views
[POS]:    Controller layer - pagination state and its transitions
[UPDATE]: When pagination invariants or derived views change
*/

use std::fmt;
use std::str::FromStr;

use fazaa_orders_adapter::{Order, OrderStatus, OrdersPage};

use super::error::ErrorKind;

/// Which slice of orders the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterSelection {
    #[default]
    All,
    Status(OrderStatus),
}

impl FilterSelection {
    /// `All` followed by every status, in filter bar order.
    pub const ALL_CASES: [FilterSelection; 10] = [
        FilterSelection::All,
        FilterSelection::Status(OrderStatus::New),
        FilterSelection::Status(OrderStatus::Accepted),
        FilterSelection::Status(OrderStatus::Started),
        FilterSelection::Status(OrderStatus::EnRoute),
        FilterSelection::Status(OrderStatus::InProgress),
        FilterSelection::Status(OrderStatus::Updated),
        FilterSelection::Status(OrderStatus::PreFinished),
        FilterSelection::Status(OrderStatus::Finished),
        FilterSelection::Status(OrderStatus::Canceled),
    ];

    /// Value of the `status` query parameter; `None` means no filtering.
    pub fn status_param(&self) -> Option<&'static str> {
        match self {
            FilterSelection::All => None,
            FilterSelection::Status(status) => Some(status.as_str()),
        }
    }

    pub fn position(&self) -> usize {
        Self::ALL_CASES
            .iter()
            .position(|candidate| candidate == self)
            .unwrap_or(0)
    }

    /// Neighbouring filter in bar order, wrapping at both ends.
    pub fn cycle(&self, delta: isize) -> FilterSelection {
        let len = Self::ALL_CASES.len() as isize;
        let next = (self.position() as isize + delta).rem_euclid(len) as usize;
        Self::ALL_CASES[next]
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSelection::All => f.write_str("all"),
            FilterSelection::Status(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for FilterSelection {
    type Err = String;

    /// Accepts `all` or any status wire value, including `cancelled`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        if value == "all" {
            return Ok(FilterSelection::All);
        }
        if value == "cancelled" {
            return Ok(FilterSelection::Status(OrderStatus::Canceled));
        }
        OrderStatus::ALL
            .iter()
            .find(|status| status.as_str() == value)
            .map(|status| FilterSelection::Status(*status))
            .ok_or_else(|| format!("unknown order filter: {value}"))
    }
}

/// Identifies one outstanding fetch. A response is applied only while its
/// ticket is still the one recorded in the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub filter: FilterSelection,
    pub page: u32,
}

/// Result of applying a finished fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    current_page: u32,
    page_size: u32,
    items: Vec<Order>,
    total_pages: u32,
    is_loading_initial: bool,
    is_loading_more: bool,
    active_filter: FilterSelection,
    last_error: Option<ErrorKind>,
    failed_page: Option<u32>,
    in_flight: Option<FetchTicket>,
    generation: u64,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            items: Vec::new(),
            total_pages: 0,
            is_loading_initial: false,
            is_loading_more: false,
            active_filter: FilterSelection::All,
            last_error: None,
            failed_page: None,
            in_flight: None,
            generation: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn items(&self) -> &[Order] {
        &self.items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading_initial(&self) -> bool {
        self.is_loading_initial
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn active_filter(&self) -> FilterSelection {
        self.active_filter
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Page whose fetch produced `last_error`.
    pub fn failed_page(&self) -> Option<u32> {
        self.failed_page
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading_initial || self.is_loading_more
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && !self.is_loading_initial
    }

    pub fn show_skeleton(&self) -> bool {
        self.is_loading_initial && self.items.is_empty()
    }

    pub fn can_load_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Footer spinner under the last row.
    pub fn show_load_more_spinner(&self) -> bool {
        self.is_loading_more && self.can_load_more()
    }

    /// Drop the current session and start an empty one for `filter`.
    ///
    /// Any in-flight ticket is forgotten, so its response will be stale.
    pub(crate) fn reset_session(&mut self, filter: FilterSelection) {
        self.active_filter = filter;
        self.items.clear();
        self.current_page = 1;
        self.total_pages = 0;
        self.last_error = None;
        self.failed_page = None;
        self.is_loading_initial = false;
        self.is_loading_more = false;
        self.in_flight = None;
    }

    /// Mark a fetch for `page` of the active filter as started.
    pub(crate) fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            filter: self.active_filter,
            page,
        };
        self.in_flight = Some(ticket);
        self.is_loading_initial = page == 1;
        self.is_loading_more = page > 1;
        ticket
    }

    pub(crate) fn apply_success(&mut self, ticket: FetchTicket, page: OrdersPage) -> ApplyOutcome {
        if !self.finish_fetch(ticket) {
            return ApplyOutcome::Stale;
        }
        if ticket.page == 1 {
            self.items = page.orders;
        } else {
            self.items.extend(page.orders);
        }
        self.current_page = ticket.page;
        self.total_pages = page.total_pages;
        self.last_error = None;
        self.failed_page = None;
        ApplyOutcome::Applied
    }

    pub(crate) fn apply_failure(&mut self, ticket: FetchTicket, error: ErrorKind) -> ApplyOutcome {
        if !self.finish_fetch(ticket) {
            return ApplyOutcome::Stale;
        }
        self.last_error = Some(error);
        self.failed_page = Some(ticket.page);
        ApplyOutcome::Applied
    }

    fn finish_fetch(&mut self, ticket: FetchTicket) -> bool {
        if self.in_flight != Some(ticket) || self.active_filter != ticket.filter {
            return false;
        }
        self.in_flight = None;
        self.is_loading_initial = false;
        self.is_loading_more = false;
        true
    }
}
