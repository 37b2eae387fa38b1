/*
[INPUT]:  Order list presenter, orders client, log buffer, UI event sender
[OUTPUT]: AppState helpers for TUI rendering and user intents
[POS]:    TUI app state
[UPDATE]: When adding panels, tabs, or intents to the order screen
*/

use fazaa_orders::{ControllerError, FetchHandle, OrderListPresenter, PaginationState};
use fazaa_orders_adapter::{Order, OrdersClient};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::tui::LogBufferHandle;
use crate::tui::runtime::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Orders,
    Logs,
}

/// Right-hand panel showing one order.
#[derive(Debug)]
pub(super) enum DetailPanel {
    Loading { order: Order },
    Loaded(Order),
    Failed { order: Order, message: String },
}

impl DetailPanel {
    pub(super) fn order(&self) -> &Order {
        match self {
            DetailPanel::Loading { order } | DetailPanel::Failed { order, .. } => order,
            DetailPanel::Loaded(order) => order,
        }
    }
}

pub(super) struct AppState {
    pub(super) presenter: OrderListPresenter,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) list_state: ListState,
    pub(super) current_tab: Tab,
    pub(super) detail: Option<DetailPanel>,
    pub(super) status_message: String,
    pub(super) spinner_tick: usize,
    client: OrdersClient,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    detail_request: u64,
}

impl AppState {
    pub(super) fn new(
        presenter: OrderListPresenter,
        client: OrdersClient,
        log_buffer: LogBufferHandle,
        ui_tx: mpsc::UnboundedSender<UiEvent>,
    ) -> Self {
        Self {
            presenter,
            log_buffer,
            list_state: ListState::default(),
            current_tab: Tab::Orders,
            detail: None,
            status_message: "Ready".to_string(),
            spinner_tick: 0,
            client,
            ui_tx,
            detail_request: 0,
        }
    }

    pub(super) fn snapshot(&self) -> PaginationState {
        self.presenter.snapshot()
    }

    pub(super) fn start(&mut self) {
        let intent = self.presenter.appear();
        self.report("initial load", intent);
    }

    pub(super) fn on_tick(&mut self) {
        self.presenter.sync();
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
        self.clamp_selection();
    }

    /// Keep the highlighted row inside the loaded items.
    pub(super) fn clamp_selection(&mut self) {
        let len = self.snapshot().items().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(selected) if selected >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub(super) fn shift_filter(&mut self, delta: isize) {
        let filter = self.snapshot().active_filter().cycle(delta);
        let intent = self.presenter.select_filter(filter);
        self.list_state.select(None);
        self.status_message = format!("Filter: {}", filter.title());
        self.report("filter change", intent);
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let len = self.snapshot().items().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (len - 1) as isize) as usize;
        self.list_state.select(Some(next));

        let intent = self.presenter.row_appeared(next);
        self.report("load more", intent);
    }

    pub(super) fn pull_to_refresh(&mut self) {
        let intent = self.presenter.pull_to_refresh();
        if self.presenter.is_refreshing() {
            self.status_message = "Refreshing".to_string();
        }
        self.report("refresh", intent);
    }

    pub(super) fn retry(&mut self) {
        let intent = self.presenter.retry();
        if matches!(intent, Ok(None)) {
            self.status_message = "Nothing to retry".to_string();
        }
        self.report("retry", intent);
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Orders => Tab::Logs,
            Tab::Logs => Tab::Orders,
        };
    }

    /// Show the highlighted order, fetching its details when it has an id.
    pub(super) fn open_detail(&mut self) {
        let Some(order) = self
            .list_state
            .selected()
            .and_then(|index| self.snapshot().items().get(index).cloned())
        else {
            return;
        };

        let Some(id) = order.id else {
            self.detail = Some(DetailPanel::Loaded(order));
            return;
        };

        self.detail_request += 1;
        let request = self.detail_request;
        self.detail = Some(DetailPanel::Loading { order });

        let client = self.client.clone();
        let ui_tx = self.ui_tx.clone();
        tokio::spawn(async move {
            let result = client.get_order(id).await.map_err(|err| {
                warn!(order_id = id, error = %err, "order detail fetch failed");
                err.to_string()
            });
            let _ = ui_tx.send(UiEvent::OrderDetail { request, result });
        });
    }

    pub(super) fn apply_detail(&mut self, request: u64, result: Result<Order, String>) {
        if request != self.detail_request {
            debug!(request, "discarding superseded order detail");
            return;
        }
        let Some(DetailPanel::Loading { order }) = self.detail.take() else {
            return;
        };
        self.detail = Some(match result {
            Ok(loaded) => DetailPanel::Loaded(loaded),
            Err(message) => DetailPanel::Failed { order, message },
        });
    }

    /// Returns false when there was no panel to close.
    pub(super) fn close_detail(&mut self) -> bool {
        self.detail_request += 1;
        self.detail.take().is_some()
    }

    fn report(&mut self, action: &str, intent: Result<Option<FetchHandle>, ControllerError>) {
        match intent {
            Ok(Some(_)) => debug!(action, "fetch started"),
            Ok(None) => {}
            Err(err) => {
                warn!(action, error = %err, "order list intent rejected");
                self.status_message = format!("{action} failed: {err}");
            }
        }
    }
}
