/*
[INPUT]:  User gestures from the order list screen (filter taps, scrolling, pull to refresh)
[OUTPUT]: Controller operations plus the refresh indicator and status palette
[POS]:    Presentation boundary - translates gestures into controller intents
[UPDATE]: When gestures, refresh indicator timing, or status styling change
*/

use std::time::{Duration, Instant};

use fazaa_orders_adapter::{Order, OrderStatus};
use ratatui::style::Color;

use crate::controller::{
    ControllerError, FetchHandle, FilterSelection, OrderListController, PaginationState,
};

/// Title shown for orders that have none.
pub const ORDER_TITLE_PLACEHOLDER: &str = "Order details";

/// Shortest time the pull-to-refresh indicator stays visible.
pub const MIN_REFRESH_DISPLAY: Duration = Duration::from_millis(600);

type Intent = Result<Option<FetchHandle>, ControllerError>;

/// Display data for one order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPalette {
    pub title: &'static str,
    pub foreground: Color,
    pub background: Color,
    pub icon: &'static str,
}

pub fn status_palette(status: OrderStatus) -> StatusPalette {
    let (title, foreground, background, icon) = match status {
        OrderStatus::New => ("New", Color::Rgb(37, 99, 235), Color::Rgb(219, 234, 254), "✦"),
        OrderStatus::Accepted => ("Accepted", Color::Rgb(13, 148, 136), Color::Rgb(204, 251, 241), "✔"),
        OrderStatus::Started => ("Started", Color::Rgb(124, 58, 237), Color::Rgb(237, 233, 254), "▶"),
        OrderStatus::EnRoute => ("On the way", Color::Rgb(234, 88, 12), Color::Rgb(255, 237, 213), "➜"),
        OrderStatus::InProgress => ("In progress", Color::Rgb(202, 138, 4), Color::Rgb(254, 249, 195), "⟳"),
        OrderStatus::Updated => ("Updated", Color::Rgb(8, 145, 178), Color::Rgb(207, 250, 254), "✎"),
        OrderStatus::PreFinished => ("Almost done", Color::Rgb(101, 163, 13), Color::Rgb(236, 252, 203), "◐"),
        OrderStatus::Finished => ("Finished", Color::Rgb(22, 163, 74), Color::Rgb(220, 252, 231), "●"),
        OrderStatus::Canceled => ("Canceled", Color::Rgb(220, 38, 38), Color::Rgb(254, 226, 226), "✕"),
    };
    StatusPalette {
        title,
        foreground,
        background,
        icon,
    }
}

pub fn display_title(order: &Order) -> &str {
    order
        .title
        .as_deref()
        .filter(|title| !title.trim().is_empty())
        .unwrap_or(ORDER_TITLE_PLACEHOLDER)
}

/// `date time`, or whichever non-blank half is present.
pub fn schedule_label(order: &Order) -> Option<String> {
    let date = order.dt_date.as_deref().filter(|date| !date.trim().is_empty());
    let time = order.dt_time.as_deref().filter(|time| !time.trim().is_empty());
    match (date, time) {
        (Some(date), Some(time)) => Some(format!("{date} {time}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

impl FilterSelection {
    /// Label shown in the filter bar.
    pub fn title(&self) -> &'static str {
        match self {
            FilterSelection::All => "All",
            FilterSelection::Status(status) => status_palette(*status).title,
        }
    }
}

/// Binds one list screen to its controller.
pub struct OrderListPresenter {
    controller: OrderListController,
    page_size: u32,
    refreshing_since: Option<Instant>,
}

impl OrderListPresenter {
    pub fn new(controller: OrderListController) -> Self {
        let page_size = controller.page_size();
        Self {
            controller,
            page_size,
            refreshing_since: None,
        }
    }

    pub fn controller(&self) -> &OrderListController {
        &self.controller
    }

    pub fn snapshot(&self) -> PaginationState {
        self.controller.snapshot()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing_since.is_some()
    }

    pub fn select_filter(&mut self, filter: FilterSelection) -> Intent {
        self.controller.refresh(filter, self.page_size)
    }

    pub fn scrolled_near_end(&mut self) -> Intent {
        let filter = self.controller.snapshot().active_filter();
        self.controller.load_more(filter, self.page_size)
    }

    /// Ignored while the indicator from an earlier pull is still up.
    pub fn pull_to_refresh(&mut self) -> Intent {
        if self.refreshing_since.is_some() {
            return Ok(None);
        }
        let filter = self.controller.snapshot().active_filter();
        let handle = self.controller.refresh(filter, self.page_size)?;
        self.refreshing_since = Some(Instant::now());
        Ok(handle)
    }

    /// Lower the refresh indicator if loading is done and it has been shown long enough.
    pub fn sync(&mut self) {
        self.sync_at(Instant::now());
    }

    pub fn sync_at(&mut self, now: Instant) {
        let Some(since) = self.refreshing_since else {
            return;
        };
        if self.controller.snapshot().is_loading() {
            return;
        }
        if now.saturating_duration_since(since) >= MIN_REFRESH_DISPLAY {
            self.refreshing_since = None;
        }
    }

    /// First page when the screen is shown with nothing loaded.
    pub fn appear(&mut self) -> Intent {
        let state = self.controller.snapshot();
        if !state.items().is_empty() || state.is_loading() {
            return Ok(None);
        }
        self.controller
            .load(state.active_filter(), 1, self.page_size)
    }

    /// Rows report when they become visible; the last one triggers paging.
    pub fn row_appeared(&mut self, index: usize) -> Intent {
        let len = self.controller.snapshot().items().len();
        if len == 0 || index + 1 != len {
            return Ok(None);
        }
        self.scrolled_near_end()
    }

    pub fn retry(&mut self) -> Intent {
        self.controller.retry(self.page_size)
    }
}
