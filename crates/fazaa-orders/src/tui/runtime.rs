/*
[INPUT]:  Order list presenter, orders client, log buffer, shutdown token
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use fazaa_orders::{OrderListPresenter, PaginationState};
use fazaa_orders_adapter::{Order, OrdersClient};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::fmt::MakeWriter;

use super::app::{AppState, Tab};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(120);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const LOG_BUFFER_CAPACITY: usize = 2000;
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

/// Bounded in-memory log sink shown in the Logs tab.
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// The last `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> Vec<String> {
        let start = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(start).cloned().collect()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

/// Splits formatted events into lines; a trailing fragment is kept until flush.
pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        // A poisoned buffer only loses log lines.
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_line(line);
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=pos);
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

pub(super) enum UiEvent {
    Input(CrosstermEvent),
    OrderDetail {
        request: u64,
        result: std::result::Result<Order, String>,
    },
}

pub async fn run_tui_with_log(
    presenter: OrderListPresenter,
    client: OrdersClient,
    log_buffer: LogBufferHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = shutdown.child_token();
    let input_shutdown_clone = input_shutdown.clone();
    let input_tx = event_tx.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = input_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut state_rx = presenter.controller().subscribe();
    let mut app = AppState::new(presenter, client, log_buffer, event_tx);
    app.start();
    info!("order list started");

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = shutdown.cancelled() => {
                should_quit = true;
            }
            _ = tick.tick() => {
                app.on_tick();
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    warn!("order list state channel closed");
                    should_quit = true;
                }
                app.clamp_selection();
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) => {
                        if handle_key_event(&mut app, key) {
                            should_quit = true;
                        }
                    }
                    Some(UiEvent::OrderDetail { request, result }) => {
                        app.apply_detail(request, result);
                    }
                    Some(UiEvent::Input(_)) => {}
                    None => should_quit = true,
                }
            }
        }

        let snapshot = app.snapshot();
        terminal.draw(|frame| draw_ui(frame, &mut app, &snapshot))?;
    }

    input_shutdown.cancel();
    info!("order list closed");
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState, snapshot: &PaginationState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[0], app.current_tab);

    match app.current_tab {
        Tab::Orders => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(5)])
                .split(layout[1]);
            draw_filter_bar(frame, content[0], snapshot.active_filter());

            if let Some(detail) = app.detail.as_ref() {
                let body = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(content[1]);
                draw_detail(frame, body[1], detail);
                draw_order_list(frame, body[0], app, snapshot);
            } else {
                draw_order_list(frame, content[1], app, snapshot);
            }
        }
        Tab::Logs => {
            draw_logs(frame, layout[1], &app.log_buffer);
        }
    }

    draw_footer(frame, layout[2], app);
}

fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[←/→]", key_style),
        Span::raw(" Filter  "),
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[Enter]", key_style),
        Span::raw(" Details  "),
        Span::styled("[Esc]", key_style),
        Span::raw(" Close  "),
        Span::styled("[Tab]", key_style),
        Span::raw(" Switch"),
    ]);

    let mut spans = vec![
        Span::styled("[r]", key_style),
        Span::raw(" Refresh  "),
        Span::styled("[t]", key_style),
        Span::raw(" Retry  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit  "),
    ];
    if app.presenter.is_refreshing() {
        spans.push(Span::styled(
            format!("{} refreshing  ", spinner_frame(app.spinner_tick)),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans.push(Span::raw(format!("Status: {}", app.status_message)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, Line::from(spans)]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub(crate) fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}
