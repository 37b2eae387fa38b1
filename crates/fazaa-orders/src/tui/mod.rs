/*
[INPUT]:  Order list presenter, orders client, and log buffer
[OUTPUT]: Ratatui-based TUI for browsing, filtering, and inspecting orders
[POS]:    TUI module for fazaa-orders binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{
    LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui_with_log,
};
