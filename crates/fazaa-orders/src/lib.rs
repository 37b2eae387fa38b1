/*
[INPUT]:  Public API exports for fazaa-orders crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod controller;
pub mod presenter;
pub mod query;

// Re-export main types for convenience
pub use config::AppConfig;
pub use controller::{
    ControllerError, ErrorKind, ErrorMapper, FetchHandle, FilterSelection, OrderListController,
    PaginationState,
};
pub use presenter::{
    OrderListPresenter, StatusPalette, display_title, schedule_label, status_palette,
};
pub use query::OrderQuery;
