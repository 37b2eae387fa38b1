/*
[INPUT]:  TUI app state and pagination snapshots
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding or removing panels
*/

mod detail;
mod filter_bar;
mod layout;
mod logs;
mod orders;

pub(in crate::tui) use detail::draw_detail;
pub(in crate::tui) use filter_bar::draw_filter_bar;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use orders::draw_order_list;
