/*
[INPUT]:  Crossterm key events
[OUTPUT]: AppState intents (filter, selection, refresh, retry, details, tabs)
[POS]:    TUI key routing
[UPDATE]: When adding or changing hotkeys
*/

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{AppState, Tab};

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.next_tab(),
        KeyCode::Esc => {
            app.close_detail();
        }
        _ if app.current_tab == Tab::Logs => {}
        KeyCode::Left | KeyCode::Char('[') => app.shift_filter(-1),
        KeyCode::Right | KeyCode::Char(']') => app.shift_filter(1),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Char('r') => app.pull_to_refresh(),
        KeyCode::Char('t') => app.retry(),
        KeyCode::Enter => app.open_detail(),
        _ => {}
    }
    false
}
