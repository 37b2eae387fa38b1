/*
[INPUT]:  Active filter selection
[OUTPUT]: Horizontal filter bar rendered into Ratatui frame
[POS]:    TUI UI filter bar
[UPDATE]: When filter labels or highlight styling change
*/

use fazaa_orders::FilterSelection;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_filter_bar(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    active: FilterSelection,
) {
    let titles = FilterSelection::ALL_CASES
        .iter()
        .map(|filter| Line::from(filter.title()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Filter [←/→]"),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::LightBlue)
                .bg(Color::Rgb(30, 41, 59))
                .add_modifier(Modifier::BOLD),
        )
        .divider(" ")
        .select(active.position());

    frame.render_widget(tabs, area);
}
