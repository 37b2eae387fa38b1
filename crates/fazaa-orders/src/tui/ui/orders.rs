/*
[INPUT]:  AppState list selection and PaginationState snapshot
[OUTPUT]: Order rows, skeleton, empty, error, and load-more states rendered into Ratatui frame
[POS]:    TUI UI order list rendering
[UPDATE]: When row layout or list states change
*/

use fazaa_orders::{PaginationState, StatusPalette, display_title, schedule_label, status_palette};
use fazaa_orders_adapter::{Order, OrderStatus};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, muted_style, spinner_frame};

const SKELETON_ROWS: usize = 6;

pub(in crate::tui) fn draw_order_list(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
    snapshot: &PaginationState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(list_title(snapshot));

    if snapshot.show_skeleton() {
        let rows = (0..SKELETON_ROWS).map(|_| skeleton_row()).collect::<Vec<_>>();
        frame.render_widget(List::new(rows).block(block), area);
        return;
    }

    if snapshot.items().is_empty() {
        let text = match snapshot.last_error() {
            Some(kind) => vec![
                Line::from(Span::styled(
                    kind.message(),
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled("Press [t] to retry", muted_style())),
            ],
            None => vec![Line::from(Span::styled("No orders found", muted_style()))],
        };
        let widget = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(widget, area);
        return;
    }

    let badge_width = badge_width();
    let mut rows = snapshot
        .items()
        .iter()
        .map(|order| order_row(order, badge_width))
        .collect::<Vec<_>>();

    if snapshot.show_load_more_spinner() {
        rows.push(ListItem::new(Line::from(Span::styled(
            format!("{} Loading more orders", spinner_frame(app.spinner_tick)),
            muted_style(),
        ))));
    }
    if let Some(kind) = snapshot.last_error() {
        rows.push(ListItem::new(Line::from(vec![
            Span::styled(kind.message(), Style::default().fg(Color::LightRed)),
            Span::styled("  [t] retry", muted_style()),
        ])));
    }

    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 56)))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn list_title(snapshot: &PaginationState) -> String {
    let filter = snapshot.active_filter().title();
    if snapshot.total_pages() == 0 {
        format!("Orders: {filter}")
    } else {
        format!(
            "Orders: {filter} ({} loaded, page {}/{})",
            snapshot.items().len(),
            snapshot.current_page(),
            snapshot.total_pages()
        )
    }
}

fn skeleton_row() -> ListItem<'static> {
    let bar = Style::default().fg(Color::Rgb(70, 70, 80));
    ListItem::new(vec![
        Line::from(vec![
            Span::styled("▒▒▒▒▒▒▒▒▒▒", bar),
            Span::raw("  "),
            Span::styled("▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒", bar),
        ]),
        Line::from(Span::styled("▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒", bar)),
        Line::raw(""),
    ])
}

/// Widest badge text, so titles line up across statuses.
fn badge_width() -> usize {
    OrderStatus::ALL
        .iter()
        .map(|status| badge_text(&status_palette(*status)).width())
        .max()
        .unwrap_or(0)
}

fn badge_text(palette: &StatusPalette) -> String {
    format!(" {} {} ", palette.icon, palette.title)
}

fn order_row(order: &Order, badge_width: usize) -> ListItem<'static> {
    let palette = status_palette(order.status);
    let badge = badge_text(&palette);
    let padding = " ".repeat(badge_width.saturating_sub(badge.width()));

    let mut headline = vec![
        Span::styled(
            badge,
            Style::default()
                .fg(palette.foreground)
                .bg(palette.background)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(padding),
        Span::raw("  "),
        Span::styled(
            display_title(order).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(order_no) = order.order_no.as_deref() {
        headline.push(Span::styled(format!("  #{order_no}"), muted_style()));
    }

    let mut details = Vec::new();
    if let Some(schedule) = schedule_label(order) {
        details.push(format!("🗓 {schedule}"));
    }
    if let Some(address) = order.address_line() {
        details.push(format!("📍 {address}"));
    }

    ListItem::new(vec![
        Line::from(headline),
        Line::from(Span::styled(details.join("   "), muted_style())),
        Line::raw(""),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_width_covers_every_status() {
        let width = badge_width();
        for status in OrderStatus::ALL {
            assert!(badge_text(&status_palette(status)).width() <= width);
        }
    }
}
