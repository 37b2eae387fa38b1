/*
[INPUT]:  DetailPanel for the order opened with Enter
[OUTPUT]: Order detail panel rendered into Ratatui frame
[POS]:    TUI UI order detail rendering
[UPDATE]: When detail fields or loading states change
*/

use fazaa_orders::{display_title, status_palette};
use fazaa_orders_adapter::Order;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::DetailPanel;
use crate::tui::runtime::{border_style, header_style, muted_style};

pub(in crate::tui) fn draw_detail(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    detail: &DetailPanel,
) {
    let order = detail.order();
    let mut lines = order_lines(order);

    match detail {
        DetailPanel::Loading { .. } => {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("Loading details...", muted_style())));
        }
        DetailPanel::Failed { message, .. } => {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                format!("Could not load details: {message}"),
                Style::default().fg(Color::LightRed),
            )));
        }
        DetailPanel::Loaded(_) => {}
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Details [Esc]"),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn order_lines(order: &Order) -> Vec<Line<'static>> {
    let palette = status_palette(order.status);
    let label = |text: &str| Span::styled(format!("{text:<10}"), header_style());
    let value = |text: Option<&str>| Span::raw(format!(" {}", text.unwrap_or("-")));

    let address = order.address.as_ref();
    vec![
        Line::from(Span::styled(
            display_title(order).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {} {} ", palette.icon, palette.title),
            Style::default().fg(palette.foreground).bg(palette.background),
        )),
        Line::raw(""),
        Line::from(vec![label("Order no"), value(order.order_no.as_deref())]),
        Line::from(vec![label("Date"), value(order.dt_date.as_deref())]),
        Line::from(vec![label("Time"), value(order.dt_time.as_deref())]),
        Line::from(vec![
            label("Address"),
            value(address.and_then(|a| a.address.as_deref())),
        ]),
        Line::from(vec![
            label("Details"),
            value(address.and_then(|a| a.details.as_deref())),
        ]),
    ]
}
