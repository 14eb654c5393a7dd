use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::domain::ControllerState;

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let mut status = ctx.status_message.to_string();
    if let Some(column) = ctx.columns.get(ctx.selected_column) {
        status.push_str(" • column: ");
        status.push_str(column.display_label());
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }

    let focused = ctx.rows.get(ctx.selected_row);
    let badge = match focused.map(|row| (row.state, row.error.is_some())) {
        Some((ControllerState::Saving, _)) => {
            Span::styled("[saving]", Style::default().fg(Color::Cyan))
        }
        Some((_, true)) => Span::styled(
            "[! not saved]",
            Style::default().fg(Color::Red).bg(Color::Black),
        ),
        Some((ControllerState::Editing, false)) => {
            Span::styled("[editing]", Style::default().fg(Color::Yellow))
        }
        _ => Span::styled("[ok]", Style::default().fg(Color::Green)),
    };

    let status_widget = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status),
        Span::raw(" "),
        badge,
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(status_widget, rows[1]);
}
