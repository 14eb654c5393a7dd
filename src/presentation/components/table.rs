use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    domain::ControllerState, element::DisplayElement, element::memory::MemoryRecord,
    io::ColumnSpec,
};

use super::super::view::{RowRender, UiContext};

const ACTIONS_TITLE: &str = "Actions";
const MAX_COLUMN_WIDTH: usize = 32;
const MIN_COLUMN_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    View,
    Editor,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CellRender {
    text: String,
    tone: Tone,
}

pub fn render_table(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let title = match ctx.in_flight {
        0 => ctx.title.to_string(),
        n => format!("{} • {n} saving", ctx.title),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    if ctx.rows.is_empty() {
        frame.render_widget(Paragraph::new("No rows in document").block(block), area);
        return;
    }

    let cells: Vec<Vec<CellRender>> = ctx
        .rows
        .iter()
        .map(|row| {
            ctx.columns
                .iter()
                .map(|column| cell_render(row.record, column))
                .collect()
        })
        .collect();
    let actions: Vec<String> = ctx.rows.iter().map(row_actions).collect();
    let widths = column_widths(ctx.columns, &cells);

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let focused_header = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut header: Vec<Cell<'static>> = ctx
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let style = if idx == ctx.selected_column {
                focused_header
            } else {
                header_style
            };
            Cell::from(Span::styled(column.display_label().to_string(), style))
        })
        .collect();
    header.push(Cell::from(Span::styled(ACTIONS_TITLE, header_style)));

    let body: Vec<Row<'static>> = ctx
        .rows
        .iter()
        .zip(cells)
        .zip(&actions)
        .enumerate()
        .map(|(row_idx, ((row, row_cells), action_text))| {
            let focused_row = row_idx == ctx.selected_row;
            let mut line: Vec<Cell<'static>> = row_cells
                .into_iter()
                .zip(&widths)
                .enumerate()
                .map(|(col_idx, (cell, width))| {
                    let mut style = tone_style(cell.tone);
                    if focused_row && col_idx == ctx.selected_column {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Cell::from(Span::styled(clamp_width(&cell.text, *width), style))
                })
                .collect();
            let action_style = if row.error.is_some() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Gray)
            };
            line.push(Cell::from(Line::from(Span::styled(
                action_text.clone(),
                action_style,
            ))));
            Row::new(line)
        })
        .collect();

    let mut constraints: Vec<Constraint> = widths
        .iter()
        .map(|width| Constraint::Length(*width as u16))
        .collect();
    constraints.push(Constraint::Min(ACTIONS_TITLE.len() as u16));

    let table = Table::new(body, constraints)
        .header(Row::new(header).bottom_margin(1))
        .block(block)
        .column_spacing(2)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");

    let mut state = TableState::default();
    state.select(Some(ctx.selected_row.min(ctx.rows.len() - 1)));
    frame.render_stateful_widget(table, area, &mut state);
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::View => Style::default().fg(Color::White),
        Tone::Editor => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED),
        Tone::Disabled => Style::default().fg(Color::DarkGray),
    }
}

/// A visible editor wins over the display text.
fn cell_render(record: &MemoryRecord, column: &ColumnSpec) -> CellRender {
    if let Some(editor) = record.editor(&column.name)
        && editor.is_visible()
    {
        let tone = if editor.is_enabled() {
            Tone::Editor
        } else {
            Tone::Disabled
        };
        return CellRender {
            text: editor.render(),
            tone,
        };
    }
    CellRender {
        text: record
            .display(&column.name)
            .map(DisplayElement::text)
            .unwrap_or_default(),
        tone: Tone::View,
    }
}

fn row_actions(row: &RowRender<'_>) -> String {
    let labels = row
        .record
        .trigger()
        .visible_labels()
        .into_iter()
        .map(|label| format!("[{label}]"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut text = match row.state {
        ControllerState::Saving => format!("{labels} saving…"),
        _ => labels,
    };
    if let Some(error) = row.error {
        text.push_str(" ⚠ ");
        text.push_str(error);
    }
    text
}

fn column_widths(columns: &[ColumnSpec], cells: &[Vec<CellRender>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let content = cells
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| UnicodeWidthStr::width(cell.text.as_str()))
                .max()
                .unwrap_or(0);
            UnicodeWidthStr::width(column.display_label())
                .max(content)
                .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn clamp_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    let mut result = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}
