use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{domain::ControllerState, element::memory::MemoryRecord, io::ColumnSpec};

use super::components::{render_footer, render_table};

pub struct UiContext<'a> {
    pub title: &'a str,
    pub columns: &'a [ColumnSpec],
    pub rows: Vec<RowRender<'a>>,
    pub selected_row: usize,
    pub selected_column: usize,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    /// Saves started but not yet settled, across all rows.
    pub in_flight: usize,
}

pub struct RowRender<'a> {
    pub record: &'a MemoryRecord,
    pub state: ControllerState,
    pub error: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(frame.area());

    render_table(frame, chunks[0], &ctx);
    render_footer(frame, chunks[1], &ctx);
}
