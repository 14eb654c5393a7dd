use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::{
    StreamExt,
    future::{FutureExt, LocalBoxFuture},
    stream::FuturesUnordered,
};

use crate::{
    domain::ControllerState,
    element::memory::{MemoryEditor, MemoryRecord},
    io::ColumnSpec,
    persist::SaveOutcome,
    presentation::{self, RowRender, UiContext},
    record::{RecordController, SaveTicket},
};

use super::{
    input::{KeyAction, classify},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

const VIEW_HELP: &str = "↑/↓ row • ←/→ column • Enter/e edit • q quit";
const EDIT_HELP: &str =
    "type to edit • Space toggle • ←/→ choose • Enter/Ctrl+S save • Ctrl+R reset • Esc leave";

type PendingSave = LocalBoxFuture<'static, (usize, SaveOutcome)>;

/// Counts reported once the UI exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub failed: usize,
}

pub(crate) struct RowEntry {
    pub(crate) record: MemoryRecord,
    pub(crate) controller: RecordController,
    ticket: Option<SaveTicket>,
    last_error: Option<String>,
}

impl RowEntry {
    pub(crate) fn new(record: MemoryRecord, controller: RecordController) -> Self {
        Self {
            record,
            controller,
            ticket: None,
            last_error: None,
        }
    }
}

pub(crate) struct App {
    title: String,
    columns: Vec<ColumnSpec>,
    rows: Vec<RowEntry>,
    selected_row: usize,
    selected_column: usize,
    status: StatusLine,
    options: UiOptions,
    pending: FuturesUnordered<PendingSave>,
    summary: RunSummary,
    exit_armed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(
        title: String,
        columns: Vec<ColumnSpec>,
        rows: Vec<RowEntry>,
        options: UiOptions,
    ) -> Self {
        Self {
            title,
            columns,
            rows,
            selected_row: 0,
            selected_column: 0,
            status: StatusLine::new(),
            options,
            pending: FuturesUnordered::new(),
            summary: RunSummary::default(),
            exit_armed: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        let mut terminal = TerminalGuard::enter()?;
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(self.options.tick_rate);

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(Event::Resize(width, height))) => terminal.resize(width, height)?,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("failed to read terminal event"),
                    None => self.should_quit = true,
                },
                Some((row, outcome)) = self.pending.next(), if !self.pending.is_empty() => {
                    self.finish_save(row, outcome);
                }
                _ = ticker.tick() => {}
            }
        }

        Ok(self.summary)
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let editing = self.focused_state() == Some(ControllerState::Editing);
        let help = match (self.options.show_help, editing) {
            (false, _) => None,
            (true, true) => Some(EDIT_HELP),
            (true, false) => Some(VIEW_HELP),
        };
        let rows = self
            .rows
            .iter()
            .map(|row| RowRender {
                record: &row.record,
                state: row.controller.state(),
                error: row.last_error.as_deref(),
            })
            .collect();
        presentation::draw(
            frame,
            UiContext {
                title: &self.title,
                columns: &self.columns,
                rows,
                selected_row: self.selected_row,
                selected_column: self.selected_column,
                status_message: self.status.message(),
                help,
                in_flight: self.pending.len(),
            },
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let editing = self.focused_state() == Some(ControllerState::Editing);
        let action = classify(&key, editing);
        if action != KeyAction::Quit {
            self.exit_armed = false;
        }

        match action {
            KeyAction::Quit => self.on_exit(),
            KeyAction::RowStep(delta) => self.step_row(delta),
            KeyAction::ColumnStep(delta) => self.step_column(delta),
            KeyAction::Edit => self.on_edit(),
            KeyAction::Save => self.on_save(),
            KeyAction::Reset => self.on_reset(),
            KeyAction::Discard => self.on_discard(),
            KeyAction::Toggle => {
                self.with_focused_editor(|editor| match editor {
                    MemoryEditor::Checkbox(toggle) => toggle.toggle(),
                    MemoryEditor::Text(input) => input.push_char(' '),
                    MemoryEditor::Select(_) | MemoryEditor::Radio(_) => editor.cycle(1),
                });
            }
            KeyAction::Cycle(delta) => {
                self.with_focused_editor(|editor| editor.cycle(delta));
            }
            KeyAction::Insert(ch) => {
                self.with_focused_editor(|editor| match editor {
                    MemoryEditor::Text(input) => input.push_char(ch),
                    _ => false,
                });
            }
            KeyAction::Backspace => {
                self.with_focused_editor(|editor| match editor {
                    MemoryEditor::Text(input) => input.pop_char(),
                    _ => false,
                });
            }
            KeyAction::Clear => {
                self.with_focused_editor(|editor| match editor {
                    MemoryEditor::Text(input) => input.clear(),
                    _ => false,
                });
            }
            KeyAction::ResetStatus => self.status.ready(),
            KeyAction::None => {}
        }
    }

    fn focused_state(&self) -> Option<ControllerState> {
        self.rows
            .get(self.selected_row)
            .map(|row| row.controller.state())
    }

    fn step_row(&mut self, delta: i32) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as i32;
        self.selected_row = (self.selected_row as i32 + delta).rem_euclid(len) as usize;
    }

    fn step_column(&mut self, delta: i32) {
        if self.columns.is_empty() {
            return;
        }
        let len = self.columns.len() as i32;
        self.selected_column = (self.selected_column as i32 + delta).rem_euclid(len) as usize;
    }

    fn with_focused_editor(&mut self, apply: impl FnOnce(&MemoryEditor) -> bool) {
        let Some(column) = self.columns.get(self.selected_column) else {
            return;
        };
        let Some(row) = self.rows.get(self.selected_row) else {
            return;
        };
        match row.record.editor(&column.name) {
            Some(editor) => {
                apply(editor);
            }
            None => self
                .status
                .set_raw(format!("{} is read-only", column.display_label())),
        }
    }

    fn on_edit(&mut self) {
        let index = self.selected_row;
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        if row.controller.edit() {
            row.last_error = None;
            self.status.editing(index);
        } else {
            self.status
                .set_raw(format!("Row {} is {}", index + 1, row.controller.state()));
        }
    }

    fn on_reset(&mut self) {
        let index = self.selected_row;
        if let Some(row) = self.rows.get_mut(index)
            && row.controller.cancel()
        {
            self.status.reset(index);
        }
    }

    fn on_discard(&mut self) {
        let index = self.selected_row;
        if let Some(row) = self.rows.get_mut(index)
            && row.controller.discard()
        {
            row.last_error = None;
            self.status.discarded(index);
        }
    }

    fn on_save(&mut self) {
        let index = self.selected_row;
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        match row.controller.begin_save() {
            Ok(ticket) => {
                let adapter = row.controller.adapter();
                let values = ticket.values().clone();
                row.ticket = Some(ticket);
                self.pending
                    .push(async move { (index, adapter.save(values).await) }.boxed_local());
                self.status.saving(index);
            }
            Err(err) => self.status.set_raw(err.to_string()),
        }
    }

    fn finish_save(&mut self, index: usize, outcome: SaveOutcome) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        let Some(ticket) = row.ticket.take() else {
            tracing::warn!(row = index, "save finished without a ticket");
            return;
        };
        let failure = outcome.as_ref().err().map(ToString::to_string);
        if let Err(err) = row.controller.complete_save(ticket, outcome) {
            self.status.set_raw(err.to_string());
            return;
        }
        match failure {
            None => {
                row.last_error = None;
                self.summary.saved += 1;
                self.status.saved(index);
            }
            Some(reason) => {
                self.summary.failed += 1;
                self.status.save_failed(index, &reason);
                row.last_error = Some(reason);
            }
        }
    }

    fn on_exit(&mut self) {
        let in_flight = self.pending.len();
        if self.options.confirm_exit && in_flight > 0 && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit(in_flight);
            return;
        }
        self.should_quit = true;
    }
}
