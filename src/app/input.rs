use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    RowStep(i32),
    ColumnStep(i32),
    Edit,
    Save,
    Reset,
    Discard,
    /// Space: toggles a checkbox, inserts a blank into text.
    Toggle,
    Cycle(i32),
    Insert(char),
    Backspace,
    Clear,
    ResetStatus,
    None,
}

/// Map a key press to an action; `editing` is the focused row's mode.
pub fn classify(key: &KeyEvent, editing: bool) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Save,
            KeyCode::Char('r') | KeyCode::Char('R') if editing => KeyAction::Reset,
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Up => KeyAction::RowStep(-1),
        KeyCode::Down => KeyAction::RowStep(1),
        KeyCode::Tab => KeyAction::ColumnStep(1),
        KeyCode::BackTab => KeyAction::ColumnStep(-1),
        _ if editing => classify_editing(key),
        _ => classify_viewing(key),
    }
}

fn classify_editing(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => KeyAction::Save,
        KeyCode::Esc => KeyAction::Discard,
        KeyCode::Left => KeyAction::Cycle(-1),
        KeyCode::Right => KeyAction::Cycle(1),
        KeyCode::Char(' ') => KeyAction::Toggle,
        KeyCode::Char(ch) => KeyAction::Insert(ch),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Delete => KeyAction::Clear,
        _ => KeyAction::None,
    }
}

fn classify_viewing(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('e') => KeyAction::Edit,
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('k') => KeyAction::RowStep(-1),
        KeyCode::Char('j') => KeyAction::RowStep(1),
        KeyCode::Left | KeyCode::Char('h') => KeyAction::ColumnStep(-1),
        KeyCode::Right | KeyCode::Char('l') => KeyAction::ColumnStep(1),
        KeyCode::Esc => KeyAction::ResetStatus,
        _ => KeyAction::None,
    }
}
