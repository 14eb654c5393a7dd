//! In-memory element tree.
//!
//! Every handle is a cheap `Rc` clone, so a test or a front end can keep a
//! handle to the same element the controller drives and observe (or play the
//! user on) it. The user-input helpers respect the enabled flag the way a real
//! disabled widget ignores keystrokes.

use std::{cell::RefCell, rc::Rc};

use super::{
    CellNode, CheckEditor, ControlElement, ControlSpec, DisplayElement, EditorElement,
    RecordTree, ResolvedEditor, Selector, TriggerArea, ValueEditor, Visibility,
};

pub const VIEW_CLASS: &str = "view";
pub const EDITOR_CLASS: &str = "editor";
pub const TRIGGER_CLASS: &str = "trigger";

#[derive(Debug)]
struct DisplayState {
    text: String,
    visible: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    inner: Rc<RefCell<DisplayState>>,
}

impl MemoryDisplay {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DisplayState {
                text: text.into(),
                visible: true,
            })),
        }
    }
}

impl Visibility for MemoryDisplay {
    fn show(&self) {
        self.inner.borrow_mut().visible = true;
    }

    fn hide(&self) {
        self.inner.borrow_mut().visible = false;
    }

    fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }
}

impl DisplayElement for MemoryDisplay {
    fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.inner.borrow_mut().text = text.to_string();
    }
}

#[derive(Debug)]
struct InputState {
    value: String,
    options: Vec<String>,
    visible: bool,
    enabled: bool,
}

/// Text input, or a select when `options` is non-empty.
#[derive(Debug, Clone)]
pub struct MemoryInput {
    inner: Rc<RefCell<InputState>>,
}

impl MemoryInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_options(value, Vec::new())
    }

    pub fn with_options(value: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(InputState {
                value: value.into(),
                options,
                visible: true,
                enabled: true,
            })),
        }
    }

    pub fn options(&self) -> Vec<String> {
        self.inner.borrow().options.clone()
    }

    pub fn push_char(&self, ch: char) -> bool {
        let mut state = self.inner.borrow_mut();
        if !state.enabled {
            return false;
        }
        state.value.push(ch);
        true
    }

    pub fn pop_char(&self) -> bool {
        let mut state = self.inner.borrow_mut();
        if !state.enabled {
            return false;
        }
        state.value.pop().is_some()
    }

    pub fn clear(&self) -> bool {
        let mut state = self.inner.borrow_mut();
        if !state.enabled {
            return false;
        }
        state.value.clear();
        true
    }

    /// Step through the select options, wrapping at both ends.
    pub fn cycle_option(&self, delta: i32) -> bool {
        let mut guard = self.inner.borrow_mut();
        let state = &mut *guard;
        if !state.enabled || state.options.is_empty() {
            return false;
        }
        let len = state.options.len() as i32;
        let current = state
            .options
            .iter()
            .position(|option| option == &state.value)
            .map(|idx| idx as i32)
            .unwrap_or(if delta > 0 { -1 } else { 0 });
        let next = (current + delta).rem_euclid(len) as usize;
        state.value = state.options[next].clone();
        true
    }
}

impl Visibility for MemoryInput {
    fn show(&self) {
        self.inner.borrow_mut().visible = true;
    }

    fn hide(&self) {
        self.inner.borrow_mut().visible = false;
    }

    fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }
}

impl EditorElement for MemoryInput {
    fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.inner.borrow().enabled
    }
}

impl ValueEditor for MemoryInput {
    fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.inner.borrow_mut().value = value.to_string();
    }
}

#[derive(Debug)]
struct ToggleState {
    value: String,
    checked: bool,
    visible: bool,
    enabled: bool,
}

/// Checkbox, or one radio member carrying `value`.
#[derive(Debug, Clone)]
pub struct MemoryToggle {
    inner: Rc<RefCell<ToggleState>>,
}

impl MemoryToggle {
    pub fn new(value: impl Into<String>, checked: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ToggleState {
                value: value.into(),
                checked,
                visible: true,
                enabled: true,
            })),
        }
    }

    pub fn toggle(&self) -> bool {
        let mut state = self.inner.borrow_mut();
        if !state.enabled {
            return false;
        }
        state.checked = !state.checked;
        true
    }
}

impl Visibility for MemoryToggle {
    fn show(&self) {
        self.inner.borrow_mut().visible = true;
    }

    fn hide(&self) {
        self.inner.borrow_mut().visible = false;
    }

    fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }
}

impl EditorElement for MemoryToggle {
    fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.inner.borrow().enabled
    }
}

impl CheckEditor for MemoryToggle {
    fn is_checked(&self) -> bool {
        self.inner.borrow().checked
    }

    fn set_checked(&self, checked: bool) {
        self.inner.borrow_mut().checked = checked;
    }

    fn value(&self) -> String {
        self.inner.borrow().value.clone()
    }
}

#[derive(Debug, Clone)]
pub enum MemoryEditor {
    Text(MemoryInput),
    Select(MemoryInput),
    Checkbox(MemoryToggle),
    Radio(Vec<MemoryToggle>),
}

impl MemoryEditor {
    pub fn is_enabled(&self) -> bool {
        match self {
            MemoryEditor::Text(input) | MemoryEditor::Select(input) => input.is_enabled(),
            MemoryEditor::Checkbox(toggle) => toggle.is_enabled(),
            MemoryEditor::Radio(members) => members.iter().any(EditorElement::is_enabled),
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            MemoryEditor::Text(input) | MemoryEditor::Select(input) => input.is_visible(),
            MemoryEditor::Checkbox(toggle) => toggle.is_visible(),
            MemoryEditor::Radio(members) => members.iter().any(Visibility::is_visible),
        }
    }

    /// Move a select or radio group to its neighbouring choice.
    pub fn cycle(&self, delta: i32) -> bool {
        match self {
            MemoryEditor::Select(input) => input.cycle_option(delta),
            MemoryEditor::Radio(members) => cycle_radio(members, delta),
            MemoryEditor::Text(_) | MemoryEditor::Checkbox(_) => false,
        }
    }

    /// Human-oriented rendering of the live editor state.
    pub fn render(&self) -> String {
        match self {
            MemoryEditor::Text(input) => input.value(),
            MemoryEditor::Select(input) => format!("‹{}›", input.value()),
            MemoryEditor::Checkbox(toggle) => {
                let mark = if toggle.is_checked() { "[x]" } else { "[ ]" };
                mark.to_string()
            }
            MemoryEditor::Radio(members) => members
                .iter()
                .map(|member| {
                    let mark = if member.is_checked() { "(•)" } else { "( )" };
                    format!("{mark} {}", CheckEditor::value(member))
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn resolve(&self) -> ResolvedEditor {
        match self {
            MemoryEditor::Text(input) => ResolvedEditor::Text(Rc::new(input.clone())),
            MemoryEditor::Select(input) => ResolvedEditor::Select(Rc::new(input.clone())),
            MemoryEditor::Checkbox(toggle) => ResolvedEditor::Checkbox(Rc::new(toggle.clone())),
            MemoryEditor::Radio(members) => ResolvedEditor::RadioGroup(
                members
                    .iter()
                    .map(|member| Rc::new(member.clone()) as Rc<dyn CheckEditor>)
                    .collect(),
            ),
        }
    }
}

fn cycle_radio(members: &[MemoryToggle], delta: i32) -> bool {
    if members.is_empty() || !members.iter().all(EditorElement::is_enabled) {
        return false;
    }
    let len = members.len() as i32;
    let current = members
        .iter()
        .position(CheckEditor::is_checked)
        .map(|idx| idx as i32)
        .unwrap_or(if delta > 0 { -1 } else { 0 });
    let next = (current + delta).rem_euclid(len) as usize;
    for (idx, member) in members.iter().enumerate() {
        member.set_checked(idx == next);
    }
    true
}

#[derive(Debug)]
struct ControlState {
    label: String,
    visible: bool,
}

#[derive(Debug, Clone)]
pub struct MemoryControl {
    inner: Rc<RefCell<ControlState>>,
}

impl Visibility for MemoryControl {
    fn show(&self) {
        self.inner.borrow_mut().visible = true;
    }

    fn hide(&self) {
        self.inner.borrow_mut().visible = false;
    }

    fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }
}

impl ControlElement for MemoryControl {
    fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTrigger {
    controls: Rc<RefCell<Vec<MemoryControl>>>,
}

impl MemoryTrigger {
    pub fn controls(&self) -> Vec<MemoryControl> {
        self.controls.borrow().clone()
    }

    pub fn visible_labels(&self) -> Vec<String> {
        self.controls
            .borrow()
            .iter()
            .filter(|control| control.is_visible())
            .map(ControlElement::label)
            .collect()
    }
}

impl TriggerArea for MemoryTrigger {
    fn append(&self, spec: &ControlSpec) -> Rc<dyn ControlElement> {
        let control = MemoryControl {
            inner: Rc::new(RefCell::new(ControlState {
                label: spec.label.clone(),
                visible: true,
            })),
        };
        self.controls.borrow_mut().push(control.clone());
        Rc::new(control)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryCell {
    name: String,
    display: Option<MemoryDisplay>,
    display_classes: Vec<String>,
    editor: Option<MemoryEditor>,
    editor_classes: Vec<String>,
}

impl MemoryCell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: None,
            display_classes: vec![VIEW_CLASS.to_string()],
            editor: None,
            editor_classes: vec![EDITOR_CLASS.to_string()],
        }
    }

    pub fn with_display(mut self, text: impl Into<String>) -> Self {
        self.display = Some(MemoryDisplay::new(text));
        self
    }

    pub fn with_editor(mut self, editor: MemoryEditor) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_display_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_editor_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.editor_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn field_name(&self) -> &str {
        &self.name
    }

    pub fn display_element(&self) -> Option<&MemoryDisplay> {
        self.display.as_ref()
    }

    pub fn editor_element(&self) -> Option<&MemoryEditor> {
        self.editor.as_ref()
    }
}

impl CellNode for MemoryCell {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn display(&self, selector: &Selector) -> Option<Rc<dyn DisplayElement>> {
        if !selector.matches(&self.display_classes) {
            return None;
        }
        self.display
            .as_ref()
            .map(|display| Rc::new(display.clone()) as Rc<dyn DisplayElement>)
    }

    fn editor(&self, selector: &Selector) -> Option<ResolvedEditor> {
        if !selector.matches(&self.editor_classes) {
            return None;
        }
        self.editor.as_ref().map(MemoryEditor::resolve)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryRecord {
    cells: Vec<Rc<MemoryCell>>,
    trigger: MemoryTrigger,
    trigger_classes: Vec<String>,
}

impl MemoryRecord {
    pub fn builder() -> MemoryRecordBuilder {
        MemoryRecordBuilder::default()
    }

    pub fn cells(&self) -> &[Rc<MemoryCell>] {
        &self.cells
    }

    pub fn cell(&self, name: &str) -> Option<&MemoryCell> {
        self.cells
            .iter()
            .find(|cell| cell.field_name() == name)
            .map(Rc::as_ref)
    }

    pub fn display(&self, name: &str) -> Option<&MemoryDisplay> {
        self.cell(name).and_then(MemoryCell::display_element)
    }

    pub fn editor(&self, name: &str) -> Option<&MemoryEditor> {
        self.cell(name).and_then(MemoryCell::editor_element)
    }

    pub fn trigger(&self) -> &MemoryTrigger {
        &self.trigger
    }
}

impl RecordTree for MemoryRecord {
    fn cells(&self) -> Vec<Rc<dyn CellNode>> {
        self.cells
            .iter()
            .map(|cell| Rc::clone(cell) as Rc<dyn CellNode>)
            .collect()
    }

    fn trigger_area(&self, selector: &Selector) -> Option<Rc<dyn TriggerArea>> {
        selector
            .matches(&self.trigger_classes)
            .then(|| Rc::new(self.trigger.clone()) as Rc<dyn TriggerArea>)
    }
}

#[derive(Debug, Default)]
pub struct MemoryRecordBuilder {
    cells: Vec<MemoryCell>,
    trigger_classes: Option<Vec<String>>,
}

impl MemoryRecordBuilder {
    pub fn cell(mut self, cell: MemoryCell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Field whose display shows `text` and whose text input starts empty.
    pub fn text(self, name: &str, text: &str) -> Self {
        self.cell(
            MemoryCell::new(name)
                .with_display(text)
                .with_editor(MemoryEditor::Text(MemoryInput::new(""))),
        )
    }

    pub fn select(self, name: &str, text: &str, options: &[&str]) -> Self {
        let options = options.iter().map(|option| option.to_string()).collect();
        let input = MemoryInput::with_options("", options);
        self.cell(
            MemoryCell::new(name)
                .with_display(text)
                .with_editor(MemoryEditor::Select(input)),
        )
    }

    pub fn checkbox(self, name: &str, text: &str) -> Self {
        self.cell(
            MemoryCell::new(name)
                .with_display(text)
                .with_editor(MemoryEditor::Checkbox(MemoryToggle::new("on", false))),
        )
    }

    pub fn radio(self, name: &str, text: &str, members: &[&str]) -> Self {
        let members = members
            .iter()
            .map(|value| MemoryToggle::new(*value, false))
            .collect();
        self.cell(
            MemoryCell::new(name)
                .with_display(text)
                .with_editor(MemoryEditor::Radio(members)),
        )
    }

    /// Display-only field: no editor, so it never reaches a value map.
    pub fn display_only(self, name: &str, text: &str) -> Self {
        self.cell(MemoryCell::new(name).with_display(text))
    }

    pub fn trigger_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger_classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> MemoryRecord {
        MemoryRecord {
            cells: self.cells.into_iter().map(Rc::new).collect(),
            trigger: MemoryTrigger::default(),
            trigger_classes: self
                .trigger_classes
                .unwrap_or_else(|| vec![TRIGGER_CLASS.to_string()]),
        }
    }
}
