//! UI capabilities the record controller drives.
//!
//! Elements are handles: every method takes `&self` and mutates shared state
//! behind the handle, the same way a widget or DOM node reference behaves.
//! Everything is resolved once, when a controller attaches to a record.

pub mod memory;
mod selector;

use std::rc::Rc;

pub use selector::Selector;

pub trait Visibility {
    fn show(&self);
    fn hide(&self);
    fn is_visible(&self) -> bool;
}

/// Read-only presentation of a field.
pub trait DisplayElement: Visibility {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
}

/// Shared surface of every editor element.
pub trait EditorElement: Visibility {
    fn set_enabled(&self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// Text input or single-choice select.
pub trait ValueEditor: EditorElement {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// Checkbox, or one member of a radio group.
pub trait CheckEditor: EditorElement {
    fn is_checked(&self) -> bool;
    fn set_checked(&self, checked: bool);
    /// The member's submitted value; only meaningful for radio members.
    fn value(&self) -> String;
}

/// Rendered action control (edit / save / reset).
pub trait ControlElement: Visibility {
    fn label(&self) -> String;
}

/// Area of the record that receives the action controls.
pub trait TriggerArea {
    fn append(&self, spec: &ControlSpec) -> Rc<dyn ControlElement>;
}

/// Editor element(s) found in one cell, tagged with the field kind.
#[derive(Clone)]
pub enum ResolvedEditor {
    Text(Rc<dyn ValueEditor>),
    Select(Rc<dyn ValueEditor>),
    Checkbox(Rc<dyn CheckEditor>),
    RadioGroup(Vec<Rc<dyn CheckEditor>>),
}

impl ResolvedEditor {
    /// Hide every element, disabled ones included.
    pub fn hide(&self) {
        match self {
            Self::Text(input) | Self::Select(input) => input.hide(),
            Self::Checkbox(toggle) => toggle.hide(),
            Self::RadioGroup(members) => members.iter().for_each(|member| member.hide()),
        }
    }
}

/// One field-sized slice of a record.
pub trait CellNode {
    fn name(&self) -> String;
    fn display(&self, selector: &Selector) -> Option<Rc<dyn DisplayElement>>;
    fn editor(&self, selector: &Selector) -> Option<ResolvedEditor>;
}

/// The element subtree of one displayed record.
pub trait RecordTree {
    /// Cells in display order.
    fn cells(&self) -> Vec<Rc<dyn CellNode>>;
    fn trigger_area(&self, selector: &Selector) -> Option<Rc<dyn TriggerArea>>;
}

/// How an action control should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSpec {
    pub label: String,
}

impl ControlSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl From<&str> for ControlSpec {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ControlSpec {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}
