use std::rc::Rc;

use crate::domain::{FieldKind, FieldValue};
use crate::element::{CheckEditor, EditorElement, Visibility};

use super::FieldAdapter;

pub const CHECKED_LABEL: &str = "Yes";
pub const UNCHECKED_LABEL: &str = "No";

pub(super) struct CheckboxAdapter {
    toggle: Rc<dyn CheckEditor>,
}

impl CheckboxAdapter {
    pub fn new(toggle: Rc<dyn CheckEditor>) -> Self {
        Self { toggle }
    }
}

impl FieldAdapter for CheckboxAdapter {
    fn kind(&self) -> FieldKind {
        FieldKind::Checkbox
    }

    fn value(&self) -> Option<FieldValue> {
        Some(FieldValue::Bool(self.toggle.is_checked()))
    }

    /// Booleans map directly; text counts as checked only when it reads "yes".
    fn set_value(&self, value: &FieldValue) {
        let checked = match value {
            FieldValue::Bool(flag) => *flag,
            FieldValue::Text(text) => text.to_lowercase() == "yes",
        };
        self.toggle.set_checked(checked);
    }

    fn display_text(&self) -> String {
        if self.toggle.is_checked() {
            CHECKED_LABEL.to_string()
        } else {
            UNCHECKED_LABEL.to_string()
        }
    }

    fn set_enabled(&self, enabled: bool) {
        self.toggle.set_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.toggle.is_enabled()
    }

    fn set_visible(&self, visible: bool) {
        if visible {
            self.toggle.show();
        } else {
            self.toggle.hide();
        }
    }
}
