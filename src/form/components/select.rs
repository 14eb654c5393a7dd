use std::rc::Rc;

use crate::domain::{FieldKind, FieldValue};
use crate::element::{EditorElement, ValueEditor, Visibility};

use super::FieldAdapter;

/// Single-choice select. The raw value is written as-is; whether it matches
/// one of the options is the element's business.
pub(super) struct SelectAdapter {
    select: Rc<dyn ValueEditor>,
}

impl SelectAdapter {
    pub fn new(select: Rc<dyn ValueEditor>) -> Self {
        Self { select }
    }
}

impl FieldAdapter for SelectAdapter {
    fn kind(&self) -> FieldKind {
        FieldKind::Select
    }

    fn value(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.select.value()))
    }

    fn set_value(&self, value: &FieldValue) {
        self.select.set_value(&value.to_text());
    }

    fn set_enabled(&self, enabled: bool) {
        self.select.set_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.select.is_enabled()
    }

    fn set_visible(&self, visible: bool) {
        if visible {
            self.select.show();
        } else {
            self.select.hide();
        }
    }
}
