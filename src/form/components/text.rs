use std::rc::Rc;

use crate::domain::{FieldKind, FieldValue};
use crate::element::{EditorElement, ValueEditor, Visibility};

use super::FieldAdapter;

pub(super) struct TextAdapter {
    input: Rc<dyn ValueEditor>,
}

impl TextAdapter {
    pub fn new(input: Rc<dyn ValueEditor>) -> Self {
        Self { input }
    }
}

impl FieldAdapter for TextAdapter {
    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn value(&self) -> Option<FieldValue> {
        Some(FieldValue::Text(self.input.value()))
    }

    fn set_value(&self, value: &FieldValue) {
        self.input.set_value(&value.to_text());
    }

    fn set_enabled(&self, enabled: bool) {
        self.input.set_enabled(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.input.is_enabled()
    }

    fn set_visible(&self, visible: bool) {
        if visible {
            self.input.show();
        } else {
            self.input.hide();
        }
    }
}
