use std::rc::Rc;

use crate::domain::{FieldKind, FieldValue};
use crate::element::{CheckEditor, EditorElement, Visibility};

use super::FieldAdapter;

pub(super) struct RadioAdapter {
    members: Vec<Rc<dyn CheckEditor>>,
}

impl RadioAdapter {
    pub fn new(members: Vec<Rc<dyn CheckEditor>>) -> Self {
        Self { members }
    }
}

impl FieldAdapter for RadioAdapter {
    fn kind(&self) -> FieldKind {
        FieldKind::RadioGroup
    }

    fn value(&self) -> Option<FieldValue> {
        self.members
            .iter()
            .find(|member| member.is_checked())
            .map(|member| FieldValue::Text(member.value()))
    }

    /// Check the member carrying `value` and clear the rest; no match leaves
    /// the whole group unchecked.
    fn set_value(&self, value: &FieldValue) {
        let wanted = value.to_text();
        let mut matched = false;
        for member in &self.members {
            let hit = !matched && member.value() == wanted;
            matched |= hit;
            member.set_checked(hit);
        }
    }

    fn set_enabled(&self, enabled: bool) {
        for member in &self.members {
            member.set_enabled(enabled);
        }
    }

    fn is_enabled(&self) -> bool {
        self.members.iter().all(|member| member.is_enabled())
    }

    fn set_visible(&self, visible: bool) {
        for member in &self.members {
            if visible {
                member.show();
            } else {
                member.hide();
            }
        }
    }
}
