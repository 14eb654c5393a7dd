mod base;
mod checkbox;
mod radio;
mod select;
mod text;

pub(crate) use base::FieldAdapter;
pub use checkbox::{CHECKED_LABEL, UNCHECKED_LABEL};

use checkbox::CheckboxAdapter;
use radio::RadioAdapter;
use select::SelectAdapter;
use text::TextAdapter;

use crate::element::{EditorElement, ResolvedEditor};

/// Pick the adapter for a resolved editor.
///
/// Elements that are already disabled at this point are left out, the same
/// way they would be skipped by a form submission; a field whose editors are
/// all disabled ends up without an adapter and is treated as inert.
pub(crate) fn adapter_for(editor: ResolvedEditor) -> Option<Box<dyn FieldAdapter>> {
    match editor {
        ResolvedEditor::Text(input) => input
            .is_enabled()
            .then(|| Box::new(TextAdapter::new(input)) as Box<dyn FieldAdapter>),
        ResolvedEditor::Select(input) => input
            .is_enabled()
            .then(|| Box::new(SelectAdapter::new(input)) as Box<dyn FieldAdapter>),
        ResolvedEditor::Checkbox(toggle) => toggle
            .is_enabled()
            .then(|| Box::new(CheckboxAdapter::new(toggle)) as Box<dyn FieldAdapter>),
        ResolvedEditor::RadioGroup(members) => {
            let members: Vec<_> = members
                .into_iter()
                .filter(|member| member.is_enabled())
                .collect();
            (!members.is_empty())
                .then(|| Box::new(RadioAdapter::new(members)) as Box<dyn FieldAdapter>)
        }
    }
}
