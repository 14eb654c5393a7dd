use std::{fmt, rc::Rc};

use crate::domain::{FieldKind, FieldValue};
use crate::element::{CellNode, DisplayElement, Selector, Visibility};

use super::components::{FieldAdapter, adapter_for};

/// One field of a record: its display element plus the kind-aware editor.
///
/// Either side may be missing. Without an editor the binding is inert: reads
/// return `None` and every editor operation does nothing.
pub struct FieldBinding {
    name: String,
    view: Option<Rc<dyn DisplayElement>>,
    editor: Option<Box<dyn FieldAdapter>>,
}

impl FieldBinding {
    /// Editors start hidden, including disabled ones that never get an
    /// adapter.
    pub(crate) fn resolve(cell: &dyn CellNode, view: &Selector, editor: &Selector) -> Self {
        let resolved = cell.editor(editor);
        if let Some(resolved) = &resolved {
            resolved.hide();
        }
        Self {
            name: cell.name(),
            view: cell.display(view),
            editor: resolved.and_then(adapter_for),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Editor kind, `None` for inert fields.
    pub fn kind(&self) -> Option<FieldKind> {
        self.editor.as_ref().map(|editor| editor.kind())
    }

    pub fn is_inert(&self) -> bool {
        self.editor.is_none()
    }

    pub fn value(&self) -> Option<FieldValue> {
        self.editor.as_ref().and_then(|editor| editor.value())
    }

    pub fn set_value(&self, value: &FieldValue) {
        if let Some(editor) = &self.editor {
            editor.set_value(value);
        }
    }

    /// Copy the editor state into the display element as text.
    pub fn sync_view_from_editor(&self) {
        if let (Some(view), Some(editor)) = (&self.view, &self.editor) {
            view.set_text(&editor.display_text());
        }
    }

    /// Re-seed the editor from whatever the display currently shows.
    pub fn sync_editor_from_view(&self) {
        if let (Some(view), Some(editor)) = (&self.view, &self.editor) {
            editor.seed_from_text(&view.text());
        }
    }

    pub fn display_text(&self) -> Option<String> {
        self.view.as_ref().map(|view| view.text())
    }

    pub fn set_enabled(&self, enabled: bool) {
        if let Some(editor) = &self.editor {
            editor.set_enabled(enabled);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.editor
            .as_ref()
            .map(|editor| editor.is_enabled())
            .unwrap_or(false)
    }

    pub fn show_editor(&self) {
        if let Some(editor) = &self.editor {
            editor.set_visible(true);
        }
    }

    pub fn hide_editor(&self) {
        if let Some(editor) = &self.editor {
            editor.set_visible(false);
        }
    }

    pub fn show_view(&self) {
        if let Some(view) = &self.view {
            view.show();
        }
    }

    pub fn hide_view(&self) {
        if let Some(view) = &self.view {
            view.hide();
        }
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("has_view", &self.view.is_some())
            .finish()
    }
}
