use crate::domain::{FieldKind, FieldValue};

/// Kind-specific conversion between editor state and typed values.
pub(crate) trait FieldAdapter {
    fn kind(&self) -> FieldKind;

    /// Current typed value, `None` when the editor holds no value.
    fn value(&self) -> Option<FieldValue>;

    fn set_value(&self, value: &FieldValue);

    /// Text written into the display element after an edit.
    fn display_text(&self) -> String {
        self.value().map(|value| value.to_text()).unwrap_or_default()
    }

    /// Populate the editor from display text.
    fn seed_from_text(&self, text: &str) {
        self.set_value(&FieldValue::Text(text.to_string()));
    }

    fn set_enabled(&self, enabled: bool);

    fn is_enabled(&self) -> bool;

    fn set_visible(&self, visible: bool);
}
