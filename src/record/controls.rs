use std::rc::Rc;

use crate::element::{ControlElement, RecordTree, Visibility};

use super::RecordOptions;

/// Edit / save / reset controls rendered into the record's trigger area.
///
/// A record without a trigger area still works; it simply has no controls
/// and the actions must be invoked programmatically.
pub struct ActionControls {
    edit: Option<Rc<dyn ControlElement>>,
    save: Option<Rc<dyn ControlElement>>,
    reset: Option<Rc<dyn ControlElement>>,
}

impl ActionControls {
    pub(crate) fn render(tree: &dyn RecordTree, options: &RecordOptions) -> Self {
        let Some(area) = tree.trigger_area(&options.trigger_selector) else {
            tracing::warn!(
                selector = %options.trigger_selector,
                "no trigger area found; record has no action controls"
            );
            return Self {
                edit: None,
                save: None,
                reset: None,
            };
        };
        let controls = Self {
            edit: Some(area.append(&options.edit_button)),
            save: Some(area.append(&options.save_button)),
            reset: options.reset_button.as_ref().map(|spec| area.append(spec)),
        };
        controls.show_viewing();
        controls
    }

    pub(crate) fn show_viewing(&self) {
        set_visible(&self.edit, true);
        set_visible(&self.save, false);
        set_visible(&self.reset, false);
    }

    pub(crate) fn show_editing(&self) {
        set_visible(&self.edit, false);
        set_visible(&self.save, true);
        set_visible(&self.reset, true);
    }

    /// Labels of the controls currently shown, in render order.
    pub fn visible_labels(&self) -> Vec<String> {
        [&self.edit, &self.save, &self.reset]
            .into_iter()
            .flatten()
            .filter(|control| control.is_visible())
            .map(|control| control.label())
            .collect()
    }

    pub fn has_reset(&self) -> bool {
        self.reset.is_some()
    }
}

fn set_visible(control: &Option<Rc<dyn ControlElement>>, visible: bool) {
    if let Some(control) = control {
        if visible {
            control.show();
        } else {
            control.hide();
        }
    }
}
