use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::element::{ControlSpec, Selector};
use crate::persist::SaveOutcome;

type Hook = Rc<dyn Fn()>;
type CompletionHook = Rc<dyn Fn(&SaveOutcome)>;

/// Where a record lands when its save fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailurePolicy {
    /// Keep the editors open and enabled with the unsaved input intact.
    #[default]
    StayEditing,
    /// Run the full completion: refresh the display and go back to viewing.
    ReturnToViewing,
}

/// Per-record configuration, built once and never mutated by the controller.
#[derive(Clone)]
pub struct RecordOptions {
    pub editor_selector: Selector,
    pub view_selector: Selector,
    pub trigger_selector: Selector,
    pub edit_button: ControlSpec,
    pub save_button: ControlSpec,
    pub reset_button: Option<ControlSpec>,
    pub api_url: Option<String>,
    pub auto_populate_from_view: bool,
    pub failure_policy: FailurePolicy,
    on_edit: Option<Hook>,
    on_save: Option<Hook>,
    on_save_complete: Option<CompletionHook>,
}

impl Default for RecordOptions {
    fn default() -> Self {
        RecordSettings::default().into()
    }
}

impl RecordOptions {
    pub fn with_editor_selector(mut self, selector: impl Into<Selector>) -> Self {
        self.editor_selector = selector.into();
        self
    }

    pub fn with_view_selector(mut self, selector: impl Into<Selector>) -> Self {
        self.view_selector = selector.into();
        self
    }

    pub fn with_trigger_selector(mut self, selector: impl Into<Selector>) -> Self {
        self.trigger_selector = selector.into();
        self
    }

    pub fn with_edit_button(mut self, spec: impl Into<ControlSpec>) -> Self {
        self.edit_button = spec.into();
        self
    }

    pub fn with_save_button(mut self, spec: impl Into<ControlSpec>) -> Self {
        self.save_button = spec.into();
        self
    }

    pub fn with_reset_button(mut self, spec: Option<ControlSpec>) -> Self {
        self.reset_button = spec;
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_auto_populate(mut self, enabled: bool) -> Self {
        self.auto_populate_from_view = enabled;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn on_edit(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_edit = Some(Rc::new(hook));
        self
    }

    pub fn on_save(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_save = Some(Rc::new(hook));
        self
    }

    pub fn on_save_complete(mut self, hook: impl Fn(&SaveOutcome) + 'static) -> Self {
        self.on_save_complete = Some(Rc::new(hook));
        self
    }

    pub(crate) fn fire_edit(&self) {
        if let Some(hook) = &self.on_edit {
            hook();
        }
    }

    pub(crate) fn fire_save(&self) {
        if let Some(hook) = &self.on_save {
            hook();
        }
    }

    pub(crate) fn fire_save_complete(&self, outcome: &SaveOutcome) {
        if let Some(hook) = &self.on_save_complete {
            hook(outcome);
        }
    }
}

impl fmt::Debug for RecordOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordOptions")
            .field("editor_selector", &self.editor_selector)
            .field("view_selector", &self.view_selector)
            .field("trigger_selector", &self.trigger_selector)
            .field("edit_button", &self.edit_button)
            .field("save_button", &self.save_button)
            .field("reset_button", &self.reset_button)
            .field("api_url", &self.api_url)
            .field("auto_populate_from_view", &self.auto_populate_from_view)
            .field("failure_policy", &self.failure_policy)
            .field("on_edit", &self.on_edit.is_some())
            .field("on_save", &self.on_save.is_some())
            .field("on_save_complete", &self.on_save_complete.is_some())
            .finish()
    }
}

/// Serializable subset of [`RecordOptions`] (everything except the hooks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordSettings {
    pub editor: String,
    pub view: String,
    pub trigger: String,
    pub edit_button: String,
    pub save_button: String,
    pub reset_button: Option<String>,
    pub api_url: Option<String>,
    pub auto_populate: bool,
    pub failure_policy: FailurePolicy,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            editor: ".editor".to_string(),
            view: ".view".to_string(),
            trigger: ".trigger".to_string(),
            edit_button: "Edit".to_string(),
            save_button: "Save".to_string(),
            reset_button: Some("Reset".to_string()),
            api_url: None,
            auto_populate: true,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl From<RecordSettings> for RecordOptions {
    fn from(settings: RecordSettings) -> Self {
        Self {
            editor_selector: Selector::new(settings.editor),
            view_selector: Selector::new(settings.view),
            trigger_selector: Selector::new(settings.trigger),
            edit_button: ControlSpec::new(settings.edit_button),
            save_button: ControlSpec::new(settings.save_button),
            reset_button: settings.reset_button.map(ControlSpec::new),
            api_url: settings.api_url,
            auto_populate_from_view: settings.auto_populate,
            failure_policy: settings.failure_policy,
            on_edit: None,
            on_save: None,
            on_save_complete: None,
        }
    }
}
