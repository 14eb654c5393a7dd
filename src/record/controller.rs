use std::{collections::HashSet, fmt, rc::Rc};

use tracing::{debug, warn};

use crate::domain::{ControllerState, ValueMap};
use crate::element::RecordTree;
use crate::form::FieldBinding;
use crate::persist::{PersistenceAdapter, SaveOutcome};

use super::{ActionControls, FailurePolicy, RecordError, RecordOptions};

/// Proof that a save is in flight, carrying the submitted snapshot.
///
/// Returned by [`RecordController::begin_save`] and consumed by
/// [`RecordController::complete_save`], so each save completes at most once.
#[derive(Debug)]
#[must_use = "an in-flight save must be completed"]
pub struct SaveTicket {
    generation: u64,
    values: ValueMap,
}

impl SaveTicket {
    pub fn values(&self) -> &ValueMap {
        &self.values
    }
}

/// Viewing ↔ editing ↔ saving lifecycle of one displayed record.
pub struct RecordController {
    bindings: Vec<FieldBinding>,
    controls: ActionControls,
    options: RecordOptions,
    adapter: Rc<dyn PersistenceAdapter>,
    state: ControllerState,
    generation: u64,
}

impl RecordController {
    /// Resolve fields and controls against `tree` and put the record in
    /// viewing mode with editors hidden.
    pub fn attach(
        tree: &dyn RecordTree,
        options: RecordOptions,
        adapter: Rc<dyn PersistenceAdapter>,
    ) -> Result<Self, RecordError> {
        let bindings: Vec<FieldBinding> = tree
            .cells()
            .iter()
            .map(|cell| {
                FieldBinding::resolve(
                    cell.as_ref(),
                    &options.view_selector,
                    &options.editor_selector,
                )
            })
            .collect();
        ensure_unique_names(&bindings)?;
        let controls = ActionControls::render(tree, &options);

        let controller = Self {
            bindings,
            controls,
            options,
            adapter,
            state: ControllerState::Viewing,
            generation: 0,
        };
        if controller.options.auto_populate_from_view {
            controller.set_values_from_view();
        }
        debug!(
            fields = controller.bindings.len(),
            editable = controller.editable().count(),
            "record attached"
        );
        Ok(controller)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn options(&self) -> &RecordOptions {
        &self.options
    }

    pub fn controls(&self) -> &ActionControls {
        &self.controls
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    pub fn binding(&self, name: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|binding| binding.name() == name)
    }

    pub fn adapter(&self) -> Rc<dyn PersistenceAdapter> {
        Rc::clone(&self.adapter)
    }

    /// Switch to editing. Returns `false` (and does nothing) unless viewing.
    pub fn edit(&mut self) -> bool {
        if self.state != ControllerState::Viewing {
            debug!(state = %self.state, "edit ignored");
            return false;
        }
        for binding in self.editable() {
            binding.set_enabled(true);
            binding.hide_view();
            binding.show_editor();
        }
        self.controls.show_editing();
        self.options.fire_edit();
        self.state = ControllerState::Editing;
        debug!("record editing");
        true
    }

    /// Throw away unsaved input by re-seeding every editor from its display.
    /// The record stays in editing.
    pub fn cancel(&mut self) -> bool {
        if self.state != ControllerState::Editing {
            debug!(state = %self.state, "cancel ignored");
            return false;
        }
        self.set_values_from_view();
        debug!("edits reset from view");
        true
    }

    /// Throw away unsaved input and go back to viewing.
    pub fn discard(&mut self) -> bool {
        if self.state != ControllerState::Editing {
            debug!(state = %self.state, "discard ignored");
            return false;
        }
        self.set_values_from_view();
        self.show_viewing_layout();
        self.state = ControllerState::Viewing;
        debug!("edits discarded");
        true
    }

    /// Run a full save against the configured adapter.
    pub async fn save(&mut self) -> Result<SaveOutcome, RecordError> {
        let ticket = self.begin_save()?;
        let adapter = self.adapter();
        let outcome = adapter.save(ticket.values().clone()).await;
        self.complete_save(ticket, outcome.clone())?;
        Ok(outcome)
    }

    /// First half of a save: fire `on_save`, snapshot the values, disable
    /// every editor and enter saving. The caller hands `ticket.values()` to
    /// the adapter and reports back through [`Self::complete_save`].
    pub fn begin_save(&mut self) -> Result<SaveTicket, RecordError> {
        match self.state {
            ControllerState::Editing => {}
            ControllerState::Saving => {
                warn!("save refused: another save is in flight");
                return Err(RecordError::SaveInFlight);
            }
            ControllerState::Viewing => {
                debug!("save ignored while viewing");
                return Err(RecordError::NotEditing(self.state));
            }
        }

        self.options.fire_save();
        let values = self.values();
        for binding in self.editable() {
            binding.set_enabled(false);
        }
        self.state = ControllerState::Saving;
        self.generation += 1;
        debug!(generation = self.generation, fields = values.len(), "save started");
        Ok(SaveTicket {
            generation: self.generation,
            values,
        })
    }

    /// Second half of a save. Editors are re-enabled and `on_save_complete`
    /// fires while still saving, whatever the outcome.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        outcome: SaveOutcome,
    ) -> Result<(), RecordError> {
        if self.state != ControllerState::Saving || ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                state = %self.state,
                "stale save ticket"
            );
            return Err(RecordError::StaleTicket);
        }

        for binding in self.editable() {
            binding.set_enabled(true);
        }

        let back_to_viewing =
            outcome.is_ok() || self.options.failure_policy == FailurePolicy::ReturnToViewing;
        if back_to_viewing {
            self.refresh_view();
        }
        if let Err(failure) = &outcome {
            warn!(error = %failure, "save failed");
        }
        self.options.fire_save_complete(&outcome);

        if back_to_viewing {
            self.show_viewing_layout();
            self.state = ControllerState::Viewing;
        } else {
            self.state = ControllerState::Editing;
        }
        debug!(state = %self.state, ok = outcome.is_ok(), "save completed");
        Ok(())
    }

    /// Snapshot of every editable field. A radio group with nothing checked
    /// contributes no entry.
    pub fn values(&self) -> ValueMap {
        let mut values = ValueMap::new();
        for binding in self.editable() {
            if let Some(value) = binding.value() {
                values.insert(binding.name(), value);
            }
        }
        values
    }

    /// Write the named values into their editors; names not in the map are
    /// left alone.
    pub fn set_values(&self, values: &ValueMap) {
        for binding in &self.bindings {
            if let Some(value) = values.get(binding.name()) {
                binding.set_value(value);
            }
        }
    }

    /// Seed every editor from the text its display currently shows.
    pub fn set_values_from_view(&self) {
        for binding in &self.bindings {
            binding.sync_editor_from_view();
        }
    }

    /// Copy every editor's current value into its display.
    pub fn refresh_view(&self) {
        for binding in &self.bindings {
            binding.sync_view_from_editor();
        }
    }

    fn editable(&self) -> impl Iterator<Item = &FieldBinding> {
        self.bindings.iter().filter(|binding| !binding.is_inert())
    }

    fn show_viewing_layout(&self) {
        for binding in self.editable() {
            binding.hide_editor();
            binding.show_view();
        }
        self.controls.show_viewing();
    }
}

impl fmt::Debug for RecordController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordController")
            .field("state", &self.state)
            .field("bindings", &self.bindings)
            .field("generation", &self.generation)
            .finish()
    }
}

fn ensure_unique_names(bindings: &[FieldBinding]) -> Result<(), RecordError> {
    let mut seen = HashSet::new();
    for binding in bindings.iter().filter(|binding| !binding.is_inert()) {
        if !seen.insert(binding.name()) {
            return Err(RecordError::DuplicateField(binding.name().to_string()));
        }
    }
    Ok(())
}
