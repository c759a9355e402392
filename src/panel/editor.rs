//! Entity editor panel - the slide-out create/edit drawer

use std::fmt;

use crate::form::controller::{FormController, FormError};
use crate::form::sync::{LifecycleSync, SyncInputs};
use crate::form::Editable;
use crate::schema::{EditorConfig, FieldDescriptor, FieldErrors, FieldValues};

/// Logical panel state, derived from the parent's inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Closed,
    /// Open with no bound record
    Create,
    /// Open and bound to an existing record
    Edit,
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelMode::Closed => write!(f, "closed"),
            PanelMode::Create => write!(f, "create"),
            PanelMode::Edit => write!(f, "edit"),
        }
    }
}

/// The control that opens the panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Trigger {
    /// "New <entity label>"
    #[default]
    Default,
    /// Caller-supplied label
    Custom(String),
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Values were handed to the save callback and a close was requested
    Saved,
    /// At least one field is invalid; no callback ran
    Rejected(FieldErrors),
    /// The panel is closed; nothing to submit
    NotOpen,
}

/// Render data for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub descriptor: &'static FieldDescriptor,
    pub value: &'a str,
    pub error: Option<&'a str>,
}

type SaveCallback = Box<dyn FnMut(FieldValues)>;
type OpenChangeCallback = Box<dyn FnMut(bool)>;

/// One parameterized drawer for any entity type
///
/// The parent owns the open flag and the record being edited and pushes
/// them in through [`EditorPanel::update`]. The panel talks back only
/// through its two callbacks: `on_save` with the validated field values, and
/// `on_open_change` to ask the parent to open or close it.
pub struct EditorPanel {
    config: EditorConfig,
    form: FormController,
    sync: LifecycleSync,
    open: bool,
    editing: Option<String>,
    trigger: Trigger,
    on_save: SaveCallback,
    on_open_change: OpenChangeCallback,
}

impl EditorPanel {
    pub fn new(
        config: EditorConfig,
        on_save: impl FnMut(FieldValues) + 'static,
        on_open_change: impl FnMut(bool) + 'static,
    ) -> Self {
        Self {
            config,
            form: FormController::new(config.schema),
            sync: LifecycleSync::new(),
            open: false,
            editing: None,
            trigger: Trigger::Default,
            on_save: Box::new(on_save),
            on_open_change: Box::new(on_open_change),
        }
    }

    /// Replace the default "New X" trigger
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Push the parent's current inputs into the panel.
    ///
    /// Returns true if the form was reseeded: from the record in edit mode,
    /// or to blank defaults in create mode.
    pub fn update(&mut self, open: bool, editing: Option<&dyn Editable>) -> bool {
        let key = editing.map(|record| record.edit_key());
        let before = self.mode();

        let reinit = self.sync.observe(SyncInputs::new(open, key.clone()));
        self.open = open;
        self.editing = key;

        if reinit {
            match editing {
                Some(record) => self.form.initialize(&record.seed_values()),
                None => self.form.reset(),
            }
        }

        let after = self.mode();
        if before != after {
            tracing::debug!(
                entity = self.config.label,
                from = %before,
                to = %after,
                record = ?self.editing,
                "panel transition"
            );
        }

        reinit
    }

    pub fn mode(&self) -> PanelMode {
        match (self.open, &self.editing) {
            (false, _) => PanelMode::Closed,
            (true, None) => PanelMode::Create,
            (true, Some(_)) => PanelMode::Edit,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Key of the bound record, if any
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Panel heading for the current mode
    pub fn title(&self) -> String {
        match self.mode() {
            PanelMode::Edit => format!("Edit {}", self.config.label),
            PanelMode::Create | PanelMode::Closed => format!("New {}", self.config.label),
        }
    }

    pub fn trigger_label(&self) -> String {
        match &self.trigger {
            Trigger::Default => format!("New {}", self.config.label),
            Trigger::Custom(label) => label.clone(),
        }
    }

    /// The trigger was activated: ask the parent to open the panel
    pub fn press_trigger(&mut self) {
        (self.on_open_change)(true);
    }

    /// Fields in display order with their current value and error
    pub fn fields(&self) -> Vec<FieldView<'_>> {
        self.config
            .fields
            .iter()
            .map(|descriptor| FieldView {
                descriptor,
                value: self.form.value(descriptor.name).unwrap_or(""),
                error: self.form.error(descriptor.name),
            })
            .collect()
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// User edited a field
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field(name, value)
    }

    /// User pressed Save.
    ///
    /// On success the save callback runs once with exactly the schema's
    /// fields, the form is reset and the parent is asked to close the panel.
    /// On failure neither callback runs and the errors stay on the form.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.open {
            tracing::warn!(entity = self.config.label, "submit on a closed panel ignored");
            return SubmitOutcome::NotOpen;
        }

        match self.form.submit() {
            Ok(values) => {
                tracing::info!(
                    entity = self.config.label,
                    mode = %self.mode(),
                    "submit accepted"
                );
                (self.on_save)(values);
                self.form.reset();
                (self.on_open_change)(false);
                SubmitOutcome::Saved
            }
            Err(errors) => {
                tracing::info!(
                    entity = self.config.label,
                    invalid = ?errors.keys().collect::<Vec<_>>(),
                    "submit rejected"
                );
                SubmitOutcome::Rejected(errors)
            }
        }
    }

    /// User pressed Cancel: discard edits and ask the parent to close
    pub fn cancel(&mut self) {
        if !self.open {
            return;
        }
        self.form.reset();
        (self.on_open_change)(false);
    }
}

impl fmt::Debug for EditorPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorPanel")
            .field("entity", &self.config.label)
            .field("mode", &self.mode())
            .field("editing", &self.editing)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}
