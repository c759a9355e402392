//! Panel session - the CLI acting as the page that owns an editor panel
//!
//! The panel never opens or closes itself. This session holds the open flag
//! and the saved values, lets the panel's callbacks update them, and pushes
//! the flag back into the panel the way a parent view would.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::form::{Editable, FormError};
use crate::panel::{EditorPanel, SubmitOutcome};
use crate::schema::{EditorConfig, FieldErrors, FieldValues};

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelResult {
    Saved(FieldValues),
    Rejected(FieldErrors),
    Cancelled,
}

pub struct PanelSession {
    panel: EditorPanel,
    open: Rc<Cell<bool>>,
    saved: Rc<RefCell<Option<FieldValues>>>,
}

impl PanelSession {
    pub fn new(config: EditorConfig) -> Self {
        let open = Rc::new(Cell::new(false));
        let saved = Rc::new(RefCell::new(None));

        let on_save = {
            let saved = Rc::clone(&saved);
            move |values: FieldValues| {
                *saved.borrow_mut() = Some(values);
            }
        };
        let on_open_change = {
            let open = Rc::clone(&open);
            move |requested: bool| open.set(requested)
        };

        Self {
            panel: EditorPanel::new(config, on_save, on_open_change),
            open,
            saved,
        }
    }

    /// Press the panel's trigger and bind it to `record` (or nothing, to create)
    pub fn open(&mut self, record: Option<&dyn Editable>) {
        self.panel.press_trigger();
        self.panel.update(self.open.get(), record);
    }

    pub fn panel(&self) -> &EditorPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut EditorPanel {
        &mut self.panel
    }

    /// Type a batch of values into the form
    pub fn apply(&mut self, values: &FieldValues) -> Result<(), FormError> {
        for (name, value) in values {
            self.panel.set_field(name, value.as_str())?;
        }
        Ok(())
    }

    /// Press Save. On success the panel is closed again.
    pub fn submit(&mut self, record: Option<&dyn Editable>) -> PanelResult {
        match self.panel.submit() {
            SubmitOutcome::Saved => {
                self.panel.update(self.open.get(), record);
                match self.saved.borrow_mut().take() {
                    Some(values) => PanelResult::Saved(values),
                    None => PanelResult::Cancelled,
                }
            }
            SubmitOutcome::Rejected(errors) => PanelResult::Rejected(errors),
            SubmitOutcome::NotOpen => PanelResult::Cancelled,
        }
    }

    /// Press Cancel
    pub fn cancel(&mut self, record: Option<&dyn Editable>) {
        self.panel.cancel();
        self.panel.update(self.open.get(), record);
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::entities::Uom;
    use crate::panel::PanelMode;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_create_session_saves_and_closes() {
        let mut session = PanelSession::new(Uom::editor_config());
        session.open(None);
        assert_eq!(session.panel().mode(), PanelMode::Create);

        session
            .apply(&values(&[("code", "KG"), ("title", "Kilogram"), ("prefix", "kg")]))
            .unwrap();

        let result = session.submit(None);
        assert_eq!(
            result,
            PanelResult::Saved(values(&[("code", "KG"), ("title", "Kilogram"), ("prefix", "kg")]))
        );
        assert!(!session.is_open());
        assert_eq!(session.panel().mode(), PanelMode::Closed);
    }

    #[test]
    fn test_rejected_session_stays_open() {
        let mut session = PanelSession::new(Uom::editor_config());
        session.open(None);
        session.apply(&values(&[("code", "kg")])).unwrap();

        match session.submit(None) {
            PanelResult::Rejected(errors) => {
                assert_eq!(
                    errors["code"],
                    "Code must contain only uppercase letters and digits"
                );
                assert_eq!(errors["title"], "Title is required");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(session.is_open());
    }

    #[test]
    fn test_edit_session_is_seeded_from_record() {
        let kg = Uom::new("KG", "Kilogram", "kg", "test");
        let mut session = PanelSession::new(Uom::editor_config());
        session.open(Some(&kg));

        assert_eq!(session.panel().mode(), PanelMode::Edit);
        assert_eq!(session.panel().form().value("title"), Some("Kilogram"));
    }

    #[test]
    fn test_cancel_closes_without_saving() {
        let mut session = PanelSession::new(Uom::editor_config());
        session.open(None);
        session.apply(&values(&[("code", "KG")])).unwrap();

        session.cancel(None);

        assert!(!session.is_open());
        assert_eq!(session.submit(None), PanelResult::Cancelled);
    }

    #[test]
    fn test_unknown_field_is_reported() {
        let mut session = PanelSession::new(Uom::editor_config());
        session.open(None);
        assert!(session.apply(&values(&[("description", "x")])).is_err());
    }
}
