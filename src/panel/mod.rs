//! Entity editor panels

pub mod editor;

pub use editor::{EditorPanel, FieldView, PanelMode, SubmitOutcome, Trigger};
