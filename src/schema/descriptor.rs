//! Field rendering descriptors
//!
//! A descriptor says how a field is presented (label, control, placeholder);
//! the matching [`ValidationSchema`] says what values it accepts. An
//! [`EditorConfig`] pairs the two for one editor.

use serde::Serialize;

use crate::schema::rules::ValidationSchema;

/// Kind of input control used for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Single-line text input
    Text,
    /// Multi-line text area
    TextArea,
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlKind::Text => write!(f, "text"),
            ControlKind::TextArea => write!(f, "textarea"),
        }
    }
}

/// Presentation of one editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub control: ControlKind,
    pub placeholder: &'static str,
}

impl FieldDescriptor {
    pub const fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            control: ControlKind::Text,
            placeholder,
        }
    }

    pub const fn text_area(
        name: &'static str,
        label: &'static str,
        placeholder: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            control: ControlKind::TextArea,
            placeholder,
        }
    }
}

/// Everything an editor needs to know about one entity type
#[derive(Debug, Clone, Copy)]
pub struct EditorConfig {
    /// Human-readable entity label, e.g. "Unit of Measure"
    pub label: &'static str,
    /// One-line explanation shown under the panel title
    pub description: &'static str,
    pub schema: &'static ValidationSchema,
    /// Fields in display order; the names must match the schema's fields
    pub fields: &'static [FieldDescriptor],
}

impl EditorConfig {
    /// Descriptor for a field name
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Label for a field name, falling back to the raw name
    pub fn label_for<'a>(&self, name: &'a str) -> &'a str {
        match self.field(name) {
            Some(descriptor) => descriptor.label,
            None => name,
        }
    }
}
