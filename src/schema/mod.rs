//! Validation schemas, field descriptors, record schemas and templates

pub mod descriptor;
pub mod registry;
pub mod rules;
pub mod template;

pub use descriptor::{ControlKind, EditorConfig, FieldDescriptor};
pub use registry::SchemaRegistry;
pub use rules::{FieldErrors, FieldRules, FieldValues, ValidationSchema};
pub use template::{TemplateError, TemplateGenerator};
