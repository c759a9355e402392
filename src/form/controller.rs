//! Form controller - field values and live validation bound to a schema

use thiserror::Error;

use crate::schema::{FieldErrors, FieldValues, ValidationSchema};

/// Errors raised by misuse of a form controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },
}

/// Holds the values and per-field errors of one open form
///
/// The value map always has exactly the schema's fields. Errors are only
/// present for fields that are currently invalid.
#[derive(Debug, Clone)]
pub struct FormController {
    schema: &'static ValidationSchema,
    values: FieldValues,
    errors: FieldErrors,
}

impl FormController {
    /// A blank form for the given schema
    pub fn new(schema: &'static ValidationSchema) -> Self {
        Self {
            schema,
            values: schema.blank_values(),
            errors: FieldErrors::new(),
        }
    }

    pub fn schema(&self) -> &'static ValidationSchema {
        self.schema
    }

    /// Replace the whole form state.
    ///
    /// This is an overwrite, not a merge: fields missing from `values` become
    /// blank, undeclared keys are dropped and all errors are cleared.
    pub fn initialize(&mut self, values: &FieldValues) {
        self.values = self.schema.project(values);
        self.errors.clear();
    }

    /// Update one field and re-run that field's rules.
    ///
    /// Errors on other fields are left as they were.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.schema.contains(name) {
            return Err(FormError::UnknownField {
                entity: self.schema.entity(),
                field: name.to_string(),
            });
        }

        let value = value.into();
        self.values.insert(name.to_string(), value.clone());

        match self.schema.check_field(name, &value, &self.values) {
            Ok(()) => {
                self.errors.remove(name);
            }
            Err(violations) => {
                if let Some(first) = violations.into_iter().next() {
                    self.errors.insert(name.to_string(), first);
                }
            }
        }

        Ok(())
    }

    /// Validate every field.
    ///
    /// On failure the error map is replaced by the full set of current
    /// violations and returned. On success the declared field values are
    /// returned and nothing else.
    pub fn submit(&mut self) -> Result<FieldValues, FieldErrors> {
        self.errors = self.schema.validate(&self.values);

        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Back to blank defaults
    pub fn reset(&mut self) {
        let blank = self.schema.blank_values();
        self.initialize(&blank);
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Whether no field currently shows an error
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::form_map;
    use crate::entities::uom::UOM_SCHEMA;

    fn controller() -> FormController {
        FormController::new(&UOM_SCHEMA)
    }

    #[test]
    fn test_new_form_is_blank_with_schema_fields() {
        let form = controller();
        assert_eq!(form.values(), &UOM_SCHEMA.blank_values());
        assert!(form.is_valid());
    }

    #[test]
    fn test_set_field_validates_live() {
        let mut form = controller();

        form.set_field("code", "kg").unwrap();
        assert_eq!(
            form.error("code"),
            Some("Code must contain only uppercase letters and digits")
        );

        form.set_field("code", "KG").unwrap();
        assert_eq!(form.error("code"), None);
        assert_eq!(form.value("code"), Some("KG"));
    }

    #[test]
    fn test_set_field_leaves_other_errors_alone() {
        let mut form = controller();
        form.set_field("title", "K").unwrap();
        assert!(form.error("title").is_some());

        form.set_field("code", "kg").unwrap();
        form.set_field("code", "KG").unwrap();

        assert_eq!(form.error("title"), Some("Title must be at least 2 characters"));
        assert_eq!(form.error("code"), None);
    }

    #[test]
    fn test_set_unknown_field_is_rejected() {
        let mut form = controller();
        let err = form.set_field("description", "x").unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownField {
                entity: "uom",
                field: "description".to_string()
            }
        );
        assert!(!form.values().contains_key("description"));
    }

    #[test]
    fn test_submit_with_invalid_field_surfaces_all_errors() {
        let mut form = controller();
        form.initialize(&form_map([("code", "kg"), ("title", "Kilogram")]));

        let errors = form.submit().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("code"));
        assert_eq!(errors["prefix"], "Prefix is required");
        assert_eq!(form.errors(), &errors);
    }

    #[test]
    fn test_submit_returns_exactly_declared_fields() {
        let mut form = controller();
        form.initialize(&form_map([
            ("code", "KG"),
            ("title", "Kilogram"),
            ("prefix", "kg"),
            ("ui_expanded", "true"),
        ]));

        let values = form.submit().unwrap();
        assert_eq!(
            values,
            form_map([("code", "KG"), ("title", "Kilogram"), ("prefix", "kg")])
        );
    }

    #[test]
    fn test_initialize_overwrites_instead_of_merging() {
        let mut form = controller();
        form.initialize(&form_map([("code", "KG"), ("title", "Kilogram"), ("prefix", "kg")]));
        form.set_field("title", "x").unwrap();

        form.initialize(&form_map([("code", "PCS")]));

        assert_eq!(form.value("code"), Some("PCS"));
        assert_eq!(form.value("title"), Some(""));
        assert_eq!(form.value("prefix"), Some(""));
        assert!(form.is_valid());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut form = controller();
        form.set_field("code", "kg").unwrap();
        form.set_field("title", "Kilogram").unwrap();

        form.reset();
        let once = (form.values().clone(), form.errors().clone());
        form.reset();
        let twice = (form.values().clone(), form.errors().clone());

        assert_eq!(once, twice);
        assert_eq!(once.0, UOM_SCHEMA.blank_values());
        assert!(once.1.is_empty());
    }
}
