//! Field validation rule tables
//!
//! A [`ValidationSchema`] is an ordered list of [`FieldRules`], one per
//! editable field. Validation is a pure function of the schema and the
//! current field values: no state is kept between calls, so the same schema
//! can be shared by every editor of an entity type.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Current form values, keyed by field name. Values stay strings until saved.
pub type FieldValues = BTreeMap<String, String>;

/// First violation message per invalid field. Valid fields are absent.
pub type FieldErrors = BTreeMap<String, String>;

/// Cross-field predicate: receives the field's value and all form values.
pub type CrossFieldCheck = fn(value: &str, values: &FieldValues) -> bool;

/// Maximum length of an entity code
pub const CODE_MAX_LEN: usize = 10;

/// Minimum length of an entity title
pub const TITLE_MIN_LEN: usize = 2;

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+$").expect("Invalid code regex"));

/// A single constraint on a field value
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must contain something other than whitespace
    Required,
    /// Minimum length in characters
    MinLength(usize),
    /// Maximum length in characters
    MaxLength(usize),
    /// Value must match the regex
    Pattern(Regex),
    /// Predicate over the whole form; evaluated even for blank values
    Custom(CrossFieldCheck),
}

/// A constraint paired with the message shown when it is violated
#[derive(Debug, Clone)]
pub struct Rule {
    pub constraint: Constraint,
    pub message: String,
}

/// Ordered rules for one field
#[derive(Debug, Clone)]
pub struct FieldRules {
    name: &'static str,
    required: bool,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// An optional field with no constraints
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            rules: Vec::new(),
        }
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.push(Constraint::Required, message)
    }

    pub fn min_len(self, min: usize, message: impl Into<String>) -> Self {
        self.push(Constraint::MinLength(min), message)
    }

    pub fn max_len(self, max: usize, message: impl Into<String>) -> Self {
        self.push(Constraint::MaxLength(max), message)
    }

    pub fn pattern(self, regex: Regex, message: impl Into<String>) -> Self {
        self.push(Constraint::Pattern(regex), message)
    }

    pub fn custom(self, check: CrossFieldCheck, message: impl Into<String>) -> Self {
        self.push(Constraint::Custom(check), message)
    }

    fn push(mut self, constraint: Constraint, message: impl Into<String>) -> Self {
        self.rules.push(Rule {
            constraint,
            message: message.into(),
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// All violations for `value`, in rule order.
    ///
    /// Blank values (empty or whitespace-only) only ever trip `Required` and
    /// `Custom` rules; length and pattern rules apply to non-blank input.
    pub fn check(&self, value: &str, values: &FieldValues) -> Vec<String> {
        self.violations(value, Some(values))
    }

    /// Violations that depend on `value` alone, skipping cross-field rules
    pub fn check_value(&self, value: &str) -> Vec<String> {
        self.violations(value, None)
    }

    fn violations(&self, value: &str, values: Option<&FieldValues>) -> Vec<String> {
        let blank = value.trim().is_empty();

        self.rules
            .iter()
            .filter(|rule| {
                let passed = match &rule.constraint {
                    Constraint::Required => !blank,
                    Constraint::Custom(check) => values.is_none_or(|values| check(value, values)),
                    _ if blank => true,
                    Constraint::MinLength(min) => value.chars().count() >= *min,
                    Constraint::MaxLength(max) => value.chars().count() <= *max,
                    Constraint::Pattern(regex) => regex.is_match(value),
                };
                !passed
            })
            .map(|rule| rule.message.clone())
            .collect()
    }
}

/// Immutable rule table for one entity type
#[derive(Debug, Clone)]
pub struct ValidationSchema {
    entity: &'static str,
    fields: Vec<FieldRules>,
}

impl ValidationSchema {
    pub fn new(entity: &'static str, fields: Vec<FieldRules>) -> Self {
        Self { entity, fields }
    }

    /// Name of the entity type this schema belongs to
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Declared field names, in schema order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn rules_for(&self, name: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check one candidate value for a field.
    ///
    /// `values` supplies the rest of the form for cross-field rules. Names
    /// that are not part of the schema have no rules and always pass.
    pub fn check_field(
        &self,
        name: &str,
        value: &str,
        values: &FieldValues,
    ) -> Result<(), Vec<String>> {
        let violations = self
            .rules_for(name)
            .map(|rules| rules.check(value, values))
            .unwrap_or_default();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Validate a whole form, returning the first violation of each invalid field
    pub fn validate(&self, values: &FieldValues) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|field| {
                let value = values.get(field.name).map(String::as_str).unwrap_or("");
                field
                    .check(value, values)
                    .into_iter()
                    .next()
                    .map(|message| (field.name.to_string(), message))
            })
            .collect()
    }

    /// Every declared field mapped to an empty string
    pub fn blank_values(&self) -> FieldValues {
        self.field_names()
            .map(|name| (name.to_string(), String::new()))
            .collect()
    }

    /// Restrict `values` to exactly the declared fields, filling gaps with blanks
    pub fn project(&self, values: &FieldValues) -> FieldValues {
        self.field_names()
            .map(|name| {
                let value = values.get(name).cloned().unwrap_or_default();
                (name.to_string(), value)
            })
            .collect()
    }
}

// =========================================================================
// Shared field rules
// =========================================================================

/// `code`: required, at most 10 characters, uppercase letters and digits only.
///
/// Input is never uppercased on the user's behalf; `kg` is an error.
pub fn code_rules() -> FieldRules {
    FieldRules::new("code")
        .required("Code is required")
        .max_len(
            CODE_MAX_LEN,
            format!("Code must be at most {} characters", CODE_MAX_LEN),
        )
        .pattern(
            CODE_PATTERN.clone(),
            "Code must contain only uppercase letters and digits",
        )
}

/// `title`: required, at least 2 characters
pub fn title_rules() -> FieldRules {
    FieldRules::new("title").required("Title is required").min_len(
        TITLE_MIN_LEN,
        format!("Title must be at least {} characters", TITLE_MIN_LEN),
    )
}

/// `description`: optional and unconstrained
pub fn description_rules() -> FieldRules {
    FieldRules::new("description")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ValidationSchema {
        ValidationSchema::new(
            "test",
            vec![code_rules(), title_rules(), description_rules()],
        )
    }

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_codes_pass() {
        let schema = schema();
        let empty = FieldValues::new();
        for code in ["A", "KG", "PCS", "20FT", "ABCDEFGHIJ", "0123456789"] {
            assert!(
                schema.check_field("code", code, &empty).is_ok(),
                "{code} should be valid"
            );
        }
    }

    #[test]
    fn test_invalid_codes_fail_with_code_message() {
        let schema = schema();
        let empty = FieldValues::new();
        for code in ["kg", "Kg", "K G", "ABCDEFGHIJK", "KG-1"] {
            let violations = schema.check_field("code", code, &empty).unwrap_err();
            assert!(
                violations.iter().all(|m| m.starts_with("Code")),
                "{code}: {violations:?}"
            );
        }
    }

    #[test]
    fn test_overlong_lowercase_code_lists_all_violations_in_order() {
        let schema = schema();
        let violations = schema
            .check_field("code", "abcdefghijk", &FieldValues::new())
            .unwrap_err();
        assert_eq!(
            violations,
            vec![
                "Code must be at most 10 characters".to_string(),
                "Code must contain only uppercase letters and digits".to_string(),
            ]
        );
    }

    #[test]
    fn test_blank_and_whitespace_are_required_violations() {
        let schema = schema();
        for blank in ["", "   ", "\t"] {
            let violations = schema
                .check_field("title", blank, &FieldValues::new())
                .unwrap_err();
            assert_eq!(violations, vec!["Title is required".to_string()]);
        }
    }

    #[test]
    fn test_title_length_boundary() {
        let schema = schema();
        let empty = FieldValues::new();
        assert!(schema.check_field("title", "K", &empty).is_err());
        assert!(schema.check_field("title", "Kg", &empty).is_ok());
        assert!(schema.check_field("title", "Kilogram", &empty).is_ok());
    }

    #[test]
    fn test_optional_description_accepts_anything() {
        let schema = schema();
        let empty = FieldValues::new();
        assert!(schema.check_field("description", "", &empty).is_ok());
        assert!(schema.check_field("description", "x", &empty).is_ok());
    }

    #[test]
    fn test_validate_reports_only_invalid_fields() {
        let schema = schema();
        let errors = schema.validate(&values(&[("code", "kg"), ("title", "Kilogram")]));

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("code").map(String::as_str),
            Some("Code must contain only uppercase letters and digits")
        );
    }

    #[test]
    fn test_validate_treats_missing_fields_as_blank() {
        let errors = schema().validate(&FieldValues::new());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["code"], "Code is required");
        assert_eq!(errors["title"], "Title is required");
    }

    #[test]
    fn test_check_value_skips_cross_field_rules() {
        fn never(_: &str, _: &FieldValues) -> bool {
            false
        }

        let rules = FieldRules::new("email")
            .pattern(Regex::new(r"@").unwrap(), "Enter a valid email address")
            .custom(never, "Provide an email address or a phone number");

        assert!(rules.check_value("").is_empty());
        assert_eq!(rules.check_value("nope"), vec!["Enter a valid email address".to_string()]);
        assert_eq!(rules.check("", &FieldValues::new()).len(), 1);
    }

    #[test]
    fn test_cross_field_rule_runs_on_blank_values() {
        fn needs_partner(value: &str, values: &FieldValues) -> bool {
            !value.trim().is_empty() || values.get("b").is_some_and(|b| !b.trim().is_empty())
        }

        let schema = ValidationSchema::new(
            "pair",
            vec![
                FieldRules::new("a").custom(needs_partner, "Provide a or b"),
                FieldRules::new("b"),
            ],
        );

        let errors = schema.validate(&values(&[("a", ""), ("b", "")]));
        assert_eq!(errors["a"], "Provide a or b");

        let errors = schema.validate(&values(&[("a", ""), ("b", "set")]));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_project_drops_unknown_and_fills_missing() {
        let schema = schema();
        let projected = schema.project(&values(&[("code", "KG"), ("ui_only", "x")]));

        assert_eq!(
            projected.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["code", "description", "title"]
        );
        assert_eq!(projected["code"], "KG");
        assert_eq!(projected["title"], "");
    }

    #[test]
    fn test_unknown_field_has_no_rules() {
        assert!(schema()
            .check_field("nonexistent", "", &FieldValues::new())
            .is_ok());
    }
}
