//! Schema registry - embedded JSON schemas
//!
//! The field rules in [`crate::schema::rules`] gate what the editors accept.
//! These JSON schemas check the shape of record files on disk, which users
//! may also edit by hand.

use rust_embed::Embed;
use std::collections::HashMap;

use jsonschema::Validator;

use crate::core::EntityPrefix;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

const PROFILE_SCHEMA_FILE: &str = "profile.schema.json";

/// Registry of JSON schemas for record files
pub struct SchemaRegistry {
    schemas: HashMap<EntityPrefix, String>,
    validators: HashMap<EntityPrefix, Validator>,
    profile: Option<(String, Validator)>,
}

impl SchemaRegistry {
    /// Create a new schema registry with embedded schemas
    pub fn new() -> Self {
        let mut schemas = HashMap::new();
        let mut validators = HashMap::new();

        for prefix in EntityPrefix::all() {
            let filename = format!("{}.schema.json", prefix.as_str().to_lowercase());
            if let Some((content, validator)) = Self::load(&filename) {
                schemas.insert(*prefix, content);
                validators.insert(*prefix, validator);
            }
        }

        Self {
            schemas,
            validators,
            profile: Self::load(PROFILE_SCHEMA_FILE),
        }
    }

    fn load(filename: &str) -> Option<(String, Validator)> {
        let file = EmbeddedSchemas::get(filename)?;
        let content = std::str::from_utf8(&file.data).ok()?.to_string();
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(schema = filename, error = %e, "embedded schema is not valid JSON");
                return None;
            }
        };
        match jsonschema::validator_for(&value) {
            Ok(validator) => Some((content, validator)),
            Err(e) => {
                tracing::error!(schema = filename, error = %e, "embedded schema does not compile");
                None
            }
        }
    }

    /// Get the JSON schema for an entity type
    pub fn get(&self, prefix: EntityPrefix) -> Option<&str> {
        self.schemas.get(&prefix).map(|s| s.as_str())
    }

    /// Get the JSON schema for the company profile
    pub fn profile_schema(&self) -> Option<&str> {
        self.profile.as_ref().map(|(s, _)| s.as_str())
    }

    /// Check if a schema exists for the given prefix
    pub fn has_schema(&self, prefix: EntityPrefix) -> bool {
        self.schemas.contains_key(&prefix)
    }

    /// Check a parsed record against its entity schema.
    ///
    /// Returns one message per violation, prefixed with its JSON pointer.
    pub fn validate(&self, prefix: EntityPrefix, instance: &serde_json::Value) -> Vec<String> {
        match self.validators.get(&prefix) {
            Some(validator) => collect_errors(validator, instance),
            None => vec![format!("no schema registered for {}", prefix)],
        }
    }

    /// Check a parsed company profile
    pub fn validate_profile(&self, instance: &serde_json::Value) -> Vec<String> {
        match &self.profile {
            Some((_, validator)) => collect_errors(validator, instance),
            None => vec!["no schema registered for the company profile".to_string()],
        }
    }
}

fn collect_errors(validator: &Validator, instance: &serde_json::Value) -> Vec<String> {
    validator
        .iter_errors(instance)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect()
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
