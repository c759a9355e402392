//! Entity trait - common interface for all master-data record types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};
use crate::schema::{EditorConfig, FieldValues};

/// Common trait for all master-data records
///
/// Records are owned by whoever lists and stores them. Editors only read a
/// record to seed their form ([`Entity::form_values`]) and hand back plain
/// field values; turning those values into a record is the owner's job
/// ([`Entity::from_values`], [`Entity::apply_values`]).
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix (e.g., "UOM")
    const PREFIX: EntityPrefix;

    /// Editor configuration (schema + field descriptors) for this type
    fn editor_config() -> EditorConfig;

    /// Build a new record from validated form values
    fn from_values(values: &FieldValues, author: &str) -> Self;

    /// Get the record's unique ID
    fn id(&self) -> &EntityId;

    /// Get the short uppercase code
    fn code(&self) -> &str;

    /// Get the human-readable title
    fn title(&self) -> &str;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author
    fn author(&self) -> &str;

    /// Current field values for seeding an editor
    fn form_values(&self) -> FieldValues;

    /// Overwrite the editable fields from validated form values
    fn apply_values(&mut self, values: &FieldValues);
}

/// Read a value out of a form map, treating absent as empty
pub(crate) fn value_of(values: &FieldValues, name: &str) -> String {
    values.get(name).cloned().unwrap_or_default()
}

/// Read an optional value out of a form map; blank means `None`
pub(crate) fn optional_value_of(values: &FieldValues, name: &str) -> Option<String> {
    values
        .get(name)
        .filter(|v| !v.trim().is_empty())
        .cloned()
}

/// Build a form map from `(name, value)` pairs
pub(crate) fn form_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> FieldValues {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
