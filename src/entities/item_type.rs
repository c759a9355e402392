//! Item type entity type - Categories of stocked and traded goods

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{form_map, optional_value_of, value_of, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::schema::rules::{code_rules, description_rules, title_rules, ValidationSchema};
use crate::schema::{EditorConfig, FieldDescriptor, FieldValues};

/// Validation rules shared by every item type editor
pub static ITEM_TYPE_SCHEMA: LazyLock<ValidationSchema> = LazyLock::new(|| {
    ValidationSchema::new(
        "item_type",
        vec![code_rules(), title_rules(), description_rules()],
    )
});

const ITEM_TYPE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("code", "Code", "RAW"),
    FieldDescriptor::text("title", "Title", "Raw Material"),
    FieldDescriptor::text_area("description", "Description", "What belongs to this item type"),
];

/// An item type record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    /// Unique identifier
    pub id: EntityId,

    /// Short uppercase code (e.g., "RAW")
    pub code: String,

    /// Display name
    pub title: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this item type)
    pub author: String,
}

impl Entity for ItemType {
    const PREFIX: EntityPrefix = EntityPrefix::Ity;

    fn editor_config() -> EditorConfig {
        EditorConfig {
            label: "Item Type",
            description: "Groups items that share handling, accounting and reporting rules.",
            schema: &ITEM_TYPE_SCHEMA,
            fields: ITEM_TYPE_FIELDS,
        }
    }

    fn from_values(values: &FieldValues, author: &str) -> Self {
        let mut item_type = Self::new(value_of(values, "code"), value_of(values, "title"), author);
        item_type.description = optional_value_of(values, "description");
        item_type
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn form_values(&self) -> FieldValues {
        form_map([
            ("code", self.code.as_str()),
            ("title", self.title.as_str()),
            ("description", self.description.as_deref().unwrap_or("")),
        ])
    }

    fn apply_values(&mut self, values: &FieldValues) {
        self.code = value_of(values, "code");
        self.title = value_of(values, "title");
        self.description = optional_value_of(values, "description");
    }
}

impl ItemType {
    /// Create a new item type
    pub fn new(code: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Ity),
            code: code.into(),
            title: title.into(),
            description: None,
            created: Utc::now(),
            author: author.into(),
        }
    }
}
