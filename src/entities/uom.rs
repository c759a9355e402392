//! Unit of measure entity type - KG, PCS, LTR and friends

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{form_map, value_of, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::schema::rules::{code_rules, title_rules, FieldRules, ValidationSchema};
use crate::schema::{EditorConfig, FieldDescriptor, FieldValues};

/// Maximum length of a UOM prefix
pub const PREFIX_MAX_LEN: usize = 5;

/// Validation rules shared by every UOM editor
pub static UOM_SCHEMA: LazyLock<ValidationSchema> = LazyLock::new(|| {
    ValidationSchema::new(
        "uom",
        vec![
            code_rules(),
            title_rules(),
            FieldRules::new("prefix").required("Prefix is required").max_len(
                PREFIX_MAX_LEN,
                format!("Prefix must be at most {} characters", PREFIX_MAX_LEN),
            ),
        ],
    )
});

const UOM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("code", "Code", "KG"),
    FieldDescriptor::text("title", "Title", "Kilogram"),
    FieldDescriptor::text("prefix", "Prefix", "kg"),
];

/// A unit of measure record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uom {
    /// Unique identifier
    pub id: EntityId,

    /// Short uppercase code (e.g., "KG")
    pub code: String,

    /// Display name (e.g., "Kilogram")
    pub title: String,

    /// Symbol printed after quantities (e.g., "kg")
    pub prefix: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this unit)
    pub author: String,
}

impl Entity for Uom {
    const PREFIX: EntityPrefix = EntityPrefix::Uom;

    fn editor_config() -> EditorConfig {
        EditorConfig {
            label: "Unit of Measure",
            description: "Units used for quantities on items, orders and shipments.",
            schema: &UOM_SCHEMA,
            fields: UOM_FIELDS,
        }
    }

    fn from_values(values: &FieldValues, author: &str) -> Self {
        Self::new(
            value_of(values, "code"),
            value_of(values, "title"),
            value_of(values, "prefix"),
            author,
        )
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
            ("prefix", self.prefix.as_str()),
        ])
    }

    fn apply_values(&mut self, values: &FieldValues) {
        self.code = value_of(values, "code");
        self.title = value_of(values, "title");
        self.prefix = value_of(values, "prefix");
    }
}

impl Uom {
    /// Create a new unit of measure
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        prefix: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Uom),
            code: code.into(),
            title: title.into(),
            prefix: prefix.into(),
            created: Utc::now(),
            author: author.into(),
        }
    }
}
