//! Port of discharge entity type - Destination ports for inbound shipments

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{form_map, optional_value_of, value_of, Entity};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::schema::rules::{code_rules, description_rules, title_rules, ValidationSchema};
use crate::schema::{EditorConfig, FieldDescriptor, FieldValues};

/// Validation rules shared by every port of discharge editor
pub static PORT_SCHEMA: LazyLock<ValidationSchema> = LazyLock::new(|| {
    ValidationSchema::new(
        "port_of_discharge",
        vec![code_rules(), title_rules(), description_rules()],
    )
});

const PORT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("code", "Code", "NLRTM"),
    FieldDescriptor::text("title", "Title", "Rotterdam"),
    FieldDescriptor::text_area("description", "Description", "Terminal, country, notes"),
];

/// A port of discharge record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortOfDischarge {
    /// Unique identifier
    pub id: EntityId,

    /// Short uppercase code (e.g., a UN/LOCODE without the space)
    pub code: String,

    /// Port name
    pub title: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this port)
    pub author: String,
}

impl Entity for PortOfDischarge {
    const PREFIX: EntityPrefix = EntityPrefix::Pod;

    fn editor_config() -> EditorConfig {
        EditorConfig {
            label: "Port of Discharge",
            description: "Ports where inbound cargo is unloaded.",
            schema: &PORT_SCHEMA,
            fields: PORT_FIELDS,
        }
    }

    fn from_values(values: &FieldValues, author: &str) -> Self {
        let mut port = Self::new(value_of(values, "code"), value_of(values, "title"), author);
        port.description = optional_value_of(values, "description");
        port
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

impl PortOfDischarge {
    /// Create a new port of discharge
    pub fn new(code: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Pod),
            code: code.into(),
            title: title.into(),
            description: None,
            created: Utc::now(),
            author: author.into(),
        }
    }
}
