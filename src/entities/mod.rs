//! Entity type definitions

pub mod item_type;
pub mod port;
pub mod profile;
pub mod uom;

pub use item_type::ItemType;
pub use port::PortOfDischarge;
pub use profile::{profile_editor_config, CompanyProfile};
pub use uom::Uom;

use crate::core::entity::Entity;
use crate::core::identity::EntityPrefix;
use crate::schema::EditorConfig;

/// The master-data entity types that have an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    ItemType,
    Uom,
    PortOfDischarge,
}

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::ItemType, EntityKind::Uom, EntityKind::PortOfDischarge]
    }

    pub fn prefix(&self) -> EntityPrefix {
        match self {
            EntityKind::ItemType => ItemType::PREFIX,
            EntityKind::Uom => Uom::PREFIX,
            EntityKind::PortOfDischarge => PortOfDischarge::PREFIX,
        }
    }

    pub fn from_prefix(prefix: EntityPrefix) -> Self {
        match prefix {
            EntityPrefix::Ity => EntityKind::ItemType,
            EntityPrefix::Uom => EntityKind::Uom,
            EntityPrefix::Pod => EntityKind::PortOfDischarge,
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        match self {
            EntityKind::ItemType => ItemType::editor_config(),
            EntityKind::Uom => Uom::editor_config(),
            EntityKind::PortOfDischarge => PortOfDischarge::editor_config(),
        }
    }

    /// Directory (relative to the project root) where records are stored
    pub fn dir(&self) -> &'static str {
        match self {
            EntityKind::ItemType => "masterdata/item-types",
            EntityKind::Uom => "masterdata/uoms",
            EntityKind::PortOfDischarge => "masterdata/ports",
        }
    }

    /// Singular name for messages
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::ItemType => "item type",
            EntityKind::Uom => "unit of measure",
            EntityKind::PortOfDischarge => "port of discharge",
        }
    }

    /// Plural name for messages
    pub fn name_plural(&self) -> &'static str {
        match self {
            EntityKind::ItemType => "item types",
            EntityKind::Uom => "units of measure",
            EntityKind::PortOfDischarge => "ports of discharge",
        }
    }

    /// Template file used to render record files
    pub fn template(&self) -> &'static str {
        match self {
            EntityKind::ItemType => "item_type.yaml.tera",
            EntityKind::Uom => "uom.yaml.tera",
            EntityKind::PortOfDischarge => "port.yaml.tera",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
