//! `mdk schema` command - Describe an entity type's fields and rules

use clap::ValueEnum;
use console::style;
use miette::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::entities::{profile_editor_config, EntityKind};
use crate::schema::rules::Constraint;
use crate::schema::{EditorConfig, SchemaRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaTarget {
    ItemType,
    Uom,
    Port,
    Profile,
}

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    /// Entity type to describe
    #[arg(value_enum)]
    pub target: SchemaTarget,

    /// Print the JSON Schema used for record files instead
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let (config, kind) = match args.target {
        SchemaTarget::ItemType => (EntityKind::ItemType.editor_config(), Some(EntityKind::ItemType)),
        SchemaTarget::Uom => (EntityKind::Uom.editor_config(), Some(EntityKind::Uom)),
        SchemaTarget::Port => (
            EntityKind::PortOfDischarge.editor_config(),
            Some(EntityKind::PortOfDischarge),
        ),
        SchemaTarget::Profile => (profile_editor_config(), None),
    };

    if args.json {
        let registry = SchemaRegistry::new();
        let schema = match kind {
            Some(kind) => registry.get(kind.prefix()),
            None => registry.profile_schema(),
        };
        let schema = schema.ok_or_else(|| miette::miette!("no JSON schema for {}", config.label))?;
        println!("{}", schema.trim_end());
        return Ok(());
    }

    println!("{}", style(config.label).bold());
    println!("{}", style(config.description).dim());
    println!("{}", describe(&config));
    Ok(())
}

/// Table of fields: name, label, control, and each rule's message
pub fn describe(config: &EditorConfig) -> String {
    let mut builder = Builder::default();
    builder.push_record(["FIELD", "LABEL", "CONTROL", "RULES"].map(String::from));

    for descriptor in config.fields {
        let rules = config
            .schema
            .rules_for(descriptor.name)
            .map(|field| {
                field
                    .rules()
                    .iter()
                    .map(|rule| format!("{} ({})", rule.message, constraint_name(&rule.constraint)))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();
        builder.push_record([
            descriptor.name.to_string(),
            descriptor.label.to_string(),
            descriptor.control.to_string(),
            if rules.is_empty() { "-".to_string() } else { rules },
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

fn constraint_name(constraint: &Constraint) -> String {
    match constraint {
        Constraint::Required => "required".to_string(),
        Constraint::MinLength(n) => format!("min {}", n),
        Constraint::MaxLength(n) => format!("max {}", n),
        Constraint::Pattern(regex) => format!("pattern {}", regex.as_str()),
        Constraint::Custom(_) => "cross-field".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_every_rule_message() {
        let table = describe(&EntityKind::Uom.editor_config());
        assert!(table.contains("Code is required"));
        assert!(table.contains("Code must be at most 10 characters"));
        assert!(table.contains("Prefix must be at most 5 characters"));
    }

    #[test]
    fn test_profile_shows_cross_field_rule() {
        let table = describe(&profile_editor_config());
        assert!(table.contains("cross-field"));
    }
}
