//! Template rendering for record files

use std::collections::HashMap;

use rust_embed::Embed;
use serde::Serialize;
use tera::{Tera, Value};
use thiserror::Error;

use crate::core::entity::Entity;
use crate::entities::{CompanyProfile, EntityKind};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const PROFILE_TEMPLATE: &str = "profile.yaml.tera";

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

impl TemplateGenerator {
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }
        tera.register_filter("yaml", yaml_filter);

        Ok(Self { tera })
    }

    /// Render any serializable value through a named template
    pub fn render<T: Serialize>(&self, template: &str, value: &T) -> Result<String, TemplateError> {
        if !self.tera.get_template_names().any(|n| n == template) {
            return Err(TemplateError::NotFound(template.to_string()));
        }

        let context = tera::Context::from_serialize(value)
            .map_err(|e| TemplateError::RenderError(e.to_string()))?;
        self.tera
            .render(template, &context)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    /// Render a master-data record to its YAML file contents
    pub fn render_record<T: Entity>(&self, record: &T) -> Result<String, TemplateError> {
        self.render(EntityKind::from_prefix(T::PREFIX).template(), record)
    }

    pub fn render_profile(&self, profile: &CompanyProfile) -> Result<String, TemplateError> {
        self.render(PROFILE_TEMPLATE, profile)
    }
}

/// `{{ value | yaml }}` - emit a scalar as YAML, quoting where needed
fn yaml_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let rendered = serde_yml::to_string(value)
        .map_err(|e| tera::Error::msg(format!("yaml filter: {}", e)))?;
    Ok(Value::String(rendered.trim_end().to_string()))
}
