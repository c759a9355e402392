//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::{Config, DefaultFormat};

/// Determine the effective output format based on context.
///
/// `auto` on a single record falls back to the configured default format;
/// lists stay tabular.
pub fn effective_format(format: OutputFormat, config: &Config, is_list: bool) -> OutputFormat {
    match (format, config.format) {
        (OutputFormat::Auto, Some(DefaultFormat::Yaml)) if !is_list => OutputFormat::Yaml,
        (OutputFormat::Auto, Some(DefaultFormat::Json)) if !is_list => OutputFormat::Json,
        (other, _) => other,
    }
}

/// Print a value as YAML or JSON
pub fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).into_diagnostic()?;
            println!("{}", json);
        }
        _ => {
            let yaml = serde_yml::to_string(value).into_diagnostic()?;
            print!("{}", yaml);
        }
    }
    Ok(())
}
