//! Shared helper functions for CLI commands

use console::style;
use miette::Diagnostic;
use thiserror::Error;

use crate::schema::{EditorConfig, FieldErrors, FieldValues};

/// A submit was refused by the form's validation rules.
///
/// The per-field messages are printed with [`print_field_errors`] before
/// this is returned.
#[derive(Debug, Error, Diagnostic)]
#[error("{entity} not saved: {count} invalid field(s)")]
#[diagnostic(code(mdk::submit::rejected), help("fix the fields listed above and try again"))]
pub struct SubmitRejected {
    entity: String,
    count: usize,
}

impl SubmitRejected {
    /// Print the field errors and build the diagnostic
    pub fn report(config: &EditorConfig, errors: &FieldErrors) -> Self {
        print_field_errors(config, errors);
        Self {
            entity: config.label.to_string(),
            count: errors.len(),
        }
    }
}

/// Print field errors under their labels, in display order
pub fn print_field_errors(config: &EditorConfig, errors: &FieldErrors) {
    for descriptor in config.fields {
        if let Some(message) = errors.get(descriptor.name) {
            eprintln!(
                "  {} {}: {}",
                style("✗").red(),
                style(descriptor.label).bold(),
                message
            );
        }
    }
}

/// Collect the flags that were actually given into a form value map
pub fn provided_values<'a>(
    pairs: impl IntoIterator<Item = (&'static str, Option<&'a String>)>,
) -> FieldValues {
    pairs
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v.clone())))
        .collect()
}

/// Truncate a string to `max_chars` characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First line of a possibly multi-line value
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
