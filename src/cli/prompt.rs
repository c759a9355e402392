//! Interactive field prompts

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::print_field_errors;
use crate::cli::session::{PanelResult, PanelSession};
use crate::form::{Editable, ProfileForm};
use crate::schema::{ControlKind, EditorConfig, FieldDescriptor, FieldErrors, ValidationSchema};

/// Ask for one field value.
///
/// Rules that depend only on this value are enforced while typing;
/// cross-field rules are checked when the whole form is submitted.
pub fn prompt_field(
    theme: &ColorfulTheme,
    schema: &'static ValidationSchema,
    descriptor: &FieldDescriptor,
    current: &str,
) -> Result<String> {
    let name = descriptor.name;
    let prompt = match descriptor.control {
        ControlKind::TextArea => format!("{} (use \\n for line breaks)", descriptor.label),
        ControlKind::Text => descriptor.label.to_string(),
    };

    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if !current.is_empty() {
        input = input.with_initial_text(current);
    } else if !descriptor.placeholder.is_empty() {
        input = input.with_prompt(format!(
            "{} {}",
            descriptor.label,
            style(format!("(e.g. {})", descriptor.placeholder)).dim()
        ));
    }

    let value = input
        .validate_with(move |text: &String| -> Result<(), String> {
            let violations = schema
                .rules_for(name)
                .map(|rules| rules.check_value(text))
                .unwrap_or_default();
            match violations.into_iter().next() {
                Some(message) => Err(message),
                None => Ok(()),
            }
        })
        .interact_text()
        .into_diagnostic()?;

    Ok(match descriptor.control {
        ControlKind::TextArea => value.replace("\\n", "\n"),
        ControlKind::Text => value,
    })
}

/// Walk the user through an open panel until it saves or they give up
pub fn run_panel(session: &mut PanelSession, record: Option<&dyn Editable>) -> Result<PanelResult> {
    let theme = ColorfulTheme::default();
    let config: EditorConfig = *session.panel().config();

    println!("{}", style(session.panel().title()).bold());
    println!("{}", style(config.description).dim());

    let mut pending: Vec<&'static FieldDescriptor> = config.fields.iter().collect();
    loop {
        fill_fields(&theme, config.schema, &pending, &mut *session)?;

        let save = Confirm::with_theme(&theme)
            .with_prompt(format!("Save {}?", config.label))
            .default(true)
            .interact()
            .into_diagnostic()?;
        if !save {
            session.cancel(record);
            return Ok(PanelResult::Cancelled);
        }

        match session.submit(record) {
            PanelResult::Rejected(errors) => {
                print_field_errors(&config, &errors);
                if !retry(&theme)? {
                    session.cancel(record);
                    return Ok(PanelResult::Cancelled);
                }
                pending = invalid_fields(&config, &errors);
            }
            other => return Ok(other),
        }
    }
}

/// Something whose fields can be filled in from prompts
pub trait PromptTarget {
    fn current(&self, name: &str) -> String;
    fn set(&mut self, name: &str, value: String) -> Result<()>;
}

impl PromptTarget for PanelSession {
    fn current(&self, name: &str) -> String {
        self.panel().form().value(name).unwrap_or("").to_string()
    }

    fn set(&mut self, name: &str, value: String) -> Result<()> {
        self.panel_mut()
            .set_field(name, value)
            .map_err(|e| miette::miette!("{}", e))
    }
}

impl PromptTarget for ProfileForm {
    fn current(&self, name: &str) -> String {
        self.controller().value(name).unwrap_or("").to_string()
    }

    fn set(&mut self, name: &str, value: String) -> Result<()> {
        self.set_field(name, value)
            .map_err(|e| miette::miette!("{}", e))
    }
}

/// Prompt each pending field in turn, seeded from the target's current value
pub fn fill_fields(
    theme: &ColorfulTheme,
    schema: &'static ValidationSchema,
    pending: &[&'static FieldDescriptor],
    target: &mut impl PromptTarget,
) -> Result<()> {
    for descriptor in pending {
        let current = target.current(descriptor.name);
        let value = prompt_field(theme, schema, descriptor, &current)?;
        target.set(descriptor.name, value)?;
    }
    Ok(())
}

/// Ask whether to go round again after a rejected submit
pub fn retry(theme: &ColorfulTheme) -> Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt("Fix the highlighted fields?")
        .default(true)
        .interact()
        .into_diagnostic()
}

/// Descriptors of the fields named in `errors`, in display order
pub fn invalid_fields(config: &EditorConfig, errors: &FieldErrors) -> Vec<&'static FieldDescriptor> {
    config
        .fields
        .iter()
        .filter(|d| errors.contains_key(d.name))
        .collect()
}
