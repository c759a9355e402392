//! `mdk profile` command - Company profile and logo

use std::path::PathBuf;

use clap::Subcommand;
use console::style;
use dialoguer::theme::ColorfulTheme;
use miette::Result;

use crate::cli::helpers::{print_field_errors, provided_values, SubmitRejected};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::prompt::{fill_fields, invalid_fields, retry};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::project::Project;
use crate::core::store;
use crate::core::Config;
use crate::entities::{profile_editor_config, CompanyProfile};
use crate::form::{ProfileForm, ProfileSubmission};
use crate::schema::{FieldDescriptor, FieldValues, TemplateGenerator};
use crate::upload::{PreviewRegistry, SelectedFile};

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Create or update the company profile
    Setup(SetupArgs),

    /// Show the company profile
    Show,
}

#[derive(clap::Args, Debug, Default)]
pub struct SetupArgs {
    /// Registered company name
    #[arg(long)]
    pub company_name: Option<String>,

    /// Contact email address
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Company website (http:// or https://)
    #[arg(long)]
    pub website: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Logo image (PNG, JPEG, GIF, WebP or SVG, at most 2MB).
    /// May be given several times; the last accepted file wins.
    #[arg(long, value_name = "PATH")]
    pub logo: Vec<PathBuf>,

    /// Remove the current logo
    #[arg(long)]
    pub clear_logo: bool,

    /// Prompt for each field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl SetupArgs {
    fn values(&self) -> FieldValues {
        provided_values([
            ("company_name", self.company_name.as_ref()),
            ("email", self.email.as_ref()),
            ("phone", self.phone.as_ref()),
            ("website", self.website.as_ref()),
            ("address", self.address.as_ref()),
        ])
    }
}

pub fn run(cmd: ProfileCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProfileCommands::Setup(args) => run_setup(args, global),
        ProfileCommands::Show => run_show(global),
    }
}

fn run_setup(args: SetupArgs, global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load_for(Some(&project));
    let editor = profile_editor_config();
    let existing = store::load_profile(&project)?;

    let mut form = ProfileForm::new(existing.as_ref(), PreviewRegistry::new());
    for (name, value) in args.values() {
        form.set_field(&name, value)
            .map_err(|e| miette::miette!("{}", e))?;
    }

    if args.clear_logo {
        form.clear_logo();
    }
    for path in &args.logo {
        let file = SelectedFile::from_path(path)
            .map_err(|e| miette::miette!("cannot read {}: {}", path.display(), e))?;
        let name = file.name().to_string();
        match form.select_logo(file) {
            Ok(url) => println!(
                "{} Logo {} accepted {}",
                style("✓").green(),
                style(&name).cyan(),
                style(format!("(preview {})", url)).dim()
            ),
            Err(rejection) => eprintln!("{} {}: {}", style("✗").red(), name, rejection),
        }
    }

    let submission = if args.interactive {
        match prompt_profile(&mut form)? {
            Some(submission) => submission,
            None => {
                println!("{}", style("Cancelled, nothing saved").yellow());
                return Ok(());
            }
        }
    } else {
        form.submit()
            .map_err(|errors| SubmitRejected::report(&editor, &errors))?
    };

    let old_logo = existing.and_then(|p| p.logo);
    let mut profile = CompanyProfile::from_values(&submission.values);
    profile.logo = if args.clear_logo { None } else { old_logo.clone() };

    if let Some(file) = &submission.logo {
        let name = logo_file_name(file);
        store::save_profile_asset(&project, &name, file.contents())?;
        profile.logo = Some(name);
    }

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let path = store::save_profile(&project, &generator, &profile)?;
    remove_replaced_logo(&project, old_logo.as_deref(), profile.logo.as_deref());

    match effective_format(global.format, &config, false) {
        format @ (OutputFormat::Yaml | OutputFormat::Json) => print_structured(&profile, format)?,
        _ => {
            println!(
                "{} Saved company profile for {}",
                style("✓").green(),
                style(&profile.company_name).bold()
            );
            println!("   {}", style(path.display()).dim());
        }
    }
    Ok(())
}

/// Prompt for every field, then re-prompt the invalid ones until the form
/// submits or the user gives up
fn prompt_profile(form: &mut ProfileForm) -> Result<Option<ProfileSubmission>> {
    let theme = ColorfulTheme::default();
    let editor = profile_editor_config();

    println!("{}", style(editor.label).bold());
    println!("{}", style(editor.description).dim());

    let mut pending: Vec<&'static FieldDescriptor> = editor.fields.iter().collect();
    loop {
        fill_fields(&theme, editor.schema, &pending, &mut *form)?;

        match form.submit() {
            Ok(submission) => return Ok(Some(submission)),
            Err(errors) => {
                print_field_errors(&editor, &errors);
                if !retry(&theme)? {
                    return Ok(None);
                }
                pending = invalid_fields(&editor, &errors);
            }
        }
    }
}

/// Delete the previously stored logo once the saved profile no longer uses it
fn remove_replaced_logo(project: &Project, old: Option<&str>, current: Option<&str>) {
    let Some(old) = old.filter(|old| current != Some(*old)) else {
        return;
    };
    let old_path = project.profile_dir().join(old);
    if let Err(e) = std::fs::remove_file(&old_path) {
        tracing::warn!(path = %old_path.display(), error = %e, "could not remove old logo");
    }
}

/// Stored logo name: `logo.<ext>` keeping the picked file's extension
pub fn logo_file_name(file: &SelectedFile) -> String {
    match std::path::Path::new(file.name())
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
    {
        Some(ext) if !ext.is_empty() => format!("logo.{}", ext),
        _ => "logo".to_string(),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load_for(Some(&project));

    let Some(profile) = store::load_profile(&project)? else {
        println!("No company profile yet. Run 'mdk profile setup' to create one.");
        return Ok(());
    };

    match effective_format(global.format, &config, false) {
        OutputFormat::Id => println!("{}", profile.company_name),
        format @ (OutputFormat::Yaml | OutputFormat::Json) => print_structured(&profile, format)?,
        OutputFormat::Auto => {
            let editor = profile_editor_config();
            let values = profile.form_values();

            println!("{}", style(&profile.company_name).bold());
            println!("{}", style("─".repeat(60)).dim());
            for field in editor.fields.iter().skip(1) {
                let value = values.get(field.name).map(String::as_str).unwrap_or("");
                if !value.is_empty() {
                    println!("{:<14}{}", style(field.label).bold(), value.replace('\n', ", "));
                }
            }
            if let Some(logo) = &profile.logo {
                println!(
                    "{:<14}{}",
                    style("Logo").bold(),
                    project.profile_dir().join(logo).display()
                );
            }
            println!(
                "{:<14}{}",
                style("Updated").bold(),
                profile.updated.format("%Y-%m-%d %H:%M")
            );
        }
    }
    Ok(())
}
