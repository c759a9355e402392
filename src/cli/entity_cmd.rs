//! Shared entity command infrastructure
//!
//! Every master-data type gets the same subcommands. Creating and editing
//! go through an [`EditorPanel`](crate::panel::EditorPanel) exactly as a
//! page would: open the panel, type values, press Save.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::helpers::{first_line, print_field_errors, provided_values, truncate_str, SubmitRejected};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::prompt;
use crate::cli::session::{PanelResult, PanelSession};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Entity;
use crate::core::project::Project;
use crate::core::store::{self, Stored};
use crate::core::Config;
use crate::entities::{EntityKind, ItemType, PortOfDischarge, Uom};
use crate::schema::{FieldValues, TemplateGenerator};

#[derive(Subcommand, Debug)]
pub enum EntityCommands {
    /// Create a record
    New(NewArgs),

    /// Change fields of an existing record
    Edit(EditArgs),

    /// List records
    List(ListArgs),

    /// Show a record's details
    Show(ShowArgs),

    /// Create one record per row of a CSV file
    Import(ImportArgs),
}

/// Field values given on the command line
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// Short uppercase code, e.g. KG
    #[arg(long)]
    pub code: Option<String>,

    /// Display name
    #[arg(long)]
    pub title: Option<String>,

    /// Free-form description (item types and ports)
    #[arg(long)]
    pub description: Option<String>,

    /// Symbol printed after quantities (units of measure)
    #[arg(long)]
    pub prefix: Option<String>,
}

impl FieldArgs {
    pub fn values(&self) -> FieldValues {
        provided_values([
            ("code", self.code.as_ref()),
            ("title", self.title.as_ref()),
            ("description", self.description.as_ref()),
            ("prefix", self.prefix.as_ref()),
        ])
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Prompt for each field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Record ID, unique ID prefix, or code
    pub reference: String,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// Prompt for each field, starting from the current values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Code,
    Title,
    Created,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only records whose code or title contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortField::Code)]
    pub sort: SortField,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record ID, unique ID prefix, or code
    pub reference: String,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file with a header row naming the fields
    pub file: PathBuf,

    /// Validate every row without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(kind: EntityKind, cmd: EntityCommands, global: &GlobalOpts) -> Result<()> {
    match kind {
        EntityKind::ItemType => run_for::<ItemType>(cmd, global),
        EntityKind::Uom => run_for::<Uom>(cmd, global),
        EntityKind::PortOfDischarge => run_for::<PortOfDischarge>(cmd, global),
    }
}

fn run_for<T: Entity>(cmd: EntityCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        EntityCommands::New(args) => run_new::<T>(args, global),
        EntityCommands::Edit(args) => run_edit::<T>(args, global),
        EntityCommands::List(args) => run_list::<T>(args, global),
        EntityCommands::Show(args) => run_show::<T>(args, global),
        EntityCommands::Import(args) => run_import::<T>(args),
    }
}

fn discover() -> Result<Project> {
    Project::discover().map_err(|e| miette::miette!("{}", e))
}

fn templates() -> Result<TemplateGenerator> {
    TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))
}

// =========================================================================
// New / Edit
// =========================================================================

fn run_new<T: Entity>(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover()?;
    let config = Config::load_for(Some(&project));
    let editor = T::editor_config();

    let mut session = PanelSession::new(editor);
    session.open(None);
    session
        .apply(&args.fields.values())
        .map_err(|e| miette::miette!("{}", e))?;

    let result = if args.interactive {
        prompt::run_panel(&mut session, None)?
    } else {
        session.submit(None)
    };

    let values = match result {
        PanelResult::Saved(values) => values,
        PanelResult::Rejected(errors) => return Err(SubmitRejected::report(&editor, &errors).into()),
        PanelResult::Cancelled => {
            println!("{}", style("Cancelled, nothing saved").yellow());
            return Ok(());
        }
    };

    let record = T::from_values(&values, &config.author());
    store::ensure_unique_code::<T>(&project, record.code(), None)?;
    let path = store::save(&project, &templates()?, &record)?;

    report_saved(&record, &path, "Created", effective_format(global.format, &config, false))
}

fn run_edit<T: Entity>(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover()?;
    let config = Config::load_for(Some(&project));
    let editor = T::editor_config();

    let changes = args.fields.values();
    if changes.is_empty() && !args.interactive {
        return Err(miette::miette!(
            help = "pass field flags such as --title, or -i to be prompted",
            "nothing to change"
        ));
    }

    let Stored { mut record, path } = store::find::<T>(&project, &args.reference)?;

    let mut session = PanelSession::new(editor);
    session.open(Some(&record));
    session
        .apply(&changes)
        .map_err(|e| miette::miette!("{}", e))?;

    let result = if args.interactive {
        prompt::run_panel(&mut session, Some(&record))?
    } else {
        session.submit(Some(&record))
    };

    let values = match result {
        PanelResult::Saved(values) => values,
        PanelResult::Rejected(errors) => return Err(SubmitRejected::report(&editor, &errors).into()),
        PanelResult::Cancelled => {
            println!("{}", style("Cancelled, nothing saved").yellow());
            return Ok(());
        }
    };

    record.apply_values(&values);
    let id = record.id().to_string();
    store::ensure_unique_code::<T>(&project, record.code(), Some(&id))?;
    store::save_at(&templates()?, &record, &path)?;

    report_saved(&record, &path, "Updated", effective_format(global.format, &config, false))
}

fn report_saved<T: Entity>(record: &T, path: &Path, verb: &str, format: OutputFormat) -> Result<()> {
    let kind = EntityKind::from_prefix(T::PREFIX);
    match format {
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Yaml | OutputFormat::Json => print_structured(record, format)?,
        OutputFormat::Auto => {
            println!(
                "{} {} {} {} ({})",
                style("✓").green(),
                verb,
                kind,
                style(record.id()).cyan(),
                style(record.code()).bold()
            );
            println!("   {}", style(path.display()).dim());
        }
    }
    Ok(())
}

// =========================================================================
// List / Show
// =========================================================================

fn run_list<T: Entity>(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover()?;
    let config = Config::load_for(Some(&project));
    let kind = EntityKind::from_prefix(T::PREFIX);

    let mut records: Vec<T> = store::load_all::<T>(&project)
        .into_iter()
        .map(|s| s.record)
        .filter(|r| matches_search(r, args.search.as_deref()))
        .collect();

    match args.sort {
        SortField::Code => records.sort_by(|a, b| a.code().cmp(b.code())),
        SortField::Title => records.sort_by(|a, b| a.title().to_lowercase().cmp(&b.title().to_lowercase())),
        SortField::Created => records.sort_by_key(|r| r.created()),
    }

    match effective_format(global.format, &config, true) {
        OutputFormat::Id => {
            for record in &records {
                println!("{}", record.id());
            }
        }
        format @ (OutputFormat::Yaml | OutputFormat::Json) => print_structured(&records, format)?,
        OutputFormat::Auto => {
            if records.is_empty() {
                println!("No {} found.", kind.name_plural());
                return Ok(());
            }
            println!("{}", render_table(&records));
            println!(
                "{} {}",
                style(records.len()).bold(),
                if records.len() == 1 { kind.name() } else { kind.name_plural() }
            );
        }
    }
    Ok(())
}

fn matches_search<T: Entity>(record: &T, search: Option<&str>) -> bool {
    match search {
        None => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            record.code().to_lowercase().contains(&needle)
                || record.title().to_lowercase().contains(&needle)
        }
    }
}

/// Table with an ID column, one column per editor field, and the author
pub fn render_table<T: Entity>(records: &[T]) -> String {
    let editor = T::editor_config();
    let mut builder = Builder::default();

    let mut header = vec!["ID".to_string()];
    header.extend(editor.fields.iter().map(|f| f.label.to_uppercase()));
    header.push("AUTHOR".to_string());
    builder.push_record(header);

    for record in records {
        let values = record.form_values();
        let mut row = vec![record.id().to_string()];
        row.extend(editor.fields.iter().map(|f| {
            let value = values.get(f.name).map(String::as_str).unwrap_or("");
            truncate_str(first_line(value), 40)
        }));
        row.push(record.author().to_string());
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

fn run_show<T: Entity>(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let project = discover()?;
    let config = Config::load_for(Some(&project));
    let Stored { record, path } = store::find::<T>(&project, &args.reference)?;

    match effective_format(global.format, &config, false) {
        OutputFormat::Id => println!("{}", record.id()),
        OutputFormat::Yaml => {
            let content = std::fs::read_to_string(&path).into_diagnostic()?;
            print!("{}", content);
        }
        OutputFormat::Json => print_structured(&record, OutputFormat::Json)?,
        OutputFormat::Auto => {
            let editor = T::editor_config();
            let values = record.form_values();

            println!("{}", style(format!("{}: {}", editor.label, record.title())).bold());
            println!("{}", style("─".repeat(60)).dim());
            println!("{:<14}{}", style("ID").bold(), record.id());
            for field in editor.fields {
                let value = values.get(field.name).map(String::as_str).unwrap_or("");
                if value.is_empty() {
                    continue;
                }
                let mut lines = value.lines();
                println!("{:<14}{}", style(field.label).bold(), lines.next().unwrap_or(""));
                for line in lines {
                    println!("{:<14}{}", "", line);
                }
            }
            println!("{:<14}{}", style("Created").bold(), record.created().format("%Y-%m-%d %H:%M"));
            println!("{:<14}{}", style("Author").bold(), record.author());
            println!("{}", style(path.display()).dim());
        }
    }
    Ok(())
}

// =========================================================================
// Import
// =========================================================================

fn run_import<T: Entity>(args: ImportArgs) -> Result<()> {
    let project = discover()?;
    let config = Config::load_for(Some(&project));
    let editor = T::editor_config();
    let kind = EntityKind::from_prefix(T::PREFIX);
    let generator = templates()?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(&args.file)
        .into_diagnostic()?;
    let headers = reader.headers().into_diagnostic()?.clone();

    if let Some(unknown) = headers.iter().find(|h| !editor.schema.contains(h)) {
        return Err(miette::miette!(
            help = format!(
                "{} columns: {}",
                kind,
                editor.schema.field_names().collect::<Vec<_>>().join(", ")
            ),
            "unknown column '{}' in {}",
            unknown,
            args.file.display()
        ));
    }

    let mut seen_codes: HashSet<String> = store::load_all::<T>(&project)
        .into_iter()
        .map(|s| s.record.code().to_string())
        .collect();

    let (mut imported, mut rejected) = (0usize, 0usize);
    for row in reader.records() {
        let row = row.into_diagnostic()?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() != headers.len() {
            eprintln!(
                "{} line {}: expected {} fields, found {}",
                style("✗").red(),
                line,
                headers.len(),
                row.len()
            );
            rejected += 1;
            continue;
        }
        let values: FieldValues = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        // A fresh panel per row, like opening the drawer once per record
        let mut session = PanelSession::new(editor);
        session.open(None);
        session
            .apply(&values)
            .map_err(|e| miette::miette!("line {}: {}", line, e))?;

        match session.submit(None) {
            PanelResult::Saved(values) => {
                let record = T::from_values(&values, &config.author());
                if !seen_codes.insert(record.code().to_string()) {
                    eprintln!(
                        "{} line {}: code {} is already used",
                        style("✗").red(),
                        line,
                        record.code()
                    );
                    rejected += 1;
                    continue;
                }
                if !args.dry_run {
                    store::save(&project, &generator, &record)?;
                }
                imported += 1;
            }
            PanelResult::Rejected(errors) => {
                eprintln!("{} line {}:", style("✗").red(), line);
                print_field_errors(&editor, &errors);
                rejected += 1;
            }
            PanelResult::Cancelled => {}
        }
    }

    let verb = if args.dry_run { "Validated" } else { "Imported" };
    println!(
        "{} {} {} {}",
        style("✓").green(),
        verb,
        style(imported).bold(),
        if imported == 1 { kind.name() } else { kind.name_plural() }
    );

    if rejected > 0 {
        return Err(miette::miette!("{} row(s) rejected", rejected));
    }
    Ok(())
}
