//! `mdk validate` command - Check record files against schemas and field rules

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use console::style;
use miette::Result;
use walkdir::WalkDir;

use crate::core::project::{Project, RECORD_EXTENSION};
use crate::core::EntityPrefix;
use crate::entities::profile::PROFILE_SCHEMA;
use crate::entities::EntityKind;
use crate::schema::{FieldValues, SchemaRegistry, ValidationSchema};
use crate::yaml::parse_yaml;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Files or directories to validate (default: entire project)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
    total_errors: usize,
}

/// What kind of file a path holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Record(EntityPrefix),
    Profile,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let project = Project::discover().map_err(|e| miette::miette!("{}", e))?;
    let registry = SchemaRegistry::default();

    let files = if args.paths.is_empty() {
        all_record_files(project.root())
    } else {
        expand_paths(&args.paths)
    };

    let mut stats = ValidationStats::default();
    // (prefix, code) -> first file using it
    let mut codes: HashMap<(EntityPrefix, String), PathBuf> = HashMap::new();

    println!(
        "{} Validating {} file(s)...\n",
        style("→").blue(),
        files.len()
    );

    for path in &files {
        stats.files_checked += 1;

        let errors = match check_file(path, &project, &registry) {
            Ok((kind, value, mut errors)) => {
                if let (FileKind::Record(prefix), Some(code)) =
                    (kind, value.get("code").and_then(|c| c.as_str()))
                {
                    let key = (prefix, code.to_string());
                    match codes.get(&key) {
                        Some(first) => errors.push(format!(
                            "code {} is also used by {}",
                            code,
                            first.display()
                        )),
                        None => {
                            codes.insert(key, path.clone());
                        }
                    }
                }
                errors
            }
            Err(report) => {
                stats.files_failed += 1;
                stats.total_errors += 1;
                if !args.summary {
                    println!("{} {}", style("✗").red(), path.display());
                    println!("{:?}", report);
                }
                continue;
            }
        };

        if errors.is_empty() {
            stats.files_passed += 1;
            if !args.summary {
                println!("{} {}", style("✓").green(), path.display());
            }
        } else {
            stats.files_failed += 1;
            stats.total_errors += errors.len();
            if !args.summary {
                println!(
                    "{} {} - {} error(s)",
                    style("✗").red(),
                    path.display(),
                    errors.len()
                );
                for error in &errors {
                    println!("    {}", error);
                }
            }
        }
    }

    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    println!();

    match stats.files_failed {
        0 => {
            println!("{} All files passed validation!", style("✓").green().bold());
            Ok(())
        }
        1 => Err(miette::miette!("Validation failed: 1 file has errors")),
        n => Err(miette::miette!("Validation failed: {} files have errors", n)),
    }
}

/// Parse and check one file. Parse failures come back as a report.
fn check_file(
    path: &Path,
    project: &Project,
    registry: &SchemaRegistry,
) -> Result<(FileKind, serde_json::Value, Vec<String>)> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("failed to read {}: {}", path.display(), e))?;
    let value: serde_json::Value = parse_yaml(&content, &path.display().to_string())?;

    let kind = file_kind(path, project, &value).ok_or_else(|| {
        miette::miette!("cannot tell which entity type this file holds (missing or unknown id)")
    })?;

    let (structural, schema) = match kind {
        FileKind::Record(prefix) => (
            registry.validate(prefix, &value),
            EntityKind::from_prefix(prefix).editor_config().schema,
        ),
        FileKind::Profile => (registry.validate_profile(&value), &*PROFILE_SCHEMA),
    };

    let errors = merge_errors(schema, &value, structural);
    Ok((kind, value, errors))
}

fn file_kind(path: &Path, project: &Project, value: &serde_json::Value) -> Option<FileKind> {
    if path.ends_with(project.profile_path().strip_prefix(project.root()).ok()?) {
        return Some(FileKind::Profile);
    }
    let id = value.get("id")?.as_str()?;
    let (prefix, _) = id.split_once('-')?;
    prefix.parse().ok().map(FileKind::Record)
}

/// Field-rule messages first, then structural errors for fields the rules
/// did not already flag
fn merge_errors(
    schema: &ValidationSchema,
    value: &serde_json::Value,
    structural: Vec<String>,
) -> Vec<String> {
    let values: FieldValues = schema
        .field_names()
        .map(|name| {
            let text = value
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            (name.to_string(), text)
        })
        .collect();

    let rule_errors = schema.validate(&values);
    let mut errors: Vec<String> = rule_errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect();

    errors.extend(structural.into_iter().filter(|e| {
        !rule_errors
            .keys()
            .any(|field| e.starts_with(&format!("/{}:", field)) || e.starts_with(&format!("/{} ", field)))
    }));
    errors
}

/// All record files in the project, skipping dot-directories
fn all_record_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') || e.depth() == 0
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().to_string_lossy().ends_with(RECORD_EXTENSION))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}

/// Expand paths - if a directory is given, find all record files in it
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(all_record_files(path));
        } else if path.exists() {
            files.push(path.clone());
        }
    }

    files.sort();
    files
}
