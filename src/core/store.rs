//! Record store - reading and writing record files in a project

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::entity::Entity;
use crate::core::project::{Project, RECORD_EXTENSION};
use crate::entities::{CompanyProfile, EntityKind};
use crate::schema::{TemplateError, TemplateGenerator};
use crate::yaml::{parse_yaml_file, YamlError};

#[derive(Debug, Error, Diagnostic)]
pub enum RecordError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("no {kind} found matching '{reference}'")]
    #[diagnostic(
        code(mdk::record::not_found),
        help("use a full ID, an ID prefix, or the record's code")
    )]
    NotFound { kind: EntityKind, reference: String },

    #[error("'{reference}' matches more than one {kind}: {}", .candidates.join(", "))]
    #[diagnostic(code(mdk::record::ambiguous))]
    Ambiguous {
        kind: EntityKind,
        reference: String,
        candidates: Vec<String>,
    },

    #[error("code {code} is already used by {id}")]
    #[diagnostic(code(mdk::record::duplicate_code))]
    DuplicateCode { code: String, id: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// A loaded record and the file it came from
#[derive(Debug, Clone)]
pub struct Stored<T> {
    pub record: T,
    pub path: PathBuf,
}

/// Record files of one kind, in directory order
pub fn record_files(project: &Project, kind: EntityKind) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(project.entity_dir(kind))
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(RECORD_EXTENSION))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Load every record of type `T`.
///
/// Unparseable files are skipped with a warning; `mdk validate` reports them.
pub fn load_all<T: Entity>(project: &Project) -> Vec<Stored<T>> {
    let kind = EntityKind::from_prefix(T::PREFIX);
    record_files(project, kind)
        .into_iter()
        .filter_map(|path| match parse_yaml_file::<T>(&path) {
            Ok(record) => Some(Stored { record, path }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable record");
                None
            }
        })
        .collect()
}

/// Find one record by full ID, unique ID prefix, or code (case-insensitive)
pub fn find<T: Entity>(project: &Project, reference: &str) -> Result<Stored<T>, RecordError> {
    let kind = EntityKind::from_prefix(T::PREFIX);
    if reference.trim().is_empty() {
        return Err(RecordError::NotFound {
            kind,
            reference: reference.to_string(),
        });
    }
    let wanted = reference.to_uppercase();

    let mut matches: Vec<Stored<T>> = load_all::<T>(project)
        .into_iter()
        .filter(|s| {
            let id = s.record.id().to_string();
            id == wanted || s.record.code().eq_ignore_ascii_case(reference)
        })
        .collect();

    if matches.is_empty() {
        matches = load_all::<T>(project)
            .into_iter()
            .filter(|s| s.record.id().to_string().starts_with(&wanted))
            .collect();
    }

    match matches.len() {
        0 => Err(RecordError::NotFound {
            kind,
            reference: reference.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(RecordError::Ambiguous {
            kind,
            reference: reference.to_string(),
            candidates: matches.iter().map(|s| s.record.id().to_string()).collect(),
        }),
    }
}

/// Fail if another record of the same type already uses `code`
pub fn ensure_unique_code<T: Entity>(
    project: &Project,
    code: &str,
    except: Option<&str>,
) -> Result<(), RecordError> {
    let clash = load_all::<T>(project).into_iter().find(|s| {
        s.record.code() == code && Some(s.record.id().to_string().as_str()) != except
    });
    match clash {
        Some(s) => Err(RecordError::DuplicateCode {
            code: code.to_string(),
            id: s.record.id().to_string(),
        }),
        None => Ok(()),
    }
}

/// Render a record through its template and write it to its canonical path
pub fn save<T: Entity>(
    project: &Project,
    generator: &TemplateGenerator,
    record: &T,
) -> Result<PathBuf, RecordError> {
    let kind = EntityKind::from_prefix(T::PREFIX);
    let path = project.record_path(kind, record.id());
    save_at(generator, record, &path)?;
    Ok(path)
}

/// Render a record and write it to an existing file location
pub fn save_at<T: Entity>(
    generator: &TemplateGenerator,
    record: &T,
    path: &Path,
) -> Result<(), RecordError> {
    let yaml = generator.render_record(record)?;
    write_file(path, &yaml)?;
    tracing::info!(id = %record.id(), path = %path.display(), "record saved");
    Ok(())
}

/// Load the company profile if one has been saved
pub fn load_profile(project: &Project) -> Result<Option<CompanyProfile>, RecordError> {
    let path = project.profile_path();
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(parse_yaml_file(&path)?))
}

pub fn save_profile(
    project: &Project,
    generator: &TemplateGenerator,
    profile: &CompanyProfile,
) -> Result<PathBuf, RecordError> {
    let path = project.profile_path();
    let yaml = generator.render_profile(profile)?;
    write_file(&path, &yaml)?;
    tracing::info!(path = %path.display(), "profile saved");
    Ok(path)
}

/// Write raw bytes next to the profile (used for the logo)
pub fn save_profile_asset(
    project: &Project,
    name: &str,
    contents: &[u8],
) -> Result<PathBuf, RecordError> {
    let path = project.profile_dir().join(name);
    write_file(&path, contents)?;
    Ok(path)
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), RecordError> {
    let write = || -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|source| RecordError::Write {
        path: path.to_path_buf(),
        source,
    })
}
