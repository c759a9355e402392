//! YAML error types with source spans for miette

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(YamlSyntaxError),

    #[error("failed to read file: {0}")]
    #[diagnostic(code(mdk::yaml::io))]
    Io(#[from] std::io::Error),
}

/// A parse failure pointing at the offending spot in the file
#[derive(Debug, Error, Diagnostic)]
#[error("invalid YAML: {message}")]
#[diagnostic(
    code(mdk::yaml::syntax),
    help("check indentation and quoting near the highlighted position")
)]
pub struct YamlSyntaxError {
    message: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = err.location().map(|loc| {
            // Point at one character, clamped to the source
            let offset = loc.index().min(content.len().saturating_sub(1));
            SourceSpan::from((offset, 1))
        });

        Self {
            message: err.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
