//! File upload validator - accepts image files for use as a logo

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::upload::mime::mime_for_path;
use crate::upload::preview::{PreviewHandle, PreviewRegistry};

/// Largest accepted upload: 2 MiB
pub const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// A file picked by the user, held in memory until saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    contents: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            contents,
        }
    }

    /// Read a file from disk, declaring its MIME type from the extension
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let contents = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, mime_for_path(path), contents))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// Why a selected file was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Please select an image file ({mime_type} is not an image)")]
    NotAnImage { mime_type: String },

    #[error("File size must be 2MB or less ({size} bytes selected)")]
    TooLarge { size: u64 },
}

/// Check a candidate file. Type is checked before size.
pub fn check_file(file: &SelectedFile) -> Result<(), UploadRejection> {
    if !file.mime_type().starts_with("image/") {
        return Err(UploadRejection::NotAnImage {
            mime_type: file.mime_type().to_string(),
        });
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge { size: file.size() });
    }
    Ok(())
}

/// The accepted file and its preview, which always travel together
#[derive(Debug)]
struct Selection {
    file: SelectedFile,
    preview: PreviewHandle,
}

/// Upload state for one file control
///
/// A rejected selection sets `error` but keeps whatever was accepted before.
/// An accepted selection releases the previous preview before minting a new
/// one, so at most one preview is live per control. Dropping the control
/// releases its preview.
#[derive(Debug)]
pub struct FileUpload {
    registry: PreviewRegistry,
    selection: Option<Selection>,
    error: Option<UploadRejection>,
}

impl FileUpload {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            selection: None,
            error: None,
        }
    }

    /// Offer a file; returns the new preview URL if it was accepted
    pub fn select(&mut self, file: SelectedFile) -> Result<&str, UploadRejection> {
        if let Err(rejection) = check_file(&file) {
            tracing::info!(file = file.name(), %rejection, "upload rejected");
            self.error = Some(rejection.clone());
            return Err(rejection);
        }

        // Release the old preview before acquiring the new one
        self.selection = None;
        let preview = self.registry.acquire(file.contents());
        tracing::info!(file = file.name(), size = file.size(), "upload accepted");

        self.error = None;
        let selection = self.selection.insert(Selection { file, preview });
        Ok(selection.preview.url())
    }

    /// Drop the current selection, its preview and any error
    pub fn clear(&mut self) {
        self.selection = None;
        self.error = None;
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selection.as_ref().map(|s| &s.file)
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.preview.url())
    }

    pub fn error(&self) -> Option<&UploadRejection> {
        self.error.as_ref()
    }

    /// Take the accepted file out, releasing its preview
    pub fn into_file(self) -> Option<SelectedFile> {
        self.selection.map(|s| s.file)
    }
}
