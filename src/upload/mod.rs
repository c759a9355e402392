//! File upload validation and preview handles

pub mod mime;
pub mod preview;
pub mod validator;

pub use mime::mime_for_path;
pub use preview::{PreviewHandle, PreviewRegistry};
pub use validator::{check_file, FileUpload, SelectedFile, UploadRejection, MAX_UPLOAD_BYTES};
