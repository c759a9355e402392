//! Company profile page form: profile fields plus a logo upload

use crate::entities::profile::PROFILE_SCHEMA;
use crate::entities::CompanyProfile;
use crate::form::controller::{FormController, FormError};
use crate::schema::{FieldErrors, FieldValues};
use crate::upload::{FileUpload, PreviewRegistry, SelectedFile, UploadRejection};

/// What a successful profile submit hands back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSubmission {
    pub values: FieldValues,
    /// Newly accepted logo, if one was selected
    pub logo: Option<SelectedFile>,
}

/// The profile page form
///
/// Unlike the entity drawers this is a page: it is seeded once from the
/// stored profile and stays mounted after a save.
#[derive(Debug)]
pub struct ProfileForm {
    controller: FormController,
    logo: FileUpload,
}

impl ProfileForm {
    pub fn new(existing: Option<&CompanyProfile>, registry: PreviewRegistry) -> Self {
        let mut controller = FormController::new(&PROFILE_SCHEMA);
        if let Some(profile) = existing {
            controller.initialize(&profile.form_values());
        }

        Self {
            controller,
            logo: FileUpload::new(registry),
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.controller.set_field(name, value)
    }

    pub fn select_logo(&mut self, file: SelectedFile) -> Result<&str, UploadRejection> {
        self.logo.select(file)
    }

    pub fn clear_logo(&mut self) {
        self.logo.clear();
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn logo(&self) -> &FileUpload {
        &self.logo
    }

    /// Validate the profile fields; upload errors do not block a save
    pub fn submit(&mut self) -> Result<ProfileSubmission, FieldErrors> {
        let values = self.controller.submit()?;
        Ok(ProfileSubmission {
            values,
            logo: self.logo.selected_file().cloned(),
        })
    }
}
