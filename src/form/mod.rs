//! Form state: controller, lifecycle synchronization and the profile page form

pub mod controller;
pub mod profile;
pub mod sync;

pub use controller::{FormController, FormError};
pub use profile::{ProfileForm, ProfileSubmission};
pub use sync::{should_reinitialize, LifecycleSync, SyncInputs};

use crate::core::entity::Entity;
use crate::schema::FieldValues;

/// Something an editor can be bound to
pub trait Editable {
    /// Stable key identifying the bound record; a change of key reseeds the form
    fn edit_key(&self) -> String;

    /// Values to seed the form with
    fn seed_values(&self) -> FieldValues;
}

impl<T: Entity> Editable for T {
    fn edit_key(&self) -> String {
        self.id().to_string()
    }

    fn seed_values(&self) -> FieldValues {
        self.form_values()
    }
}
