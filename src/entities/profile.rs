//! Company profile - the organisation that owns the master data

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::entity::{form_map, optional_value_of, value_of};
use crate::schema::rules::{FieldRules, ValidationSchema};
use crate::schema::{EditorConfig, FieldDescriptor, FieldValues};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]{7,20}$").expect("Invalid phone regex"));

static WEBSITE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("Invalid website regex"));

/// At least one way to reach the company
fn has_contact(email: &str, values: &FieldValues) -> bool {
    !email.trim().is_empty() || values.get("phone").is_some_and(|p| !p.trim().is_empty())
}

/// Validation rules for the company profile form
pub static PROFILE_SCHEMA: LazyLock<ValidationSchema> = LazyLock::new(|| {
    ValidationSchema::new(
        "company_profile",
        vec![
            FieldRules::new("company_name")
                .required("Company name is required")
                .min_len(2, "Company name must be at least 2 characters"),
            FieldRules::new("email")
                .pattern(EMAIL_PATTERN.clone(), "Enter a valid email address")
                .custom(has_contact, "Provide an email address or a phone number"),
            FieldRules::new("phone").pattern(
                PHONE_PATTERN.clone(),
                "Phone may contain digits, spaces, +, ( ) and - (7-20 characters)",
            ),
            FieldRules::new("website")
                .pattern(WEBSITE_PATTERN.clone(), "Website must start with http:// or https://"),
            FieldRules::new("address"),
        ],
    )
});

const PROFILE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text("company_name", "Company Name", "Acme Trading Ltd"),
    FieldDescriptor::text("email", "Email", "info@acme.example"),
    FieldDescriptor::text("phone", "Phone", "+31 10 123 4567"),
    FieldDescriptor::text("website", "Website", "https://acme.example"),
    FieldDescriptor::text_area("address", "Address", "Street, city, country"),
];

/// Editor configuration for the company profile page
pub fn profile_editor_config() -> EditorConfig {
    EditorConfig {
        label: "Company Profile",
        description: "Company details printed on documents, plus the company logo.",
        schema: &PROFILE_SCHEMA,
        fields: PROFILE_FIELDS,
    }
}

/// The company profile record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub company_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Logo file name, stored next to the profile file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Last time the profile was saved
    pub updated: DateTime<Utc>,
}

impl CompanyProfile {
    /// Build a profile from validated form values
    pub fn from_values(values: &FieldValues) -> Self {
        Self {
            company_name: value_of(values, "company_name"),
            email: optional_value_of(values, "email"),
            phone: optional_value_of(values, "phone"),
            website: optional_value_of(values, "website"),
            address: optional_value_of(values, "address"),
            logo: None,
            updated: Utc::now(),
        }
    }

    /// Current field values for seeding the profile form
    pub fn form_values(&self) -> FieldValues {
        form_map([
            ("company_name", self.company_name.as_str()),
            ("email", self.email.as_deref().unwrap_or("")),
            ("phone", self.phone.as_deref().unwrap_or("")),
            ("website", self.website.as_deref().unwrap_or("")),
            ("address", self.address.as_deref().unwrap_or("")),
        ])
    }
}
