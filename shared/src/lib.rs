use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod registration;

pub use registration::{validate, RegistrationForm, SubmitOutcome};

/// Whether the registrant brings a guest. Rendered as the "No"/"Yes" select options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuestAttendance {
    #[default]
    No,
    Yes,
}

impl GuestAttendance {
    /// All selectable values, in the order the select lists them
    pub const ALL: [GuestAttendance; 2] = [GuestAttendance::No, GuestAttendance::Yes];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuestAttendance::No => "No",
            GuestAttendance::Yes => "Yes",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, GuestAttendance::Yes)
    }
}

impl fmt::Display for GuestAttendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuestAttendance {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "No" => Ok(GuestAttendance::No),
            "Yes" => Ok(GuestAttendance::Yes),
            other => Err(RegistrationError::InvalidAttendance(other.to_string())),
        }
    }
}

/// The five inputs of the registration form.
///
/// The textual names double as the `name` attribute of the rendered inputs
/// and as the serialized keys of [`ValidationErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationField {
    Name,
    Email,
    Age,
    AttendingWithGuest,
    GuestName,
}

impl RegistrationField {
    pub const ALL: [RegistrationField; 5] = [
        RegistrationField::Name,
        RegistrationField::Email,
        RegistrationField::Age,
        RegistrationField::AttendingWithGuest,
        RegistrationField::GuestName,
    ];

    /// Input `name` attribute for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationField::Name => "name",
            RegistrationField::Email => "email",
            RegistrationField::Age => "age",
            RegistrationField::AttendingWithGuest => "attendingWithGuest",
            RegistrationField::GuestName => "guestName",
        }
    }

    /// Human-readable label used in front of inputs and summary lines
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationField::Name => "Name",
            RegistrationField::Email => "Email",
            RegistrationField::Age => "Age",
            RegistrationField::AttendingWithGuest => "Attending with Guest",
            RegistrationField::GuestName => "Guest Name",
        }
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationField {
    type Err = RegistrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegistrationField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| RegistrationError::UnknownField(s.to_string()))
    }
}

/// A registration as entered by the user.
///
/// All text is kept exactly as typed; `age` in particular is never
/// normalized, so "007" is stored and displayed as "007".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub name: String,
    pub email: String,
    /// Numeric string, validated but stored verbatim
    pub age: String,
    pub attending_with_guest: GuestAttendance,
    /// Only meaningful when `attending_with_guest` is `Yes`
    pub guest_name: String,
}

impl RegistrationRecord {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.age = age.into();
    }

    pub fn set_attending_with_guest(&mut self, attendance: GuestAttendance) {
        self.attending_with_guest = attendance;
    }

    pub fn set_guest_name(&mut self, guest_name: impl Into<String>) {
        self.guest_name = guest_name.into();
    }

    /// Current value of a field as it would be shown in its input
    pub fn value(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::Name => &self.name,
            RegistrationField::Email => &self.email,
            RegistrationField::Age => &self.age,
            RegistrationField::AttendingWithGuest => self.attending_with_guest.as_str(),
            RegistrationField::GuestName => &self.guest_name,
        }
    }

    /// Guest name is asked for (and required) only for guest attendance
    pub fn requires_guest_name(&self) -> bool {
        self.attending_with_guest.is_yes()
    }

    /// Lines of the post-submission summary, as (label, value) pairs.
    ///
    /// The guest name line is omitted unless the record attends with a guest.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        RegistrationField::ALL
            .into_iter()
            .filter(|field| *field != RegistrationField::GuestName || self.requires_guest_name())
            .map(|field| (field.label(), self.value(field).to_string()))
            .collect()
    }
}

/// A single field validation failure. `Display` yields the inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Email is invalid")]
    EmailInvalid,
    #[error("Age is required")]
    AgeRequired,
    #[error("Age must be a number greater than 0")]
    AgeNotPositive,
    #[error("Guest Name is required")]
    GuestNameRequired,
}

impl FieldError {
    /// The field this error is displayed under
    pub fn field(&self) -> RegistrationField {
        match self {
            FieldError::NameRequired => RegistrationField::Name,
            FieldError::EmailRequired | FieldError::EmailInvalid => RegistrationField::Email,
            FieldError::AgeRequired | FieldError::AgeNotPositive => RegistrationField::Age,
            FieldError::GuestNameRequired => RegistrationField::GuestName,
        }
    }
}

/// Failed fields of one validation pass. Empty means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<RegistrationField, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; it is filed under the field the error belongs to
    pub fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field(), error);
    }

    pub fn get(&self, field: RegistrationField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: RegistrationField) -> bool {
        self.0.contains_key(&field)
    }

    /// Inline message for a field, if it failed
    pub fn message(&self, field: RegistrationField) -> Option<String> {
        self.get(field).map(|error| error.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut errors = ValidationErrors::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

/// Errors raised at the input boundary, before a value reaches the draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("unknown registration field: {0:?}")]
    UnknownField(String),
    #[error("invalid guest attendance value: {0:?} (expected \"Yes\" or \"No\")")]
    InvalidAttendance(String),
}

/// Presentation settings for the registration form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationFormConfig {
    pub form_title: String,
    pub summary_title: String,
    pub submit_label: String,
    pub enable_debug_logging: bool,
}

impl Default for RegistrationFormConfig {
    fn default() -> Self {
        Self {
            form_title: "Event Registration Form".to_string(),
            summary_title: "Form Submitted".to_string(),
            submit_label: "Submit".to_string(),
            enable_debug_logging: false,
        }
    }
}
