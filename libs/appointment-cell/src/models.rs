// libs/appointment-cell/src/models.rs
use std::fmt;
use std::io;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use shared_models::error::{AppError, FieldError};

/// Longest accepted value for the name and email fields, in characters.
pub const MAX_TEXT_LENGTH: usize = 50;

/// Bookable start times: every half hour from 09:00 through 17:30.
pub static APPOINTMENT_TIME_SLOTS: Lazy<Vec<String>> = Lazy::new(|| {
    (9..18)
        .flat_map(|hour| [0, 30].map(|minute| format!("{hour:02}:{minute:02}")))
        .collect()
});

pub fn appointment_time_slots() -> &'static [String] {
    &APPOINTMENT_TIME_SLOTS
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Field values submitted by a booking form, before validation.
///
/// Every key is optional on the wire; a missing key deserializes to its empty
/// value so the validator can report it instead of the request being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentRequest {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    #[serde(deserialize_with = "blank_date_as_none")]
    pub birth_date: Option<NaiveDate>,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub doctor: String,
    #[serde(deserialize_with = "blank_date_as_none")]
    pub appointment_date: Option<NaiveDate>,
    pub appointment_time: String,
    pub urgent: bool,
    pub first_visit: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    pub consent: bool,
}

impl Default for AppointmentRequest {
    fn default() -> Self {
        Self {
            last_name: String::new(),
            first_name: String::new(),
            middle_name: String::new(),
            birth_date: None,
            phone: String::new(),
            email: String::new(),
            department: String::new(),
            doctor: String::new(),
            appointment_date: None,
            appointment_time: String::new(),
            urgent: false,
            first_visit: true,
            reason: String::new(),
            insurance: None,
            policy_number: None,
            consent: false,
        }
    }
}

fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A request that passed validation. Only the validator constructs these,
/// and the recorder only accepts these.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedAppointment {
    pub(crate) request: AppointmentRequest,
    pub(crate) birth_date: NaiveDate,
    pub(crate) appointment_date: NaiveDate,
}

impl AcceptedAppointment {
    pub fn request(&self) -> &AppointmentRequest {
        &self.request
    }

    pub fn last_name(&self) -> &str {
        &self.request.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.request.first_name
    }

    pub fn department(&self) -> &str {
        &self.request.department
    }

    pub fn doctor(&self) -> &str {
        &self.request.doctor
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn appointment_date(&self) -> NaiveDate {
        self.appointment_date
    }

    pub fn appointment_time(&self) -> &str {
        &self.request.appointment_time
    }
}

// ==============================================================================
// PERSISTED MODELS
// ==============================================================================

/// On-disk form of an accepted appointment. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub doctor: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub urgent: bool,
    pub first_visit: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
    pub created_at: NaiveDateTime,
}

impl AppointmentRecord {
    pub fn new(accepted: &AcceptedAppointment, created_at: NaiveDateTime) -> Self {
        let request = &accepted.request;
        Self {
            last_name: request.last_name.clone(),
            first_name: request.first_name.clone(),
            middle_name: request.middle_name.clone(),
            birth_date: accepted.birth_date,
            phone: request.phone.clone(),
            email: request.email.clone(),
            department: request.department.clone(),
            doctor: request.doctor.clone(),
            appointment_date: accepted.appointment_date,
            appointment_time: request.appointment_time.clone(),
            urgent: request.urgent,
            first_visit: request.first_visit,
            reason: request.reason.clone(),
            insurance: request.insurance.clone(),
            policy_number: request.policy_number.clone(),
            created_at,
        }
    }
}

/// File name of a stored record, e.g. `Ivanov_Ivan_20240115143022.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub(crate) fn new(file_name: String) -> Self {
        Self(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub record_id: RecordId,
    pub department: String,
    pub doctor: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub urgent: bool,
    pub message: String,
}

impl BookingConfirmation {
    pub fn new(record_id: RecordId, accepted: &AcceptedAppointment) -> Self {
        Self {
            record_id,
            department: accepted.department().to_string(),
            doctor: accepted.doctor().to_string(),
            appointment_date: accepted.appointment_date,
            appointment_time: accepted.appointment_time().to_string(),
            urgent: accepted.request.urgent,
            message: format!(
                "Ви успішно записані на прийом до лікаря {} на {} о {}!",
                accepted.doctor(),
                accepted.appointment_date,
                accepted.appointment_time()
            ),
        }
    }
}

/// Result of a dry-run validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        Self {
            valid: issues.is_empty(),
            errors: issues.iter().map(FieldError::from).collect(),
        }
    }
}

// ==============================================================================
// VALIDATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    LastName,
    FirstName,
    MiddleName,
    BirthDate,
    Phone,
    Email,
    Department,
    Doctor,
    AppointmentDate,
    AppointmentTime,
    Reason,
}

impl FormField {
    /// JSON key of the field in requests and records.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::LastName => "last_name",
            FormField::FirstName => "first_name",
            FormField::MiddleName => "middle_name",
            FormField::BirthDate => "birth_date",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::Department => "department",
            FormField::Doctor => "doctor",
            FormField::AppointmentDate => "appointment_date",
            FormField::AppointmentTime => "appointment_time",
            FormField::Reason => "reason",
        }
    }

    /// Label shown next to the field on the form.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::LastName => "Прізвище",
            FormField::FirstName => "Ім'я",
            FormField::MiddleName => "По батькові",
            FormField::BirthDate => "Дата народження",
            FormField::Phone => "Телефон",
            FormField::Email => "Email",
            FormField::Department => "Відділення",
            FormField::Doctor => "Лікар",
            FormField::AppointmentDate => "Дата прийому",
            FormField::AppointmentTime => "Час прийому",
            FormField::Reason => "Причина звернення",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One broken rule. Display text is the message shown to the patient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Поле '{0}' є обов'язковим")]
    MissingField(FormField),

    #[error("Поле '{field}' не може бути довшим за {max} символів")]
    FieldTooLong { field: FormField, max: usize },

    #[error("Дата народження має бути між 1900-01-01 та сьогоднішнім днем")]
    BirthDateOutOfRange,

    #[error("Невідоме відділення '{0}'")]
    UnknownDepartment(String),

    #[error("Лікар '{doctor}' не приймає у відділенні '{department}'")]
    DoctorNotInDepartment { department: String, doctor: String },

    #[error("Дата прийому має бути пізніше сьогоднішнього дня")]
    AppointmentDateNotInFuture,

    #[error("Час прийому '{0}' недоступний")]
    InvalidTimeSlot(String),

    #[error("Некоректний формат email")]
    InvalidEmail,

    #[error("Некоректний формат телефону")]
    InvalidPhone,

    #[error("Необхідна згода на обробку даних")]
    ConsentRequired,
}

impl ValidationIssue {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::MissingField(_) => "missing_field",
            ValidationIssue::FieldTooLong { .. } => "field_too_long",
            ValidationIssue::BirthDateOutOfRange => "birth_date_out_of_range",
            ValidationIssue::UnknownDepartment(_) => "unknown_department",
            ValidationIssue::DoctorNotInDepartment { .. } => "doctor_not_in_department",
            ValidationIssue::AppointmentDateNotInFuture => "appointment_date_not_in_future",
            ValidationIssue::InvalidTimeSlot(_) => "invalid_time_slot",
            ValidationIssue::InvalidEmail => "invalid_email",
            ValidationIssue::InvalidPhone => "invalid_phone",
            ValidationIssue::ConsentRequired => "consent_required",
        }
    }

    pub fn field(&self) -> Option<FormField> {
        match self {
            ValidationIssue::MissingField(field) => Some(*field),
            ValidationIssue::FieldTooLong { field, .. } => Some(*field),
            ValidationIssue::BirthDateOutOfRange => Some(FormField::BirthDate),
            ValidationIssue::UnknownDepartment(_) => Some(FormField::Department),
            ValidationIssue::DoctorNotInDepartment { .. } => Some(FormField::Doctor),
            ValidationIssue::AppointmentDateNotInFuture => Some(FormField::AppointmentDate),
            ValidationIssue::InvalidTimeSlot(_) => Some(FormField::AppointmentTime),
            ValidationIssue::InvalidEmail => Some(FormField::Email),
            ValidationIssue::InvalidPhone => Some(FormField::Phone),
            ValidationIssue::ConsentRequired => None,
        }
    }
}

impl From<&ValidationIssue> for FieldError {
    fn from(issue: &ValidationIssue) -> Self {
        FieldError {
            code: issue.code().to_string(),
            field: issue.field().map(|field| field.key().to_string()),
            message: issue.to_string(),
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Не вдалося створити каталог {}: {source}", .path.display())]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("Не вдалося записати файл {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Не вдалося підготувати запис: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    /// Cause of the failure without server-side paths.
    pub fn client_message(&self) -> String {
        match self {
            StorageError::CreateDirectory { source, .. } | StorageError::Write { source, .. } => {
                source.to_string()
            }
            StorageError::Serialize(source) => source.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Appointment request rejected with {} validation issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AppointmentError> for AppError {
    fn from(error: AppointmentError) -> Self {
        match error {
            AppointmentError::Validation(issues) => {
                AppError::Validation(issues.iter().map(FieldError::from).collect())
            }
            AppointmentError::Storage(error) => {
                tracing::error!("Appointment storage failed: {}", error);
                AppError::Storage(error.client_message())
            }
        }
    }
}
