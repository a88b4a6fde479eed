// libs/appointment-cell/src/services/validation.rs
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use doctor_cell::DepartmentCatalog;

use crate::models::{
    AcceptedAppointment, AppointmentRequest, FormField, ValidationIssue,
    APPOINTMENT_TIME_SLOTS, MAX_TEXT_LENGTH,
};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+\-]+@[a-zA-Z0-9\-]+\.[a-zA-Z0-9\-.]+$")
        .expect("email pattern is a valid regex")
});

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;
const EARLIEST_BIRTH_YEAR: i32 = 1900;

/// Email is optional: `None` and blank strings pass. Anything else must match
/// the pattern as written, surrounding whitespace included.
pub fn validate_email(email: Option<&str>) -> bool {
    match email {
        None => true,
        Some(email) if is_blank(email) => true,
        Some(email) => EMAIL_PATTERN.is_match(email),
    }
}

/// Counts Unicode digits, so separators and a leading `+` are ignored.
pub fn validate_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_numeric()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks a submitted form against the booking rules.
///
/// Every rule runs on every call; the caller gets the full list of problems
/// so the form can show them all at once. Validation never touches storage.
#[derive(Debug, Clone)]
pub struct AppointmentValidator {
    catalog: Arc<DepartmentCatalog>,
}

impl AppointmentValidator {
    pub fn new(catalog: Arc<DepartmentCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DepartmentCatalog {
        &self.catalog
    }

    #[instrument(skip(self, request))]
    pub fn validate(&self, request: &AppointmentRequest, today: NaiveDate) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        self.check_required_fields(request, &mut issues);
        self.check_lengths(request, &mut issues);
        self.check_birth_date(request, today, &mut issues);
        self.check_department_and_doctor(request, &mut issues);
        self.check_appointment_slot(request, today, &mut issues);

        if !validate_email(Some(request.email.as_str())) {
            issues.push(ValidationIssue::InvalidEmail);
        }

        if !validate_phone(&request.phone) {
            issues.push(ValidationIssue::InvalidPhone);
        }

        if !request.consent {
            issues.push(ValidationIssue::ConsentRequired);
        }

        debug!("Appointment request produced {} validation issue(s)", issues.len());
        issues
    }

    /// Validate and, when nothing is wrong, hand back the request in the only
    /// form the recorder will persist.
    pub fn accept(
        &self,
        request: AppointmentRequest,
        today: NaiveDate,
    ) -> Result<AcceptedAppointment, Vec<ValidationIssue>> {
        let issues = self.validate(&request, today);

        match (request.birth_date, request.appointment_date) {
            (Some(birth_date), Some(appointment_date)) if issues.is_empty() => {
                Ok(AcceptedAppointment {
                    request,
                    birth_date,
                    appointment_date,
                })
            }
            // A missing date is always among the reported issues
            _ => Err(issues),
        }
    }

    fn check_required_fields(&self, request: &AppointmentRequest, issues: &mut Vec<ValidationIssue>) {
        let required = [
            (FormField::LastName, is_blank(&request.last_name)),
            (FormField::FirstName, is_blank(&request.first_name)),
            (FormField::BirthDate, request.birth_date.is_none()),
            (FormField::Phone, is_blank(&request.phone)),
            (FormField::Department, is_blank(&request.department)),
            (FormField::Doctor, is_blank(&request.doctor)),
            (FormField::AppointmentDate, request.appointment_date.is_none()),
            (FormField::AppointmentTime, is_blank(&request.appointment_time)),
            (FormField::Reason, is_blank(&request.reason)),
        ];

        issues.extend(
            required
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(field, _)| ValidationIssue::MissingField(field)),
        );
    }

    fn check_lengths(&self, request: &AppointmentRequest, issues: &mut Vec<ValidationIssue>) {
        let bounded = [
            (FormField::LastName, &request.last_name),
            (FormField::FirstName, &request.first_name),
            (FormField::MiddleName, &request.middle_name),
            (FormField::Email, &request.email),
        ];

        for (field, value) in bounded {
            if value.chars().count() > MAX_TEXT_LENGTH {
                issues.push(ValidationIssue::FieldTooLong {
                    field,
                    max: MAX_TEXT_LENGTH,
                });
            }
        }
    }

    fn check_birth_date(
        &self,
        request: &AppointmentRequest,
        today: NaiveDate,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(birth_date) = request.birth_date {
            if birth_date.year() < EARLIEST_BIRTH_YEAR || birth_date > today {
                issues.push(ValidationIssue::BirthDateOutOfRange);
            }
        }
    }

    fn check_department_and_doctor(
        &self,
        request: &AppointmentRequest,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if is_blank(&request.department) {
            return;
        }

        if !self.catalog.has_department(&request.department) {
            issues.push(ValidationIssue::UnknownDepartment(request.department.clone()));
            return;
        }

        if !is_blank(&request.doctor)
            && !self.catalog.has_doctor(&request.department, &request.doctor)
        {
            issues.push(ValidationIssue::DoctorNotInDepartment {
                department: request.department.clone(),
                doctor: request.doctor.clone(),
            });
        }
    }

    fn check_appointment_slot(
        &self,
        request: &AppointmentRequest,
        today: NaiveDate,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if let Some(appointment_date) = request.appointment_date {
            if appointment_date <= today {
                issues.push(ValidationIssue::AppointmentDateNotInFuture);
            }
        }

        let time = &request.appointment_time;
        if !is_blank(time) && !APPOINTMENT_TIME_SLOTS.iter().any(|slot| slot == time) {
            issues.push(ValidationIssue::InvalidTimeSlot(time.clone()));
        }
    }
}
