// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{error, info, instrument};

use doctor_cell::DepartmentCatalog;
use shared_config::AppConfig;

use crate::models::{AppointmentError, AppointmentRequest, BookingConfirmation, ValidationIssue};
use crate::services::recorder::AppointmentRecorder;
use crate::services::validation::AppointmentValidator;

/// Validate-then-record flow behind the booking form.
#[derive(Debug, Clone)]
pub struct AppointmentBookingService {
    validator: AppointmentValidator,
    recorder: AppointmentRecorder,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig, catalog: Arc<DepartmentCatalog>) -> Self {
        Self::with_components(
            AppointmentValidator::new(catalog),
            AppointmentRecorder::from_config(config),
        )
    }

    pub fn with_components(validator: AppointmentValidator, recorder: AppointmentRecorder) -> Self {
        Self { validator, recorder }
    }

    pub fn validator(&self) -> &AppointmentValidator {
        &self.validator
    }

    pub fn recorder(&self) -> &AppointmentRecorder {
        &self.recorder
    }

    /// Dry run against today's date; nothing is written.
    pub fn check(&self, request: &AppointmentRequest) -> Vec<ValidationIssue> {
        self.validator.validate(request, Local::now().date_naive())
    }

    pub fn book(&self, request: AppointmentRequest) -> Result<BookingConfirmation, AppointmentError> {
        self.book_at(request, Local::now().naive_local())
    }

    #[instrument(skip(self, request), fields(department = %request.department))]
    pub fn book_at(
        &self,
        request: AppointmentRequest,
        now: NaiveDateTime,
    ) -> Result<BookingConfirmation, AppointmentError> {
        let accepted = self.validator.accept(request, now.date()).map_err(|issues| {
            info!("Appointment request rejected with {} issue(s)", issues.len());
            AppointmentError::Validation(issues)
        })?;

        let record_id = self.recorder.record_at(&accepted, now).map_err(|e| {
            error!("Failed to store appointment record: {}", e);
            e
        })?;

        info!(
            "Appointment booked with {} on {} at {}",
            accepted.doctor(),
            accepted.appointment_date(),
            accepted.appointment_time()
        );

        Ok(BookingConfirmation::new(record_id, &accepted))
    }
}
