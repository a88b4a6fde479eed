pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export commonly used types
pub use models::{
    appointment_time_slots, AcceptedAppointment, AppointmentError, AppointmentRecord,
    AppointmentRequest, BookingConfirmation, FormField, RecordId, StorageError,
    ValidationIssue, ValidationReport,
};

pub use services::{
    record_file_name, validate_email, validate_phone, AppointmentBookingService,
    AppointmentRecorder, AppointmentValidator,
};

pub use router::appointment_routes;
