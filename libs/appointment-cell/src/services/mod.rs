pub mod booking;
pub mod recorder;
pub mod validation;

pub use booking::AppointmentBookingService;
pub use recorder::{record_file_name, AppointmentRecorder};
pub use validation::{validate_email, validate_phone, AppointmentValidator};
