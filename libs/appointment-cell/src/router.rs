// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use doctor_cell::DepartmentCatalog;
use shared_config::AppConfig;

use crate::handlers;
use crate::services::booking::AppointmentBookingService;

pub fn appointment_routes(config: Arc<AppConfig>, catalog: Arc<DepartmentCatalog>) -> Router {
    let service = Arc::new(AppointmentBookingService::new(&config, catalog));

    // No authentication: the booking form is public
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/validate", post(handlers::validate_appointment))
        .route("/time-slots", get(handlers::get_time_slots))
        .with_state(service)
}
