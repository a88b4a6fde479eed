// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::instrument;

use shared_models::error::AppError;
use shared_utils::extractor::AppJson;

use crate::models::{appointment_time_slots, AppointmentRequest, ValidationReport};
use crate::services::booking::AppointmentBookingService;

pub async fn get_time_slots() -> Json<Value> {
    Json(json!({
        "time_slots": appointment_time_slots()
    }))
}

/// Dry run used by forms for inline feedback; never persists anything.
#[instrument(skip(service, request))]
pub async fn validate_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    AppJson(request): AppJson<AppointmentRequest>,
) -> Json<ValidationReport> {
    let issues = service.check(&request);
    Json(ValidationReport::from_issues(&issues))
}

#[instrument(skip(service, request))]
pub async fn book_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    AppJson(request): AppJson<AppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    // The record write is blocking file I/O
    let confirmation = tokio::task::spawn_blocking(move || service.book(request))
        .await
        .map_err(|e| AppError::Internal(format!("Booking task failed: {}", e)))?
        .map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": confirmation.message,
            "appointment": confirmation,
        })),
    ))
}
