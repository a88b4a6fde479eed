use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, instrument};

use crate::models::{DepartmentDoctorsResponse, DepartmentListResponse};
use crate::services::DepartmentCatalog;

#[instrument(skip(catalog))]
pub async fn list_departments(
    State(catalog): State<Arc<DepartmentCatalog>>,
) -> Json<DepartmentListResponse> {
    Json(DepartmentListResponse {
        departments: catalog.entries().to_vec(),
    })
}

/// Roster for one department. Front ends call this on every department change;
/// an unknown department answers with an empty list rather than an error.
#[instrument(skip(catalog))]
pub async fn get_department_doctors(
    State(catalog): State<Arc<DepartmentCatalog>>,
    Path(department): Path<String>,
) -> Json<DepartmentDoctorsResponse> {
    let doctors = catalog.doctors_for(&department).to_vec();

    if doctors.is_empty() {
        debug!("No doctors listed for department '{}'", department);
    }

    Json(DepartmentDoctorsResponse { department, doctors })
}
