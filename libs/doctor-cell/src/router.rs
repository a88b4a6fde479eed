use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::DepartmentCatalog;

pub fn doctor_routes(catalog: Arc<DepartmentCatalog>) -> Router {
    // Catalog lookups are public and read-only
    Router::new()
        .route("/departments", get(handlers::list_departments))
        .route("/departments/{department}/doctors", get(handlers::get_department_doctors))
        .with_state(catalog)
}
