use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use doctor_cell::{router::doctor_routes, DepartmentCatalog};
use shared_config::AppConfig;

pub fn create_router(config: Arc<AppConfig>, catalog: Arc<DepartmentCatalog>) -> Router {
    Router::new()
        .route("/", get(|| async { "Appointment booking API is running!" }))
        .nest("/doctors", doctor_routes(catalog.clone()))
        .nest("/appointments", appointment_routes(config, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use shared_utils::test_utils::TestConfig;

    fn app(config: &TestConfig) -> Router {
        create_router(config.to_arc(), Arc::new(DepartmentCatalog::default()))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let config = TestConfig::default();
        let (status, body) = get(app(&config), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Appointment booking API is running!");
    }

    #[tokio::test]
    async fn test_cells_are_mounted() {
        let config = TestConfig::default();

        let (status, body) = get(app(&config), "/doctors/departments").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["departments"].as_array().unwrap().len(), 7);

        let (status, body) = get(app(&config), "/appointments/time-slots").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["time_slots"].as_array().unwrap().len(), 18);
    }
}
