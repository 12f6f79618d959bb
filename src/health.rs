use axum::http::StatusCode;
use axum::Extension;

use crate::service::StudentService;

pub const STORE_UP: &str = "Connected to the student store successfully!";
pub const STORE_DOWN: &str = "Could not connect to the student store";

pub async fn check_store(Extension(students): Extension<StudentService>) -> (StatusCode, &'static str) {
    match students.check_store().await {
        Ok(()) => (StatusCode::OK, STORE_UP),
        Err(err) => {
            log::error!("Store health check failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, STORE_DOWN)
        }
    }
}
