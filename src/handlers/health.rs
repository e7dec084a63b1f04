// src/handlers/health.rs

use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health_check() -> impl IntoResponse {
    "OK"
}
