use axum::response::IntoResponse;
use axum::Json;

/// GET /health - Liveness probe.
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
