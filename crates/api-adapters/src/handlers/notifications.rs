//! Notification handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/notifications - Every notification plus the unread count.
pub async fn list_notifications_handler(State(state): State<AppState>) -> ApiResult<Response> {
    let service = &state.services.notifications;
    let notifications = service.list().await?;
    let unread = notifications.iter().filter(|n| !n.is_read).count();
    Ok(Json(serde_json::json!({
        "notifications": notifications,
        "unread": unread,
    }))
    .into_response())
}

/// POST /api/notifications/read-all - Mark all notifications as read.
pub async fn mark_all_read_handler(State(state): State<AppState>) -> ApiResult<Response> {
    let service = &state.services.notifications;
    let marked = service.mark_all_read().await?;
    let unread = service.unread_count().await?;
    Ok(Json(serde_json::json!({ "marked": marked, "unread": unread })).into_response())
}
