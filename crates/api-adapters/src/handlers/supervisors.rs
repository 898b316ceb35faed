//! Supervisor management. Every mutation is admin-only; the services
//! enforce that.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{DomainError, PermissionsPatch, UserId};
use serde::Deserialize;

use crate::actor::Actor;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AddSupervisorRequest {
    user_id: UserId,
}

/// GET /api/supervisors
pub async fn list_supervisors_handler(State(state): State<AppState>) -> ApiResult<Response> {
    Ok(Json(state.services.supervisors.list().await?).into_response())
}

/// POST /api/supervisors - Appoint a user; repeating it changes nothing.
pub async fn add_supervisor_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<AddSupervisorRequest>,
) -> ApiResult<Response> {
    let (supervisor, added) = state
        .services
        .supervisors
        .add(&actor, &req.user_id)
        .await?;
    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(supervisor)).into_response())
}

/// PATCH /api/supervisors/{user_id} - Set individual permission flags.
pub async fn update_permissions_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(user_id): Path<UserId>,
    Json(patch): Json<PermissionsPatch>,
) -> ApiResult<Response> {
    let permissions = state
        .services
        .supervisors
        .update_permissions(&actor, &user_id, patch)
        .await?;
    Ok(Json(serde_json::json!({ "user_id": user_id, "permissions": permissions })).into_response())
}

/// DELETE /api/supervisors/{user_id}
pub async fn remove_supervisor_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(user_id): Path<UserId>,
) -> ApiResult<Response> {
    if !state.services.supervisors.remove(&actor, &user_id).await? {
        return Err(DomainError::not_found("Supervisor", &user_id).into());
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
