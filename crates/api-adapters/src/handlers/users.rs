//! User profile and relationship handlers.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{UserId, UserPatch};

use crate::actor::Actor;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users_handler(State(state): State<AppState>) -> ApiResult<Response> {
    Ok(Json(state.services.users.list().await?).into_response())
}

/// GET /api/users/{id} - The profile plus whether the actor follows it.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<UserId>,
) -> ApiResult<Response> {
    let users = &state.services.users;
    let user = users.get(&id).await?;
    let followed = users.is_following(&actor, &id).await?;
    Ok(Json(serde_json::json!({ "user": user, "followed_by_actor": followed })).into_response())
}

/// PATCH /api/users/{id} - Partial profile update.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatch>,
) -> ApiResult<Response> {
    let user = state.services.users.update(&actor, &id, patch).await?;
    Ok(Json(user).into_response())
}

/// POST /api/users/{id}/ban - Toggle the ban flag.
pub async fn toggle_ban_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<UserId>,
) -> ApiResult<Response> {
    let is_banned = state.services.users.toggle_ban(&actor, &id).await?;
    Ok(Json(serde_json::json!({ "id": id, "is_banned": is_banned })).into_response())
}

/// POST /api/users/{id}/follow - Follow or unfollow on behalf of the actor.
pub async fn toggle_follow_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<UserId>,
) -> ApiResult<Response> {
    let outcome = state.services.users.toggle_follow(&actor, &id).await?;
    Ok(Json(outcome).into_response())
}

/// POST /api/users/{id}/whatsapp - Toggle WhatsApp contact for the user.
pub async fn toggle_whatsapp_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<UserId>,
) -> ApiResult<Response> {
    let enabled = state.services.users.toggle_whatsapp(&actor, &id).await?;
    Ok(Json(serde_json::json!({ "id": id, "whatsapp_enabled": enabled })).into_response())
}

/// GET /api/users/{id}/posts
pub async fn user_posts_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> ApiResult<Response> {
    Ok(Json(state.services.feed.posts_by(&id).await?).into_response())
}
