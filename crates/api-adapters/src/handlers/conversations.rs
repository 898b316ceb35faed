//! Direct messaging handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{ConversationId, UserId};
use serde::Deserialize;

use crate::actor::Actor;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OpenConversationRequest {
    with: UserId,
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
    text: String,
}

/// GET /api/conversations - Conversations the actor takes part in.
pub async fn list_conversations_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> ApiResult<Response> {
    let conversations = state.services.messaging.conversations_for(&actor).await?;
    Ok(Json(conversations).into_response())
}

/// POST /api/conversations - Find or start the conversation with a user.
pub async fn open_conversation_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<OpenConversationRequest>,
) -> ApiResult<Response> {
    let (conversation, created) = state
        .services
        .messaging
        .open_conversation(&actor, &req.with)
        .await?;
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    let body = serde_json::json!({ "conversation": conversation, "created": created });
    Ok((status, Json(body)).into_response())
}

/// POST /api/conversations/{id}/messages
pub async fn send_message_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<ConversationId>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Response> {
    let message = state
        .services
        .messaging
        .send_message(&actor, &id, &req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(message)).into_response())
}
