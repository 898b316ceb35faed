//! Feed and post handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{Engagement, NewPost, PostId};
use serde::Deserialize;
use tracing::debug;

use crate::actor::Actor;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FeedQuery {
    category: Option<String>,
}

#[derive(Deserialize)]
pub struct BidRequest {
    amount: f64,
}

/// GET /api/feed - The threaded feed, optionally narrowed to one category.
pub async fn feed_handler(
    State(state): State<AppState>,
    Query(params): Query<FeedQuery>,
) -> ApiResult<Response> {
    let category = params.category.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let posts = state.services.feed.feed(category).await?;
    debug!(?category, count = posts.len(), "feed served");
    Ok(Json(posts).into_response())
}

/// POST /api/posts - Compose a post or a reply.
pub async fn create_post_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(new): Json<NewPost>,
) -> ApiResult<Response> {
    let (post, placement) = state.services.feed.create_post(&actor, new).await?;
    let body = serde_json::json!({ "post": post, "placement": placement });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// GET /api/posts/{id} - A post with its direct replies.
pub async fn thread_handler(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Response> {
    let (post, replies) = state.services.feed.thread(&id).await?;
    Ok(Json(serde_json::json!({ "post": post, "replies": replies })).into_response())
}

/// DELETE /api/posts/{id}
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<PostId>,
) -> ApiResult<Response> {
    let deleted = state.services.feed.delete_post(&actor, &id).await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })).into_response())
}

/// POST /api/posts/{id}/status - Flip between active and inactive.
pub async fn toggle_status_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<PostId>,
) -> ApiResult<Response> {
    let status = state.services.feed.toggle_status(&actor, &id).await?;
    Ok(Json(serde_json::json!({ "id": id, "status": status })).into_response())
}

/// POST /api/posts/{id}/bids
pub async fn place_bid_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<PostId>,
    Json(req): Json<BidRequest>,
) -> ApiResult<Response> {
    let auction = state.services.feed.place_bid(&actor, &id, req.amount).await?;
    Ok(Json(serde_json::json!({ "id": id, "auction": auction })).into_response())
}

/// POST /api/posts/{id}/like
pub async fn like_handler(
    state: State<AppState>,
    actor: Actor,
    id: Path<PostId>,
) -> ApiResult<Response> {
    toggle_engagement(state, actor, id, Engagement::Like).await
}

/// POST /api/posts/{id}/retweet
pub async fn retweet_handler(
    state: State<AppState>,
    actor: Actor,
    id: Path<PostId>,
) -> ApiResult<Response> {
    toggle_engagement(state, actor, id, Engagement::Retweet).await
}

async fn toggle_engagement(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<PostId>,
    kind: Engagement,
) -> ApiResult<Response> {
    let (active, stats) = state
        .services
        .feed
        .toggle_engagement(&actor, &id, kind)
        .await?;
    Ok(Json(serde_json::json!({
        "id": id,
        "kind": kind,
        "active": active,
        "stats": stats,
    }))
    .into_response())
}
