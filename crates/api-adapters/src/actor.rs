use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use domains::UserId;

use crate::state::AppState;
use crate::ACTOR_HEADER;

/// The user a request acts for: the `x-actor-id` header when present and
/// non-blank, otherwise the configured default actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(pub UserId);

impl FromRequestParts<AppState> for Actor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(UserId::from)
            .unwrap_or_else(|| state.default_actor.clone());
        Ok(Self(id))
    }
}
