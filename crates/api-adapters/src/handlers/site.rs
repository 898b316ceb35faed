//! Site configuration and section handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{FeatureFlag, SectionId, SectionPatch};
use serde::Deserialize;

use crate::actor::Actor;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SitePatch {
    site_name: Option<String>,
    /// A blank value clears the logo.
    logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct AddSectionRequest {
    name: String,
}

#[derive(Deserialize)]
pub struct ReorderSectionsRequest {
    order: Vec<SectionId>,
}

/// GET /api/site - Name, logo and feature flags.
pub async fn get_site_handler(State(state): State<AppState>) -> ApiResult<Response> {
    Ok(Json(state.services.site.settings().await?).into_response())
}

/// PATCH /api/site - Rename the site and/or change its logo.
pub async fn update_site_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(patch): Json<SitePatch>,
) -> ApiResult<Response> {
    let site = &state.services.site;
    let mut settings = site.settings().await?;
    if let Some(name) = patch.site_name {
        settings = site.set_site_name(&actor, &name).await?;
    }
    if let Some(url) = patch.logo_url {
        settings = site.set_logo_url(&actor, Some(url)).await?;
    }
    Ok(Json(settings).into_response())
}

/// POST /api/site/flags/{flag} - Flip one feature flag.
pub async fn toggle_flag_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(flag): Path<String>,
) -> ApiResult<Response> {
    let flag: FeatureFlag = flag.parse()?;
    let enabled = state.services.site.toggle_flag(&actor, flag).await?;
    Ok(Json(serde_json::json!({ "flag": flag, "enabled": enabled })).into_response())
}

/// GET /api/site/sections
pub async fn list_sections_handler(State(state): State<AppState>) -> ApiResult<Response> {
    Ok(Json(state.services.site.sections().await?).into_response())
}

/// POST /api/site/sections
pub async fn add_section_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<AddSectionRequest>,
) -> ApiResult<Response> {
    let section = state.services.site.add_section(&actor, &req.name).await?;
    Ok((StatusCode::CREATED, Json(section)).into_response())
}

/// PUT /api/site/sections - Replace the display order.
pub async fn reorder_sections_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(req): Json<ReorderSectionsRequest>,
) -> ApiResult<Response> {
    let sections = state
        .services
        .site
        .reorder_sections(&actor, req.order)
        .await?;
    Ok(Json(sections).into_response())
}

/// PATCH /api/site/sections/{id}
pub async fn update_section_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<SectionId>,
    Json(patch): Json<SectionPatch>,
) -> ApiResult<Response> {
    let section = state
        .services
        .site
        .update_section(&actor, &id, patch)
        .await?;
    Ok(Json(section).into_response())
}

/// DELETE /api/site/sections/{id}
pub async fn delete_section_handler(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<SectionId>,
) -> ApiResult<Response> {
    state.services.site.delete_section(&actor, &id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
