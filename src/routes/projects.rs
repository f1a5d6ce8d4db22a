use axum::extract::{Path, State};
use axum::Json;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::{CreateProject, Project, ProjectView, UpdateProject};
use crate::services::{aggregation, projects};
use crate::state::SharedState;

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<ProjectView>>, AppError> {
    let views = aggregation::list_projects_with_counts(state.store.as_ref(), auth.user_id).await?;
    Ok(Json(views))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateProject>,
) -> Result<Json<Project>, AppError> {
    let project = projects::create(state.store.as_ref(), auth.user_id, req).await?;
    Ok(Json(project))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    let project = projects::get(state.store.as_ref(), id, auth.user_id).await?;
    Ok(Json(project))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<Project>, AppError> {
    let project = projects::update(state.store.as_ref(), id, auth.user_id, req).await?;
    Ok(Json(project))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    projects::delete(state.store.as_ref(), id, auth.user_id).await?;
    Ok(Json(json!({ "message": "Project removed" })))
}
