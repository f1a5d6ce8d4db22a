use axum::extract::{Path, State};
use axum::Json;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::services::tasks;
use crate::state::SharedState;

pub async fn list_by_project(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = tasks::list(state.store.as_ref(), project_id, auth.user_id).await?;
    Ok(Json(tasks))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<CreateTask>,
) -> Result<Json<Task>, AppError> {
    let task = tasks::create(state.store.as_ref(), project_id, auth.user_id, req).await?;
    Ok(Json(task))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, AppError> {
    let task = tasks::get(state.store.as_ref(), id, auth.user_id).await?;
    Ok(Json(task))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTask>,
) -> Result<Json<Task>, AppError> {
    let task = tasks::update(state.store.as_ref(), id, auth.user_id, req).await?;
    Ok(Json(task))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    tasks::delete(state.store.as_ref(), id, auth.user_id).await?;
    Ok(Json(json!({ "message": "Task removed" })))
}
