use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Project, Task};
use crate::store::Store;

/// A caller may act on an entity only if they are its resolved owner.
/// Non-owners get `Forbidden`, distinct from `NotFound`.
pub fn authorize(owner_id: Uuid, caller_id: Uuid, resource: &str) -> Result<(), AppError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        tracing::debug!(%caller_id, resource, "Access denied to resource owned by another user");
        Err(AppError::Forbidden(format!("Not authorized to access this {resource}")))
    }
}

/// Loads a project and checks that `caller_id` owns it.
pub async fn owned_project(
    store: &dyn Store,
    id: Uuid,
    caller_id: Uuid,
) -> Result<Project, AppError> {
    let project = store
        .find_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    authorize(project.owner_id, caller_id, "project")?;
    Ok(project)
}

/// Loads a task and checks ownership through its parent project.
pub async fn owned_task(
    store: &dyn Store,
    id: Uuid,
    caller_id: Uuid,
) -> Result<(Task, Project), AppError> {
    let task = store
        .find_task(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;

    // A task whose project is gone is unreachable; report it as missing.
    let project = store
        .find_project(task.project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;
    authorize(project.owner_id, caller_id, "task")?;
    Ok((task, project))
}
