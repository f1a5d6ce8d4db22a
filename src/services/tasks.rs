use chrono::Utc;
use uuid::Uuid;

use super::access;
use super::validation::{self, Checker, TASK_DESCRIPTION_MAX, TASK_TITLE_MAX};
use crate::error::AppError;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::store::Store;

pub async fn list(
    store: &dyn Store,
    project_id: Uuid,
    caller_id: Uuid,
) -> Result<Vec<Task>, AppError> {
    let project = access::owned_project(store, project_id, caller_id).await?;
    Ok(store.list_tasks_by_project(project.id).await?)
}

pub async fn get(store: &dyn Store, id: Uuid, caller_id: Uuid) -> Result<Task, AppError> {
    let (task, _) = access::owned_task(store, id, caller_id).await?;
    Ok(task)
}

pub async fn create(
    store: &dyn Store,
    project_id: Uuid,
    caller_id: Uuid,
    req: CreateTask,
) -> Result<Task, AppError> {
    let project = access::owned_project(store, project_id, caller_id).await?;

    let mut checker = Checker::new();
    let title = checker.check(validation::required_text(
        "title",
        "Title",
        req.title.as_deref(),
        TASK_TITLE_MAX,
        true,
    ));
    let description = checker.check(validation::required_text(
        "description",
        "Description",
        req.description.as_deref(),
        TASK_DESCRIPTION_MAX,
        false,
    ));
    checker.finish()?;

    let (Some(title), Some(description)) = (title, description) else {
        return Err(AppError::Internal("validated fields missing".to_string()));
    };

    let now = Utc::now();
    let mut task = Task {
        id: Uuid::now_v7(),
        project_id: project.id,
        title,
        description,
        status: Default::default(),
        priority: req.priority.unwrap_or_default(),
        due_date: req.due_date,
        completed_at: None,
        created_at: now,
    };
    task.set_status(req.status.unwrap_or_default(), now);

    let task = store.insert_task(&task).await?;
    tracing::info!(task_id = %task.id, project_id = %project.id, "Task created");
    Ok(task)
}

/// Applies the supplied fields. A status change keeps `completed_at` in step:
/// completing stamps it, leaving `completed` clears it.
pub async fn update(
    store: &dyn Store,
    id: Uuid,
    caller_id: Uuid,
    req: UpdateTask,
) -> Result<Task, AppError> {
    let (mut task, _) = access::owned_task(store, id, caller_id).await?;

    let mut checker = Checker::new();
    if let Some(title) = req.title {
        if let Some(title) = checker.check(validation::required_text(
            "title",
            "Title",
            title.as_deref(),
            TASK_TITLE_MAX,
            true,
        )) {
            task.title = title;
        }
    }
    if let Some(description) = req.description {
        if let Some(description) = checker.check(validation::required_text(
            "description",
            "Description",
            description.as_deref(),
            TASK_DESCRIPTION_MAX,
            false,
        )) {
            task.description = description;
        }
    }
    let status = match req.status {
        Some(status) => checker.check(validation::not_null("status", "Status", status)),
        None => None,
    };
    if let Some(priority) = req.priority {
        if let Some(priority) = checker.check(validation::not_null("priority", "Priority", priority)) {
            task.priority = priority;
        }
    }
    checker.finish()?;

    if let Some(due_date) = req.due_date {
        task.due_date = due_date;
    }
    if let Some(status) = status {
        let previous = task.status;
        task.set_status(status, Utc::now());
        if previous != status {
            tracing::info!(task_id = %task.id, ?previous, ?status, "Task status changed");
        }
    }

    store
        .update_task(&task)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))
}

pub async fn delete(store: &dyn Store, id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
    let (task, _) = access::owned_task(store, id, caller_id).await?;
    if !store.delete_task(task.id).await? {
        return Err(AppError::NotFound("Task not found".to_string()));
    }
    tracing::info!(task_id = %task.id, "Task deleted");
    Ok(())
}
