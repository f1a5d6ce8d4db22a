use chrono::Utc;
use uuid::Uuid;

use super::access;
use super::validation::{self, Checker, PROJECT_DESCRIPTION_MAX, PROJECT_NAME_MAX};
use crate::error::AppError;
use crate::models::{CreateProject, Project, UpdateProject};
use crate::store::{QuotaOutcome, Store};

/// Number of projects a single user may own at once.
pub const MAX_PROJECTS_PER_OWNER: i64 = 4;

pub async fn list(store: &dyn Store, owner_id: Uuid) -> Result<Vec<Project>, AppError> {
    Ok(store.list_projects_by_owner(owner_id).await?)
}

pub async fn get(store: &dyn Store, id: Uuid, caller_id: Uuid) -> Result<Project, AppError> {
    access::owned_project(store, id, caller_id).await
}

pub async fn create(
    store: &dyn Store,
    owner_id: Uuid,
    req: CreateProject,
) -> Result<Project, AppError> {
    // A token can outlive its user; the owner must exist in every store.
    if store.find_user_by_id(owner_id).await?.is_none() {
        return Err(AppError::Unauthorized("User not found".to_string()));
    }

    let mut checker = Checker::new();
    let name = checker.check(validation::required_text(
        "name",
        "Name",
        req.name.as_deref(),
        PROJECT_NAME_MAX,
        true,
    ));
    let description = checker.check(validation::required_text(
        "description",
        "Description",
        req.description.as_deref(),
        PROJECT_DESCRIPTION_MAX,
        false,
    ));
    checker.finish()?;

    let (Some(name), Some(description)) = (name, description) else {
        return Err(AppError::Internal("validated fields missing".to_string()));
    };

    let project = Project {
        id: Uuid::now_v7(),
        owner_id,
        name,
        description,
        due_date: req.due_date,
        priority: req.priority.unwrap_or_default(),
        category: req.category.unwrap_or_default(),
        created_at: Utc::now(),
    };

    match store
        .insert_project_within_quota(&project, MAX_PROJECTS_PER_OWNER)
        .await?
    {
        QuotaOutcome::Created(project) => {
            tracing::info!(project_id = %project.id, %owner_id, "Project created");
            Ok(project)
        }
        QuotaOutcome::QuotaReached { owned } => {
            tracing::warn!(%owner_id, owned, "Project quota reached");
            Err(AppError::QuotaExceeded(format!(
                "You have reached the maximum limit of {MAX_PROJECTS_PER_OWNER} projects"
            )))
        }
    }
}

/// Applies only the supplied fields. Supplied text fields are validated like
/// on create, so a blank or `null` name is rejected rather than ignored.
pub async fn update(
    store: &dyn Store,
    id: Uuid,
    caller_id: Uuid,
    req: UpdateProject,
) -> Result<Project, AppError> {
    let mut project = access::owned_project(store, id, caller_id).await?;

    let mut checker = Checker::new();
    if let Some(name) = req.name {
        if let Some(name) = checker.check(validation::required_text(
            "name",
            "Name",
            name.as_deref(),
            PROJECT_NAME_MAX,
            true,
        )) {
            project.name = name;
        }
    }
    if let Some(description) = req.description {
        if let Some(description) = checker.check(validation::required_text(
            "description",
            "Description",
            description.as_deref(),
            PROJECT_DESCRIPTION_MAX,
            false,
        )) {
            project.description = description;
        }
    }
    if let Some(priority) = req.priority {
        if let Some(priority) = checker.check(validation::not_null("priority", "Priority", priority)) {
            project.priority = priority;
        }
    }
    if let Some(category) = req.category {
        if let Some(category) = checker.check(validation::not_null("category", "Category", category)) {
            project.category = category;
        }
    }
    checker.finish()?;

    if let Some(due_date) = req.due_date {
        project.due_date = due_date;
    }

    let updated = store
        .update_project(&project)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    tracing::info!(project_id = %updated.id, "Project updated");
    Ok(updated)
}

/// Deletes the project together with all of its tasks.
pub async fn delete(store: &dyn Store, id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
    let project = access::owned_project(store, id, caller_id).await?;
    let removed_tasks = store.delete_project_cascade(project.id).await?;
    tracing::info!(project_id = %project.id, removed_tasks, "Project deleted");
    Ok(())
}
