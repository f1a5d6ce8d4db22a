use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Task, TaskStatus};
use crate::store::TaskCounts;

pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE project_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &PgPool, task: &Task) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, project_id, title, description, status, priority, due_date, completed_at, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(task.id)
    .bind(task.project_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.due_date)
    .bind(task.completed_at)
    .bind(task.created_at)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, task: &Task) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks SET title = $2, description = $3, status = $4, priority = $5,
                due_date = $6, completed_at = $7
         WHERE id = $1 RETURNING *",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.due_date)
    .bind(task.completed_at)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_by_project<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
        .bind(project_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_by_project(pool: &PgPool, project_id: Uuid) -> Result<TaskCounts, sqlx::Error> {
    let (total, completed): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = $2) FROM tasks WHERE project_id = $1",
    )
    .bind(project_id)
    .bind(TaskStatus::Completed)
    .fetch_one(pool)
    .await?;
    Ok(TaskCounts { total, completed })
}
