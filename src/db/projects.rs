use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Project;

pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_by_owner<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    owner_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

/// Serializes quota checks for one owner until the surrounding transaction ends.
pub async fn lock_owner<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    owner_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(owner_id.to_string())
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project: &Project,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (id, owner_id, name, description, due_date, priority, category, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(project.id)
    .bind(project.owner_id)
    .bind(&project.name)
    .bind(&project.description)
    .bind(project.due_date)
    .bind(project.priority)
    .bind(project.category)
    .bind(project.created_at)
    .fetch_one(executor)
    .await
}

pub async fn update(pool: &PgPool, project: &Project) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET name = $2, description = $3, due_date = $4, priority = $5, category = $6
         WHERE id = $1 RETURNING *",
    )
    .bind(project.id)
    .bind(&project.name)
    .bind(&project.description)
    .bind(project.due_date)
    .bind(project.priority)
    .bind(project.category)
    .fetch_optional(pool)
    .await
}

pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
