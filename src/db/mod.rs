pub mod projects;
pub mod tasks;
pub mod users;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Project, Task, User};
use crate::store::{QuotaOutcome, Store, StoreError, StoreResult, TaskCounts};

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: &User) -> StoreResult<User> {
        users::create(&self.pool, user).await.map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict("Email already exists".to_string())
            }
            _ => StoreError::Database(e),
        })
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(users::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(users::find_by_id(&self.pool, id).await?)
    }

    async fn update_user_profile(
        &self,
        id: Uuid,
        name: &str,
        country: Option<&str>,
    ) -> StoreResult<Option<User>> {
        Ok(users::update_profile(&self.pool, id, name, country).await?)
    }

    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> StoreResult<()> {
        Ok(users::update_password(&self.pool, id, password_hash).await?)
    }

    async fn list_projects_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Project>> {
        Ok(projects::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(projects::find_by_id(&self.pool, id).await?)
    }

    async fn insert_project_within_quota(
        &self,
        project: &Project,
        limit: i64,
    ) -> StoreResult<QuotaOutcome> {
        // Advisory lock closes the count-then-insert race between concurrent
        // creations by the same owner.
        let mut tx = self.pool.begin().await?;
        projects::lock_owner(&mut *tx, project.owner_id).await?;

        let owned = projects::count_by_owner(&mut *tx, project.owner_id).await?;
        if owned >= limit {
            return Ok(QuotaOutcome::QuotaReached { owned });
        }

        let created = projects::create(&mut *tx, project)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    StoreError::MissingParent("User not found".to_string())
                }
                _ => StoreError::Database(e),
            })?;
        tx.commit().await?;
        Ok(QuotaOutcome::Created(created))
    }

    async fn update_project(&self, project: &Project) -> StoreResult<Option<Project>> {
        Ok(projects::update(&self.pool, project).await?)
    }

    async fn delete_project_cascade(&self, id: Uuid) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;
        let removed = tasks::delete_by_project(&mut *tx, id).await?;
        projects::delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(removed)
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        Ok(tasks::list_by_project(&self.pool, project_id).await?)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(tasks::find_by_id(&self.pool, id).await?)
    }

    async fn insert_task(&self, task: &Task) -> StoreResult<Task> {
        tasks::create(&self.pool, task).await.map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                StoreError::MissingParent("Project not found".to_string())
            }
            _ => StoreError::Database(e),
        })
    }

    async fn update_task(&self, task: &Task) -> StoreResult<Option<Task>> {
        Ok(tasks::update(&self.pool, task).await?)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        Ok(tasks::delete(&self.pool, id).await?)
    }

    async fn count_tasks(&self, project_id: Uuid) -> StoreResult<TaskCounts> {
        Ok(tasks::count_by_project(&self.pool, project_id).await?)
    }
}
