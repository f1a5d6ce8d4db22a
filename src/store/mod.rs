//! Persistence boundary for users, projects and tasks.
//!
//! Services only talk to `dyn Store`; `db::PgStore` backs production and
//! `MemoryStore` backs development runs and tests. Implementations persist
//! entities exactly as handed to them. Validation, ownership and the
//! `completed_at` rule live in `services`.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Project, Task, User};

pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    MissingParent(String),
}

/// Result of a quota-guarded insert.
#[derive(Debug)]
pub enum QuotaOutcome {
    Created(Project),
    QuotaReached { owned: i64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: i64,
    pub completed: i64,
}

#[async_trait]
pub trait Store: Send + Sync {
    // Users

    /// Fails with `Conflict` when the email is already registered.
    async fn create_user(&self, user: &User) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn update_user_profile(
        &self,
        id: Uuid,
        name: &str,
        country: Option<&str>,
    ) -> StoreResult<Option<User>>;
    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> StoreResult<()>;

    // Projects

    /// Newest first.
    async fn list_projects_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Project>>;
    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>>;

    /// Counts the owner's projects and inserts `project` only if the count is
    /// below `limit`, as one unit with respect to other inserts for the same
    /// owner.
    async fn insert_project_within_quota(
        &self,
        project: &Project,
        limit: i64,
    ) -> StoreResult<QuotaOutcome>;
    async fn update_project(&self, project: &Project) -> StoreResult<Option<Project>>;

    /// Deletes every task of the project, then the project, as one unit.
    /// Returns the number of tasks removed.
    async fn delete_project_cascade(&self, id: Uuid) -> StoreResult<u64>;

    // Tasks

    /// Newest first.
    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>>;
    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Fails with `MissingParent` when the referenced project does not exist.
    async fn insert_task(&self, task: &Task) -> StoreResult<Task>;
    async fn update_task(&self, task: &Task) -> StoreResult<Option<Task>>;
    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;
    async fn count_tasks(&self, project_id: Uuid) -> StoreResult<TaskCounts>;
}
