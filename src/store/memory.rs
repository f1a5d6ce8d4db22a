use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{QuotaOutcome, Store, StoreError, StoreResult, TaskCounts};
use crate::models::{Project, Task, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
}

/// In-process store. One lock guards all tables, so multi-table operations
/// (quota insert, cascade delete) are atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn update_user_profile(
        &self,
        id: Uuid,
        name: &str,
        country: Option<&str>,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.name = name.to_string();
            user.country = country.map(str::to_string);
            user.clone()
        }))
    }

    async fn update_user_password(&self, id: Uuid, password_hash: &str) -> StoreResult<()> {
        if let Some(user) = self.tables.write().await.users.get_mut(&id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    async fn list_projects_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Project>> {
        let tables = self.tables.read().await;
        let mut projects: Vec<Project> = tables
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        projects.sort_by_key(|p| Reverse((p.created_at, p.id)));
        Ok(projects)
    }

    async fn find_project(&self, id: Uuid) -> StoreResult<Option<Project>> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn insert_project_within_quota(
        &self,
        project: &Project,
        limit: i64,
    ) -> StoreResult<QuotaOutcome> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .projects
            .values()
            .filter(|p| p.owner_id == project.owner_id)
            .count() as i64;
        if owned >= limit {
            return Ok(QuotaOutcome::QuotaReached { owned });
        }
        tables.projects.insert(project.id, project.clone());
        Ok(QuotaOutcome::Created(project.clone()))
    }

    async fn update_project(&self, project: &Project) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.write().await;
        Ok(tables.projects.get_mut(&project.id).map(|stored| {
            *stored = project.clone();
            stored.clone()
        }))
    }

    async fn delete_project_cascade(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|_, t| t.project_id != id);
        let removed = (before - tables.tasks.len()) as u64;
        tables.projects.remove(&id);
        Ok(removed)
    }

    async fn list_tasks_by_project(&self, project_id: Uuid) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| Reverse((t.created_at, t.id)));
        Ok(tasks)
    }

    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn insert_task(&self, task: &Task) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&task.project_id) {
            return Err(StoreError::MissingParent("Project not found".to_string()));
        }
        tables.tasks.insert(task.id, task.clone());
        Ok(task.clone())
    }

    async fn update_task(&self, task: &Task) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;
        Ok(tables.tasks.get_mut(&task.id).map(|stored| {
            *stored = task.clone();
            stored.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }

    async fn count_tasks(&self, project_id: Uuid) -> StoreResult<TaskCounts> {
        let tables = self.tables.read().await;
        let counts = tables
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .fold(TaskCounts::default(), |mut acc, t| {
                acc.total += 1;
                if t.is_completed() {
                    acc.completed += 1;
                }
                acc
            });
        Ok(counts)
    }
}
