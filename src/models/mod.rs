pub mod project;
pub mod task;
pub mod user;

pub use project::{Category, CreateProject, Priority, Project, ProjectView, UpdateProject};
pub use task::{CreateTask, Task, TaskStatus, UpdateTask};
pub use user::{PublicUser, User};

use serde::{Deserialize, Deserializer};

/// Deserializes a present field (including an explicit `null`) as `Some`, so
/// that `#[serde(default)]` leaves an absent field as `None`.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
