use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Priority;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Moves the task to `status`, keeping `completed_at` set exactly when the
    /// task is completed. Re-completing an already completed task keeps the
    /// original stamp.
    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.completed_at = match status {
            TaskStatus::Completed if self.status == TaskStatus::Completed => {
                self.completed_at.or(Some(now))
            }
            TaskStatus::Completed => Some(now),
            TaskStatus::Pending | TaskStatus::InProgress => None,
        };
        self.status = status;
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    #[serde(default, deserialize_with = "super::present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::present")]
    pub status: Option<Option<TaskStatus>>,
    #[serde(default, deserialize_with = "super::present")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "super::present")]
    pub due_date: Option<Option<NaiveDate>>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn task(status: TaskStatus) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::now_v7(),
            project_id: Uuid::now_v7(),
            title: "Write docs".to_string(),
            description: "Usage guide".to_string(),
            status,
            priority: Priority::Medium,
            due_date: None,
            completed_at: (status == TaskStatus::Completed).then_some(now),
            created_at: now,
        }
    }

    #[test]
    fn completing_stamps_completed_at() {
        let mut t = task(TaskStatus::Pending);
        let now = Utc::now();
        t.set_status(TaskStatus::Completed, now);
        assert_eq!(t.status, TaskStatus::Completed);
        assert_eq!(t.completed_at, Some(now));
    }

    #[test]
    fn leaving_completed_clears_completed_at() {
        for next in [TaskStatus::Pending, TaskStatus::InProgress] {
            let mut t = task(TaskStatus::Completed);
            t.set_status(next, Utc::now());
            assert_eq!(t.status, next);
            assert!(t.completed_at.is_none());
        }
    }

    #[test]
    fn recompleting_keeps_original_stamp() {
        let mut t = task(TaskStatus::Completed);
        let first = t.completed_at;
        t.set_status(TaskStatus::Completed, Utc::now() + Duration::hours(1));
        assert_eq!(t.completed_at, first);
    }

    #[test]
    fn every_transition_preserves_completion_invariant() {
        let all = [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed];
        for from in all {
            for to in all {
                let mut t = task(from);
                t.set_status(to, Utc::now());
                assert_eq!(t.is_completed(), t.completed_at.is_some(), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn update_separates_null_status_from_absent() {
        let null: UpdateTask = serde_json::from_str(r#"{"status":null}"#).unwrap();
        assert_eq!(null.status, Some(None));

        let absent: UpdateTask = serde_json::from_str(r#"{"title":"Ship"}"#).unwrap();
        assert_eq!(absent.status, None);
        assert_eq!(absent.title, Some(Some("Ship".to_string())));
    }

    #[test]
    fn status_wire_name_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"completed\"").unwrap(),
            TaskStatus::Completed
        );
    }
}
