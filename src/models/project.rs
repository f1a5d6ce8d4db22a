use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Education,
    Health,
    Finance,
    Other,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

/// A project enriched with task counts at read time. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub task_count: i64,
    pub completed_task_count: i64,
    pub completion_percentage: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

/// Partial update. An absent field is `None` and left unchanged; an explicit
/// `null` is `Some(None)`, which clears `due_date` and is rejected elsewhere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    #[serde(default, deserialize_with = "super::present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::present")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::present")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "super::present")]
    pub category: Option<Option<Category>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_absent_from_null_due_date() {
        let absent: UpdateProject = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(absent.due_date, None);

        let cleared: UpdateProject = serde_json::from_str(r#"{"due_date":null}"#).unwrap();
        assert_eq!(cleared.due_date, Some(None));

        let set: UpdateProject = serde_json::from_str(r#"{"due_date":"2026-12-01"}"#).unwrap();
        assert_eq!(set.due_date, Some(NaiveDate::from_ymd_opt(2026, 12, 1)));
    }

    #[test]
    fn update_keeps_explicit_null_for_every_field() {
        let req: UpdateProject =
            serde_json::from_str(r#"{"name":null,"priority":null,"category":"health"}"#).unwrap();
        assert_eq!(req.name, Some(None));
        assert_eq!(req.priority, Some(None));
        assert_eq!(req.category, Some(Some(Category::Health)));
        assert_eq!(req.description, None);
    }

    #[test]
    fn enums_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Category::Education).unwrap(), "\"education\"");
        assert_eq!(
            serde_json::from_str::<Priority>("\"high\"").unwrap(),
            Priority::High
        );
        assert!(serde_json::from_str::<Category>("\"hobby\"").is_err());
    }
}
