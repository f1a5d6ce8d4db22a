use uuid::Uuid;

use super::projects;
use crate::error::AppError;
use crate::models::ProjectView;
use crate::store::{Store, TaskCounts};

/// Lists the owner's projects, newest first, each with its task counts.
///
/// Counts are read per project with no snapshot across projects, so a
/// concurrent write may be reflected in some entries and not others.
pub async fn list_projects_with_counts(
    store: &dyn Store,
    owner_id: Uuid,
) -> Result<Vec<ProjectView>, AppError> {
    let projects = projects::list(store, owner_id).await?;

    let mut views = Vec::with_capacity(projects.len());
    for project in projects {
        let counts = store.count_tasks(project.id).await?;
        views.push(ProjectView {
            project,
            task_count: counts.total,
            completed_task_count: counts.completed,
            completion_percentage: completion_percentage(counts),
        });
    }
    Ok(views)
}

/// `round(100 * completed / total)`, or 0 for a project without tasks.
pub fn completion_percentage(counts: TaskCounts) -> u8 {
    if counts.total <= 0 {
        return 0;
    }
    let completed = counts.completed.clamp(0, counts.total);
    ((200 * completed + counts.total) / (2 * counts.total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(completed: i64, total: i64) -> u8 {
        completion_percentage(TaskCounts { total, completed })
    }

    #[test]
    fn empty_project_is_zero_percent() {
        assert_eq!(pct(0, 0), 0);
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(pct(1, 1), 100);
        assert_eq!(pct(1, 3), 33);
        assert_eq!(pct(2, 3), 67);
        assert_eq!(pct(1, 8), 13);
        assert_eq!(pct(0, 5), 0);
    }

    #[test]
    fn never_exceeds_one_hundred() {
        assert_eq!(pct(7, 5), 100);
    }
}
