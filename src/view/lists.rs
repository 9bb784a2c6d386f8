//! List rows: entities joined to their parent's name by foreign key.
//!
//! Dangling references are not errors; the parent name just comes out empty.

use crate::core::date;
use crate::core::{Client, Project, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow<'a> {
    pub project: &'a Project,
    pub client_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow<'a> {
    pub task: &'a Task,
    pub project_name: &'a str,
    /// `completion_date` as shown in lists, e.g. `Fri Mar 15 2024`.
    pub due: String,
}

pub fn project_rows<'a>(projects: &'a [Project], clients: &'a [Client]) -> Vec<ProjectRow<'a>> {
    projects
        .iter()
        .map(|project| ProjectRow {
            project,
            client_name: clients
                .iter()
                .find(|c| c.id == project.client_id)
                .map(|c| c.name.as_str())
                .unwrap_or(""),
        })
        .collect()
}

pub fn task_rows<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    projects: &'a [Project],
) -> Vec<TaskRow<'a>> {
    tasks
        .into_iter()
        .map(|task| TaskRow {
            task,
            project_name: projects
                .iter()
                .find(|p| p.id == task.project_id)
                .map(|p| p.name.as_str())
                .unwrap_or(""),
            due: date::display(task.completion_date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewClient, NewProject, NewTask};
    use chrono::NaiveDate;

    #[test]
    fn projects_show_their_client() {
        let clients = vec![NewClient::new("Acme").with_id("c1")];
        let projects = vec![
            NewProject::new("c1", "Website").with_id("p1"),
            NewProject::new("c404", "Orphan").with_id("p2"),
        ];

        let rows = project_rows(&projects, &clients);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].client_name, "Acme");
        assert_eq!(rows[1].client_name, "");
        assert_eq!(rows[1].project.name, "Orphan");
    }

    #[test]
    fn tasks_show_project_and_date() {
        let projects = vec![NewProject::new("c1", "Website").with_id("p1")];
        let march15 = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let tasks = vec![
            NewTask::new("p1", "Design mockup", march15).with_id("t1"),
            NewTask::new("gone", "Lost", march15).with_id("t2"),
        ];

        let rows = task_rows(&tasks, &projects);
        assert_eq!(rows[0].project_name, "Website");
        assert_eq!(rows[0].due, "Fri Mar 15 2024");
        assert_eq!(rows[1].project_name, "");
    }
}
