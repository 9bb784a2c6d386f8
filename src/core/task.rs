use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date;

/// A dated piece of work inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub completion_date: NaiveDate,
}

impl Task {
    /// True when the task falls on `day` (day, month and year all match).
    pub fn is_due_on(&self, day: NaiveDate) -> bool {
        self.completion_date == day
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub project_id: String,
    pub name: String,
    #[serde(with = "date::iso")]
    pub completion_date: NaiveDate,
}

impl NewTask {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>, completion_date: NaiveDate) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            completion_date,
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Task {
        Task {
            id: id.into(),
            project_id: self.project_id,
            name: self.name,
            completion_date: self.completion_date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "date::iso_opt")]
    pub completion_date: Option<NaiveDate>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.project_id.is_none() && self.name.is_none() && self.completion_date.is_none()
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(ref project_id) = self.project_id {
            task.project_id = project_id.clone();
        }
        if let Some(ref name) = self.name {
            task.name = name.clone();
        }
        if let Some(completion_date) = self.completion_date {
            task.completion_date = completion_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn date_is_stored_as_iso_string() {
        let value = serde_json::to_value(NewTask::new("p1", "Design mockup", march(15))).unwrap();
        assert_eq!(
            value,
            json!({
                "projectId": "p1",
                "name": "Design mockup",
                "completionDate": "2024-03-15T00:00:00.000Z",
            })
        );
    }

    #[test]
    fn stored_document_decodes_back() {
        let task: NewTask = serde_json::from_value(json!({
            "projectId": "p1",
            "name": "Design mockup",
            "completionDate": "2024-03-15T09:30:00.000Z",
        }))
        .unwrap();
        assert_eq!(task.completion_date, march(15));
    }

    #[test]
    fn patch_serializes_supplied_fields_only() {
        let patch = TaskPatch {
            completion_date: Some(march(16)),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "completionDate": "2024-03-16T00:00:00.000Z" })
        );
        assert_eq!(serde_json::to_value(TaskPatch::default()).unwrap(), json!({}));
    }

    #[test]
    fn patch_merges_into_task() {
        let mut task = NewTask::new("p1", "Design mockup", march(15)).with_id("t1");
        TaskPatch {
            name: Some("Final mockup".into()),
            ..Default::default()
        }
        .apply_to(&mut task);
        assert_eq!(task.name, "Final mockup");
        assert_eq!(task.completion_date, march(15));
        assert!(task.is_due_on(march(15)));
        assert!(!task.is_due_on(march(16)));
    }
}
