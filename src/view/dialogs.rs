//! Edit dialogs. One per list entry, each opened and closed on its own and
//! pre-filled from the entity. Submitting does not close the dialog.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::clean_name;
use crate::core::{Client, Project, Task};
use crate::state::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditClientDialog {
    pub id: String,
    pub name: String,
}

impl EditClientDialog {
    pub fn open(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.name.clone(),
        }
    }

    pub fn submit(&self) -> Option<Intent> {
        Some(Intent::EditClient {
            id: self.id.clone(),
            name: clean_name(&self.name)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProjectDialog {
    pub id: String,
    pub name: String,
}

impl EditProjectDialog {
    pub fn open(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
        }
    }

    pub fn submit(&self) -> Option<Intent> {
        Some(Intent::EditProject {
            id: self.id.clone(),
            name: clean_name(&self.name)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskDialog {
    pub id: String,
    pub name: String,
    pub completion_date: Option<NaiveDate>,
}

impl EditTaskDialog {
    pub fn open(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            completion_date: Some(task.completion_date),
        }
    }

    pub fn submit(&self) -> Option<Intent> {
        Some(Intent::EditTask {
            id: self.id.clone(),
            name: clean_name(&self.name)?,
            completion_date: self.completion_date?,
        })
    }
}

/// The open dialogs of one kind, keyed by entity id.
#[derive(Debug, Clone)]
pub struct OpenDialogs<D> {
    open: HashMap<String, D>,
}

impl<D> Default for OpenDialogs<D> {
    fn default() -> Self {
        Self {
            open: HashMap::new(),
        }
    }
}

impl<D> OpenDialogs<D> {
    /// Open a dialog for `id`. Reopening an open dialog keeps its edits.
    pub fn open(&mut self, id: &str, make: impl FnOnce() -> D) {
        self.open.entry(id.to_string()).or_insert_with(make);
    }

    pub fn close(&mut self, id: &str) {
        self.open.remove(id);
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&D> {
        self.open.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut D> {
        self.open.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewClient, NewTask};

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn dialog_starts_from_current_values() {
        let task = NewTask::new("p1", "Design mockup", march(15)).with_id("t1");
        let dialog = EditTaskDialog::open(&task);
        assert_eq!(dialog.name, "Design mockup");
        assert_eq!(dialog.completion_date, Some(march(15)));
    }

    #[test]
    fn submit_trims_and_keeps_fields() {
        let client = NewClient::new("Acme").with_id("c1");
        let mut dialog = EditClientDialog::open(&client);
        dialog.name = " Acme Corp ".into();

        assert_eq!(
            dialog.submit(),
            Some(Intent::EditClient {
                id: "c1".into(),
                name: "Acme Corp".into()
            })
        );
        // still there for another try
        assert_eq!(dialog.name, " Acme Corp ");
    }

    #[test]
    fn blank_name_or_missing_date_is_rejected() {
        let task = NewTask::new("p1", "Design mockup", march(15)).with_id("t1");
        let mut dialog = EditTaskDialog::open(&task);
        dialog.completion_date = None;
        assert_eq!(dialog.submit(), None);

        dialog.completion_date = Some(march(16));
        dialog.name = "  ".into();
        assert_eq!(dialog.submit(), None);
    }

    #[test]
    fn dialogs_open_and_close_independently() {
        let a = NewClient::new("Acme").with_id("c1");
        let b = NewClient::new("Globex").with_id("c2");

        let mut dialogs: OpenDialogs<EditClientDialog> = OpenDialogs::default();
        dialogs.open(&a.id, || EditClientDialog::open(&a));
        dialogs.open(&b.id, || EditClientDialog::open(&b));
        assert_eq!(dialogs.len(), 2);

        dialogs.close("c1");
        assert!(!dialogs.is_open("c1"));
        assert!(dialogs.is_open("c2"));
    }

    #[test]
    fn reopening_keeps_unsaved_edits() {
        let a = NewClient::new("Acme").with_id("c1");
        let mut dialogs: OpenDialogs<EditClientDialog> = OpenDialogs::default();
        dialogs.open(&a.id, || EditClientDialog::open(&a));
        dialogs.get_mut("c1").unwrap().name = "Acme Corp".into();

        dialogs.open(&a.id, || EditClientDialog::open(&a));
        assert_eq!(dialogs.get("c1").unwrap().name, "Acme Corp");
    }
}
