//! Creation forms. Each holds only its own input state; a valid submit yields
//! an [`Intent`] and clears the fields the user is expected to retype.

use chrono::NaiveDate;

use super::clean_name;
use crate::state::Intent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
}

impl ClientForm {
    pub fn submit(&mut self) -> Option<Intent> {
        let name = clean_name(&self.name)?;
        self.name.clear();
        Some(Intent::AddClient { name })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub client_id: Option<String>,
    pub name: String,
}

impl ProjectForm {
    /// Requires a selected client. The selection survives the submit.
    pub fn submit(&mut self) -> Option<Intent> {
        let client_id = self.client_id.clone().filter(|id| !id.is_empty())?;
        let name = clean_name(&self.name)?;
        self.name.clear();
        Some(Intent::AddProject { client_id, name })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub project_id: Option<String>,
    pub name: String,
    pub completion_date: Option<NaiveDate>,
}

impl TaskForm {
    /// An empty form with the date preset to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            project_id: None,
            name: String::new(),
            completion_date: Some(today),
        }
    }

    /// Requires a project, a name and a date. Afterwards the name is cleared
    /// and the date goes back to `today`; the project stays selected.
    pub fn submit(&mut self, today: NaiveDate) -> Option<Intent> {
        let project_id = self.project_id.clone().filter(|id| !id.is_empty())?;
        let name = clean_name(&self.name)?;
        let completion_date = self.completion_date?;
        self.name.clear();
        self.completion_date = Some(today);
        Some(Intent::AddTask {
            project_id,
            name,
            completion_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn client_form_trims_and_clears() {
        let mut form = ClientForm {
            name: "  Acme  ".into(),
        };
        assert_eq!(
            form.submit(),
            Some(Intent::AddClient {
                name: "Acme".into()
            })
        );
        assert!(form.name.is_empty());
    }

    #[test]
    fn blank_client_name_is_rejected_and_kept() {
        let mut form = ClientForm { name: "   ".into() };
        assert_eq!(form.submit(), None);
        assert_eq!(form.name, "   ");
    }

    #[test]
    fn project_form_needs_a_client() {
        let mut form = ProjectForm {
            client_id: None,
            name: "Website".into(),
        };
        assert_eq!(form.submit(), None);
        assert_eq!(form.name, "Website");

        form.client_id = Some(String::new());
        assert_eq!(form.submit(), None);
    }

    #[test]
    fn project_form_keeps_client_selected() {
        let mut form = ProjectForm {
            client_id: Some("c1".into()),
            name: "Website ".into(),
        };
        assert_eq!(
            form.submit(),
            Some(Intent::AddProject {
                client_id: "c1".into(),
                name: "Website".into()
            })
        );
        assert!(form.name.is_empty());
        assert_eq!(form.client_id.as_deref(), Some("c1"));
    }

    #[test]
    fn task_form_defaults_to_today() {
        let form = TaskForm::new(march(14));
        assert_eq!(form.completion_date, Some(march(14)));
        assert_eq!(form.project_id, None);
    }

    #[test]
    fn task_form_submits_and_resets_date() {
        let mut form = TaskForm::new(march(14));
        form.project_id = Some("p1".into());
        form.name = "Design mockup".into();
        form.completion_date = Some(march(15));

        assert_eq!(
            form.submit(march(14)),
            Some(Intent::AddTask {
                project_id: "p1".into(),
                name: "Design mockup".into(),
                completion_date: march(15),
            })
        );
        assert!(form.name.is_empty());
        assert_eq!(form.completion_date, Some(march(14)));
        assert_eq!(form.project_id.as_deref(), Some("p1"));
    }

    #[test]
    fn task_form_needs_project_name_and_date() {
        let mut form = TaskForm::new(march(14));
        form.name = "Design mockup".into();
        assert_eq!(form.submit(march(14)), None);

        form.project_id = Some("p1".into());
        form.completion_date = None;
        assert_eq!(form.submit(march(14)), None);
        assert_eq!(form.name, "Design mockup");

        form.completion_date = Some(march(15));
        form.name = " ".into();
        assert_eq!(form.submit(march(14)), None);
    }
}
