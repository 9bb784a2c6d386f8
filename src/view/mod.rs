//! Toolkit-independent view models: what each tab shows and what its forms
//! turn into. The GUI only renders these and forwards widget events.

pub mod calendar;
pub mod dialogs;
pub mod forms;
pub mod lists;

pub use calendar::CalendarState;
pub use dialogs::{EditClientDialog, EditProjectDialog, EditTaskDialog, OpenDialogs};
pub use forms::{ClientForm, ProjectForm, TaskForm};
pub use lists::{ProjectRow, TaskRow, project_rows, task_rows};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Clients,
    Projects,
    Tasks,
    Calendar,
}

impl Tab {
    pub const ALL: &'static [Tab] = &[Tab::Clients, Tab::Projects, Tab::Tasks, Tab::Calendar];

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clients => "system-users-symbolic",
            Self::Projects => "folder-symbolic",
            Self::Tasks => "view-list-symbolic",
            Self::Calendar => "x-office-calendar-symbolic",
        }
    }
}

/// Trimmed `name`, or `None` when nothing but whitespace is left.
pub(crate) fn clean_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
