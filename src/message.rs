use chrono::NaiveDate;

use crate::state::Change;
use crate::store::{BackendError, Gateway};

/// Which collection an edit dialog belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Project,
    Task,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Backend
    Connected(Result<Gateway, BackendError>),
    Loaded(Result<Change, BackendError>),
    Applied(Result<Change, BackendError>),
    Reload,
    DismissError,
    ToggleDebugLogging,

    // Client form
    ClientNameChanged(String),
    ClientSubmit,

    // Project form
    ProjectClientSelected(String),
    ProjectNameChanged(String),
    ProjectSubmit,

    // Task form
    TaskProjectSelected(String),
    TaskNameChanged(String),
    TaskDateChanged(NaiveDate),
    TaskSubmit,

    // Edit dialogs, addressed by kind and entity id
    OpenEdit(EntityKind, String),
    CloseEdit(EntityKind, String),
    EditNameChanged(EntityKind, String, String),
    EditDateChanged(String, NaiveDate),
    SubmitEdit(EntityKind, String),

    // Calendar tab
    CalendarPrevMonth,
    CalendarNextMonth,
    CalendarSelectDay(NaiveDate),
}
