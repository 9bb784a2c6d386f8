use chrono::NaiveDate;
use cosmic::iced::Length;
use cosmic::widget::{button, column, container, dropdown, scrollable, text, text_input};
use cosmic::Element;

use crate::components::entity_card::{edit_panel, entity_card};
use crate::components::month_calendar::date_picker;
use crate::core::{Project, Task};
use crate::fl;
use crate::message::{EntityKind, Message};
use crate::view::{EditTaskDialog, OpenDialogs, TaskForm, TaskRow, task_rows};

pub fn tasks_view<'a>(
    form: &TaskForm,
    projects: &[Project],
    tasks: &[Task],
    dialogs: &OpenDialogs<EditTaskDialog>,
    today: NaiveDate,
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    // Project picker
    content = content.push(text::caption(fl!("tasks-project-label")));
    if projects.is_empty() {
        content = content.push(text::body(fl!("tasks-no-projects")));
    } else {
        let names: Vec<String> = projects.iter().map(|p| p.name.clone()).collect();
        let ids: Vec<String> = projects.iter().map(|p| p.id.clone()).collect();
        let selected = form
            .project_id
            .as_ref()
            .and_then(|id| ids.iter().position(|i| i == id));
        content = content.push(
            dropdown(names, selected, move |idx| {
                Message::TaskProjectSelected(ids[idx].clone())
            })
            .width(Length::Fill),
        );
    }

    content = content
        .push(text::caption(fl!("tasks-name-label")))
        .push(
            text_input::text_input(fl!("tasks-name-placeholder"), form.name.clone())
                .on_input(Message::TaskNameChanged)
                .on_submit(|_| Message::TaskSubmit)
                .width(Length::Fill),
        )
        .push(text::caption(fl!("tasks-date-label")))
        .push(date_picker(form.completion_date, today, Message::TaskDateChanged))
        .push(button::suggested(fl!("tasks-add")).on_press(Message::TaskSubmit));

    if tasks.is_empty() {
        content = content.push(
            container(text::body(fl!("tasks-empty")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );
    }

    content = content.push(task_cards(task_rows(tasks, projects), dialogs, today));

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Task list with per-task edit panels. Shared with the Calendar tab.
pub fn task_cards<'a>(
    rows: Vec<TaskRow<'_>>,
    dialogs: &OpenDialogs<EditTaskDialog>,
    today: NaiveDate,
) -> Element<'a, Message> {
    let mut list = column().spacing(8);

    for entry in rows {
        let task = entry.task;
        let editor = dialogs.get(&task.id).map(|dialog| {
            let id = task.id.clone();
            let picker = date_picker(dialog.completion_date, today, move |d| {
                Message::EditDateChanged(id.clone(), d)
            });
            edit_panel(
                EntityKind::Task,
                &task.id,
                fl!("tasks-edit-title"),
                fl!("tasks-name-label"),
                &dialog.name,
                Some(picker),
            )
        });
        list = list.push(entity_card(
            EntityKind::Task,
            &task.id,
            task.name.clone(),
            vec![
                fl!("tasks-project", name = entry.project_name),
                fl!("tasks-due", date = entry.due.clone()),
            ],
            editor,
        ));
    }

    list.into()
}
