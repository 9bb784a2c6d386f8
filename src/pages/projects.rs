use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, dropdown, row, scrollable, text, text_input};
use cosmic::Element;

use crate::components::entity_card::{edit_panel, entity_card};
use crate::core::{Client, Project};
use crate::fl;
use crate::message::{EntityKind, Message};
use crate::view::{EditProjectDialog, OpenDialogs, ProjectForm, project_rows};

pub fn projects_view<'a>(
    form: &ProjectForm,
    clients: &[Client],
    projects: &[Project],
    dialogs: &OpenDialogs<EditProjectDialog>,
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    // Client picker
    content = content.push(text::caption(fl!("projects-client-label")));
    if clients.is_empty() {
        content = content.push(text::body(fl!("projects-no-clients")));
    } else {
        let names: Vec<String> = clients.iter().map(|c| c.name.clone()).collect();
        let ids: Vec<String> = clients.iter().map(|c| c.id.clone()).collect();
        let selected = form
            .client_id
            .as_ref()
            .and_then(|id| ids.iter().position(|i| i == id));
        content = content.push(
            dropdown(names, selected, move |idx| {
                Message::ProjectClientSelected(ids[idx].clone())
            })
            .width(Length::Fill),
        );
    }

    content = content.push(text::caption(fl!("projects-name-label"))).push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                text_input::text_input(fl!("projects-name-placeholder"), form.name.clone())
                    .on_input(Message::ProjectNameChanged)
                    .on_submit(|_| Message::ProjectSubmit)
                    .width(Length::Fill),
            )
            .push(button::suggested(fl!("projects-add")).on_press(Message::ProjectSubmit)),
    );

    if projects.is_empty() {
        content = content.push(
            container(text::body(fl!("projects-empty")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );
    }

    for entry in project_rows(projects, clients) {
        let project = entry.project;
        let editor = dialogs.get(&project.id).map(|dialog| {
            edit_panel(
                EntityKind::Project,
                &project.id,
                fl!("projects-edit-title"),
                fl!("projects-name-label"),
                &dialog.name,
                None,
            )
        });
        content = content.push(entity_card(
            EntityKind::Project,
            &project.id,
            project.name.clone(),
            vec![fl!("projects-client", name = entry.client_name)],
            editor,
        ));
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
