use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use crate::components::entity_card::{edit_panel, entity_card};
use crate::core::Client;
use crate::fl;
use crate::message::{EntityKind, Message};
use crate::view::{ClientForm, EditClientDialog, OpenDialogs};

pub fn clients_view<'a>(
    form: &ClientForm,
    clients: &[Client],
    dialogs: &OpenDialogs<EditClientDialog>,
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    content = content.push(text::caption(fl!("clients-name-label"))).push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                text_input::text_input(fl!("clients-name-placeholder"), form.name.clone())
                    .on_input(Message::ClientNameChanged)
                    .on_submit(|_| Message::ClientSubmit)
                    .width(Length::Fill),
            )
            .push(button::suggested(fl!("clients-add")).on_press(Message::ClientSubmit)),
    );

    if clients.is_empty() {
        content = content.push(
            container(text::body(fl!("clients-empty")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );
    }

    for client in clients {
        let editor = dialogs.get(&client.id).map(|dialog| {
            edit_panel(
                EntityKind::Client,
                &client.id,
                fl!("clients-edit-title"),
                fl!("clients-name-label"),
                &dialog.name,
                None,
            )
        });
        content = content.push(entity_card(
            EntityKind::Client,
            &client.id,
            client.name.clone(),
            Vec::new(),
            editor,
        ));
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
