use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text, text_input};
use cosmic::{Element, theme};

use crate::fl;
use crate::message::{EntityKind, Message};

/// One list entry: title, caption lines, an Edit button and, while its dialog
/// is open, the edit panel underneath.
pub fn entity_card<'a>(
    kind: EntityKind,
    id: &str,
    title: String,
    details: Vec<String>,
    editor: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut summary = column().spacing(2).width(Length::Fill).push(text::title4(title));
    for line in details {
        summary = summary.push(text::caption(line));
    }

    let mut card = column().spacing(8).push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(summary)
            .push(button::standard(fl!("edit")).on_press(Message::OpenEdit(kind, id.to_string()))),
    );

    if let Some(editor) = editor {
        card = card.push(editor);
    }

    container(card)
        .padding(12)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

/// The body of an edit dialog: a heading, the name field, any extra fields,
/// then Save and Close. Saving leaves the panel open.
pub fn edit_panel<'a>(
    kind: EntityKind,
    id: &str,
    heading: String,
    name_label: String,
    name: &str,
    extra: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    let id_input = id.to_string();
    let id_submit = id.to_string();

    let mut panel = column()
        .spacing(8)
        .padding([4, 0, 8, 24])
        .push(text::title4(heading))
        .push(text::caption(name_label))
        .push(
            text_input::text_input("", name.to_string())
                .on_input(move |v| Message::EditNameChanged(kind, id_input.clone(), v))
                .on_submit(move |_| Message::SubmitEdit(kind, id_submit.clone()))
                .width(Length::Fill),
        );

    if let Some(extra) = extra {
        panel = panel.push(extra);
    }

    panel
        .push(
            row()
                .spacing(8)
                .push(button::suggested(fl!("save-changes")).on_press(Message::SubmitEdit(kind, id.to_string())))
                .push(button::standard(fl!("close")).on_press(Message::CloseEdit(kind, id.to_string()))),
        )
        .into()
}
