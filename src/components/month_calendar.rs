use std::collections::BTreeSet;

use chrono::{Datelike, Months, NaiveDate};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text};
use cosmic::Element;

use crate::message::Message;

/// A month grid. Days in `busy_days` get a dot; `selected` is highlighted.
pub fn month_calendar<'a>(
    displayed_month: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    busy_days: &BTreeSet<NaiveDate>,
    on_select: impl Fn(NaiveDate) -> Message,
    on_prev: Message,
    on_next: Message,
) -> Element<'a, Message> {
    let first = displayed_month.with_day(1).unwrap_or(displayed_month);
    let year = first.year();
    let month = first.month();

    // Header: < Month Year >
    let header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(button::icon(icon::from_name("go-previous-symbolic")).on_press(on_prev))
        .push(
            text::body(first.format("%B %Y").to_string())
                .width(Length::Fill)
                .center(),
        )
        .push(button::icon(icon::from_name("go-next-symbolic")).on_press(on_next));

    let day_labels = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
        .into_iter()
        .fold(row().spacing(0), |r, label| r.push(day_label(label)));

    let mut grid = column().spacing(2).push(header).push(day_labels);

    // Monday on or before the first of the month
    let offset = first.weekday().num_days_from_monday() as i64;
    let grid_start = first - chrono::Duration::days(offset);

    for week in 0..6 {
        let mut week_row = row().spacing(0);
        let mut any_in_month = false;

        for day_of_week in 0..7 {
            let date = grid_start + chrono::Duration::days(week * 7 + day_of_week);
            let in_month = date.month() == month && date.year() == year;
            any_in_month |= in_month;

            let cell: Element<'a, Message> = if !in_month {
                container(text::body(" "))
                    .width(Length::FillPortion(1))
                    .center_x(Length::FillPortion(1))
                    .into()
            } else {
                let label = if busy_days.contains(&date) {
                    format!("{}\n·", date.day())
                } else {
                    format!("{}\n ", date.day())
                };

                let txt = if date == today {
                    text::body(label).font(cosmic::iced::Font {
                        weight: cosmic::iced::font::Weight::Bold,
                        ..Default::default()
                    })
                } else {
                    text::body(label)
                };

                let class = if selected == Some(date) {
                    cosmic::theme::Button::Suggested
                } else {
                    cosmic::theme::Button::Text
                };

                button::custom(container(txt.center()).center_x(Length::Fill))
                    .class(class)
                    .on_press(on_select(date))
                    .width(Length::FillPortion(1))
                    .into()
            };

            week_row = week_row.push(cell);
        }

        if any_in_month {
            grid = grid.push(week_row);
        }
    }

    container(grid).width(Length::Fill).padding(8).into()
}

/// Compact date input: a month grid around the current value whose arrows
/// move the value itself by a month.
pub fn date_picker<'a>(
    value: Option<NaiveDate>,
    today: NaiveDate,
    on_select: impl Fn(NaiveDate) -> Message,
) -> Element<'a, Message> {
    let anchor = value.unwrap_or(today);
    let prev = anchor.checked_sub_months(Months::new(1)).unwrap_or(anchor);
    let next = anchor.checked_add_months(Months::new(1)).unwrap_or(anchor);
    let on_prev = on_select(prev);
    let on_next = on_select(next);

    month_calendar(anchor, value, today, &BTreeSet::new(), on_select, on_prev, on_next)
}

fn day_label(label: &str) -> Element<'_, Message> {
    container(text::caption(label).center())
        .width(Length::FillPortion(1))
        .center_x(Length::FillPortion(1))
        .into()
}
