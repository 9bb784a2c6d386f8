use std::collections::BTreeSet;

use chrono::NaiveDate;
use cosmic::iced::Length;
use cosmic::widget::{column, container, row, scrollable, text};
use cosmic::Element;

use super::tasks::task_cards;
use crate::components::month_calendar::month_calendar;
use crate::core::{Project, Task};
use crate::fl;
use crate::message::Message;
use crate::view::{CalendarState, EditTaskDialog, OpenDialogs, task_rows};

/// Month grid on the left, the selected day's tasks on the right.
pub fn calendar_view<'a>(
    state: &CalendarState,
    busy_days: &BTreeSet<NaiveDate>,
    day_tasks: Vec<&Task>,
    projects: &[Project],
    dialogs: &OpenDialogs<EditTaskDialog>,
    today: NaiveDate,
) -> Element<'a, Message> {
    let grid = month_calendar(
        state.displayed_month,
        Some(state.selected),
        today,
        busy_days,
        Message::CalendarSelectDay,
        Message::CalendarPrevMonth,
        Message::CalendarNextMonth,
    );

    let mut day = column().spacing(8).push(text::title4(day_heading(state)));
    if day_tasks.is_empty() {
        day = day.push(text::body(fl!("calendar-empty")));
    } else {
        day = day.push(task_cards(task_rows(day_tasks, projects), dialogs, today));
    }

    let layout = row()
        .spacing(16)
        .push(container(grid).width(Length::FillPortion(1)))
        .push(container(scrollable(day)).width(Length::FillPortion(1)));

    container(layout.padding(16))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn day_heading(state: &CalendarState) -> String {
    fl!("calendar-day-heading", date = state.selected_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_names_the_selected_day() {
        let state = CalendarState::new(chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let heading = day_heading(&state);
        assert!(heading.starts_with("Tasks for"));
        assert!(heading.contains("Fri Mar 15 2024"));
    }
}
