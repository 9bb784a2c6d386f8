use chrono::{Datelike, Months, NaiveDate};

use crate::core::date;

/// The Calendar tab: one selected day and the month being shown around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
    pub selected: NaiveDate,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl CalendarState {
    /// Selects and shows `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            displayed_month: first_of_month(today),
            selected: today,
        }
    }

    pub fn prev_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.displayed_month);
    }

    pub fn next_month(&mut self) {
        self.displayed_month = self
            .displayed_month
            .checked_add_months(Months::new(1))
            .unwrap_or(self.displayed_month);
    }

    /// Select `date`, bringing its month into view.
    pub fn select_day(&mut self, date: NaiveDate) {
        self.selected = date;
        self.displayed_month = first_of_month(date);
    }

    /// The selected day as shown above its task list.
    pub fn selected_label(&self) -> String {
        date::display(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn starts_on_today() {
        let state = CalendarState::new(d(2024, 3, 15));
        assert_eq!(state.selected, d(2024, 3, 15));
        assert_eq!(state.displayed_month, d(2024, 3, 1));
        assert_eq!(state.selected_label(), "Fri Mar 15 2024");
    }

    #[test]
    fn paging_months_keeps_selection() {
        let mut state = CalendarState::new(d(2024, 1, 31));
        state.prev_month();
        assert_eq!(state.displayed_month, d(2023, 12, 1));
        state.next_month();
        state.next_month();
        assert_eq!(state.displayed_month, d(2024, 2, 1));
        assert_eq!(state.selected, d(2024, 1, 31));
    }

    #[test]
    fn selecting_moves_the_view() {
        let mut state = CalendarState::new(d(2024, 3, 15));
        state.select_day(d(2024, 4, 2));
        assert_eq!(state.selected, d(2024, 4, 2));
        assert_eq!(state.displayed_month, d(2024, 4, 1));

        // selecting the same day again keeps it selected
        state.select_day(d(2024, 4, 2));
        assert_eq!(state.selected, d(2024, 4, 2));
    }
}
