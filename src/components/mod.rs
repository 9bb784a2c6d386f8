pub mod entity_card;
pub mod month_calendar;
