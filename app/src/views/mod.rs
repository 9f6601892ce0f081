//! Derived read-only views over the document

pub mod calendar;
pub mod dashboard;
pub mod dates;

pub use calendar::{agenda_for, events_on, meals_on, week_agenda, week_meal_plan, DayAgenda};
pub use dashboard::{dashboard, Dashboard};
