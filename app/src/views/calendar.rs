//! Calendar projections
//!
//! Read-only views over a document for a day or a displayed week.
//! Nothing here is cached; every call re-derives from the document.

use super::dates::{plan_key, week_days};
use crate::store::{AppDocument, Event, Task, Test, WeekLayout};
use chrono::NaiveDate;

/// Everything scheduled for one day
#[derive(Debug, Clone, PartialEq)]
pub struct DayAgenda<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a Event>,
    pub tests: Vec<&'a Test>,
    /// Pending tasks due this day
    pub tasks: Vec<&'a Task>,
    pub meals: &'a [String],
}

impl DayAgenda<'_> {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.tests.is_empty() && self.tasks.is_empty() && self.meals.is_empty()
    }
}

/// Events occurring on `day`, by date or weekly recurrence
pub fn events_on(doc: &AppDocument, day: NaiveDate) -> Vec<&Event> {
    doc.events.iter().filter(|event| event.occurs_on(day)).collect()
}

/// Meals planned for `day`
pub fn meals_on(doc: &AppDocument, day: NaiveDate) -> &[String] {
    doc.food_plan
        .get(&plan_key(day))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Events, tests, pending due tasks and meals for `day`
pub fn agenda_for(doc: &AppDocument, day: NaiveDate) -> DayAgenda<'_> {
    DayAgenda {
        date: day,
        events: events_on(doc, day),
        tests: doc
            .tests
            .iter()
            .filter(|test| test.day() == Some(day))
            .collect(),
        tasks: doc
            .tasks
            .iter()
            .filter(|task| !task.done && task.due_date() == Some(day))
            .collect(),
        meals: meals_on(doc, day),
    }
}

/// Agendas for every displayed day of a week
pub fn week_agenda(
    doc: &AppDocument,
    today: NaiveDate,
    offset: i32,
    layout: WeekLayout,
) -> Vec<DayAgenda<'_>> {
    week_days(today, offset, layout)
        .into_iter()
        .map(|day| agenda_for(doc, day))
        .collect()
}

/// Meals for each displayed day of a week, in order
pub fn week_meal_plan(
    doc: &AppDocument,
    today: NaiveDate,
    offset: i32,
    layout: WeekLayout,
) -> Vec<(NaiveDate, &[String])> {
    week_days(today, offset, layout)
        .into_iter()
        .map(|day| (day, meals_on(doc, day)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EventType;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, date: &str, weekly: bool, days: &[u8]) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            kind: EventType::Other,
            color: None,
            date: date.to_string(),
            time: None,
            repeat_weekly: weekly,
            days: days.iter().copied().collect::<BTreeSet<u8>>(),
        }
    }

    fn task(id: &str, due: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            text: id.to_string(),
            subject: None,
            due: Some(due.to_string()),
            done,
            created: 0,
        }
    }

    #[test]
    fn test_weekly_event_matches_only_its_weekdays() {
        let mut doc = AppDocument::default();
        doc.events.push(event("club", "", true, &[1, 3]));

        for offset in -5..=5 {
            for day in week_days(date(2024, 1, 10), offset, WeekLayout::FullWeek) {
                let expected = matches!(day.format("%a").to_string().as_str(), "Mon" | "Wed");
                assert_eq!(!events_on(&doc, day).is_empty(), expected, "{}", day);
            }
        }
    }

    #[test]
    fn test_weekly_flag_off_ignores_weekdays() {
        let mut doc = AppDocument::default();
        doc.events.push(event("stale", "2024-01-09", false, &[1]));

        assert!(events_on(&doc, date(2024, 1, 8)).is_empty());
        assert_eq!(events_on(&doc, date(2024, 1, 9)).len(), 1);
    }

    #[test]
    fn test_agenda_collects_day_items() {
        let mut doc = AppDocument::default();
        doc.events.push(event("trip", "2024-01-10", false, &[]));
        doc.tests.push(Test {
            id: "t1".to_string(),
            subject: "Maths".to_string(),
            date: "2024-01-10".to_string(),
            time: None,
            details: String::new(),
        });
        doc.tasks.push(task("open", "2024-01-10", false));
        doc.tasks.push(task("finished", "2024-01-10", true));
        doc.tasks.push(task("later", "2024-01-11", false));
        doc.food_plan
            .insert("2024-01-wk2-day3".to_string(), vec!["Pasta salad".to_string()]);

        let agenda = agenda_for(&doc, date(2024, 1, 10));

        assert_eq!(agenda.events.len(), 1);
        assert_eq!(agenda.tests.len(), 1);
        assert_eq!(agenda.tasks.len(), 1);
        assert_eq!(agenda.tasks[0].id, "open");
        assert_eq!(agenda.meals, &["Pasta salad".to_string()]);
        assert!(agenda_for(&doc, date(2024, 1, 12)).is_empty());
    }

    #[test]
    fn test_week_agenda_and_meal_plan_follow_layout() {
        let doc = AppDocument::default();

        let agenda = week_agenda(&doc, date(2024, 1, 10), 0, WeekLayout::SunThu);
        assert_eq!(agenda.len(), 5);
        assert_eq!(agenda[0].date, date(2024, 1, 7));

        let plan = week_meal_plan(&doc, date(2024, 1, 10), 0, WeekLayout::FullWeek);
        assert_eq!(plan.len(), 7);
        assert!(plan.iter().all(|(_, meals)| meals.is_empty()));
    }
}
