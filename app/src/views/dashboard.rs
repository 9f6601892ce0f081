//! Home screen and list projections

use super::calendar::meals_on;
use super::dates::is_soon;
use crate::config::{DASHBOARD_PENDING_TASKS, DASHBOARD_UPCOMING_TESTS};
use crate::store::{AppDocument, Event, Note, Subject, Task, Test};
use chrono::NaiveDate;

/// Home screen summary. Sections hidden by the widget settings are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub today: NaiveDate,
    pub upcoming_tests: Option<Vec<&'a Test>>,
    pub events: Option<Vec<&'a Event>>,
    pub pending_tasks: Vec<&'a Task>,
    pub meals_today: Option<&'a [String]>,
    pub meals_tomorrow: Option<&'a [String]>,
}

pub fn dashboard(doc: &AppDocument, today: NaiveDate) -> Dashboard<'_> {
    let widgets = &doc.settings.widgets;
    let tomorrow = today.succ_opt();

    Dashboard {
        today,
        upcoming_tests: widgets.upcoming_tests.then(|| {
            let mut tests = soon_tests(doc, today);
            tests.truncate(DASHBOARD_UPCOMING_TESTS);
            tests
        }),
        events: widgets
            .today_tomorrow_events
            .then(|| today_and_tomorrow_events(doc, today)),
        pending_tasks: pending_tasks(doc)
            .into_iter()
            .take(DASHBOARD_PENDING_TASKS)
            .collect(),
        meals_today: widgets.food_plan.then(|| meals_on(doc, today)),
        meals_tomorrow: widgets
            .food_plan
            .then(|| tomorrow.map(|day| meals_on(doc, day)).unwrap_or(&[])),
    }
}

/// All tests ordered by date then time; tests with unreadable dates go last
pub fn sorted_tests(doc: &AppDocument) -> Vec<&Test> {
    let mut tests: Vec<&Test> = doc.tests.iter().collect();
    tests.sort_by_key(|test| {
        let (day, time) = test.sort_key();
        (day.is_none(), day, time)
    });
    tests
}

/// Tests within the soon window, ordered by date then time
pub fn soon_tests(doc: &AppDocument, today: NaiveDate) -> Vec<&Test> {
    sorted_tests(doc)
        .into_iter()
        .filter(|test| test.day().is_some_and(|day| is_soon(day, today)))
        .collect()
}

/// Events occurring today or tomorrow, each listed once
pub fn today_and_tomorrow_events(doc: &AppDocument, today: NaiveDate) -> Vec<&Event> {
    let tomorrow = today.succ_opt();
    doc.events
        .iter()
        .filter(|event| event.occurs_on(today) || tomorrow.is_some_and(|day| event.occurs_on(day)))
        .collect()
}

pub fn pending_tasks(doc: &AppDocument) -> Vec<&Task> {
    doc.tasks.iter().filter(|task| !task.done).collect()
}

pub fn completed_tasks(doc: &AppDocument) -> Vec<&Task> {
    doc.tasks.iter().filter(|task| task.done).collect()
}

/// Notes whose subject contains `query`, ignoring case; an empty query matches all
pub fn filter_notes<'a>(doc: &'a AppDocument, query: &str) -> Vec<&'a Note> {
    let query = query.trim().to_lowercase();
    doc.notes
        .iter()
        .filter(|note| query.is_empty() || note.subject.to_lowercase().contains(&query))
        .collect()
}

/// Subjects that have an exercise book to track
pub fn subjects_with_books(doc: &AppDocument) -> Vec<&Subject> {
    doc.subjects.iter().filter(|subject| subject.has_book).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EventType, Widget};
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_on(id: &str, date: &str, time: Option<&str>) -> Test {
        Test {
            id: id.to_string(),
            subject: "Maths".to_string(),
            date: date.to_string(),
            time: time.map(str::to_string),
            details: String::new(),
        }
    }

    fn task(id: &str, done: bool) -> Task {
        Task {
            id: id.to_string(),
            text: id.to_string(),
            subject: None,
            due: None,
            done,
            created: 0,
        }
    }

    fn note(id: &str, subject: &str) -> Note {
        Note {
            id: id.to_string(),
            subject: subject.to_string(),
            text: "text".to_string(),
            created: 0,
        }
    }

    #[test]
    fn test_sorted_tests_by_date_then_time() {
        let mut doc = AppDocument::default();
        doc.tests.push(test_on("late", "2024-01-12", Some("14:00")));
        doc.tests.push(test_on("broken", "soon", None));
        doc.tests.push(test_on("early", "2024-01-12", None));
        doc.tests.push(test_on("first", "2024-01-11", Some("23:00")));

        let ids: Vec<_> = sorted_tests(&doc).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "early", "late", "broken"]);
    }

    #[test]
    fn test_dashboard_upcoming_tests() {
        let mut doc = AppDocument::default();
        doc.tests.push(test_on("past", "2024-01-09", None));
        doc.tests.push(test_on("d7", "2024-01-17", None));
        doc.tests.push(test_on("d8", "2024-01-18", None));
        doc.tests.push(test_on("today", "2024-01-10", None));
        doc.tests.push(test_on("d2", "2024-01-12", None));
        doc.tests.push(test_on("d3", "2024-01-13", None));

        let view = dashboard(&doc, date(2024, 1, 10));
        let ids: Vec<_> = view
            .upcoming_tests
            .unwrap()
            .iter()
            .map(|t| t.id.as_str())
            .collect();

        assert_eq!(ids, vec!["today", "d2", "d3"]);
        assert_eq!(soon_tests(&doc, date(2024, 1, 10)).len(), 4);
    }

    #[test]
    fn test_dashboard_hides_disabled_widgets() {
        let mut doc = AppDocument::default();
        doc.settings.widgets.toggle(Widget::UpcomingTests);
        doc.settings.widgets.toggle(Widget::FoodPlan);

        let view = dashboard(&doc, date(2024, 1, 10));

        assert!(view.upcoming_tests.is_none());
        assert!(view.meals_today.is_none());
        assert!(view.meals_tomorrow.is_none());
        assert!(view.events.is_some());
    }

    #[test]
    fn test_today_and_tomorrow_events() {
        let mut doc = AppDocument::default();
        let weekly = |id: &str, days: &[u8]| Event {
            id: id.to_string(),
            title: id.to_string(),
            kind: EventType::Eca,
            color: None,
            date: String::new(),
            time: None,
            repeat_weekly: true,
            days: days.iter().copied().collect::<BTreeSet<u8>>(),
        };
        // 2024-01-10 is a Wednesday (3)
        doc.events.push(weekly("wed-thu", &[3, 4]));
        doc.events.push(weekly("thu", &[4]));
        doc.events.push(weekly("fri", &[5]));

        let ids: Vec<_> = today_and_tomorrow_events(&doc, date(2024, 1, 10))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["wed-thu", "thu"]);
    }

    #[test]
    fn test_pending_tasks_limited_on_dashboard() {
        let mut doc = AppDocument::default();
        for i in 0..7 {
            doc.tasks.push(task(&format!("open{}", i), false));
        }
        doc.tasks.push(task("done", true));

        assert_eq!(pending_tasks(&doc).len(), 7);
        assert_eq!(completed_tasks(&doc).len(), 1);
        assert_eq!(dashboard(&doc, date(2024, 1, 10)).pending_tasks.len(), 5);
    }

    #[test]
    fn test_filter_notes_by_subject() {
        let mut doc = AppDocument::default();
        doc.notes.push(note("n1", "Mathematics"));
        doc.notes.push(note("n2", "History"));

        assert_eq!(filter_notes(&doc, "MATH").len(), 1);
        assert_eq!(filter_notes(&doc, "").len(), 2);
        assert!(filter_notes(&doc, "art").is_empty());
    }
}
