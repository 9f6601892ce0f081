//! Pure document reducers
//!
//! `reduce` maps (previous document, command) to a new document. The
//! previous document is never modified: the reducer works on a clone and
//! returns it, so any snapshot taken before a command stays valid.
//!
//! Invalid input is rejected before anything changes and no partial
//! update is ever returned.

use super::command::Command;
use super::document::AppDocument;
use super::models::*;
use crate::config::{
    DEFAULT_EVENT_COLOR, DEFAULT_SUBJECT_COLOR, MAX_WEEKDAY_INDEX, STARTER_MEALS,
    TEST_EVENT_COLOR,
};
use crate::error::{AppError, Result};
use crate::views::dates::{format_date, format_time, plan_key};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Apply `command` to `doc`, returning the next document
pub fn reduce(doc: &AppDocument, command: Command, now: DateTime<Utc>) -> Result<AppDocument> {
    let mut next = doc.clone();
    let created = now.timestamp_millis();

    match command {
        Command::AddNote(req) => {
            let note = Note {
                id: new_id(),
                subject: required(&req.subject, "Note subject")?,
                text: required(&req.text, "Note text")?,
                created,
            };
            next.notes.insert(0, note);
        }
        Command::DeleteNote { id } => remove_by_id(&mut next.notes, &id, "Note")?,

        Command::AddTest(req) => {
            let test = Test {
                id: new_id(),
                subject: required(&req.subject, "Test subject")?,
                date: format_date(req.date),
                time: req.time.map(format_time),
                details: req.details.trim().to_string(),
            };
            next.tests.push(test);
        }
        Command::DeleteTest { id } => remove_by_id(&mut next.tests, &id, "Test")?,
        Command::ScheduleTest { id } => {
            let test = find(&next.tests, &id, "Test")?;
            let event = Event {
                id: new_id(),
                title: format!("Test: {}", test.subject),
                kind: EventType::Test,
                color: Some(TEST_EVENT_COLOR.to_string()),
                date: test.date.clone(),
                time: test.time.clone(),
                repeat_weekly: false,
                days: BTreeSet::new(),
            };
            next.events.push(event);
        }

        Command::AddTask(req) => {
            let task = Task {
                id: new_id(),
                text: required(&req.text, "Task text")?,
                subject: optional_text(req.subject),
                due: req.due.map(format_date),
                done: false,
                created,
            };
            next.tasks.insert(0, task);
        }
        Command::ToggleTask { id } => {
            let task = find_mut(&mut next.tasks, &id, "Task")?;
            task.done = !task.done;
        }
        Command::DeleteTask { id } => remove_by_id(&mut next.tasks, &id, "Task")?,
        Command::ClearCompletedTasks => next.tasks.retain(|task| !task.done),

        Command::AddBook(req) => {
            let (location, custom_location) = relocation(req.location, req.custom_location);
            let book = Book {
                id: new_id(),
                name: required(&req.name, "Book name")?,
                location,
                custom_location,
            };
            next.books.insert(0, book);
        }
        Command::UpdateBook { id, update } => {
            let book = find_mut(&mut next.books, &id, "Book")?;
            let (location, custom_location) = relocation(update.location, update.custom_location);
            book.location = location;
            book.custom_location = custom_location;
        }
        Command::DeleteBook { id } => remove_by_id(&mut next.books, &id, "Book")?,

        Command::AddMeal { name } => {
            let name = required(&name, "Meal name")?;
            if next.meals.contains(&name) {
                return Err(AppError::validation(format!("Meal '{}' already exists", name)));
            }
            next.meals.push(name);
        }
        Command::DeleteMeal { name } => {
            let before = next.meals.len();
            next.meals.retain(|meal| meal != name.trim());
            if next.meals.len() == before {
                return Err(AppError::not_found("Meal", name));
            }
        }
        Command::SeedMeals => {
            for meal in STARTER_MEALS {
                if !next.meals.iter().any(|existing| existing == meal) {
                    next.meals.push(meal.to_string());
                }
            }
        }
        Command::AssignMeal { date, meal } => {
            let meal = required(&meal, "Meal name")?;
            next.food_plan.entry(plan_key(date)).or_default().push(meal);
        }
        Command::RemoveMealFromDay { date, meal } => {
            let key = plan_key(date);
            if let Some(meals) = next.food_plan.get_mut(&key) {
                meals.retain(|planned| planned != meal.trim());
                if meals.is_empty() {
                    next.food_plan.remove(&key);
                }
            }
        }
        Command::SetDayMeals { date, meals } => {
            let key = plan_key(date);
            let meals: Vec<String> = meals
                .iter()
                .map(|meal| meal.trim().to_string())
                .filter(|meal| !meal.is_empty())
                .collect();
            if meals.is_empty() {
                next.food_plan.remove(&key);
            } else {
                next.food_plan.insert(key, meals);
            }
        }
        Command::ClearWeek { dates } => {
            for date in dates {
                next.food_plan.remove(&plan_key(date));
            }
        }

        Command::AddEvent(req) => {
            let event = build_event(new_id(), req)?;
            next.events.push(event);
        }
        Command::UpdateEvent { id, event } => {
            let replacement = build_event(id.clone(), event)?;
            let existing = find_mut(&mut next.events, &id, "Event")?;
            *existing = replacement;
        }
        Command::DeleteEvent { id } => remove_by_id(&mut next.events, &id, "Event")?,

        Command::AddSubject(req) => {
            let subject = build_subject(req)?;
            if next.find_subject_by_name(&subject.name).is_some() {
                return Err(AppError::validation(format!(
                    "Subject '{}' already exists",
                    subject.name
                )));
            }
            next.subjects.push(subject);
        }
        Command::BatchAddSubjects(requests) => {
            let subjects = requests
                .into_iter()
                .map(build_subject)
                .collect::<Result<Vec<_>>>()?;

            let mut added = 0;
            for subject in subjects {
                if next.find_subject_by_name(&subject.name).is_some() {
                    tracing::debug!("Skipping existing subject: {}", subject.name);
                    continue;
                }
                next.subjects.push(subject);
                added += 1;
            }
            tracing::debug!("Batch added {} subjects", added);
        }
        Command::UpdateSubject { id, update } => {
            if let Some(name) = &update.name {
                let name = required(name, "Subject name")?;
                if let Some(other) = next.find_subject_by_name(&name) {
                    if other.id != id {
                        return Err(AppError::validation(format!(
                            "Subject '{}' already exists",
                            name
                        )));
                    }
                }
            }

            let subject = find_mut(&mut next.subjects, &id, "Subject")?;
            if let Some(name) = update.name {
                subject.name = name.trim().to_string();
            }
            if let Some(color) = optional_text(update.color) {
                subject.color = color;
            }
            if let Some(has_book) = update.has_book {
                subject.has_book = has_book;
            }
            if let Some(teacher) = update.teacher {
                subject.teacher = optional_text(Some(teacher));
            }
            if let Some(room) = update.room {
                subject.room = optional_text(Some(room));
            }
        }
        Command::DeleteSubject { id } => remove_by_id(&mut next.subjects, &id, "Subject")?,
        Command::AddCustomItem { subject_id, item } => {
            let name = required(&item.name, "Item name")?;
            let (location, custom_location) = relocation(item.location, item.custom_location);
            let subject = find_mut(&mut next.subjects, &subject_id, "Subject")?;
            subject.custom_items.push(CustomItem {
                id: new_id(),
                name,
                location,
                custom_location,
            });
        }
        Command::UpdateCustomItem {
            subject_id,
            item_id,
            update,
        } => {
            let subject = find_mut(&mut next.subjects, &subject_id, "Subject")?;
            let item = find_mut(&mut subject.custom_items, &item_id, "Item")?;
            let (location, custom_location) = relocation(update.location, update.custom_location);
            item.location = location;
            item.custom_location = custom_location;
        }
        Command::DeleteCustomItem {
            subject_id,
            item_id,
        } => {
            let subject = find_mut(&mut next.subjects, &subject_id, "Subject")?;
            remove_by_id(&mut subject.custom_items, &item_id, "Item")?;
        }

        Command::UpdateSettings(settings) => next.settings = settings,
        Command::ToggleWidget(widget) => next.settings.widgets.toggle(widget),
    }

    Ok(next)
}

/// Fresh identifier, unique within any collection
fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Custom location text only survives for `Other`
fn relocation(location: BookLocation, custom: Option<String>) -> (BookLocation, Option<String>) {
    match location {
        BookLocation::Other => (location, optional_text(custom)),
        _ => (location, None),
    }
}

fn build_event(id: String, req: CreateEventRequest) -> Result<Event> {
    let title = required(&req.title, "Event title")?;

    let (date, repeat_weekly, days) = match req.schedule {
        EventSchedule::Once(date) => (format_date(date), false, BTreeSet::new()),
        EventSchedule::Weekly(days) => {
            if days.is_empty() {
                return Err(AppError::validation(
                    "A weekly event needs at least one weekday",
                ));
            }
            if let Some(day) = days.iter().find(|day| **day > MAX_WEEKDAY_INDEX) {
                return Err(AppError::validation(format!(
                    "Weekday index {} is out of range 0-{}",
                    day, MAX_WEEKDAY_INDEX
                )));
            }
            (String::new(), true, days.into_iter().collect())
        }
    };

    Ok(Event {
        id,
        title,
        kind: req.kind,
        color: Some(optional_text(req.color).unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string())),
        date,
        time: req.time.map(format_time),
        repeat_weekly,
        days,
    })
}

fn build_subject(req: CreateSubjectRequest) -> Result<Subject> {
    Ok(Subject {
        id: new_id(),
        name: required(&req.name, "Subject name")?,
        color: optional_text(Some(req.color)).unwrap_or_else(|| DEFAULT_SUBJECT_COLOR.to_string()),
        has_book: req.has_book,
        teacher: optional_text(req.teacher),
        room: optional_text(req.room),
        custom_items: Vec::new(),
    })
}

/// Entities addressed by id
trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($entity:ty),*) => {
        $(impl Identified for $entity {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(Note, Test, Task, Book, Event, Subject, CustomItem);

fn find<'a, T: Identified>(items: &'a [T], id: &str, kind: &'static str) -> Result<&'a T> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| AppError::not_found(kind, id))
}

fn find_mut<'a, T: Identified>(items: &'a mut [T], id: &str, kind: &'static str) -> Result<&'a mut T> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| AppError::not_found(kind, id))
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str, kind: &'static str) -> Result<()> {
    let before = items.len();
    items.retain(|item| item.id() != id);
    if items.len() == before {
        return Err(AppError::not_found(kind, id));
    }
    Ok(())
}
