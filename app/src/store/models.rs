//! Organizer entities
//!
//! Rust structs for every collection held in the persisted document.
//! Field names serialize in camelCase so documents written by earlier
//! versions of the organizer stay readable.
//!
//! Dates and times are stored as the strings the user entered
//! ("YYYY-MM-DD", "HH:MM") and parsed on demand. A malformed stored date
//! never matches any day.

use crate::views::dates::{parse_date, parse_time, weekday_index};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A quick note filed under a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub subject: String,
    pub text: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created: i64,
}

/// A test or other important date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    pub id: String,
    pub subject: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub details: String,
}

impl Test {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn time_of_day(&self) -> Option<NaiveTime> {
        self.time.as_deref().and_then(parse_time)
    }

    /// Ordering key: date, then time with a missing time counting as midnight
    pub fn sort_key(&self) -> (Option<NaiveDate>, NaiveTime) {
        (self.day(), self.time_of_day().unwrap_or(NaiveTime::MIN))
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default)]
    pub done: bool,
    pub created: i64,
}

impl Task {
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due.as_deref().and_then(parse_date)
    }
}

/// Where a book or subject item currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookLocation {
    Class,
    Locker,
    Home,
    #[serde(other)]
    Other,
}

impl BookLocation {
    pub const ALL: [BookLocation; 4] = [
        BookLocation::Class,
        BookLocation::Locker,
        BookLocation::Home,
        BookLocation::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookLocation::Class => "Class",
            BookLocation::Locker => "Locker",
            BookLocation::Home => "Home",
            BookLocation::Other => "Other",
        }
    }
}

impl fmt::Display for BookLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "class" => Ok(BookLocation::Class),
            "locker" => Ok(BookLocation::Locker),
            "home" => Ok(BookLocation::Home),
            "other" => Ok(BookLocation::Other),
            _ => Err(format!(
                "Invalid location '{}'. Use class, locker, home or other",
                s
            )),
        }
    }
}

/// Label shown for a location, preferring the custom text for `Other`
fn location_label<'a>(location: BookLocation, custom: Option<&'a str>) -> &'a str {
    match (location, custom) {
        (BookLocation::Other, Some(text)) if !text.trim().is_empty() => text,
        _ => location.as_str(),
    }
}

/// A tracked book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub location: BookLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_location: Option<String>,
}

impl Book {
    pub fn location_display(&self) -> &str {
        location_label(self.location, self.custom_location.as_deref())
    }
}

/// Calendar event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "ECA")]
    Eca,
    Library,
    Test,
    Reminder,
    #[serde(other)]
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Eca => "ECA",
            EventType::Library => "Library",
            EventType::Test => "Test",
            EventType::Reminder => "Reminder",
            EventType::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eca" => Ok(EventType::Eca),
            "library" => Ok(EventType::Library),
            "test" => Ok(EventType::Test),
            "reminder" => Ok(EventType::Reminder),
            "other" => Ok(EventType::Other),
            _ => Err(format!(
                "Invalid event type '{}'. Use eca, library, test, reminder or other",
                s
            )),
        }
    }
}

/// A calendar event, either on one date or repeating on weekdays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Empty for weekly events
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub repeat_weekly: bool,
    /// Weekday indices, 0 = Sunday through 6 = Saturday
    #[serde(default)]
    pub days: BTreeSet<u8>,
}

impl Event {
    pub fn day(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn time_of_day(&self) -> Option<NaiveTime> {
        self.time.as_deref().and_then(parse_time)
    }

    /// An event occurs on `day` when its own date is `day`, or when it
    /// repeats weekly and `day`'s weekday is in its set. Both are checked.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        let on_date = self.day() == Some(day);
        let repeating = self.repeat_weekly && self.days.contains(&weekday_index(day));
        on_date || repeating
    }
}

/// An item other than the main book that belongs to a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomItem {
    pub id: String,
    pub name: String,
    pub location: BookLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_location: Option<String>,
}

impl CustomItem {
    pub fn location_display(&self) -> &str {
        location_label(self.location, self.custom_location.as_deref())
    }
}

/// A school subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub has_book: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default)]
    pub custom_items: Vec<CustomItem>,
}

/// Create note request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub subject: String,
    pub text: String,
}

/// Create test request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestRequest {
    pub subject: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub details: String,
}

/// Create task request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
    pub subject: Option<String>,
    pub due: Option<NaiveDate>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub name: String,
    pub location: BookLocation,
    pub custom_location: Option<String>,
}

impl CreateBookRequest {
    /// A book named after a subject, e.g. "Maths Book"
    pub fn for_subject(subject: &str, location: BookLocation, custom_location: Option<String>) -> Self {
        Self {
            name: format!("{} Book", subject.trim()),
            location,
            custom_location,
        }
    }
}

/// Move a book or custom item to a new location
#[derive(Debug, Clone, Deserialize)]
pub struct RelocateRequest {
    pub location: BookLocation,
    /// Kept only when `location` is `Other`
    pub custom_location: Option<String>,
}

/// When an event happens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum EventSchedule {
    Once(NaiveDate),
    /// Weekday indices, 0 = Sunday through 6 = Saturday
    Weekly(Vec<u8>),
}

/// Create or replace event request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub kind: EventType,
    pub color: Option<String>,
    pub schedule: EventSchedule,
    pub time: Option<NaiveTime>,
}

/// Create subject request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    pub color: String,
    pub has_book: bool,
    pub teacher: Option<String>,
    pub room: Option<String>,
}

/// Partial subject update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub has_book: Option<bool>,
    pub teacher: Option<String>,
    pub room: Option<String>,
}

/// Create custom item request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomItemRequest {
    pub name: String,
    pub location: BookLocation,
    pub custom_location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly_event(days: &[u8]) -> Event {
        Event {
            id: "e1".to_string(),
            title: "Chess club".to_string(),
            kind: EventType::Eca,
            color: None,
            date: String::new(),
            time: None,
            repeat_weekly: true,
            days: days.iter().copied().collect(),
        }
    }

    #[test]
    fn test_unknown_location_reads_as_other() {
        let book: Book =
            serde_json::from_str(r#"{"id":"b1","name":"Atlas","location":"Car"}"#).unwrap();
        assert_eq!(book.location, BookLocation::Other);
        assert_eq!(book.location_display(), "Other");
    }

    #[test]
    fn test_location_display_prefers_custom_text() {
        let book = Book {
            id: "b1".to_string(),
            name: "Maths Book".to_string(),
            location: BookLocation::Other,
            custom_location: Some("Library shelf".to_string()),
        };
        assert_eq!(book.location_display(), "Library shelf");

        let at_home = Book {
            location: BookLocation::Home,
            ..book
        };
        assert_eq!(at_home.location_display(), "Home");
    }

    #[test]
    fn test_event_wire_shape() {
        let json = r#"{"id":"e1","title":"Library","type":"ECA","date":"","time":"","repeatWeekly":true,"days":[3,1,3]}"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.kind, EventType::Eca);
        assert_eq!(event.days.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert!(event.day().is_none());
        assert!(event.time_of_day().is_none());

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "ECA");
        assert_eq!(value["repeatWeekly"], true);
    }

    #[test]
    fn test_weekly_event_occurrence() {
        let event = weekly_event(&[1, 3]);

        // 2024-01-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();

        assert!(event.occurs_on(monday));
        assert!(!event.occurs_on(tuesday));
        assert!(event.occurs_on(wednesday));
    }

    #[test]
    fn test_event_with_date_and_weekdays_matches_either() {
        let mut event = weekly_event(&[5]);
        event.date = "2024-01-02".to_string();

        assert!(event.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
        assert!(event.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
        assert!(!event.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()));
    }

    #[test]
    fn test_malformed_date_never_matches() {
        let mut event = weekly_event(&[]);
        event.repeat_weekly = false;
        event.date = "next tuesday".to_string();

        assert!(!event.occurs_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }

    #[test]
    fn test_test_sort_key_defaults_to_midnight() {
        let test = Test {
            id: "t1".to_string(),
            subject: "Maths".to_string(),
            date: "2024-03-04".to_string(),
            time: None,
            details: String::new(),
        };
        let (day, time) = test.sort_key();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(time, NaiveTime::MIN);
    }
}
