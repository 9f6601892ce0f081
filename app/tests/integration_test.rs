//! Integration tests for School Hub
//!
//! These tests verify end-to-end functionality including:
//! - Document persistence across restarts on disk
//! - Loading older documents with missing fields
//! - Calendar and food plan views over a populated document
//! - Hydration counter persistence and daily reset
//! - Export and the curriculum wizard

use chrono::{NaiveDate, NaiveTime};
use schoolhub::app::{setup, AppState};
use schoolhub::config::{DOCUMENT_STORAGE_KEY, HYDRATION_PROGRESS_KEY};
use schoolhub::services::curriculum::{GcseWizard, Mfl, MflSelection, YearGroup};
use schoolhub::storage::{FileKvStore, KeyValueStore, MemoryKvStore};
use schoolhub::store::models::{
    BookLocation, CreateBookRequest, CreateEventRequest, CreateNoteRequest, CreateTaskRequest,
    CreateTestRequest, EventSchedule, EventType, RelocateRequest,
};
use schoolhub::store::{AppDocument, Command, WeekLayout};
use schoolhub::views::dashboard::dashboard;
use schoolhub::views::{agenda_for, week_agenda, week_meal_plan};
use std::sync::Arc;
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Helper to create app state over a temporary data directory
fn create_test_state(today: NaiveDate) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let state = setup(temp_dir.path().to_path_buf(), today).unwrap();
    (state, temp_dir)
}

#[tokio::test]
async fn test_document_survives_restart() {
    let today = date(2024, 1, 10);
    let (state, temp) = create_test_state(today);

    state
        .dispatch(Command::AddNote(CreateNoteRequest {
            subject: "English".to_string(),
            text: "Macbeth act 1 quotes".to_string(),
        }))
        .await
        .unwrap();
    state
        .dispatch(Command::AddTask(CreateTaskRequest {
            text: "Revise quotes".to_string(),
            subject: Some("English".to_string()),
            due: Some(date(2024, 1, 12)),
        }))
        .await
        .unwrap();
    let before = state.document().await;
    drop(state);

    // Restart over the same directory
    let reopened = setup(temp.path().to_path_buf(), today).unwrap();
    let after = reopened.document().await;

    assert_eq!(*after, *before);
    assert_eq!(after.tasks[0].due.as_deref(), Some("2024-01-12"));
}

#[tokio::test]
async fn test_old_document_is_completed_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileKvStore::new(temp_dir.path().join("storage"));
    storage.initialize().unwrap();

    // Written by an older version: no widgets, no hydration goal, no events
    let old = r#"{
        "notes": [{"id": "n1", "subject": "Maths", "text": "Pythagoras", "created": 1}],
        "meals": ["Pasta salad"],
        "settings": {"weekLayout": "sun-thu", "userName": "Sam"}
    }"#;
    storage.set_item(DOCUMENT_STORAGE_KEY, old).unwrap();

    let state = setup(temp_dir.path().to_path_buf(), date(2024, 1, 10)).unwrap();
    let doc = state.document().await;

    assert_eq!(doc.notes.len(), 1);
    assert_eq!(doc.meals, vec!["Pasta salad".to_string()]);
    assert!(doc.events.is_empty());
    assert_eq!(doc.settings.week_layout, WeekLayout::SunThu);
    assert_eq!(doc.settings.user_name, "Sam");
    assert_eq!(doc.settings.hydration_goal, 8);
    assert!(doc.settings.widgets.food_plan);
}

#[tokio::test]
async fn test_corrupt_document_starts_fresh() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileKvStore::new(temp_dir.path().join("storage"));
    storage.initialize().unwrap();
    storage.set_item(DOCUMENT_STORAGE_KEY, "not json at all").unwrap();

    let state = setup(temp_dir.path().to_path_buf(), date(2024, 1, 10)).unwrap();

    assert_eq!(*state.document().await, AppDocument::default());

    // The next command overwrites the corrupt value
    state.dispatch(Command::SeedMeals).await.unwrap();
    let raw = storage.get_item(DOCUMENT_STORAGE_KEY).unwrap().unwrap();
    assert!(serde_json::from_str::<AppDocument>(&raw).is_ok());
}

#[tokio::test]
async fn test_school_week_views() {
    let today = date(2024, 1, 10); // Wednesday
    let (state, _temp) = create_test_state(today);

    state
        .dispatch(Command::AddEvent(CreateEventRequest {
            title: "Football club".to_string(),
            kind: EventType::Eca,
            color: None,
            schedule: EventSchedule::Weekly(vec![1, 3]),
            time: NaiveTime::from_hms_opt(15, 30, 0),
        }))
        .await
        .unwrap();
    state
        .dispatch(Command::AddTest(CreateTestRequest {
            subject: "Science".to_string(),
            date: date(2024, 1, 11),
            time: None,
            details: "Cells".to_string(),
        }))
        .await
        .unwrap();
    let test_id = state.document().await.tests[0].id.clone();
    state
        .dispatch(Command::ScheduleTest { id: test_id })
        .await
        .unwrap();
    state
        .dispatch(Command::AssignMeal {
            date: date(2024, 1, 8),
            meal: "Chicken wrap".to_string(),
        })
        .await
        .unwrap();

    let doc = state.document().await;

    let week = week_agenda(&doc, today, 0, WeekLayout::MonFri);
    let titles: Vec<Vec<&str>> = week
        .iter()
        .map(|day| day.events.iter().map(|e| e.title.as_str()).collect())
        .collect();
    assert_eq!(
        titles,
        vec![
            vec!["Football club"],
            vec![],
            vec!["Football club"],
            vec!["Test: Science"],
            vec![],
        ]
    );

    // Next week repeats the club but not the one-off test
    let next_week = week_agenda(&doc, today, 1, WeekLayout::MonFri);
    assert_eq!(next_week[0].events.len(), 1);
    assert!(next_week[3].events.is_empty());

    let plan = week_meal_plan(&doc, today, 0, WeekLayout::MonFri);
    assert_eq!(plan[0].1, &["Chicken wrap".to_string()]);
    assert!(doc.food_plan.contains_key("2024-01-wk2-day1"));

    let thursday = agenda_for(&doc, date(2024, 1, 11));
    assert_eq!(thursday.tests.len(), 1);
    assert_eq!(thursday.events[0].kind, EventType::Test);

    let home = dashboard(&doc, today);
    assert_eq!(home.upcoming_tests.unwrap().len(), 1);
    assert_eq!(home.events.unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_commands_leave_document_untouched() {
    let (state, _temp) = create_test_state(date(2024, 1, 10));
    state
        .dispatch(Command::AddBook(CreateBookRequest::for_subject(
            "History",
            BookLocation::Locker,
            None,
        )))
        .await
        .unwrap();
    let before = state.document().await;

    assert!(state
        .dispatch(Command::AddEvent(CreateEventRequest {
            title: "Nothing".to_string(),
            kind: EventType::Other,
            color: None,
            schedule: EventSchedule::Weekly(vec![]),
            time: None,
        }))
        .await
        .is_err());
    assert!(state
        .dispatch(Command::UpdateBook {
            id: "missing".to_string(),
            update: RelocateRequest {
                location: BookLocation::Home,
                custom_location: None,
            },
        })
        .await
        .is_err());

    let after = state.document().await;
    assert_eq!(*after, *before);
    assert_eq!(after.books[0].name, "History Book");
}

#[tokio::test]
async fn test_hydration_persists_and_resets_next_day() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_path_buf();

    let state = setup(data_dir.clone(), date(2024, 1, 1)).unwrap();
    for _ in 0..5 {
        state.hydration.increment(8).await;
    }
    drop(state);

    // Same day: counter restored
    let state = setup(data_dir.clone(), date(2024, 1, 1)).unwrap();
    assert_eq!(state.hydration_status().await.progress, 5);

    // Running process crosses midnight
    assert!(state.hydration.check_daily_reset(date(2024, 1, 2)).await);
    let status = state.hydration_status().await;
    assert_eq!(status.progress, 0);
    assert_eq!(status.last_reset.as_deref(), Some("2024-01-02"));

    let storage = FileKvStore::new(data_dir.join("storage"));
    assert_eq!(
        storage.get_item(HYDRATION_PROGRESS_KEY).unwrap().as_deref(),
        Some("0")
    );
}

#[tokio::test]
async fn test_export_deep_equals_document() {
    let (state, _temp) = create_test_state(date(2024, 1, 10));
    state.dispatch(Command::SeedMeals).await.unwrap();
    state
        .dispatch(Command::SetDayMeals {
            date: date(2024, 1, 10),
            meals: vec!["Falafel wrap".to_string(), "Fruit salad".to_string()],
        })
        .await
        .unwrap();

    let path = state.export_document().await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let exported: AppDocument = serde_json::from_str(&content).unwrap();
    assert_eq!(exported, *state.document().await);
}

#[tokio::test]
async fn test_curriculum_batch_add() {
    let (state, _temp) = create_test_state(date(2024, 1, 10));

    let mut selection = MflSelection::new(YearGroup::Year6);
    selection.toggle(Mfl::French);
    selection.toggle(Mfl::Arabic);
    let subjects = selection.confirm().unwrap();
    let expected = subjects.len();

    state
        .dispatch(Command::BatchAddSubjects(subjects.clone()))
        .await
        .unwrap();
    // Running the wizard twice adds nothing new
    state
        .dispatch(Command::BatchAddSubjects(subjects))
        .await
        .unwrap();

    let doc = state.document().await;
    assert_eq!(doc.subjects.len(), expected);
    assert!(doc.find_subject_by_name("french").is_some());

    let mut wizard = GcseWizard::new(YearGroup::Year10);
    wizard.select_science("Combined Science").unwrap();
    wizard.select_humanities("History").unwrap();
    wizard.toggle_arts("Music").unwrap();
    let gcse = wizard.confirm().unwrap();
    assert_eq!(gcse.len(), 6);
}

#[tokio::test]
async fn test_quota_exceeded_keeps_working_in_memory() {
    let storage = Arc::new(MemoryKvStore::with_quota(200));
    let state = AppState::new(storage.clone(), std::env::temp_dir(), date(2024, 1, 10));

    state.dispatch(Command::SeedMeals).await.unwrap();

    assert_eq!(state.document().await.meals.len(), 8);
    assert!(state.has_unsaved_changes().await);
    assert!(storage.get_item(DOCUMENT_STORAGE_KEY).unwrap().is_none());
}
