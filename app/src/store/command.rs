//! Typed mutation commands
//!
//! Every change to the document is expressed as one of these commands and
//! applied by `reducer::reduce`.

use super::models::{
    CreateBookRequest, CreateCustomItemRequest, CreateEventRequest, CreateNoteRequest,
    CreateSubjectRequest, CreateTaskRequest, CreateTestRequest, RelocateRequest,
    UpdateSubjectRequest,
};
use super::settings::{Settings, Widget};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub enum Command {
    // Notes
    AddNote(CreateNoteRequest),
    DeleteNote { id: String },

    // Tests
    AddTest(CreateTestRequest),
    DeleteTest { id: String },
    /// Copy a test into the calendar as a one-off `Test` event
    ScheduleTest { id: String },

    // Tasks
    AddTask(CreateTaskRequest),
    ToggleTask { id: String },
    DeleteTask { id: String },
    ClearCompletedTasks,

    // Books
    AddBook(CreateBookRequest),
    UpdateBook { id: String, update: RelocateRequest },
    DeleteBook { id: String },

    // Meals and the food plan
    AddMeal { name: String },
    DeleteMeal { name: String },
    /// Add every starter meal not already in the list
    SeedMeals,
    AssignMeal { date: NaiveDate, meal: String },
    RemoveMealFromDay { date: NaiveDate, meal: String },
    SetDayMeals { date: NaiveDate, meals: Vec<String> },
    ClearWeek { dates: Vec<NaiveDate> },

    // Events
    AddEvent(CreateEventRequest),
    /// Replace an event's contents, keeping its id
    UpdateEvent { id: String, event: CreateEventRequest },
    DeleteEvent { id: String },

    // Subjects
    AddSubject(CreateSubjectRequest),
    /// Add several subjects, skipping names already present
    BatchAddSubjects(Vec<CreateSubjectRequest>),
    UpdateSubject { id: String, update: UpdateSubjectRequest },
    DeleteSubject { id: String },
    AddCustomItem { subject_id: String, item: CreateCustomItemRequest },
    UpdateCustomItem { subject_id: String, item_id: String, update: RelocateRequest },
    DeleteCustomItem { subject_id: String, item_id: String },

    // Settings
    UpdateSettings(Settings),
    ToggleWidget(Widget),
}

impl Command {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddNote(_) => "add_note",
            Command::DeleteNote { .. } => "delete_note",
            Command::AddTest(_) => "add_test",
            Command::DeleteTest { .. } => "delete_test",
            Command::ScheduleTest { .. } => "schedule_test",
            Command::AddTask(_) => "add_task",
            Command::ToggleTask { .. } => "toggle_task",
            Command::DeleteTask { .. } => "delete_task",
            Command::ClearCompletedTasks => "clear_completed_tasks",
            Command::AddBook(_) => "add_book",
            Command::UpdateBook { .. } => "update_book",
            Command::DeleteBook { .. } => "delete_book",
            Command::AddMeal { .. } => "add_meal",
            Command::DeleteMeal { .. } => "delete_meal",
            Command::SeedMeals => "seed_meals",
            Command::AssignMeal { .. } => "assign_meal",
            Command::RemoveMealFromDay { .. } => "remove_meal_from_day",
            Command::SetDayMeals { .. } => "set_day_meals",
            Command::ClearWeek { .. } => "clear_week",
            Command::AddEvent(_) => "add_event",
            Command::UpdateEvent { .. } => "update_event",
            Command::DeleteEvent { .. } => "delete_event",
            Command::AddSubject(_) => "add_subject",
            Command::BatchAddSubjects(_) => "batch_add_subjects",
            Command::UpdateSubject { .. } => "update_subject",
            Command::DeleteSubject { .. } => "delete_subject",
            Command::AddCustomItem { .. } => "add_custom_item",
            Command::UpdateCustomItem { .. } => "update_custom_item",
            Command::DeleteCustomItem { .. } => "delete_custom_item",
            Command::UpdateSettings(_) => "update_settings",
            Command::ToggleWidget(_) => "toggle_widget",
        }
    }
}
