//! The persisted organizer document
//!
//! One JSON object holds every collection plus the settings record.

use super::models::{Book, Event, Note, Subject, Task, Test};
use super::settings::Settings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Planned meals addressed by food-plan key (see `views::dates::plan_key`)
pub type FoodPlan = BTreeMap<String, Vec<String>>;

/// Everything the organizer knows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppDocument {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub tests: Vec<Test>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default)]
    pub food_plan: FoodPlan,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub settings: Settings,
}

impl AppDocument {
    pub fn find_subject_by_name(&self, name: &str) -> Option<&Subject> {
        let name = name.trim();
        self.subjects
            .iter()
            .find(|subject| subject.name.trim().eq_ignore_ascii_case(name))
    }
}
