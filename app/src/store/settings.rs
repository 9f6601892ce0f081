//! Organizer settings
//!
//! The settings record is always present in the document. Every field has
//! a default so documents saved before a field existed still load.

use crate::config::DEFAULT_HYDRATION_GOAL;
use serde::{Deserialize, Serialize};
use std::fmt;

/// School whose students see the wellbeing survey link
pub const WELLBEING_SCHOOL: &str = "British School Muscat (BSM)";

/// External wellbeing survey, opened only for `WELLBEING_SCHOOL`
pub const WELLBEING_FORM_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSdh7a5a7A2bTFpvBr7e1d2QIDH_GOYC1DSoyK9CFiR6QHLX7Q/viewform";

/// Which days a school week shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeekLayout {
    /// Sunday to Thursday
    #[serde(rename = "sun-thu")]
    SunThu,
    /// Monday to Friday
    #[default]
    #[serde(rename = "mon-fri")]
    MonFri,
    /// Sunday to Saturday
    #[serde(rename = "full-week")]
    FullWeek,
}

impl fmt::Display for WeekLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeekLayout::SunThu => "sun-thu",
            WeekLayout::MonFri => "mon-fri",
            WeekLayout::FullWeek => "full-week",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for WeekLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sun-thu" => Ok(WeekLayout::SunThu),
            "mon-fri" => Ok(WeekLayout::MonFri),
            "full-week" | "full" => Ok(WeekLayout::FullWeek),
            _ => Err(format!(
                "Invalid week layout '{}'. Use sun-thu, mon-fri or full-week",
                s
            )),
        }
    }
}

/// Home screen widgets that can be hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    UpcomingTests,
    TodayTomorrowEvents,
    FoodPlan,
    QuickTodo,
    QuickNotes,
}

impl std::str::FromStr for Widget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upcoming-tests" => Ok(Widget::UpcomingTests),
            "events" | "today-tomorrow-events" => Ok(Widget::TodayTomorrowEvents),
            "food-plan" => Ok(Widget::FoodPlan),
            "quick-todo" => Ok(Widget::QuickTodo),
            "quick-notes" => Ok(Widget::QuickNotes),
            _ => Err(format!("Unknown widget '{}'", s)),
        }
    }
}

/// Per-widget visibility flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettings {
    #[serde(default = "default_true")]
    pub upcoming_tests: bool,
    #[serde(default = "default_true")]
    pub today_tomorrow_events: bool,
    #[serde(default = "default_true")]
    pub food_plan: bool,
    #[serde(default = "default_true")]
    pub quick_todo: bool,
    #[serde(default = "default_true")]
    pub quick_notes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            upcoming_tests: true,
            today_tomorrow_events: true,
            food_plan: true,
            quick_todo: true,
            quick_notes: true,
        }
    }
}

impl WidgetSettings {
    pub fn is_visible(&self, widget: Widget) -> bool {
        match widget {
            Widget::UpcomingTests => self.upcoming_tests,
            Widget::TodayTomorrowEvents => self.today_tomorrow_events,
            Widget::FoodPlan => self.food_plan,
            Widget::QuickTodo => self.quick_todo,
            Widget::QuickNotes => self.quick_notes,
        }
    }

    pub fn toggle(&mut self, widget: Widget) {
        let flag = match widget {
            Widget::UpcomingTests => &mut self.upcoming_tests,
            Widget::TodayTomorrowEvents => &mut self.today_tomorrow_events,
            Widget::FoodPlan => &mut self.food_plan,
            Widget::QuickTodo => &mut self.quick_todo,
            Widget::QuickNotes => &mut self.quick_notes,
        };
        *flag = !*flag;
    }
}

/// Study session timer preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudySession {
    pub enabled: bool,
    /// Session length in minutes
    pub duration: u32,
}

/// Daily study goal preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyStudyGoal {
    pub enabled: bool,
    pub hours: f64,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub week_layout: WeekLayout,
    #[serde(default = "default_true")]
    pub show_header: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_tabs: Option<bool>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub curriculum: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub year_group: String,
    #[serde(default)]
    pub mfl_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_school_subjects: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_session: Option<StudySession>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_study_goal: Option<DailyStudyGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_reminders: Option<bool>,
    #[serde(default)]
    pub widgets: WidgetSettings,
    #[serde(default = "default_hydration_goal")]
    pub hydration_goal: u32,
}

fn default_hydration_goal() -> u32 {
    DEFAULT_HYDRATION_GOAL
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            week_layout: WeekLayout::default(),
            show_header: true,
            collapse_tabs: None,
            user_name: String::new(),
            curriculum: String::new(),
            school: String::new(),
            year_group: String::new(),
            mfl_language: String::new(),
            use_school_subjects: None,
            study_session: None,
            daily_study_goal: None,
            study_reminders: None,
            widgets: WidgetSettings::default(),
            hydration_goal: default_hydration_goal(),
        }
    }
}

impl Settings {
    /// Survey link offered to students of the partner school
    pub fn wellbeing_form_url(&self) -> Option<&'static str> {
        (self.school == WELLBEING_SCHOOL).then_some(WELLBEING_FORM_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();

        assert_eq!(settings.week_layout, WeekLayout::MonFri);
        assert!(settings.show_header);
        assert_eq!(settings.hydration_goal, 8);
        assert!(settings.widgets.upcoming_tests);
        assert!(settings.widgets.quick_notes);
        assert!(settings.study_session.is_none());
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();

        assert_eq!(value["weekLayout"], "mon-fri");
        assert_eq!(value["hydrationGoal"], 8);
        assert_eq!(value["widgets"]["todayTomorrowEvents"], true);
        // Unset optional preferences are left out entirely
        assert!(value.get("studySession").is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"weekLayout":"sun-thu","widgets":{"foodPlan":false}}"#)
                .unwrap();

        assert_eq!(settings.week_layout, WeekLayout::SunThu);
        assert!(!settings.widgets.food_plan);
        assert!(settings.widgets.quick_todo);
        assert_eq!(settings.hydration_goal, 8);
    }

    #[test]
    fn test_widget_toggle() {
        let mut widgets = WidgetSettings::default();

        widgets.toggle(Widget::FoodPlan);
        assert!(!widgets.is_visible(Widget::FoodPlan));
        assert!(widgets.is_visible(Widget::QuickTodo));

        widgets.toggle(Widget::FoodPlan);
        assert!(widgets.is_visible(Widget::FoodPlan));
    }

    #[test]
    fn test_wellbeing_link_only_for_partner_school() {
        let mut settings = Settings::default();
        assert!(settings.wellbeing_form_url().is_none());

        settings.school = WELLBEING_SCHOOL.to_string();
        assert_eq!(settings.wellbeing_form_url(), Some(WELLBEING_FORM_URL));
    }
}
