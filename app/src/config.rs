//! Application configuration constants
//!
//! Central location for storage keys, time windows, defaults and
//! validation boundaries used throughout the application.

// ===== Storage Keys =====

/// Key under which the whole organizer document is persisted
pub const DOCUMENT_STORAGE_KEY: &str = "school-hub-data";

/// Key holding today's hydration count
pub const HYDRATION_PROGRESS_KEY: &str = "hydration-progress";

/// Key holding the calendar date of the last hydration reset (YYYY-MM-DD)
pub const HYDRATION_LAST_RESET_KEY: &str = "hydration-last-reset";

/// Key holding whether today's goal-reached message is still unacknowledged
pub const HYDRATION_GOAL_POPUP_KEY: &str = "hydration-goal-popup";

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "SCHOOLHUB_DATA_DIR";

/// Data directory used when neither the flag nor the environment sets one
pub const DEFAULT_DATA_DIR: &str = ".schoolhub";

// ===== Time Windows =====

/// A test is "soon" when it falls within this many days from today, inclusive
pub const SOON_WINDOW_DAYS: i64 = 7;

/// Interval between automatic hydration daily-reset checks
pub const HYDRATION_CHECK_INTERVAL_SECS: u64 = 60;

// ===== Defaults =====

/// Default number of glasses of water per day
pub const DEFAULT_HYDRATION_GOAL: u32 = 8;

/// File name used by the export action
pub const EXPORT_FILE_NAME: &str = "school-hub-export.json";

/// Colour given to new events when none is chosen
pub const DEFAULT_EVENT_COLOR: &str = "#3B82F6";

/// Colour of events created from a test
pub const TEST_EVENT_COLOR: &str = "#EF4444";

/// Colour of subjects created without an explicit colour
pub const DEFAULT_SUBJECT_COLOR: &str = "#3B82F6";

/// Subject used by quick notes when none is chosen
pub const DEFAULT_NOTE_SUBJECT: &str = "General";

/// Starter meals offered by the meal seeding action
pub const STARTER_MEALS: &[&str] = &[
    "Pasta salad",
    "Chicken wrap",
    "Hummus + veg",
    "Leftover curry",
    "Tuna sandwich",
    "Egg fried rice",
    "Caesar salad",
    "Soup + bread",
];

// ===== Dashboard Limits =====

/// Upcoming tests shown on the dashboard
pub const DASHBOARD_UPCOMING_TESTS: usize = 3;

/// Pending tasks shown on the dashboard
pub const DASHBOARD_PENDING_TASKS: usize = 5;

// ===== Validation =====

/// Highest weekday index accepted in a recurrence set (0 = Sunday, 6 = Saturday)
pub const MAX_WEEKDAY_INDEX: u8 = 6;
