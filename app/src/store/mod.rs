//! Store module
//!
//! This module provides the organizer's single source of truth:
//! - Entity and settings definitions
//! - The persisted document and its merge-with-defaults loading
//! - Typed commands and the pure reducer that applies them
//! - The document store that persists every change

pub mod command;
pub mod document;
pub mod document_store;
pub mod merge;
pub mod models;
pub mod reducer;
pub mod settings;

pub use command::Command;
pub use document::{AppDocument, FoodPlan};
pub use document_store::DocumentStore;
pub use models::*;
pub use settings::{Settings, WeekLayout, Widget, WidgetSettings};
