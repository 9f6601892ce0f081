//! Services module
//!
//! Stateful helpers that sit beside the document store.

pub mod curriculum;
pub mod export;
pub mod hydration;

pub use curriculum::{GcseWizard, MflSelection, Mfl, Wizard, YearGroup};
pub use export::ExportService;
pub use hydration::{HydrationEvent, HydrationService, HydrationStatus};
