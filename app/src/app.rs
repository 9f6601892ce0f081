//! Application state and initialization
//!
//! This module owns the single document store and the services around it.
//! Every consumer goes through AppState; nothing mutates the document
//! except `dispatch`.

use crate::error::Result;
use crate::services::{ExportService, HydrationService, HydrationStatus};
use crate::storage::{FileKvStore, SharedStorage};
use crate::store::{AppDocument, Command, DocumentStore};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    store: Arc<Mutex<DocumentStore>>,
    pub hydration: HydrationService,
    pub export: ExportService,
}

impl AppState {
    pub fn new(storage: SharedStorage, data_dir: PathBuf, today: NaiveDate) -> Self {
        let store = DocumentStore::load(storage.clone());
        let hydration = HydrationService::new(storage, today);
        let export = ExportService::new(data_dir.join("exports"));

        Self {
            data_dir,
            store: Arc::new(Mutex::new(store)),
            hydration,
            export,
        }
    }

    /// Current document snapshot
    pub async fn document(&self) -> Arc<AppDocument> {
        self.store.lock().await.snapshot()
    }

    /// True when the last document write failed
    pub async fn has_unsaved_changes(&self) -> bool {
        self.store.lock().await.has_unsaved_changes()
    }

    /// Apply a command to the document and persist it
    pub async fn dispatch(&self, command: Command) -> Result<Arc<AppDocument>> {
        let document = self.store.lock().await.dispatch(command)?;
        self.hydration.sync_goal(document.settings.hydration_goal).await;
        Ok(document)
    }

    pub async fn hydration_status(&self) -> HydrationStatus {
        let goal = self.document().await.settings.hydration_goal;
        self.hydration.status(goal).await
    }

    /// Export the current document, returning the written file
    pub async fn export_document(&self) -> Result<PathBuf> {
        let document = self.document().await;
        self.export.export(&document).await
    }
}

/// Application setup - called once on startup
pub fn setup(data_dir: PathBuf, today: NaiveDate) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Data directory: {:?}", data_dir);

    std::fs::create_dir_all(&data_dir)?;
    std::fs::create_dir_all(data_dir.join("exports"))?;

    let storage = FileKvStore::new(data_dir.join("storage"));
    storage.initialize()?;

    let state = AppState::new(Arc::new(storage), data_dir, today);

    tracing::info!("Application initialized successfully");

    Ok(state)
}
