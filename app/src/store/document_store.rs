//! Document store
//!
//! Owns the single in-memory document and keeps it durable. The document
//! is read once at startup and rewritten in full after every command.
//!
//! Neither reading nor writing is fatal: an unreadable document is
//! replaced by the defaults, and a failed write leaves the new in-memory
//! document in place until the next successful write.

use super::command::Command;
use super::document::AppDocument;
use super::merge::load_document;
use super::reducer::reduce;
use crate::config::DOCUMENT_STORAGE_KEY;
use crate::error::Result;
use crate::storage::SharedStorage;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct DocumentStore {
    storage: SharedStorage,
    key: String,
    current: Arc<AppDocument>,
    unsaved: bool,
}

impl DocumentStore {
    /// Load the document stored under the default key
    pub fn load(storage: SharedStorage) -> Self {
        Self::load_key(storage, DOCUMENT_STORAGE_KEY)
    }

    /// Load the document stored under `key`, falling back to defaults
    pub fn load_key(storage: SharedStorage, key: &str) -> Self {
        let document = match storage.get_item(key) {
            Ok(None) => {
                tracing::info!("No stored document under {}, starting with defaults", key);
                AppDocument::default()
            }
            Ok(Some(raw)) => match load_document(&raw) {
                Ok(document) => {
                    tracing::info!(
                        "Loaded document: {} notes, {} tests, {} tasks, {} events",
                        document.notes.len(),
                        document.tests.len(),
                        document.tasks.len(),
                        document.events.len()
                    );
                    document
                }
                Err(e) => {
                    tracing::error!("Error reading stored document {}: {}", key, e);
                    AppDocument::default()
                }
            },
            Err(e) => {
                tracing::error!("Error reading storage key {}: {}", key, e);
                AppDocument::default()
            }
        };

        Self {
            storage,
            key: key.to_string(),
            current: Arc::new(document),
            unsaved: false,
        }
    }

    /// Current document
    pub fn document(&self) -> &AppDocument {
        &self.current
    }

    /// Shared handle to the current document; stays valid after later commands
    pub fn snapshot(&self) -> Arc<AppDocument> {
        Arc::clone(&self.current)
    }

    /// True when the last write failed and the in-memory document is ahead of storage
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Apply a command at the current time
    pub fn dispatch(&mut self, command: Command) -> Result<Arc<AppDocument>> {
        self.dispatch_at(command, Utc::now())
    }

    /// Apply a command and persist the result
    ///
    /// Invalid commands return an error and change nothing. Storage
    /// failures are logged; the new document is kept regardless.
    pub fn dispatch_at(&mut self, command: Command, now: DateTime<Utc>) -> Result<Arc<AppDocument>> {
        let name = command.name();
        let next = reduce(&self.current, command, now)?;

        tracing::debug!("Applied {} command", name);

        self.current = Arc::new(next);
        self.save();

        Ok(self.snapshot())
    }

    /// Write the whole document back to storage
    pub fn save(&mut self) {
        match self.write() {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                tracing::error!("Error writing document {}: {}", self.key, e);
                self.unsaved = true;
            }
        }
    }

    fn write(&self) -> Result<()> {
        let content = serde_json::to_string(self.current.as_ref())?;
        self.storage.set_item(&self.key, &content)
    }
}
