//! Key-value storage
//!
//! Persistent string storage addressed by a small set of well-known keys.
//! Access is synchronous and local: every call completes before returning.
//!
//! `FileKvStore` keeps one file per key inside a directory, e.g. key
//! "school-hub-data" is stored at "<root>/school-hub-data.json".
//! `MemoryKvStore` keeps values in memory and can enforce a byte quota.

use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// String storage addressed by key
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Shared handle to a key-value store
pub type SharedStorage = Arc<dyn KeyValueStore>;

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(AppError::Storage(format!("Invalid storage key: {:?}", key)))
    }
}

/// Directory-backed key-value store
#[derive(Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Create a store rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root directory if needed
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        tracing::info!("Key-value store initialized at: {:?}", self.root);
        Ok(())
    }

    /// Get store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn get_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.get_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)?;
        tracing::debug!("Read key {} ({} bytes)", key, value.len());

        Ok(Some(value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.get_path(key);

        // Write to temp file first, then rename into place
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        fs::rename(&temp_path, &path)?;

        tracing::debug!("Wrote key {} ({} bytes)", key, value.len());

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.get_path(key);

        if !path.exists() {
            return Ok(());
        }

        fs::remove_file(&path)?;
        tracing::debug!("Removed key {}", key);

        Ok(())
    }
}

/// In-memory key-value store with an optional quota on total stored bytes
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    items: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once keys plus values exceed `quota_bytes`
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: Arc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| AppError::Storage("Memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let mut items = self.lock()?;

        if let Some(quota) = self.quota_bytes {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(used);

            if needed > available {
                return Err(AppError::QuotaExceeded { needed, available });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}
