//! Export service
//!
//! Dumps the whole document, unmodified, as pretty-printed JSON.

use crate::config::EXPORT_FILE_NAME;
use crate::error::Result;
use crate::store::AppDocument;
use std::path::PathBuf;
use tokio::fs;

#[derive(Clone)]
pub struct ExportService {
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }

    /// Write the document to `school-hub-export.json`, returning the file path
    pub async fn export(&self, document: &AppDocument) -> Result<PathBuf> {
        tracing::info!("Exporting document to {:?}", self.export_dir);

        fs::create_dir_all(&self.export_dir).await?;

        let path = self.export_dir.join(EXPORT_FILE_NAME);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, render(document)?).await?;
        fs::rename(&temp_path, &path).await?;

        tracing::info!("Export written: {:?}", path);
        Ok(path)
    }
}

/// Pretty-printed JSON of the document
pub fn render(document: &AppDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
