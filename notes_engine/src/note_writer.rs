use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::errors::NoteError;
use crate::note_config::NoteConfig;
use crate::sanitize::sanitize_name;
use crate::types::{SaveRequest, SavedNote};

/// Writes notes into `<vault>/<sanitized page title>/<sanitized first line>.md`.
#[derive(Debug, Clone, Default)]
pub struct NoteWriter {
    config: NoteConfig,
}

impl NoteWriter {
    pub fn new(config: NoteConfig) -> Self {
        Self { config }
    }

    pub fn save(&self, request: &SaveRequest) -> Result<SavedNote, NoteError> {
        self.save_at(request, Local::now())
    }

    /// Same as [`NoteWriter::save`], with `now` used for the collision suffix.
    pub fn save_at(
        &self,
        request: &SaveRequest,
        now: DateTime<Local>,
    ) -> Result<SavedNote, NoteError> {
        let result = self.try_save(request, now);
        match &result {
            Ok(note) => info!("Saved note to {}", note.filepath.display()),
            Err(e) => warn!("Failed to save note: {}", e),
        }
        result
    }

    fn try_save(
        &self,
        request: &SaveRequest,
        now: DateTime<Local>,
    ) -> Result<SavedNote, NoteError> {
        if request.vault_path.is_empty() {
            return Err(NoteError::VaultNotConfigured);
        }

        let vault = PathBuf::from(&request.vault_path);
        if !vault.is_dir() {
            return Err(NoteError::VaultNotFound(vault));
        }

        if request.content.trim().is_empty() {
            return Err(NoteError::EmptyContent);
        }

        let folder = sanitize_name(
            &request.page_title,
            self.config.folder_name_max_length,
            &self.config.folder_fallback,
        );
        let folder_path = vault.join(&folder);
        fs::create_dir_all(&folder_path).map_err(|e| NoteError::file_system(&folder_path, e))?;

        let first_line = request.content.trim().lines().next().unwrap_or_default();
        let name = sanitize_name(
            first_line,
            self.config.file_name_max_length,
            &self.config.file_fallback,
        );

        let filepath = self.unique_path(&folder_path, &name, now);
        debug!("Resolved note path {}", filepath.display());

        fs::write(&filepath, &request.content)
            .map_err(|e| NoteError::file_system(&filepath, e))?;

        let filepath =
            std::path::absolute(&filepath).map_err(|e| NoteError::file_system(&filepath, e))?;
        let filename = filepath
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(SavedNote {
            filepath,
            filename,
            folder,
        })
    }

    /// `<folder>/<name>.md`, or `<folder>/<name>_<timestamp>.md` when the first
    /// one is taken. A second collision is not checked and gets overwritten.
    fn unique_path(&self, folder: &Path, name: &str, now: DateTime<Local>) -> PathBuf {
        let base = folder.join(format!("{}.{}", name, self.config.extension));
        if !base.exists() {
            return base;
        }

        let timestamp = now.format(&self.config.timestamp_format);
        folder.join(format!("{}_{}.{}", name, timestamp, self.config.extension))
    }
}
