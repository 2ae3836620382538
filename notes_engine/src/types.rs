use std::path::PathBuf;

use serde::Serialize;

pub const DEFAULT_PAGE_TITLE: &str = "Untitled Conversation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub vault_path: String,
    pub content: String,
    pub page_title: String,
}

impl SaveRequest {
    pub fn new(vault_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            vault_path: vault_path.into(),
            content: content.into(),
            page_title: DEFAULT_PAGE_TITLE.to_string(),
        }
    }

    pub fn with_page_title(mut self, page_title: impl Into<String>) -> Self {
        self.page_title = page_title.into();
        self
    }
}

/// Where a note ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedNote {
    pub filepath: PathBuf,
    pub filename: String,
    pub folder: String,
}
