#[derive(Debug, Clone)]
pub struct NoteConfig {
    pub folder_name_max_length: usize,
    pub file_name_max_length: usize,
    pub folder_fallback: String,
    pub file_fallback: String,
    pub extension: String,
    /// chrono format string appended as `_<timestamp>` when a name is taken
    pub timestamp_format: String,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            folder_name_max_length: 100,
            file_name_max_length: 50,
            folder_fallback: crate::types::DEFAULT_PAGE_TITLE.to_string(),
            file_fallback: "Untitled Note".to_string(),
            extension: "md".to_string(),
            timestamp_format: "%Y%m%d_%H%M%S".to_string(),
        }
    }
}
