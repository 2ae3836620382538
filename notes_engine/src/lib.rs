pub mod errors;
pub mod note_config;
pub mod note_writer;
pub mod sanitize;
pub mod types;

pub use note_writer::NoteWriter;
pub use types::*;
