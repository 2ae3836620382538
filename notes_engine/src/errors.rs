use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    /// The request carried no vault path.
    #[error("Vault path not configured")]
    VaultNotConfigured,

    /// The vault path does not point at an existing directory.
    #[error("Vault path does not exist: {}", .0.display())]
    VaultNotFound(PathBuf),

    /// Nothing but whitespace to write.
    #[error("Note content is empty")]
    EmptyContent,

    /// Creating the folder or writing the note failed.
    #[error("{source}: '{}'", path.display())]
    FileSystemError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NoteError {
    /// Wraps an I/O error together with the path it happened on.
    pub fn file_system(path: impl Into<PathBuf>, source: io::Error) -> Self {
        NoteError::FileSystemError {
            path: path.into(),
            source,
        }
    }
}
