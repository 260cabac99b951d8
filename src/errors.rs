use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `refactor`.
///
/// Every variant except `Config` aborts the run; a binary file is not an error
/// and never shows up here.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O without a more specific context.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The root directory handed to the scanner does not exist.
    #[error("Directory '{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    /// The root exists but is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A candidate file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A rewritten file could not be written back.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file or directory could not be renamed.
    #[error("Failed to rename {} to {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// An error that occurred while parsing the YAML defaults file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error from the `walkdir` crate.
    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// An error related to persisting a temporary file.
    #[error("Tempfile error: {0}")]
    TempFile(#[from] tempfile::PersistError),

    /// An error related to JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, refactor::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
