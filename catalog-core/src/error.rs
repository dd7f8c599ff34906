use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("File is not readable: {}", .0.display())]
    NotReadable(PathBuf),

    #[error("Invalid JSON file path: {candidate}. {cause}")]
    Unresolved { candidate: String, cause: Box<PathError> },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read JSON file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON format in file: {0}")]
    InvalidJson(String),

    #[error("JSON data is not in a recognized format")]
    UnrecognizedFormat,
}

/// A single record could not be persisted. Never aborts an import run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct SinkError(pub String);

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
