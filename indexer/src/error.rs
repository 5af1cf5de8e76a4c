use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the index.
///
/// A missing data directory is not an error, the scan just finds no runs.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to read data directory {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    /// The path that the failed operation was working on
    #[cfg(test)]
    pub(crate) fn path(&self) -> &std::path::Path {
        match self {
            IndexError::Scan { path, .. }
            | IndexError::CreateDir { path, .. }
            | IndexError::Write { path, .. } => path,
        }
    }
}

pub type IndexResult<T> = Result<T, IndexError>;
