use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a stopword list.
#[derive(Debug, Error)]
pub enum StopwordError {
    #[error("failed to read stopwords from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("stopword list {} contains no words", .path.display())]
    Empty { path: PathBuf },
}

impl StopwordError {
    /// Path of the stopword resource that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            StopwordError::Io { path, .. } | StopwordError::Empty { path } => path,
        }
    }
}
