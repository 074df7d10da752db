use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while building or loading an [`EmbeddingTable`](crate::EmbeddingTable).
///
/// Line numbers are 1-based. For tables built in memory they refer to the
/// position of the entry in the input iterator.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The embeddings file could not be opened.
    #[error("failed to open embeddings file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading failed part way through the input.
    #[error("io error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    /// A line is blank or a vector component is not a number.
    #[error("malformed entry at line {line}: {message}")]
    Parse { line: usize, message: String },
    /// A word carries no vector components at all.
    #[error("word {word:?} at line {line} has no vector components")]
    MissingVector { line: usize, word: String },
    /// A vector length differs from the dimension set by the first entry.
    #[error("line {line}: expected {expected} vector components, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// No entries, so there is nothing to infer the dimension from.
    #[error("embedding table is empty; cannot infer vector dimension")]
    Empty,
}
