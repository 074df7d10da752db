//! Pretrained artifacts for the chat bot.
//!
//! The intent recognizer, the tag classifier, the TF-IDF vectorizer and the
//! per-tag thread embeddings are fitted offline and shipped as files. This
//! crate reads them back into whatever serde type the caller names; it has
//! no opinion on their internal structure.
//!
//! ```no_run
//! use artifacts::load_artifact;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct ThreadEmbeddings {
//!     thread_ids: Vec<u64>,
//!     vectors: Vec<Vec<f32>>,
//! }
//!
//! let threads: ThreadEmbeddings =
//!     load_artifact("data/thread_embeddings_by_tags/python.pkl").unwrap();
//! ```
//!
//! Files carry a small header followed by a bincode payload that may be
//! zstd-compressed; see [`ArtifactCodec`]. Loading never yields a partial
//! value: a missing file, a foreign file, a payload of the wrong shape and a
//! payload with leftover bytes are all errors.

mod codec;
mod error;

pub use crate::codec::{decode_artifact, encode_artifact, ArtifactCodec, ARTIFACT_FORMAT_VERSION};
pub use crate::error::ArtifactError;

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn, Level};

/// Reads and deserializes the artifact stored at `path`.
pub fn load_artifact<T, P>(path: P) -> Result<T, ArtifactError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let start = Instant::now();

    let span = tracing::span!(Level::INFO, "artifacts.load", path = %path.display());
    let _guard = span.enter();

    let result = fs::read(path)
        .map_err(|e| ArtifactError::read(path, e))
        .and_then(|bytes| decode_artifact(&bytes).map(|value| (value, bytes.len())));

    let elapsed_micros = start.elapsed().as_micros();
    match result {
        Ok((value, bytes)) => {
            info!(bytes, elapsed_micros, "artifact_loaded");
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, elapsed_micros, "artifact_failure");
            Err(err)
        }
    }
}

/// Serializes `value` and writes it to `path`, creating parent directories
/// as needed.
///
/// The bytes go to a temporary file in the target directory that is then
/// renamed over `path`, so an existing artifact is either fully replaced or
/// left untouched.
pub fn store_artifact<T, P>(path: P, value: &T, codec: ArtifactCodec) -> Result<(), ArtifactError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = encode_artifact(value, codec)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ArtifactError::write(path, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ArtifactError::write(path, e))?;
    tmp.write_all(&bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| ArtifactError::write(path, e))?;
    tmp.persist(path)
        .map_err(|e| ArtifactError::write(path, e.error))?;

    info!(path = %path.display(), bytes = bytes.len(), codec = ?codec, "artifact_stored");
    Ok(())
}
