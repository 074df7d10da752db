use std::io;
use std::path::{Path, PathBuf};

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

/// Errors that can occur while reading or writing an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file could not be read (missing, permissions, ...).
    #[error("failed to read artifact {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The artifact file could not be written.
    #[error("failed to write artifact {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The bytes do not start with the artifact header.
    #[error("not an artifact: missing or corrupt header")]
    BadHeader,
    /// Written by a newer (or unknown) version of the format.
    #[error("unsupported artifact format version {0}")]
    UnsupportedVersion(u8),
    /// Header names a codec this build does not know.
    #[error("unknown artifact codec tag {0}")]
    UnknownCodec(u8),
    /// Zstd compression or decompression failed.
    #[error("compression error: {0}")]
    Zstd(String),
    /// The payload could not be serialized.
    #[error("serialization encode error: {0}")]
    Encode(String),
    /// The payload does not decode into the requested type.
    #[error("serialization decode error: {0}")]
    Decode(String),
    /// Decoding succeeded but did not consume the whole payload.
    #[error("artifact has {0} trailing bytes after the encoded value")]
    TrailingBytes(usize),
}

impl ArtifactError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        ArtifactError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        ArtifactError::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the file itself was unreachable, as opposed to present but
    /// not decodable.
    pub fn is_io(&self) -> bool {
        matches!(self, ArtifactError::Read { .. } | ArtifactError::Write { .. })
    }
}

impl From<EncodeError> for ArtifactError {
    fn from(e: EncodeError) -> Self {
        ArtifactError::Encode(e.to_string())
    }
}

impl From<DecodeError> for ArtifactError {
    fn from(e: DecodeError) -> Self {
        ArtifactError::Decode(e.to_string())
    }
}
