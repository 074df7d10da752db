//! On-disk artifact layout.
//!
//! ```text
//! +--------+---------+-------+-----------------------------+
//! | "CPAR" | version | codec | payload (bincode, maybe zstd) |
//! | 4 B    | 1 B     | 1 B   | ...                           |
//! +--------+---------+-------+-----------------------------+
//! ```
//!
//! The codec byte is what makes compressed artifacts load transparently:
//! readers never need to be told how a file was written.

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use zstd::{decode_all, encode_all};

use crate::error::ArtifactError;

const MAGIC: &[u8; 4] = b"CPAR";
const HEADER_LEN: usize = MAGIC.len() + 2;

/// Bump this value whenever the header or payload layout changes.
pub const ARTIFACT_FORMAT_VERSION: u8 = 1;

const TAG_PLAIN: u8 = 0;
const TAG_ZSTD: u8 = 1;

/// How the payload is stored after the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactCodec {
    /// Raw bincode bytes.
    Plain,
    /// Bincode bytes in a zstd frame (level 1-22, higher = smaller but slower).
    Zstd { level: i32 },
}

impl Default for ArtifactCodec {
    fn default() -> Self {
        ArtifactCodec::Zstd { level: 3 }
    }
}

impl ArtifactCodec {
    fn tag(self) -> u8 {
        match self {
            ArtifactCodec::Plain => TAG_PLAIN,
            ArtifactCodec::Zstd { .. } => TAG_ZSTD,
        }
    }

    fn compress(self, data: Vec<u8>) -> Result<Vec<u8>, ArtifactError> {
        match self {
            ArtifactCodec::Plain => Ok(data),
            ArtifactCodec::Zstd { level } => {
                encode_all(data.as_slice(), level).map_err(|e| ArtifactError::Zstd(e.to_string()))
            }
        }
    }
}

/// Serializes `value` into a complete artifact, header included.
pub fn encode_artifact<T: Serialize>(
    value: &T,
    codec: ArtifactCodec,
) -> Result<Vec<u8>, ArtifactError> {
    let payload = codec.compress(encode_to_vec(value, standard())?)?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.push(ARTIFACT_FORMAT_VERSION);
    out.push(codec.tag());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decodes a complete artifact produced by [`encode_artifact`].
///
/// Fails rather than returning a partial value: the header must be intact,
/// the payload must decode into `T`, and no bytes may be left over.
pub fn decode_artifact<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ArtifactError> {
    if bytes.len() < HEADER_LEN || !bytes.starts_with(MAGIC) {
        return Err(ArtifactError::BadHeader);
    }

    let version = bytes[MAGIC.len()];
    if version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion(version));
    }

    let body = &bytes[HEADER_LEN..];
    let decompressed;
    let payload = match bytes[MAGIC.len() + 1] {
        TAG_PLAIN => body,
        TAG_ZSTD => {
            decompressed = decode_all(body).map_err(|e| ArtifactError::Zstd(e.to_string()))?;
            decompressed.as_slice()
        }
        other => return Err(ArtifactError::UnknownCodec(other)),
    };

    let (value, consumed) = decode_from_slice(payload, standard())?;
    if consumed != payload.len() {
        return Err(ArtifactError::TrailingBytes(payload.len() - consumed));
    }
    Ok(value)
}
