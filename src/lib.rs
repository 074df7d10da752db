//! Workspace umbrella crate for the chat bot's text utilities.
//!
//! This crate stitches together question preparation, word-embedding
//! vectors and artifact loading so the bot can bootstrap every resource
//! from one [`ResourceConfig`].
//!
//! ```no_run
//! use chatprep::{QuestionEncoder, ResourceConfig};
//!
//! let config = ResourceConfig::with_base_dir("/srv/chatbot");
//! let encoder = QuestionEncoder::from_config(&config).unwrap();
//! let vector = encoder.encode("How do I sort a list in Python?");
//! assert_eq!(vector.len(), encoder.dim());
//! ```

pub mod config;

pub use crate::config::{ConfigLoadError, ResourceConfig, ResourceKind};
pub use artifacts::{
    ArtifactCodec, ArtifactError, decode_artifact, encode_artifact, load_artifact, store_artifact,
};
pub use canonical::{StopwordError, StopwordSet, TextPreparer, text_prepare};
pub use embeddings::{
    EmbeddingError, EmbeddingTable, load_embeddings, parse_embeddings, question_to_vec,
};

use std::error::Error;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

/// Errors that can occur while loading the bot's resources.
#[derive(Debug)]
pub enum ResourceError {
    Stopwords(StopwordError),
    Embeddings(EmbeddingError),
    Artifact {
        kind: ResourceKind,
        source: ArtifactError,
    },
    /// The requested resource is not a single artifact file.
    NotAnArtifact(ResourceKind),
    /// A tag that cannot name a file inside the thread embeddings folder.
    InvalidTag(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Stopwords(err) => write!(f, "stopwords unavailable: {err}"),
            ResourceError::Embeddings(err) => write!(f, "word embeddings unavailable: {err}"),
            ResourceError::Artifact { kind, source } => {
                write!(f, "{kind} artifact unavailable: {source}")
            }
            ResourceError::NotAnArtifact(kind) => write!(f, "{kind} is not an artifact file"),
            ResourceError::InvalidTag(tag) => write!(f, "invalid thread tag {tag:?}"),
        }
    }
}

impl Error for ResourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ResourceError::Stopwords(err) => Some(err),
            ResourceError::Embeddings(err) => Some(err),
            ResourceError::Artifact { source, .. } => Some(source),
            ResourceError::NotAnArtifact(_) | ResourceError::InvalidTag(_) => None,
        }
    }
}

impl From<StopwordError> for ResourceError {
    fn from(value: StopwordError) -> Self {
        ResourceError::Stopwords(value)
    }
}

impl From<EmbeddingError> for ResourceError {
    fn from(value: EmbeddingError) -> Self {
        ResourceError::Embeddings(value)
    }
}

impl ResourceConfig {
    /// Loads the stopword list named by [`ResourceKind::Stopwords`].
    pub fn load_stopwords(&self) -> Result<StopwordSet, ResourceError> {
        Ok(StopwordSet::from_file(self.resolve(ResourceKind::Stopwords))?)
    }

    /// Loads the table named by [`ResourceKind::WordEmbeddings`].
    pub fn load_word_embeddings(&self) -> Result<EmbeddingTable, ResourceError> {
        Ok(load_embeddings(self.resolve(ResourceKind::WordEmbeddings))?)
    }

    /// Deserializes one of the fitted models.
    ///
    /// Only the intent recognizer, the tag classifier and the TF-IDF
    /// vectorizer are single artifacts; thread embeddings go through
    /// [`load_thread_embeddings`](Self::load_thread_embeddings).
    pub fn load_artifact<T: DeserializeOwned>(&self, kind: ResourceKind) -> Result<T, ResourceError> {
        match kind {
            ResourceKind::IntentRecognizer
            | ResourceKind::TagClassifier
            | ResourceKind::TfidfVectorizer => load_artifact(self.resolve(kind))
                .map_err(|source| ResourceError::Artifact { kind, source }),
            _ => Err(ResourceError::NotAnArtifact(kind)),
        }
    }

    /// Path of the thread embeddings artifact for `tag`.
    ///
    /// The tag must be a single plain path component, so `"c#"` and
    /// `"c++"` are accepted while `""`, `".."` and `"a/b"` are not.
    pub fn thread_embeddings_path(&self, tag: &str) -> Result<PathBuf, ResourceError> {
        let mut components = Path::new(tag).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == tag => Ok(self
                .resolve(ResourceKind::ThreadEmbeddingsFolder)
                .join(format!("{tag}.pkl"))),
            _ => Err(ResourceError::InvalidTag(tag.to_string())),
        }
    }

    /// Deserializes the thread embeddings stored for `tag`.
    pub fn load_thread_embeddings<T: DeserializeOwned>(
        &self,
        tag: &str,
    ) -> Result<T, ResourceError> {
        let path = self.thread_embeddings_path(tag)?;
        load_artifact(path).map_err(|source| ResourceError::Artifact {
            kind: ResourceKind::ThreadEmbeddingsFolder,
            source,
        })
    }
}

/// Prepares `question` and averages its word vectors (normalize → vectorize).
pub fn prepare_question_vector(
    question: &str,
    stopwords: &StopwordSet,
    embeddings: &EmbeddingTable,
) -> Vec<f32> {
    let prepared = text_prepare(question, stopwords);
    question_to_vec(&prepared, embeddings, embeddings.dim())
}

/// Stopwords and word embeddings loaded once, ready to turn raw questions
/// into vectors.
#[derive(Debug, Clone)]
pub struct QuestionEncoder {
    preparer: TextPreparer,
    embeddings: EmbeddingTable,
}

impl QuestionEncoder {
    pub fn new(stopwords: StopwordSet, embeddings: EmbeddingTable) -> Self {
        Self {
            preparer: TextPreparer::new(stopwords),
            embeddings,
        }
    }

    /// Loads the stopwords and the word embeddings named in `config`.
    pub fn from_config(config: &ResourceConfig) -> Result<Self, ResourceError> {
        let stopwords = config.load_stopwords()?;
        let embeddings = config.load_word_embeddings()?;
        info!(
            stopwords = stopwords.len(),
            vocabulary = embeddings.len(),
            dim = embeddings.dim(),
            "question_encoder_ready"
        );
        Ok(Self::new(stopwords, embeddings))
    }

    /// Normalized form of `question`.
    pub fn prepare(&self, question: &str) -> String {
        self.preparer.prepare(question)
    }

    /// Vector of `question`, always [`dim`](Self::dim) long.
    pub fn encode(&self, question: &str) -> Vec<f32> {
        prepare_question_vector(question, self.preparer.stopwords(), &self.embeddings)
    }

    pub fn dim(&self) -> usize {
        self.embeddings.dim()
    }

    pub fn embeddings(&self) -> &EmbeddingTable {
        &self.embeddings
    }

    pub fn stopwords(&self) -> &StopwordSet {
        self.preparer.stopwords()
    }
}
