//! YAML configuration of the bot's resource files.
//!
//! Every resource the chat bot reads at startup is named here, so tests and
//! deployments can point at alternate files without touching code.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! base_dir: /srv/chatbot
//!
//! intent_recognizer: data/intent_recognizer.pkl
//! tag_classifier: data/tag_classifier.pkl
//! tfidf_vectorizer: data/tfidf_vectorizer.pkl
//! thread_embeddings_folder: data/thread_embeddings_by_tags
//! word_embeddings: data/ss_embeddings.tsv
//! stopwords: data/stopwords/english
//! ```
//!
//! Every key except `version` may be omitted and falls back to the default
//! layout under `data/`. Relative paths are joined onto `base_dir` when one
//! is set.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// The resources a bot instance reads from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    IntentRecognizer,
    TagClassifier,
    TfidfVectorizer,
    ThreadEmbeddingsFolder,
    WordEmbeddings,
    Stopwords,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::IntentRecognizer,
        ResourceKind::TagClassifier,
        ResourceKind::TfidfVectorizer,
        ResourceKind::ThreadEmbeddingsFolder,
        ResourceKind::WordEmbeddings,
        ResourceKind::Stopwords,
    ];

    /// Configuration key of this resource.
    pub fn key(self) -> &'static str {
        match self {
            ResourceKind::IntentRecognizer => "intent_recognizer",
            ResourceKind::TagClassifier => "tag_classifier",
            ResourceKind::TfidfVectorizer => "tfidf_vectorizer",
            ResourceKind::ThreadEmbeddingsFolder => "thread_embeddings_folder",
            ResourceKind::WordEmbeddings => "word_embeddings",
            ResourceKind::Stopwords => "stopwords",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Paths of every resource file, plus an optional base directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ResourceConfig {
    /// Configuration format version
    pub version: String,

    /// Directory that relative paths are resolved against. Unset means the
    /// process working directory.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    #[serde(default = "default_intent_recognizer")]
    pub intent_recognizer: PathBuf,

    #[serde(default = "default_tag_classifier")]
    pub tag_classifier: PathBuf,

    #[serde(default = "default_tfidf_vectorizer")]
    pub tfidf_vectorizer: PathBuf,

    /// One artifact per tag, named `<tag>.pkl`.
    #[serde(default = "default_thread_embeddings_folder")]
    pub thread_embeddings_folder: PathBuf,

    #[serde(default = "default_word_embeddings")]
    pub word_embeddings: PathBuf,

    /// Stopword list, one word per line.
    #[serde(default = "default_stopwords")]
    pub stopwords: PathBuf,
}

impl ResourceConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ResourceConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Same layout as [`Default`], rooted at `base_dir`.
    pub fn with_base_dir<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        for kind in ResourceKind::ALL {
            if self.raw_path(kind).as_os_str().is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "{} must not be empty",
                    kind.key()
                )));
            }
        }
        Ok(())
    }

    /// Effective path of `kind`, with `base_dir` applied to relative paths.
    pub fn resolve(&self, kind: ResourceKind) -> PathBuf {
        let raw = self.raw_path(kind);
        match &self.base_dir {
            Some(base) if raw.is_relative() => base.join(raw),
            _ => raw.to_path_buf(),
        }
    }

    fn raw_path(&self, kind: ResourceKind) -> &Path {
        match kind {
            ResourceKind::IntentRecognizer => &self.intent_recognizer,
            ResourceKind::TagClassifier => &self.tag_classifier,
            ResourceKind::TfidfVectorizer => &self.tfidf_vectorizer,
            ResourceKind::ThreadEmbeddingsFolder => &self.thread_embeddings_folder,
            ResourceKind::WordEmbeddings => &self.word_embeddings,
            ResourceKind::Stopwords => &self.stopwords,
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            base_dir: None,
            intent_recognizer: default_intent_recognizer(),
            tag_classifier: default_tag_classifier(),
            tfidf_vectorizer: default_tfidf_vectorizer(),
            thread_embeddings_folder: default_thread_embeddings_folder(),
            word_embeddings: default_word_embeddings(),
            stopwords: default_stopwords(),
        }
    }
}

// Helper functions for serde defaults
fn default_intent_recognizer() -> PathBuf {
    PathBuf::from("data/intent_recognizer.pkl")
}
fn default_tag_classifier() -> PathBuf {
    PathBuf::from("data/tag_classifier.pkl")
}
fn default_tfidf_vectorizer() -> PathBuf {
    PathBuf::from("data/tfidf_vectorizer.pkl")
}
fn default_thread_embeddings_folder() -> PathBuf {
    PathBuf::from("data/thread_embeddings_by_tags")
}
fn default_word_embeddings() -> PathBuf {
    PathBuf::from("data/ss_embeddings.tsv")
}
fn default_stopwords() -> PathBuf {
    PathBuf::from("data/stopwords/english")
}
