//! Stopword lists.
//!
//! A [`StopwordSet`] is loaded once at startup from a plain text file with
//! one word per line, the layout NLTK uses for its `stopwords` corpus. The
//! set is immutable afterwards and can be shared freely between threads.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fxhash::FxHashSet;
use tracing::{info, warn};

use crate::error::StopwordError;

/// Set of lowercase words removed during text preparation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl StopwordSet {
    /// Builds a set from in-memory words. Entries are trimmed and
    /// lowercased; blank entries are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|word| normalize_entry(word.as_ref()))
            .collect();
        Self { words }
    }

    /// Loads a stopword list with one word per line.
    ///
    /// Fails with [`StopwordError::Io`] when the file cannot be read and with
    /// [`StopwordError::Empty`] when it holds no words.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StopwordError> {
        let path = path.as_ref();
        let start = Instant::now();

        match read_stopword_file(path) {
            Ok(set) => {
                info!(
                    path = %path.display(),
                    words = set.len(),
                    elapsed_micros = start.elapsed().as_micros(),
                    "stopwords_loaded"
                );
                Ok(set)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros(),
                    "stopwords_failure"
                );
                Err(err)
            }
        }
    }

    /// Loads `<nltk_data>/corpora/stopwords/<language>`, the location the
    /// NLTK downloader writes to.
    pub fn from_nltk_data<P: AsRef<Path>>(
        nltk_data: P,
        language: &str,
    ) -> Result<Self, StopwordError> {
        Self::from_file(nltk_stopwords_path(nltk_data.as_ref(), language))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates the words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Location of a language list inside an NLTK data directory.
fn nltk_stopwords_path(nltk_data: &Path, language: &str) -> PathBuf {
    nltk_data.join("corpora").join("stopwords").join(language)
}

fn normalize_entry(raw: &str) -> Option<String> {
    let word = raw.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

fn read_stopword_file(path: &Path) -> Result<StopwordSet, StopwordError> {
    let io_err = |source: io::Error| StopwordError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut words = FxHashSet::default();
    for line in BufReader::new(file).lines() {
        if let Some(word) = normalize_entry(&line.map_err(io_err)?) {
            words.insert(word);
        }
    }

    if words.is_empty() {
        return Err(StopwordError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(StopwordSet { words })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn from_words_normalizes_entries() {
        let set = StopwordSet::from_words(["  The ", "IS", "", "   ", "a"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("the"));
        assert!(set.contains("is"));
        assert!(set.contains("a"));
        assert!(!set.contains("The"));
    }

    #[test]
    fn from_file_reads_one_word_per_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "i\nme\n\nmy\r\nmyself\n  we  ").unwrap();

        let set = StopwordSet::from_file(file.path()).unwrap();
        let mut words: Vec<&str> = set.iter().collect();
        words.sort_unstable();
        assert_eq!(words, vec!["i", "me", "my", "myself", "we"]);
    }

    #[test]
    fn from_file_missing_path_is_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = StopwordSet::from_file(&missing).unwrap_err();
        assert!(matches!(err, StopwordError::Io { .. }));
        assert_eq!(err.path(), missing.as_path());
        assert!(err.to_string().contains("failed to read stopwords"));
    }

    #[test]
    fn from_file_blank_list_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "\n   \n").unwrap();

        let err = StopwordSet::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StopwordError::Empty { .. }));
        assert!(err.to_string().contains("contains no words"));
    }

    #[test]
    fn from_nltk_data_uses_corpus_layout() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("corpora").join("stopwords");
        fs::create_dir_all(&corpus).unwrap();
        fs::write(corpus.join("english"), "the\nand\n").unwrap();

        let set = StopwordSet::from_nltk_data(dir.path(), "english").unwrap();
        assert!(set.contains("the"));
        assert!(set.contains("and"));

        let err = StopwordSet::from_nltk_data(dir.path(), "german").unwrap_err();
        assert_eq!(err.path(), corpus.join("german").as_path());
    }

    #[test]
    fn default_set_is_empty() {
        let set = StopwordSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(""));
    }
}
