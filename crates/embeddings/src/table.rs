use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;
use crate::vectorize::question_to_vec;

/// Word → vector mapping where every vector has the same length.
///
/// Built once (usually by [`load_embeddings`](crate::load_embeddings)) and
/// read-only afterwards. The default table is empty with dimension 0.
///
/// Deserialized tables are checked like loaded ones: every vector must have
/// the stored dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct EmbeddingTable {
    vectors: FxHashMap<String, Vec<f32>>,
    dim: usize,
}

#[derive(Deserialize)]
struct RawTable {
    vectors: FxHashMap<String, Vec<f32>>,
    dim: usize,
}

impl TryFrom<RawTable> for EmbeddingTable {
    type Error = EmbeddingError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        if raw.vectors.is_empty() {
            return match raw.dim {
                0 => Ok(EmbeddingTable::default()),
                _ => Err(EmbeddingError::Empty),
            };
        }

        let mut builder = TableBuilder {
            vectors: FxHashMap::default(),
            dim: Some(raw.dim),
        };
        for (idx, (word, vector)) in raw.vectors.into_iter().enumerate() {
            builder.push(idx + 1, word, vector)?;
        }
        builder.finish()
    }
}

impl EmbeddingTable {
    /// Builds a table from `(word, vector)` pairs.
    ///
    /// The first entry fixes the dimension. Later duplicates replace earlier
    /// ones. An empty iterator produces an empty table of dimension 0.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, EmbeddingError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut builder = TableBuilder::default();
        for (idx, (word, vector)) in entries.into_iter().enumerate() {
            builder.push(idx + 1, word.into(), vector)?;
        }
        Ok(builder.finish_or_default())
    }

    /// Vector for `word`, if it is in the vocabulary.
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Length shared by every vector in the table.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }

    /// [`question_to_vec`] using this table's own dimension.
    pub fn question_to_vec(&self, question: &str) -> Vec<f32> {
        question_to_vec(question, self, self.dim)
    }

    /// Splits the table into the raw mapping and its dimension.
    pub fn into_parts(self) -> (FxHashMap<String, Vec<f32>>, usize) {
        (self.vectors, self.dim)
    }
}

/// Accumulates entries while enforcing the shared dimension.
#[derive(Default)]
pub(crate) struct TableBuilder {
    vectors: FxHashMap<String, Vec<f32>>,
    dim: Option<usize>,
}

impl TableBuilder {
    pub(crate) fn push(
        &mut self,
        line: usize,
        word: String,
        vector: Vec<f32>,
    ) -> Result<(), EmbeddingError> {
        if vector.is_empty() {
            return Err(EmbeddingError::MissingVector { line, word });
        }

        let expected = *self.dim.get_or_insert(vector.len());
        if vector.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                line,
                expected,
                found: vector.len(),
            });
        }

        self.vectors.insert(word, vector);
        Ok(())
    }

    /// Finishes the table, failing when nothing was pushed.
    pub(crate) fn finish(self) -> Result<EmbeddingTable, EmbeddingError> {
        match self.dim {
            Some(dim) => Ok(EmbeddingTable {
                vectors: self.vectors,
                dim,
            }),
            None => Err(EmbeddingError::Empty),
        }
    }

    fn finish_or_default(self) -> EmbeddingTable {
        EmbeddingTable {
            dim: self.dim.unwrap_or(0),
            vectors: self.vectors,
        }
    }
}
