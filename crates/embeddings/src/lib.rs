//! Word embeddings for the chat bot.
//!
//! Questions are turned into dense vectors by averaging pretrained word
//! vectors (the StarSpace `ss_embeddings.tsv` export in production). The
//! vectors then feed thread ranking, which compares a question vector with
//! the precomputed vectors of every thread under the predicted tag.
//!
//! The pieces:
//!
//! - [`load_embeddings`] parses the `word v1 ... vD` file into an
//!   [`EmbeddingTable`], enforcing one dimension for the whole table.
//! - [`question_to_vec`] averages the known words of an already prepared
//!   question. Unknown words are skipped; nothing known means a zero vector.
//!
//! Loading is the only fallible step. Once built, a table is read-only and
//! `Send + Sync`, so one copy can serve every worker thread.
//!
//! ## Quick example
//!
//! ```no_run
//! use embeddings::{load_embeddings, question_to_vec};
//!
//! let table = load_embeddings("data/ss_embeddings.tsv").unwrap();
//! let vector = question_to_vec("sort list python", &table, table.dim());
//! assert_eq!(vector.len(), table.dim());
//! ```

pub mod error;

mod loader;
mod table;
mod vectorize;

pub use crate::error::EmbeddingError;
pub use crate::loader::{load_embeddings, parse_embeddings};
pub use crate::table::EmbeddingTable;
pub use crate::vectorize::question_to_vec;
