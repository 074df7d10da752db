//! Question normalization for the chat-bot classifiers.
//!
//! Every classifier downstream (intent recognizer, tag classifier, thread
//! ranker) was fitted on text that went through exactly this routine, so the
//! output has to match what the models saw at training time, character for
//! character.
//!
//! ## What we do
//!
//! - Lowercase the whole input (full Unicode lowercasing)
//! - Turn the separators `/(){}[]|@,;` into spaces
//! - Drop anything outside `[0-9a-z #+_]` (so `c#` and `c++` survive)
//! - Remove stopwords and collapse whitespace to single spaces
//!
//! ## Stopwords are a resource, not a side effect
//!
//! The stopword list is loaded explicitly through [`StopwordSet`]. Nothing in
//! here touches the network; if the list is missing you get a
//! [`StopwordError`] at startup instead of a surprise at the first request.
//!
//! ## Invariants worth knowing
//!
//! - Output only contains `[0-9a-z #+_]`
//! - No output token is a stopword
//! - `text_prepare(text_prepare(x)) == text_prepare(x)`
//!
//! ```rust
//! use canonical::{text_prepare, StopwordSet};
//!
//! let stopwords = StopwordSet::from_words(["how", "to", "in"]);
//! let prepared = text_prepare("How to write a loop in C++?", &stopwords);
//! assert_eq!(prepared, "write a loop c++");
//! ```

mod error;
mod prepare;
mod stopwords;

pub use crate::error::StopwordError;
pub use crate::prepare::{text_prepare, TextPreparer};
pub use crate::stopwords::StopwordSet;
