use crate::stopwords::StopwordSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Separator,
    Keep,
    Drop,
}

const fn classify(ch: char) -> CharClass {
    match ch {
        ' ' | '/' | '(' | ')' | '{' | '}' | '[' | ']' | '|' | '@' | ',' | ';' => {
            CharClass::Separator
        }
        '0'..='9' | 'a'..='z' | '#' | '+' | '_' => CharClass::Keep,
        _ => CharClass::Drop,
    }
}

/// Normalizes a question the way the classifiers expect it.
///
/// The input is lowercased, the characters `/(){}[]|@,;` become spaces,
/// every character outside `[0-9a-z #+_]` is deleted (tabs and newlines
/// included, they do not separate words), and the remaining tokens that
/// are not stopwords are joined with single spaces.
///
/// Any input is accepted. Empty or fully filtered input yields `""`.
///
/// ```rust
/// use canonical::{text_prepare, StopwordSet};
///
/// let stopwords = StopwordSet::from_words(["the", "of"]);
/// assert_eq!(
///     text_prepare("The size of std::vector<int>", &stopwords),
///     "size stdvectorint"
/// );
/// ```
pub fn text_prepare(text: &str, stopwords: &StopwordSet) -> String {
    // Lowercasing can expand a single character into several, so it runs
    // over the whole string before classification.
    let lowered = text.to_lowercase();

    let mut prepared = String::with_capacity(lowered.len());
    let mut token = String::new();

    for ch in lowered.chars() {
        match classify(ch) {
            CharClass::Separator => flush_token(&mut token, stopwords, &mut prepared),
            CharClass::Keep => token.push(ch),
            CharClass::Drop => {}
        }
    }
    flush_token(&mut token, stopwords, &mut prepared);

    prepared
}

/// Appends the pending token unless it is empty or a stopword.
fn flush_token(token: &mut String, stopwords: &StopwordSet, prepared: &mut String) {
    if token.is_empty() {
        return;
    }
    if !stopwords.contains(token) {
        if !prepared.is_empty() {
            prepared.push(' ');
        }
        prepared.push_str(token);
    }
    token.clear();
}

/// A normalizer bound to one stopword list.
///
/// Cheap to share across threads; preparing text never mutates it.
#[derive(Debug, Clone, Default)]
pub struct TextPreparer {
    stopwords: StopwordSet,
}

impl TextPreparer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    /// See [`text_prepare`].
    pub fn prepare(&self, text: &str) -> String {
        text_prepare(text, &self.stopwords)
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}
