//! Stop-word tables.
//!
//! A [`StopWords`] value is built once at startup and shared read-only (usually
//! behind an `Arc`) by every [`Normalizer`](crate::Normalizer) that needs it.
//! Nothing mutates a table after construction, so concurrent lookups need no
//! locking.
//!
//! The built-in English table is the NLTK English list. Entries with
//! apostrophes (`don't`, `you're`, ...) are kept verbatim; they never match a
//! token once punctuation has been stripped, exactly as with the upstream list.

use std::collections::HashSet;
use std::io::{self, BufRead};

/// NLTK English stop words.
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// An immutable set of tokens removed during normalization.
///
/// Tokens are compared exactly; callers supplying their own lists should
/// provide them in the same case the normalizer produces (lowercase by
/// default).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The NLTK English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// A table that removes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from an arbitrary word list. Blank entries are ignored.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_extra(words)
    }

    /// Return a copy of this table extended with `words`.
    pub fn with_extra<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            let word: String = word.into();
            let trimmed = word.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.len() == word.len() {
                self.words.insert(word);
            } else {
                self.words.insert(trimmed.to_string());
            }
        }
        self
    }

    /// Read a one-word-per-line list. Blank lines and lines starting with `#`
    /// are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            words.push(entry.to_string());
        }
        Ok(Self::from_words(words))
    }

    /// Whether `token` is a stop word.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
