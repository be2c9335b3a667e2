use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;
use crate::document::{CanonicalDocument, CanonicalText};
use crate::error::CanonicalError;
use crate::hash::hash_canonical_bytes;
use crate::stem::stem;
use crate::stopwords::StopWords;

/// Text normalizer: a validated config plus the stop-word table it filters
/// against.
///
/// A `Normalizer` is immutable after construction and `Send + Sync`; share
/// one across threads instead of rebuilding the stop-word set per document.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizeConfig,
    stop_words: Arc<StopWords>,
}

impl Normalizer {
    pub fn new(
        config: NormalizeConfig,
        stop_words: Arc<StopWords>,
    ) -> Result<Self, CanonicalError> {
        config.validate()?;
        Ok(Self { config, stop_words })
    }

    /// Default configuration with the English stop-word list.
    pub fn english() -> Self {
        Self {
            config: NormalizeConfig::default(),
            stop_words: Arc::new(StopWords::english()),
        }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Normalize `input` into canonical token text.
    ///
    /// Never fails: input made only of punctuation or stop words yields an
    /// empty [`CanonicalText`].
    pub fn normalize(&self, input: &str) -> CanonicalText {
        let cfg = &self.config;

        // NFKC first, since it can change character boundaries.
        let text: Cow<str> = if cfg.normalize_unicode {
            Cow::Owned(input.nfkc().collect::<String>())
        } else {
            Cow::Borrowed(input)
        };

        let text: Cow<str> = if cfg.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            text
        };

        let text: Cow<str> = if cfg.strip_punctuation {
            Cow::Owned(text.chars().filter(|&c| is_kept(c)).collect())
        } else {
            text
        };

        let mut canonical = String::with_capacity(text.len());
        for token in text.split(is_separator).filter(|t| !t.is_empty()) {
            if cfg.remove_stop_words && self.stop_words.contains(token) {
                continue;
            }
            if !canonical.is_empty() {
                canonical.push(' ');
            }
            if cfg.stem {
                canonical.push_str(&stem(token));
            } else {
                canonical.push_str(token);
            }
        }

        CanonicalText::new(canonical)
    }

    /// Normalize `input` and wrap it as an identified, hashed document.
    pub fn canonicalize(
        &self,
        doc_id: impl Into<String>,
        input: &str,
    ) -> Result<CanonicalDocument, CanonicalError> {
        let doc_id: String = doc_id.into();
        let trimmed = doc_id.trim();
        if trimmed.is_empty() {
            return Err(CanonicalError::MissingDocId);
        }
        let doc_id = if doc_id.len() == trimmed.len() {
            doc_id
        } else {
            trimmed.to_string()
        };

        let canonical = self.normalize(input);
        let canonical_version = self.config.version;
        let sha256_hex = hash_canonical_bytes(canonical_version, canonical.as_str().as_bytes());

        Ok(CanonicalDocument {
            doc_id,
            token_count: canonical.tokens().count(),
            canonical,
            sha256_hex,
            canonical_version,
            config: self.config.clone(),
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

/// Normalize `input` with the default English normalizer.
///
/// ```rust
/// assert_eq!(canonical::normalize("Hello, World!"), "hello world");
/// ```
pub fn normalize(input: &str) -> String {
    english_normalizer().normalize(input).into_string()
}

/// The process-wide English normalizer, built on first use.
pub fn english_normalizer() -> &'static Normalizer {
    static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
    DEFAULT.get_or_init(Normalizer::english)
}

/// Word characters and whitespace survive punctuation stripping.
///
/// A word character is `_` or anything in the Unicode letter (L*) or number
/// (N*) categories. Combining marks (Mn, Mc) and symbols (So) are stripped
/// even where `char::is_alphabetic` would accept them.
fn is_kept(c: char) -> bool {
    c.is_letter() || c.is_number() || c == '_' || is_separator(c)
}

/// Token separators: Unicode whitespace plus the ASCII information
/// separators U+001C..=U+001F.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_include_information_separators() {
        assert!(is_separator('\u{1f}'));
        assert!(is_separator('\u{a0}'));
        assert!(is_separator('\t'));
        assert!(!is_separator('_'));
    }

    #[test]
    fn punctuation_removed_without_splitting_words() {
        let n = Normalizer::new(
            NormalizeConfig {
                remove_stop_words: false,
                stem: false,
                ..Default::default()
            },
            Arc::new(StopWords::empty()),
        )
        .expect("valid config");
        assert_eq!(
            n.normalize("Don't stop, e.g. snake_case!").as_str(),
            "dont stop eg snake_case"
        );
    }

    #[test]
    fn combining_marks_and_symbols_are_stripped() {
        // Devanagari vowel signs (Mc) and anusvara (Mn) are not word chars.
        assert_eq!(normalize("हिंदी"), "हद");
        // Thai tone marks and the thanthakhat are marks too.
        assert_eq!(normalize("ท่านอาจารย์ สวัสดี"), "ทานอาจารย สวสด");
        // Circled letters are symbols (So) once lowercased.
        assert_eq!(normalize("Ⓐbc xyz"), "bc xyz");
        assert!(is_kept('٣'));
        assert!(is_kept('ǅ'));
        assert!(!is_kept('\u{301}'));
    }

    #[test]
    fn shared_english_normalizer_is_built_once() {
        assert!(std::ptr::eq(english_normalizer(), english_normalizer()));
        assert_eq!(
            english_normalizer().normalize("Foxes ran").as_str(),
            Normalizer::english().normalize("Foxes ran").as_str()
        );
    }

    #[test]
    fn stop_words_checked_before_stemming() {
        // "wills" is not a stop word, but its stem "will" is.
        let n = Normalizer::english();
        assert_eq!(n.normalize("wills").as_str(), "will");
        assert_eq!(n.normalize("will").as_str(), "");
    }

    #[test]
    fn nfkc_folds_compatibility_forms_when_enabled() {
        let cfg = NormalizeConfig {
            normalize_unicode: true,
            ..Default::default()
        };
        let n = Normalizer::new(cfg, Arc::new(StopWords::english())).expect("valid config");
        // Full-width letters and the "fi" ligature.
        assert_eq!(n.normalize("ＡＢＣ \u{fb01}sh").as_str(), "abc fish");
        assert_eq!(Normalizer::english().normalize("\u{fb01}sh").as_str(), "\u{fb01}sh");
    }

    #[test]
    fn lowercase_disabled_keeps_case_and_misses_stop_words() {
        let cfg = NormalizeConfig {
            lowercase: false,
            stem: false,
            ..Default::default()
        };
        let n = Normalizer::new(cfg, Arc::new(StopWords::english())).expect("valid config");
        assert_eq!(n.normalize("The Fox the").as_str(), "The Fox");
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let cfg = NormalizeConfig {
            version: 0,
            ..Default::default()
        };
        let err = Normalizer::new(cfg, Arc::new(StopWords::empty())).unwrap_err();
        assert!(matches!(err, CanonicalError::InvalidConfig(_)));
    }
}
