// Maskrs Translation Table
// Placeholder characters and the rules that decide which value characters they accept

use indexmap::IndexMap;
use regex::Regex;
use std::fmt;

/// Errors raised while building translations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslationError {
    #[error("invalid matcher pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("placeholder must be a single character, got '{0}'")]
    InvalidPlaceholder(String),

    #[error("fallback must be a single character, got '{0}'")]
    InvalidFallback(String),
}

/// Single-character acceptance test of a placeholder
#[derive(Debug, Clone)]
pub enum Matcher {
    /// ASCII digit, `[0-9]`
    Digit,
    /// ASCII letter or digit, `[a-zA-Z0-9]`
    Alphanumeric,
    /// ASCII letter, `[a-zA-Z]`
    Letter,
    /// User regex, tested unanchored against the one-character string
    Pattern(Regex),
}

impl Matcher {
    /// Compile a user supplied regex matcher
    pub fn pattern(source: &str) -> Result<Self, TranslationError> {
        Regex::new(source)
            .map(Matcher::Pattern)
            .map_err(|e| TranslationError::InvalidPattern {
                pattern: source.to_string(),
                reason: e.to_string(),
            })
    }

    /// Check whether `c` is accepted
    pub fn matches(&self, c: char) -> bool {
        match self {
            Matcher::Digit => c.is_ascii_digit(),
            Matcher::Alphanumeric => c.is_ascii_alphanumeric(),
            Matcher::Letter => c.is_ascii_alphabetic(),
            Matcher::Pattern(re) => {
                let mut buf = [0u8; 4];
                re.is_match(c.encode_utf8(&mut buf))
            }
        }
    }

    /// Regex source equivalent to this matcher
    pub fn as_str(&self) -> &str {
        match self {
            Matcher::Digit => r"\d",
            Matcher::Alphanumeric => "[a-zA-Z0-9]",
            Matcher::Letter => "[a-zA-Z]",
            Matcher::Pattern(re) => re.as_str(),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Digit, Matcher::Digit)
            | (Matcher::Alphanumeric, Matcher::Alphanumeric)
            | (Matcher::Letter, Matcher::Letter) => true,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule attached to a placeholder character.
///
/// When a value character does not match, the engine tries (in order) the
/// literal-echo check, `optional`, then `fallback`, and only then rejects
/// the character. `recursive` only matters for characters that do match.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub matcher: Matcher,
    pub optional: bool,
    pub recursive: bool,
    pub fallback: Option<char>,
}

impl Translation {
    /// Required slot accepting `matcher`
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            optional: false,
            recursive: false,
            fallback: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

/// Ordered placeholder → translation table.
///
/// `TranslationTable::default()` holds the built-ins:
///
/// | key | accepts      | kind      |
/// |-----|--------------|-----------|
/// | `0` | digit        | required  |
/// | `9` | digit        | optional  |
/// | `#` | digit        | recursive |
/// | `A` | alphanumeric | required  |
/// | `S` | letter       | required  |
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationTable {
    entries: IndexMap<char, Translation>,
}

impl TranslationTable {
    /// Table without any placeholders; every pattern character is a literal
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace the translation for `placeholder`.
    ///
    /// A user entry fully replaces a built-in with the same key.
    pub fn insert(&mut self, placeholder: char, translation: Translation) -> Option<Translation> {
        self.entries.insert(placeholder, translation)
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_override(mut self, placeholder: char, translation: Translation) -> Self {
        self.insert(placeholder, translation);
        self
    }

    /// Merge another table over this one
    pub fn extend(&mut self, other: TranslationTable) {
        self.entries.extend(other.entries);
    }

    /// Remove a placeholder, turning it back into a literal
    pub fn remove(&mut self, placeholder: char) -> Option<Translation> {
        self.entries.shift_remove(&placeholder)
    }

    /// Get the translation for a pattern character
    pub fn get(&self, placeholder: char) -> Option<&Translation> {
        self.entries.get(&placeholder)
    }

    /// Check if a pattern character is a placeholder
    pub fn contains(&self, placeholder: char) -> bool {
        self.entries.contains_key(&placeholder)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (char, &Translation)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl Default for TranslationTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert('0', Translation::new(Matcher::Digit));
        table.insert('9', Translation::new(Matcher::Digit).optional());
        table.insert('#', Translation::new(Matcher::Digit).recursive());
        table.insert('A', Translation::new(Matcher::Alphanumeric));
        table.insert('S', Translation::new(Matcher::Letter));
        table
    }
}

/// Parse a string that must hold exactly one character
#[cfg_attr(not(feature = "config"), allow(dead_code))]
pub(crate) fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
