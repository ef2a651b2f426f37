// Maskrs Mask Specification
// A pattern string classified against a translation table, plus scan direction

use std::fmt;

use crate::translation::{Translation, TranslationTable};

/// One character position of a mask pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSlot {
    /// Copied through verbatim; consumed only by an identical value character
    Literal(char),
    /// Key into the translation table
    Placeholder(char),
}

impl PatternSlot {
    /// The pattern character this slot was built from
    pub fn as_char(self) -> char {
        match self {
            PatternSlot::Literal(c) | PatternSlot::Placeholder(c) => c,
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(self, PatternSlot::Literal(_))
    }
}

/// Immutable mask configuration owned by one bound field.
///
/// Slots are classified once at construction, so replacing the translation
/// table means building a new `MaskSpec`.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSpec {
    pattern: String,
    slots: Vec<PatternSlot>,
    translations: TranslationTable,
    reverse: bool,
}

impl MaskSpec {
    /// Build a forward mask using the built-in translations
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_translations(pattern, TranslationTable::default())
    }

    /// Build a forward mask using a custom translation table
    pub fn with_translations(pattern: impl Into<String>, translations: TranslationTable) -> Self {
        let pattern = pattern.into();
        let slots = pattern
            .chars()
            .map(|c| {
                if translations.contains(c) {
                    PatternSlot::Placeholder(c)
                } else {
                    PatternSlot::Literal(c)
                }
            })
            .collect();

        Self {
            pattern,
            slots,
            translations,
            reverse: false,
        }
    }

    /// Scan and fill from the end of the value (currency style masks)
    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Same translations and direction, different pattern
    pub fn with_pattern(&self, pattern: impl Into<String>) -> Self {
        Self::with_translations(pattern, self.translations.clone()).reversed(self.reverse)
    }

    /// The raw pattern string
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Classified pattern slots
    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }

    /// Pattern length in characters
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }

    /// Translation for a placeholder slot; `None` for literals
    pub fn translation(&self, slot: PatternSlot) -> Option<&Translation> {
        match slot {
            PatternSlot::Placeholder(c) => self.translations.get(c),
            PatternSlot::Literal(_) => None,
        }
    }

    /// Literal characters of the pattern, in order
    pub fn literals(&self) -> impl Iterator<Item = char> + '_ {
        self.slots
            .iter()
            .filter(|slot| slot.is_literal())
            .map(|slot| slot.as_char())
    }

    /// Whether any placeholder repeats
    pub fn has_recursive_slot(&self) -> bool {
        self.slots
            .iter()
            .filter_map(|slot| self.translation(*slot))
            .any(|t| t.recursive)
    }
}

impl fmt::Display for MaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reverse {
            write!(f, "{} (reverse)", self.pattern)
        } else {
            f.write_str(&self.pattern)
        }
    }
}
