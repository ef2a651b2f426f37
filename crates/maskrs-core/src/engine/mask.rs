// Maskrs Mask Engine
// Walks a pattern and a value in lockstep and produces the masked string
//
// The scan supports:
// - literal separators (copied, consumed when the user typed them too)
// - optional slots (skipped when the value does not fit)
// - recursive slots (repeat to absorb any number of extra characters)
// - fallback substitution for non-matching characters
// - reverse masks that fill from the end of the value

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::mask_spec::{MaskSpec, PatternSlot};
use crate::translation::Translation;

/// A value character that no slot could accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntry {
    /// Character index in the value
    pub position: usize,
    /// The rejected character
    pub character: char,
    /// Source of the matcher it failed (e.g. `\d`)
    pub expected: String,
}

/// Output of a single [`mask`] call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MaskResult {
    pub masked: String,
    pub invalid: SmallVec<[InvalidEntry; 4]>,
}

impl MaskResult {
    /// True when no character was rejected
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// What a placeholder slot does with the current value character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotOutcome {
    /// Accepted: emit it, consume it, move on
    Matched,
    /// The user re-typed the separator we already inserted: consume silently
    LiteralEcho,
    /// Leave the value character for the next slot, emitting `Some` fallback
    Skipped(Option<char>),
    /// No way to place it: report and consume
    Rejected,
}

fn classify(translation: &Translation, c: char, unmatched_literal: Option<char>) -> SlotOutcome {
    if translation.matcher.matches(c) {
        SlotOutcome::Matched
    } else if unmatched_literal == Some(c) {
        SlotOutcome::LiteralEcho
    } else if translation.optional {
        SlotOutcome::Skipped(None)
    } else if let Some(fallback) = translation.fallback {
        SlotOutcome::Skipped(Some(fallback))
    } else {
        SlotOutcome::Rejected
    }
}

/// Direction-aware cursor over one of the two strings
#[derive(Debug, Clone, Copy)]
struct Cursor {
    pos: isize,
    len: isize,
    step: isize,
}

impl Cursor {
    fn new(len: usize, reverse: bool) -> Self {
        let len = len as isize;
        if reverse {
            Self { pos: len - 1, len, step: -1 }
        } else {
            Self { pos: 0, len, step: 1 }
        }
    }

    fn in_bounds(&self) -> bool {
        self.pos >= 0 && self.pos < self.len
    }

    fn index(&self) -> usize {
        self.pos as usize
    }

    fn advance(&mut self) {
        self.pos += self.step;
    }

    /// Last index in scan direction
    fn last(&self) -> isize {
        if self.step > 0 { self.len - 1 } else { 0 }
    }
}

/// Accumulates output in scan order (prepends for reverse masks)
struct Output {
    buf: VecDeque<char>,
    reverse: bool,
}

impl Output {
    fn new(reverse: bool, capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            reverse,
        }
    }

    fn emit(&mut self, c: char) {
        if self.reverse {
            self.buf.push_front(c);
        } else {
            self.buf.push_back(c);
        }
    }

    fn into_string(self) -> String {
        self.buf.into_iter().collect()
    }
}

/// Apply `spec` to `value`.
///
/// With `skip_literals` only the characters accepted by placeholders are
/// kept, which yields the clean (unmasked) value.
pub fn mask(value: &str, spec: &MaskSpec, skip_literals: bool) -> MaskResult {
    let chars: Vec<char> = value.chars().collect();
    let slots = spec.slots();
    let reverse = spec.is_reverse();

    let mut m = Cursor::new(slots.len(), reverse);
    let mut v = Cursor::new(chars.len(), reverse);
    let last_slot = m.last();

    let mut out = Output::new(reverse, slots.len());
    let mut invalid: SmallVec<[InvalidEntry; 4]> = SmallVec::new();
    let mut reset_pos: Option<isize> = None;
    let mut unmatched_literal: Option<char> = None;

    while m.in_bounds() && v.in_bounds() {
        let slot = slots[m.index()];
        let c = chars[v.index()];

        let Some(translation) = spec.translation(slot) else {
            let literal = slot.as_char();
            if !skip_literals {
                out.emit(literal);
            }
            if c == literal {
                v.advance();
            } else {
                unmatched_literal = Some(literal);
            }
            m.advance();
            continue;
        };

        match classify(translation, c, unmatched_literal) {
            SlotOutcome::Matched => {
                out.emit(c);
                v.advance();
                if translation.recursive {
                    let reset = *reset_pos.get_or_insert(m.pos);
                    if m.pos == last_slot {
                        // Cycle back so the recursive slot keeps absorbing input
                        m.pos = reset;
                        continue;
                    }
                }
                m.advance();
            }
            SlotOutcome::LiteralEcho => {
                unmatched_literal = None;
                v.advance();
            }
            SlotOutcome::Skipped(fallback) => {
                if let Some(f) = fallback {
                    out.emit(f);
                }
                m.advance();
            }
            SlotOutcome::Rejected => {
                invalid.push(InvalidEntry {
                    position: v.index(),
                    character: c,
                    expected: translation.matcher.as_str().to_string(),
                });
                v.advance();
            }
        }
    }

    // Auto-complete a trailing separator once the value reaches it
    if slots.len() == chars.len() + 1 && m.in_bounds() && !skip_literals {
        if let PatternSlot::Literal(literal) = slots[last_slot as usize] {
            out.emit(literal);
        }
    }

    let masked = out.into_string();
    log::trace!(
        "mask '{}' with '{}' -> '{}' ({} rejected)",
        value,
        spec,
        masked,
        invalid.len()
    );

    MaskResult { masked, invalid }
}

/// Masked form of `value`
pub fn masked_value(value: &str, spec: &MaskSpec) -> String {
    mask(value, spec, false).masked
}

/// Clean form of `value`: placeholder characters only, no literals
pub fn clean_value(value: &str, spec: &MaskSpec) -> String {
    mask(value, spec, true).masked
}
