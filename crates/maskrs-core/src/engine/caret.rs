// Maskrs Caret Tracker
// Keeps the caret between the same logical characters after masking changes the text

use crate::KeyCode;

/// Snapshot taken when a key goes down, consumed once by the following input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretState {
    /// Field value before the edit
    pub previous_value: String,
    /// Caret index before the edit
    pub previous_caret: usize,
    /// Key that started the edit
    pub last_key: KeyCode,
}

impl CaretState {
    pub fn new(previous_value: impl Into<String>, previous_caret: usize, last_key: KeyCode) -> Self {
        Self {
            previous_value: previous_value.into(),
            previous_caret,
            last_key,
        }
    }
}

/// Length in chars of the first `caret` characters of `s`
fn prefix_len(s: &str, caret: usize) -> usize {
    s.chars().take(caret).count()
}

/// Recompute the caret after `previous` became `new` through masking.
///
/// `caret` is the caret index right after the raw edit, measured in chars.
/// Deletions shift the caret back by the number of separators masking
/// inserted in front of it; insertions shift it forward, or snap it to the
/// end when the caret was already at the end of the previous value.
pub fn recompute_caret(caret: usize, previous: &str, new: &str, last_key: Option<KeyCode>) -> usize {
    if previous == new {
        return caret;
    }

    let new_prefix = prefix_len(new, caret);
    let previous_prefix = prefix_len(previous, caret);

    if last_key.is_some_and(KeyCode::is_deletion) {
        return (caret + previous_prefix).saturating_sub(new_prefix);
    }

    if caret >= previous.chars().count() {
        return new.chars().count();
    }

    (caret + new_prefix).saturating_sub(previous_prefix)
}

/// Same as [`recompute_caret`] driven by a captured [`CaretState`]
pub fn recompute_from_state(state: &CaretState, caret: usize, new: &str) -> usize {
    recompute_caret(caret, &state.previous_value, new, Some(state.last_key))
}
