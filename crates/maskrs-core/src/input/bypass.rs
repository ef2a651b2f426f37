// Maskrs Input Layer - Bypass Keys
// Navigation and modifier keys that must never trigger a reformat

use crate::KeyCode;

/// Keys that leave the value untouched.
///
/// Tab, the modifiers, Home/End and the arrow keys only move focus or the
/// caret; masking on them would fight the user's navigation.
pub const BYPASS_KEYS: [KeyCode; 11] = [
    KeyCode::TAB,
    KeyCode::SHIFT,
    KeyCode::CTRL,
    KeyCode::ALT,
    KeyCode::END,
    KeyCode::HOME,
    KeyCode::LEFT,
    KeyCode::UP,
    KeyCode::RIGHT,
    KeyCode::DOWN,
    KeyCode::META,
];

/// Check if a key should skip masking and caret recalculation.
///
/// # Arguments
/// * `key` - The key reported on key-down
///
/// # Returns
/// * `true` if the consumer must leave the field alone for this event
pub fn is_bypass_key(key: KeyCode) -> bool {
    BYPASS_KEYS.contains(&key)
}
