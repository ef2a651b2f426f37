// Maskrs Key Type
// Represents the key code of the keystroke that triggered an edit

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Represents a single keyboard key code.
///
/// This is a newtype wrapper around u16 for type safety.
/// The numeric values follow the legacy DOM `keyCode` numbering, which is
/// what text inputs report on key-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(8);
    pub const TAB: KeyCode = KeyCode(9);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const SHIFT: KeyCode = KeyCode(16);
    pub const CTRL: KeyCode = KeyCode(17);
    pub const ALT: KeyCode = KeyCode(18);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const PAGE_UP: KeyCode = KeyCode(33);
    pub const PAGE_DOWN: KeyCode = KeyCode(34);
    pub const END: KeyCode = KeyCode(35);
    pub const HOME: KeyCode = KeyCode(36);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const DELETE: KeyCode = KeyCode(46);
    pub const META: KeyCode = KeyCode(91);
    /// Reported while an input method is composing, or for characters
    /// without a dedicated key.
    pub const UNIDENTIFIED: KeyCode = KeyCode(229);

    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }

    /// Get the name of this key
    pub fn name(self) -> &'static str {
        key_name(self.0)
    }

    /// Whether this key removes text (Backspace or Delete)
    pub fn is_deletion(self) -> bool {
        self == Self::BACKSPACE || self == Self::DELETE
    }

    /// Key code a character is typed with.
    ///
    /// Digits and ASCII letters use their own (uppercase) code point, the
    /// space bar has its own code, everything else is `UNIDENTIFIED`.
    pub fn for_char(c: char) -> KeyCode {
        match c {
            '0'..='9' | 'A'..='Z' => KeyCode(c as u16),
            'a'..='z' => KeyCode(c.to_ascii_uppercase() as u16),
            ' ' => Self::SPACE,
            _ => Self::UNIDENTIFIED,
        }
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        KeyCode(code)
    }
}

impl From<KeyCode> for u16 {
    fn from(key: KeyCode) -> Self {
        key.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for KeyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    static KEY_NAMES: OnceLock<Vec<&'static str>> = OnceLock::new();
    KEY_NAMES
        .get_or_init(|| {
            let mut names = vec!["UNKNOWN"; 0x100];
            names[8] = "BACKSPACE";
            names[9] = "TAB";
            names[13] = "ENTER";
            names[16] = "SHIFT";
            names[17] = "CTRL";
            names[18] = "ALT";
            names[19] = "PAUSE";
            names[20] = "CAPSLOCK";
            names[27] = "ESCAPE";
            names[32] = "SPACE";
            names[33] = "PAGE_UP";
            names[34] = "PAGE_DOWN";
            names[35] = "END";
            names[36] = "HOME";
            names[37] = "LEFT";
            names[38] = "UP";
            names[39] = "RIGHT";
            names[40] = "DOWN";
            names[45] = "INSERT";
            names[46] = "DELETE";
            names[48] = "0";
            names[49] = "1";
            names[50] = "2";
            names[51] = "3";
            names[52] = "4";
            names[53] = "5";
            names[54] = "6";
            names[55] = "7";
            names[56] = "8";
            names[57] = "9";
            for (offset, name) in [
                "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P",
                "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
            ]
            .into_iter()
            .enumerate()
            {
                names[65 + offset] = name;
            }
            names[91] = "META";
            names[92] = "RIGHT_META";
            names[93] = "MENU";
            names[229] = "UNIDENTIFIED";
            names
        })
        .get(code as usize)
        .copied()
        .unwrap_or("UNKNOWN")
}

/// Try to parse a key name to a key code
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    let name_upper = name.to_uppercase();

    if name_upper.len() == 1 {
        let c = name_upper.chars().next()?;
        if c.is_ascii_alphanumeric() {
            return Some(KeyCode::for_char(c));
        }
    }

    static NAME_TO_CODE: OnceLock<Vec<(&'static str, u16)>> = OnceLock::new();
    let map = NAME_TO_CODE.get_or_init(|| {
        vec![
            ("BACKSPACE", 8),
            ("BS", 8),
            ("TAB", 9),
            ("ENTER", 13),
            ("RETURN", 13),
            ("SHIFT", 16),
            ("CTRL", 17),
            ("CONTROL", 17),
            ("ALT", 18),
            ("PAUSE", 19),
            ("CAPSLOCK", 20),
            ("ESC", 27),
            ("ESCAPE", 27),
            ("SPACE", 32),
            ("PAGE_UP", 33),
            ("PAGEUP", 33),
            ("PAGE_DOWN", 34),
            ("PAGEDOWN", 34),
            ("END", 35),
            ("HOME", 36),
            ("LEFT", 37),
            ("UP", 38),
            ("RIGHT", 39),
            ("DOWN", 40),
            ("INSERT", 45),
            ("DELETE", 46),
            ("DEL", 46),
            ("META", 91),
            ("SUPER", 91),
            ("CMD", 91),
            ("RIGHT_META", 92),
            ("MENU", 93),
            ("UNIDENTIFIED", 229),
        ]
    });
    map.iter()
        .find(|(n, _)| *n == name_upper)
        .map(|(_, code)| KeyCode::from(*code))
}
