// Maskrs Input Layer - Raw Edits
// Parses edit scripts and applies raw keystrokes the way a plain text input would

use crate::key::key_from_name;
use crate::KeyCode;

/// One step of an edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStep {
    /// Type a character at the caret
    Type(char),
    /// Press a non-character key (Backspace, arrows, ...)
    Key(KeyCode),
    /// Paste text at the caret, no key-down involved
    Paste(String),
}

impl EditStep {
    /// Key reported on key-down for this step, if any
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            EditStep::Type(c) => Some(KeyCode::for_char(*c)),
            EditStep::Key(key) => Some(*key),
            EditStep::Paste(_) => None,
        }
    }
}

/// Errors that can occur while parsing an edit script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptParseError {
    /// `{` without a closing `}`
    UnterminatedBrace(usize),
    /// `{}` with nothing inside
    EmptyKey(usize),
    /// Key name not recognized
    UnknownKey(String),
}

impl std::fmt::Display for ScriptParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptParseError::UnterminatedBrace(pos) => {
                write!(f, "unterminated '{{' at position {}", pos)
            }
            ScriptParseError::EmptyKey(pos) => write!(f, "empty key name at position {}", pos),
            ScriptParseError::UnknownKey(name) => write!(f, "unknown key name: '{}'", name),
        }
    }
}

impl std::error::Error for ScriptParseError {}

/// Parse an edit script like `"123{BACKSPACE}4{PASTE:5678}"`.
///
/// Plain characters are typed one by one, `{NAME}` presses a named key,
/// `{PASTE:text}` pastes `text` and `{{` types a literal `{`.
///
/// # Examples
/// ```
/// use maskrs_core::input::{parse_edit_script, EditStep};
/// use maskrs_core::KeyCode;
/// let steps = parse_edit_script("1{BS}").unwrap();
/// assert_eq!(steps, vec![EditStep::Type('1'), EditStep::Key(KeyCode::BACKSPACE)]);
/// ```
pub fn parse_edit_script(script: &str) -> Result<Vec<EditStep>, ScriptParseError> {
    let chars: Vec<char> = script.chars().collect();
    let mut steps = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '{' {
            steps.push(EditStep::Type(c));
            i += 1;
            continue;
        }

        if chars.get(i + 1) == Some(&'{') {
            steps.push(EditStep::Type('{'));
            i += 2;
            continue;
        }

        let close = chars[i + 1..]
            .iter()
            .position(|&c| c == '}')
            .map(|offset| i + 1 + offset)
            .ok_or(ScriptParseError::UnterminatedBrace(i))?;
        let body: String = chars[i + 1..close].iter().collect();

        if let Some(text) = body.strip_prefix("PASTE:") {
            steps.push(EditStep::Paste(text.to_string()));
        } else {
            let name = body.trim();
            if name.is_empty() {
                return Err(ScriptParseError::EmptyKey(i));
            }
            let key =
                key_from_name(name).ok_or_else(|| ScriptParseError::UnknownKey(name.to_string()))?;
            steps.push(EditStep::Key(key));
        }
        i = close + 1;
    }

    Ok(steps)
}

/// Value and caret after the platform applied a raw edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdit {
    pub value: String,
    pub caret: usize,
}

/// Apply `step` to `value` at `caret` without any masking.
///
/// Keys that do not edit text (and navigation at the value bounds) leave
/// the value unchanged.
pub fn apply_raw_edit(value: &str, caret: usize, step: &EditStep) -> RawEdit {
    let mut chars: Vec<char> = value.chars().collect();
    let caret = caret.min(chars.len());

    let caret = match step {
        EditStep::Type(c) => {
            chars.insert(caret, *c);
            caret + 1
        }
        EditStep::Paste(text) => {
            let inserted: Vec<char> = text.chars().collect();
            let count = inserted.len();
            chars.splice(caret..caret, inserted);
            caret + count
        }
        EditStep::Key(key) => match *key {
            KeyCode::BACKSPACE if caret > 0 => {
                chars.remove(caret - 1);
                caret - 1
            }
            KeyCode::DELETE if caret < chars.len() => {
                chars.remove(caret);
                caret
            }
            KeyCode::LEFT => caret.saturating_sub(1),
            KeyCode::RIGHT => (caret + 1).min(chars.len()),
            KeyCode::HOME | KeyCode::UP => 0,
            KeyCode::END | KeyCode::DOWN => chars.len(),
            _ => caret,
        },
    };

    RawEdit {
        value: chars.into_iter().collect(),
        caret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_characters() {
        let steps = parse_edit_script("12a").unwrap();
        assert_eq!(
            steps,
            vec![EditStep::Type('1'), EditStep::Type('2'), EditStep::Type('a')]
        );
    }

    #[test]
    fn test_parse_named_keys() {
        let steps = parse_edit_script("{BACKSPACE}{del}{Left}{HOME}").unwrap();
        assert_eq!(
            steps,
            vec![
                EditStep::Key(KeyCode::BACKSPACE),
                EditStep::Key(KeyCode::DELETE),
                EditStep::Key(KeyCode::LEFT),
                EditStep::Key(KeyCode::HOME),
            ]
        );
    }

    #[test]
    fn test_parse_paste() {
        let steps = parse_edit_script("1{PASTE:23-45}").unwrap();
        assert_eq!(
            steps,
            vec![EditStep::Type('1'), EditStep::Paste("23-45".to_string())]
        );
    }

    #[test]
    fn test_parse_escaped_brace() {
        assert_eq!(parse_edit_script("{{").unwrap(), vec![EditStep::Type('{')]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_edit_script("12{BACKSPACE"),
            Err(ScriptParseError::UnterminatedBrace(2))
        );
        assert_eq!(parse_edit_script("{}"), Err(ScriptParseError::EmptyKey(0)));
        assert!(matches!(
            parse_edit_script("{NOPE}"),
            Err(ScriptParseError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_step_keys() {
        assert_eq!(EditStep::Type('3').key(), Some(KeyCode(51)));
        assert_eq!(EditStep::Key(KeyCode::DELETE).key(), Some(KeyCode::DELETE));
        assert_eq!(EditStep::Paste("x".into()).key(), None);
    }

    #[test]
    fn test_raw_type_inserts_at_caret() {
        let edit = apply_raw_edit("1234", 2, &EditStep::Type('x'));
        assert_eq!(edit.value, "12x34");
        assert_eq!(edit.caret, 3);
    }

    #[test]
    fn test_raw_backspace_and_delete() {
        let edit = apply_raw_edit("123-4", 4, &EditStep::Key(KeyCode::BACKSPACE));
        assert_eq!(edit, RawEdit { value: "1234".into(), caret: 3 });

        let edit = apply_raw_edit("123-4", 3, &EditStep::Key(KeyCode::DELETE));
        assert_eq!(edit, RawEdit { value: "1234".into(), caret: 3 });

        let edit = apply_raw_edit("12", 0, &EditStep::Key(KeyCode::BACKSPACE));
        assert_eq!(edit, RawEdit { value: "12".into(), caret: 0 });

        let edit = apply_raw_edit("12", 2, &EditStep::Key(KeyCode::DELETE));
        assert_eq!(edit, RawEdit { value: "12".into(), caret: 2 });
    }

    #[test]
    fn test_raw_navigation() {
        assert_eq!(apply_raw_edit("123", 3, &EditStep::Key(KeyCode::LEFT)).caret, 2);
        assert_eq!(apply_raw_edit("123", 3, &EditStep::Key(KeyCode::RIGHT)).caret, 3);
        assert_eq!(apply_raw_edit("123", 2, &EditStep::Key(KeyCode::HOME)).caret, 0);
        assert_eq!(apply_raw_edit("123", 0, &EditStep::Key(KeyCode::END)).caret, 3);
    }

    #[test]
    fn test_raw_paste_in_middle() {
        let edit = apply_raw_edit("19", 1, &EditStep::Paste("2345678".into()));
        assert_eq!(edit.value, "123456789");
        assert_eq!(edit.caret, 8);
    }

    #[test]
    fn test_raw_caret_clamped() {
        let edit = apply_raw_edit("12", 10, &EditStep::Type('3'));
        assert_eq!(edit.value, "123");
        assert_eq!(edit.caret, 3);
    }
}
