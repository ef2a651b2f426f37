// Maskrs Input Layer
// Key filtering and raw edit simulation for headless fields

mod bypass;
mod editor;

pub use bypass::{is_bypass_key, BYPASS_KEYS};
pub use editor::{apply_raw_edit, parse_edit_script, EditStep, RawEdit, ScriptParseError};
