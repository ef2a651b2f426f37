// Maskrs Core Library
// Input mask engine: pattern masking, caret tracking and headless field bindings

pub mod engine;
pub mod field;
pub mod input;
pub mod key;
pub mod mask_spec;
pub mod named;
pub mod translation;

#[cfg(feature = "config")]
pub mod config;

pub use engine::{
    clean_value, mask, masked_value, recompute_caret, recompute_from_state, CaretState,
    InvalidEntry, MaskResult,
};
pub use field::{
    CharCount, FieldEvent, FieldId, FieldOptions, FieldRegistry, FieldUpdate, MaskSwitch,
    MaskedField,
};
pub use input::{is_bypass_key, parse_edit_script, EditStep, ScriptParseError, BYPASS_KEYS};
pub use key::KeyCode;
pub use mask_spec::{MaskSpec, PatternSlot};
pub use named::{NamedMask, NamedMaskError};
pub use translation::{Matcher, Translation, TranslationError, TranslationTable};

#[cfg(feature = "config")]
pub use config::{Config, ConfigError, MaskConfig};
