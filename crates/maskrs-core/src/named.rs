// Maskrs Named Masks
// Process-wide registry of reusable masks, with the built-in document and phone presets

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::LazyLock;

use crate::field::{CharCount, MaskSwitch};
use crate::mask_spec::MaskSpec;
use crate::translation::TranslationTable;

/// Global named mask registry
static NAMED_MASKS: LazyLock<RwLock<NamedMaskRegistry>> =
    LazyLock::new(|| RwLock::new(NamedMaskRegistry::with_defaults()));

/// Internal registry for named masks
struct NamedMaskRegistry {
    by_name: IndexMap<String, NamedMask>,
}

impl NamedMaskRegistry {
    fn with_defaults() -> Self {
        let mut registry = Self {
            by_name: IndexMap::new(),
        };
        // Brazilian CPF (11 chars) growing into CNPJ (14 chars)
        registry.add_internal(NamedMask::dynamic(
            "CPF_CNPJ",
            MaskSwitch::new(
                CharCount::Alphanumeric,
                11,
                "AAA.AAA.AAA-AAA",
                "AA.AAA.AAA/AAAA-00",
            ),
        ));
        // Landline (10 digits) growing into mobile (11 digits)
        registry.add_internal(NamedMask::dynamic(
            "CELULAR_TELEFONE",
            MaskSwitch::new(CharCount::Digits, 10, "(00) 0000-00009", "(00) 00000-0000"),
        ));
        registry
    }

    fn add_internal(&mut self, mask: NamedMask) {
        self.by_name.insert(mask.name.clone(), mask);
    }

    fn add(&mut self, mask: NamedMask) -> Result<(), NamedMaskError> {
        if self.by_name.contains_key(&mask.name) {
            return Err(NamedMaskError::NameExists(mask.name.clone()));
        }
        self.add_internal(mask);
        Ok(())
    }
}

/// A reusable mask registered under a name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMask {
    name: String,
    pattern: String,
    reverse: bool,
    switch: Option<MaskSwitch>,
}

impl NamedMask {
    /// Fixed pattern mask
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            reverse: false,
            switch: None,
        }
    }

    /// Mask that starts on the switch's short pattern and swaps as the value grows
    pub fn dynamic(name: impl Into<String>, switch: MaskSwitch) -> Self {
        Self {
            name: name.into(),
            pattern: switch.short.clone(),
            reverse: false,
            switch: Some(switch),
        }
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Initial pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn switch(&self) -> Option<&MaskSwitch> {
        self.switch.as_ref()
    }

    /// Build the mask spec for this entry with the given translations
    pub fn to_spec(&self, translations: TranslationTable) -> MaskSpec {
        MaskSpec::with_translations(self.pattern.clone(), translations).reversed(self.reverse)
    }

    /// Add a named mask to the global registry
    pub fn register(mask: NamedMask) -> Result<(), NamedMaskError> {
        log::debug!("registering named mask '{}' ({})", mask.name, mask.pattern);
        NAMED_MASKS.write().add(mask)
    }

    /// Get a named mask from the global registry
    pub fn lookup(name: &str) -> Option<NamedMask> {
        NAMED_MASKS.read().by_name.get(name).cloned()
    }

    /// Get a named mask, failing with an error when it is missing
    pub fn require(name: &str) -> Result<NamedMask, NamedMaskError> {
        Self::lookup(name).ok_or_else(|| NamedMaskError::Unknown(name.to_string()))
    }

    /// All registered names, built-ins first
    pub fn names() -> Vec<String> {
        NAMED_MASKS.read().by_name.keys().cloned().collect()
    }
}

impl fmt::Display for NamedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.switch {
            Some(switch) => write!(f, "{}: {} | {}", self.name, switch.short, switch.long),
            None => write!(f, "{}: {}", self.name, self.pattern),
        }
    }
}

/// Errors that can occur when working with named masks
#[derive(Debug, Clone, PartialEq)]
pub enum NamedMaskError {
    NameExists(String),
    Unknown(String),
}

impl fmt::Display for NamedMaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamedMaskError::NameExists(name) => {
                write!(f, "named mask '{}' already exists", name)
            }
            NamedMaskError::Unknown(name) => write!(f, "unknown named mask '{}'", name),
        }
    }
}

impl std::error::Error for NamedMaskError {}
