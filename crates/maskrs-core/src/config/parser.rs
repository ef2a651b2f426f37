// Maskrs Config Parser - TOML with Serde
// Parses mask definitions from TOML files

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::field::{CharCount, FieldOptions, MaskSwitch, MaskedField};
use crate::mask_spec::MaskSpec;
use crate::named::NamedMask;
use crate::translation::{single_char, Matcher, Translation, TranslationError, TranslationTable};

fn config_debug_enabled() -> bool {
    static DEBUG_CONFIG: OnceLock<bool> = OnceLock::new();
    *DEBUG_CONFIG.get_or_init(|| {
        std::env::var("MASKRS_DEBUG_CONFIG")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "on"))
            .unwrap_or(false)
    })
}

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid translation in mask '{mask}': {source}")]
    InvalidTranslation {
        mask: String,
        #[source]
        source: TranslationError,
    },

    #[error("Unknown mask: {0}")]
    UnknownMask(String),

    #[error("Mask '{0}' has an empty pattern")]
    EmptyPattern(String),

    #[error("Mask '{0}' is defined more than once")]
    DuplicateMask(String),

    #[error("Invalid switch in mask '{mask}': {reason}")]
    InvalidSwitch { mask: String, reason: String },
}

/// Main configuration structure (root TOML table)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    /// General settings
    #[serde(default)]
    general: Option<GeneralConfig>,

    /// Mask definitions
    #[serde(default)]
    mask: Vec<MaskTomlEntry>,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct GeneralConfig {
    /// Mask used when the CLI gets neither a pattern nor a name
    default_mask: Option<String>,
}

/// One `[[mask]]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaskTomlEntry {
    name: String,

    /// Pattern string; may be left out when a switch supplies the short pattern
    pattern: Option<String>,

    #[serde(default)]
    reverse: bool,

    #[serde(default)]
    select_on_focus: bool,

    /// Placeholder overrides, keyed by the placeholder character
    #[serde(default)]
    translation: BTreeMap<String, TranslationTomlEntry>,

    switch: Option<SwitchTomlEntry>,
}

/// `[mask.translation.X]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TranslationTomlEntry {
    /// Regex tested against each value character
    pattern: String,

    #[serde(default)]
    optional: bool,

    #[serde(default)]
    recursive: bool,

    fallback: Option<String>,
}

/// `[mask.switch]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct SwitchTomlEntry {
    count: CharCount,
    threshold: usize,
    short: String,
    long: String,
}

/// A fully resolved mask definition
#[derive(Debug, Clone, PartialEq)]
pub struct MaskConfig {
    pub name: String,
    pub pattern: String,
    pub reverse: bool,
    pub select_on_focus: bool,
    /// Built-in translations with this mask's overrides applied
    pub translations: TranslationTable,
    pub switch: Option<MaskSwitch>,
}

impl MaskConfig {
    /// Definition backed by a registry entry, using the built-in translations
    pub fn from_named(named: &NamedMask) -> Self {
        Self {
            name: named.name().to_string(),
            pattern: named.pattern().to_string(),
            reverse: named.is_reverse(),
            select_on_focus: false,
            translations: TranslationTable::default(),
            switch: named.switch().cloned(),
        }
    }

    /// Build the mask spec for this definition
    pub fn to_spec(&self) -> MaskSpec {
        MaskSpec::with_translations(self.pattern.clone(), self.translations.clone())
            .reversed(self.reverse)
    }

    /// Build an empty field bound to this definition
    pub fn to_field(&self) -> MaskedField {
        let options = FieldOptions {
            select_on_focus: self.select_on_focus,
            switch: self.switch.clone(),
        };
        MaskedField::new(self.to_spec(), options)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Masks in file order
    pub masks: Vec<MaskConfig>,
    /// Name from `[general] default_mask`
    pub default_mask: Option<String>,
    /// File the configuration was loaded from
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML configuration file
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path)?;
        let mut config = Self::from_toml(&content)?;
        config.source_path = Some(path.as_ref().to_path_buf());
        log::debug!(
            "loaded {} mask(s) from {}",
            config.masks.len(),
            path.as_ref().display()
        );
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let toml_config: ConfigToml =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;

        toml_config.to_config()
    }

    /// Get the default config path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("maskrs").join("masks.toml"))
    }

    /// Load from default location (~/.config/maskrs/masks.toml)
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_toml_path(path);
            }
        }
        // Built-in named masks only
        Ok(Self::default())
    }

    /// Resolve a mask by name: file definitions first, then the named-mask registry
    pub fn mask(&self, name: &str) -> Result<MaskConfig, ConfigError> {
        if let Some(mask) = self.masks.iter().find(|m| m.name == name) {
            return Ok(mask.clone());
        }
        NamedMask::lookup(name)
            .map(|named| MaskConfig::from_named(&named))
            .ok_or_else(|| ConfigError::UnknownMask(name.to_string()))
    }

    /// The mask named by `[general] default_mask`, if any
    pub fn default_mask(&self) -> Option<MaskConfig> {
        self.default_mask
            .as_deref()
            .and_then(|name| self.mask(name).ok())
    }

    /// File mask names followed by registry names not shadowed by the file
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.masks.iter().map(|m| m.name.clone()).collect();
        for name in NamedMask::names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

impl ConfigToml {
    /// Convert parsed TOML to internal Config structure
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        for entry in &self.mask {
            if config.masks.iter().any(|m| m.name == entry.name) {
                return Err(ConfigError::DuplicateMask(entry.name.clone()));
            }
            let mask = entry.to_mask_config()?;
            if config_debug_enabled() {
                log::trace!(
                    "mask='{}' pattern='{}' reverse={} translations={} switch={:?}",
                    mask.name,
                    mask.pattern,
                    mask.reverse,
                    mask.translations.len(),
                    mask.switch
                );
            }
            config.masks.push(mask);
        }

        if let Some(general) = &self.general {
            if let Some(name) = &general.default_mask {
                // Fail early rather than at first use
                config.mask(name)?;
                config.default_mask = Some(name.clone());
            }
        }

        Ok(config)
    }
}

impl MaskTomlEntry {
    fn to_mask_config(&self) -> Result<MaskConfig, ConfigError> {
        let switch = self.switch.as_ref().map(|s| self.parse_switch(s)).transpose()?;

        let pattern = match (&self.pattern, &switch) {
            (Some(pattern), _) => pattern.clone(),
            (None, Some(switch)) => switch.short.clone(),
            (None, None) => String::new(),
        };
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern(self.name.clone()));
        }

        let mut translations = TranslationTable::default();
        for (placeholder, entry) in &self.translation {
            let (c, translation) = parse_translation(placeholder, entry).map_err(|source| {
                ConfigError::InvalidTranslation {
                    mask: self.name.clone(),
                    source,
                }
            })?;
            translations.insert(c, translation);
        }

        Ok(MaskConfig {
            name: self.name.clone(),
            pattern,
            reverse: self.reverse,
            select_on_focus: self.select_on_focus,
            translations,
            switch,
        })
    }

    fn parse_switch(&self, raw: &SwitchTomlEntry) -> Result<MaskSwitch, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidSwitch {
            mask: self.name.clone(),
            reason: reason.to_string(),
        };
        if raw.short.is_empty() || raw.long.is_empty() {
            return Err(invalid("short and long patterns must not be empty"));
        }
        if raw.short == raw.long {
            return Err(invalid("short and long patterns are identical"));
        }
        if raw.threshold == 0 {
            return Err(invalid("threshold must be at least 1"));
        }
        Ok(MaskSwitch::new(raw.count, raw.threshold, raw.short.clone(), raw.long.clone()))
    }
}

/// Parse one `[mask.translation.X]` table
fn parse_translation(
    placeholder: &str,
    entry: &TranslationTomlEntry,
) -> Result<(char, Translation), TranslationError> {
    let c = single_char(placeholder)
        .ok_or_else(|| TranslationError::InvalidPlaceholder(placeholder.to_string()))?;

    let mut translation = Translation::new(Matcher::pattern(&entry.pattern)?);
    if entry.optional {
        translation = translation.optional();
    }
    if entry.recursive {
        translation = translation.recursive();
    }
    if let Some(fallback) = &entry.fallback {
        let f = single_char(fallback)
            .ok_or_else(|| TranslationError::InvalidFallback(fallback.clone()))?;
        translation = translation.with_fallback(f);
    }

    Ok((c, translation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::masked_value;

    #[test]
    fn test_config_from_simple_toml() {
        let toml = r#"
            [general]
            default_mask = "date"

            [[mask]]
            name = "date"
            pattern = "00/00/0000"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.masks.len(), 1);
        assert_eq!(config.masks[0].pattern, "00/00/0000");
        assert!(!config.masks[0].reverse);
        assert_eq!(config.default_mask().unwrap().name, "date");
    }

    #[test]
    fn test_config_empty() {
        let config = Config::from_toml("").unwrap();
        assert!(config.masks.is_empty());
        assert!(config.default_mask().is_none());
    }

    #[test]
    fn test_custom_translation() {
        let toml = r#"
            [[mask]]
            name = "color"
            pattern = "HHHHHH"

            [mask.translation.H]
            pattern = "[0-9A-Fa-f]"
        "#;

        let config = Config::from_toml(toml).unwrap();
        let mask = config.mask("color").unwrap();
        assert!(mask.translations.contains('H'));
        // Built-ins stay available next to the override
        assert!(mask.translations.contains('0'));

        let spec = mask.to_spec();
        assert_eq!(masked_value("1a0F3c", &spec), "1a0F3c");
        assert_eq!(masked_value("1g2", &spec), "12");
    }

    #[test]
    fn test_translation_with_fallback_and_flags() {
        let toml = r#"
            [[mask]]
            name = "code"
            pattern = "XX-YY"

            [mask.translation.X]
            pattern = "[A-Z]"
            fallback = "_"

            [mask.translation.Y]
            pattern = "[0-9]"
            optional = true
        "#;

        let config = Config::from_toml(toml).unwrap();
        let mask = config.mask("code").unwrap();
        let x = mask.translations.get('X').unwrap();
        assert_eq!(x.fallback, Some('_'));
        assert!(!x.optional);
        assert!(mask.translations.get('Y').unwrap().optional);
    }

    #[test]
    fn test_reverse_and_select_on_focus() {
        let toml = r##"
            [[mask]]
            name = "money"
            pattern = "#.##0,00"
            reverse = true
            select_on_focus = true
        "##;

        let config = Config::from_toml(toml).unwrap();
        let mask = config.mask("money").unwrap();
        assert!(mask.to_spec().is_reverse());
        assert!(mask.to_field().focus());
        assert_eq!(masked_value("123456", &mask.to_spec()), "1.234,56");
    }

    #[test]
    fn test_switch_supplies_pattern() {
        let toml = r#"
            [[mask]]
            name = "phone"

            [mask.switch]
            count = "digits"
            threshold = 10
            short = "(00) 0000-00009"
            long = "(00) 00000-0000"
        "#;

        let config = Config::from_toml(toml).unwrap();
        let mask = config.mask("phone").unwrap();
        assert_eq!(mask.pattern, "(00) 0000-00009");
        let switch = mask.switch.unwrap();
        assert_eq!(switch.count, CharCount::Digits);
        assert_eq!(switch.threshold, 10);
    }

    #[test]
    fn test_lookup_falls_back_to_named_registry() {
        let config = Config::from_toml("").unwrap();
        let mask = config.mask("CELULAR_TELEFONE").unwrap();
        assert_eq!(mask.pattern, "(00) 0000-00009");
        assert!(mask.switch.is_some());
        assert!(config.names().contains(&"CPF_CNPJ".to_string()));
    }

    #[test]
    fn test_file_mask_shadows_registry() {
        let toml = r#"
            [[mask]]
            name = "CPF_CNPJ"
            pattern = "000.000.000-00"
        "#;

        let config = Config::from_toml(toml).unwrap();
        let mask = config.mask("CPF_CNPJ").unwrap();
        assert_eq!(mask.pattern, "000.000.000-00");
        assert!(mask.switch.is_none());
        let names = config.names();
        assert_eq!(names.iter().filter(|n| *n == "CPF_CNPJ").count(), 1);
    }

    #[test]
    fn test_unknown_mask() {
        let config = Config::from_toml("").unwrap();
        assert!(matches!(
            config.mask("nope"),
            Err(ConfigError::UnknownMask(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_unknown_default_mask_fails_on_load() {
        let toml = r#"
            [general]
            default_mask = "missing"
        "#;
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::UnknownMask(_))
        ));
    }

    #[test]
    fn test_empty_pattern() {
        let toml = r#"
            [[mask]]
            name = "blank"
            pattern = ""
        "#;
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::EmptyPattern(name)) if name == "blank"
        ));

        let toml = r#"
            [[mask]]
            name = "nothing"
        "#;
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::EmptyPattern(_))
        ));
    }

    #[test]
    fn test_duplicate_mask() {
        let toml = r#"
            [[mask]]
            name = "a"
            pattern = "0"

            [[mask]]
            name = "a"
            pattern = "00"
        "#;
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::DuplicateMask(name)) if name == "a"
        ));
    }

    #[test]
    fn test_invalid_translations() {
        let bad_regex = r#"
            [[mask]]
            name = "r"
            pattern = "X"
            [mask.translation.X]
            pattern = "[unclosed"
        "#;
        assert!(matches!(
            Config::from_toml(bad_regex),
            Err(ConfigError::InvalidTranslation {
                source: TranslationError::InvalidPattern { .. },
                ..
            })
        ));

        let bad_placeholder = r#"
            [[mask]]
            name = "p"
            pattern = "XY"
            [mask.translation.XY]
            pattern = "[a-z]"
        "#;
        assert!(matches!(
            Config::from_toml(bad_placeholder),
            Err(ConfigError::InvalidTranslation {
                source: TranslationError::InvalidPlaceholder(_),
                ..
            })
        ));

        let bad_fallback = r#"
            [[mask]]
            name = "f"
            pattern = "X"
            [mask.translation.X]
            pattern = "[a-z]"
            fallback = "ab"
        "#;
        assert!(matches!(
            Config::from_toml(bad_fallback),
            Err(ConfigError::InvalidTranslation {
                source: TranslationError::InvalidFallback(_),
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_switch() {
        let toml = r#"
            [[mask]]
            name = "s"
            [mask.switch]
            count = "digits"
            threshold = 3
            short = "000"
            long = "000"
        "#;
        assert!(matches!(
            Config::from_toml(toml),
            Err(ConfigError::InvalidSwitch { .. })
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let toml = r#"
            [[mask]]
            name = "x"
            pattern = "0"
            colour = "red"
        "#;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_path_points_at_masks_toml() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("maskrs/masks.toml"));
        }
    }
}
