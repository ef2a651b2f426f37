// Maskrs Config API
// TOML mask definitions resolved against the named-mask registry

pub mod parser;

pub use parser::{Config, ConfigError, MaskConfig};
