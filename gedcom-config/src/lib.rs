//! Shared configuration loader for the gedcom reader and writer.
//!
//! `defaults/gedcom.default.toml` is embedded into the crate so that the documented
//! defaults and runtime behavior stay in sync. Applications layer their own files on
//! top of those defaults via [`Loader`] before deserializing into [`GedcomConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};

pub use config::{ConfigError, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/gedcom.default.toml");

/// Top-level configuration consumed by gedcom readers, writers and documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GedcomConfig {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
}

/// Knobs for turning raw text into record trees.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReaderConfig {
    pub strip_byte_order_mark: bool,
}

/// Knobs for the line emitter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WriterConfig {
    pub max_data_length: usize,
    pub newline: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            strip_byte_order_mark: true,
        }
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            max_data_length: 248,
            newline: "\n".to_string(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text held in memory.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override, e.g. `("writer.max_data_length", 120)`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GedcomConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GedcomConfig, ConfigError> {
    Loader::new().build()
}
