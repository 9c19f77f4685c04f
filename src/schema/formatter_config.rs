//! Dependency-declaring configuration files.
//!
//! A formatter directory or a schema's formatter directory may carry a
//! `config.toml` that names the schema it builds on:
//!
//! ```toml
//! depends_on = "iso19139"
//! ```
//!
//! Other keys in the file belong to other consumers and are ignored here.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::FORMATTER_CONFIG_FILE;
use crate::templating::TemplateError;

/// How a config directory should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope<'a> {
    /// A formatter directory, co-located with an optional schema formatter directory
    /// whose config provides defaults.
    Formatter {
        /// The schema formatter directory consulted when the formatter declares nothing
        schema_dir: Option<&'a Path>,
    },
    /// A schema formatter directory on its own.
    Schema,
}

/// The parsed declaration of a config directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormatterConfig {
    #[serde(default)]
    depends_on: Option<String>,
}

impl FormatterConfig {
    /// A config declaring the given upstream schema.
    pub fn depending_on(schema: impl Into<String>) -> Self {
        Self {
            depends_on: Some(schema.into()),
        }
    }

    /// The upstream schema this directory depends on, if any.
    pub fn depends_on(&self) -> Option<&str> {
        self.depends_on
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Loads the dependency declaration of a directory.
pub trait ConfigLoader: Send + Sync {
    /// Loads the config for `dir` in the given scope.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    fn load(&self, dir: &Path, scope: ConfigScope<'_>) -> Result<FormatterConfig, TemplateError>;
}

/// Default [`ConfigLoader`] reading TOML files.
///
/// In [`ConfigScope::Formatter`] the formatter directory's file is consulted
/// first and the schema directory's file supplies the declaration when the
/// formatter has none. Missing files declare nothing.
#[derive(Debug, Clone)]
pub struct TomlConfigLoader {
    file_name: String,
}

impl Default for TomlConfigLoader {
    fn default() -> Self {
        Self {
            file_name: FORMATTER_CONFIG_FILE.to_string(),
        }
    }
}

impl TomlConfigLoader {
    /// A loader reading `config.toml`.
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader reading a differently named file.
    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    fn config_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }

    fn read(&self, dir: &Path) -> Result<FormatterConfig, TemplateError> {
        let path = self.config_path(dir);
        if !path.is_file() {
            return Ok(FormatterConfig::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| {
            TemplateError::ConfigRead {
                path: path.clone(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| TemplateError::ConfigParse {
            path,
            source: Box::new(source),
        })
    }
}

impl ConfigLoader for TomlConfigLoader {
    fn load(&self, dir: &Path, scope: ConfigScope<'_>) -> Result<FormatterConfig, TemplateError> {
        let config = self.read(dir)?;
        match scope {
            ConfigScope::Formatter {
                schema_dir: Some(schema_dir),
            } if config.depends_on().is_none() => self.read(schema_dir),
            _ => Ok(config),
        }
    }
}
