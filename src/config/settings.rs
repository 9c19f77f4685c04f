//! Application settings for the tiercache binary and embedders.
//!
//! Settings are read from a TOML file whose location is taken from the
//! `--config` flag or the `TIERCACHE_CONFIG` environment variable. A missing
//! file yields the defaults, so the binary works without any configuration.
//!
//! # File Format
//!
//! ```toml
//! # Bypass the cache on reads so template edits show up immediately
//! dev_mode = false
//!
//! # Schema `<name>` lives in `<schema_plugins_dir>/<name>`
//! schema_plugins_dir = "/srv/schemas"
//!
//! [cache]
//! max_size_kb = 100000
//! concurrency_level = 4
//!
//! # Explicit schema directories take precedence over `schema_plugins_dir`
//! [schemas]
//! iso19139 = "/srv/schemas/iso19139"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::cache::CacheConfig;
use super::parser::parse_config;
use crate::schema::SchemaRegistry;

/// Top-level settings file structure.
///
/// # Examples
///
/// ```
/// use tiercache::config::Settings;
///
/// let settings: Settings = toml::from_str(r#"
///     dev_mode = true
///     [cache]
///     max_size_kb = 512
/// "#).unwrap();
///
/// assert!(settings.dev_mode);
/// assert_eq!(settings.cache.max_size_kb, 512);
/// assert_eq!(settings.cache.concurrency_level, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether template reads bypass the cache.
    pub dev_mode: bool,

    /// Directory whose children are schema plugins, looked up by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_plugins_dir: Option<PathBuf>,

    /// Cache tunables.
    pub cache: CacheConfig,

    /// Explicit schema name to directory mappings.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, PathBuf>,
}

impl Settings {
    /// Load settings from an optional path.
    ///
    /// `None`, or a path that does not exist, yields [`Settings::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from(path),
            Some(path) => {
                tracing::debug!("Settings file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file path.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings: Self = parse_config(path)?;
        if let Some(base) = path.parent() {
            settings.rebase(base);
        }
        tracing::debug!(
            "Loaded settings from {} ({} explicit schemas)",
            path.display(),
            settings.schemas.len()
        );
        Ok(settings)
    }

    /// Builds the schema lookup described by these settings.
    pub fn schema_registry(&self) -> SchemaRegistry {
        let mut registry = match &self.schema_plugins_dir {
            Some(dir) => SchemaRegistry::with_plugins_dir(dir),
            None => SchemaRegistry::new(),
        };
        for (name, dir) in &self.schemas {
            registry.register(name.clone(), dir.clone());
        }
        registry
    }

    /// Validates the cache section, attaching the settings context.
    pub fn validate(&self) -> Result<()> {
        self.cache.validate().context("Invalid [cache] settings")
    }

    fn rebase(&mut self, base: &Path) {
        if let Some(dir) = self.schema_plugins_dir.take() {
            self.schema_plugins_dir = Some(base.join(dir));
        }
        for dir in self.schemas.values_mut() {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}
