//! Schema name to directory lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::templating::TemplateError;

/// Maps a schema name to that schema's root directory.
pub trait SchemaLocator: Send + Sync {
    /// Returns the root directory of the schema called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownSchema`] if no such schema exists.
    fn schema_dir(&self, name: &str) -> Result<PathBuf, TemplateError>;
}

/// Default [`SchemaLocator`]: explicit registrations, then an optional plugins directory.
///
/// With a plugins directory, schema `name` is found at `<plugins_dir>/<name>`
/// when that directory exists. Explicit registrations always win.
///
/// # Examples
///
/// ```
/// use tiercache::schema::{SchemaLocator, SchemaRegistry};
/// use std::path::PathBuf;
///
/// let mut registry = SchemaRegistry::new();
/// registry.register("iso19139", "/srv/schemas/iso19139");
///
/// assert_eq!(
///     registry.schema_dir("iso19139").unwrap(),
///     PathBuf::from("/srv/schemas/iso19139")
/// );
/// assert!(registry.schema_dir("dublin-core").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, PathBuf>,
    plugins_dir: Option<PathBuf>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that also looks schemas up as children of `plugins_dir`.
    pub fn with_plugins_dir(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            schemas: HashMap::new(),
            plugins_dir: Some(plugins_dir.into()),
        }
    }

    /// Registers (or replaces) the directory of schema `name`.
    pub fn register(&mut self, name: impl Into<String>, dir: impl Into<PathBuf>) {
        self.schemas.insert(name.into(), dir.into());
    }

    /// The plugins directory, if any.
    pub fn plugins_dir(&self) -> Option<&Path> {
        self.plugins_dir.as_deref()
    }
}

impl SchemaLocator for SchemaRegistry {
    fn schema_dir(&self, name: &str) -> Result<PathBuf, TemplateError> {
        if let Some(dir) = self.schemas.get(name) {
            return Ok(dir.clone());
        }

        if let Some(plugins_dir) = &self.plugins_dir
            && !name.is_empty()
            && !name.contains(['/', '\\'])
            && !matches!(name, "." | "..")
        {
            let dir = plugins_dir.join(name);
            if dir.is_dir() {
                return Ok(dir);
            }
        }

        Err(TemplateError::UnknownSchema {
            name: name.to_string(),
        })
    }
}
