//! On-disk fixtures for resolution tests
//!
//! Layout created under a temporary directory:
//!
//! ```text
//! <temp>/
//! ├── formatters/                      # root formatter directory
//! └── schemas/
//!     └── <schema>/
//!         └── formatter/               # schema formatter directory
//!             ├── config.toml          # optional `depends_on`
//!             └── <formatter>/         # formatter directory
//!                 └── config.toml      # optional `depends_on`
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::{FORMATTER_CONFIG_FILE, SCHEMA_PLUGIN_FORMATTER_DIR};
use crate::schema::SchemaRegistry;

/// Temporary schema plugin tree.
#[derive(Debug)]
pub struct FormatterFixture {
    temp: TempDir,
}

impl FormatterFixture {
    /// Creates an empty tree with the root formatter and schemas directories.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create fixture directory")?;
        let fixture = Self { temp };
        fs::create_dir_all(fixture.root_formatter_dir())?;
        fs::create_dir_all(fixture.schemas_dir())?;
        Ok(fixture)
    }

    /// The temporary directory holding everything.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// The global root formatter directory.
    pub fn root_formatter_dir(&self) -> PathBuf {
        self.path().join("formatters")
    }

    /// The directory whose children are schema plugins.
    pub fn schemas_dir(&self) -> PathBuf {
        self.path().join("schemas")
    }

    /// The formatter directory of schema `name`.
    pub fn schema_formatter_dir(&self, name: &str) -> PathBuf {
        self.schemas_dir().join(name).join(SCHEMA_PLUGIN_FORMATTER_DIR)
    }

    /// The directory of formatter `formatter` inside schema `schema`.
    pub fn formatter_dir(&self, schema: &str, formatter: &str) -> PathBuf {
        self.schema_formatter_dir(schema).join(formatter)
    }

    /// Creates schema `name`, optionally declaring its upstream schema.
    pub fn add_schema(&self, name: &str, depends_on: Option<&str>) -> Result<PathBuf> {
        let dir = self.schema_formatter_dir(name);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create schema {}", dir.display()))?;
        if let Some(parent) = depends_on {
            self.declare_dependency(&dir, parent)?;
        }
        Ok(dir)
    }

    /// Creates a formatter inside `schema`, optionally declaring an upstream schema.
    pub fn add_formatter(
        &self,
        schema: &str,
        formatter: &str,
        depends_on: Option<&str>,
    ) -> Result<PathBuf> {
        let dir = self.formatter_dir(schema, formatter);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create formatter {}", dir.display()))?;
        if let Some(parent) = depends_on {
            self.declare_dependency(&dir, parent)?;
        }
        Ok(dir)
    }

    /// Writes `config.toml` in `dir` declaring `depends_on = "<schema>"`.
    pub fn declare_dependency(&self, dir: &Path, schema: &str) -> Result<()> {
        self.write(dir, FORMATTER_CONFIG_FILE, &format!("depends_on = \"{schema}\"\n"))?;
        Ok(())
    }

    /// Writes `content` to `dir/relative`, creating parent directories.
    pub fn write(&self, dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// A registry resolving schema names against [`schemas_dir`](Self::schemas_dir).
    pub fn registry(&self) -> SchemaRegistry {
        SchemaRegistry::with_plugins_dir(self.schemas_dir())
    }
}
