//! Tiered template resolution backed by the weighted content cache.
//!
//! A template path is looked up in four tiers:
//!
//! 1. the formatter directory,
//! 2. the schema directory (when given),
//! 3. the formatter directory of a parent schema, found by following
//!    `depends_on` declarations up the schema chain,
//! 4. the root formatter directory.
//!
//! Outside development mode the cache is probed for each tier's canonical
//! path first, in that order, and the first hit is returned without touching
//! the template files. Only when every probe misses are the tiers checked on
//! disk. In development mode the probes are skipped so edits show up
//! immediately. Either way, a template read from disk is written to the cache
//! under its canonical path.
//!
//! Because each tier is probed before any disk check, a cached entry for a
//! lower tier can be served even when a higher tier has since gained a file
//! on disk. Cached content is never refreshed outside development mode.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace, warn};

use super::error::{TemplateError, TriedLocations};
use super::file_result::{FileResult, Substitutions};
use crate::cache::WeightedCache;
use crate::config::{CacheConfig, ConfigError};
use crate::constants::SCHEMA_PLUGIN_FORMATTER_DIR;
use crate::schema::{ConfigLoader, ConfigScope, SchemaLocator, SystemInfo, TomlConfigLoader};
use crate::utils::{canonical_path, join_template};

/// Resolves template paths across the formatter tiers and caches their content.
///
/// # Concurrency
///
/// The cache itself supports concurrent readers and writers, but the
/// probe-then-read-then-populate sequence spans several tiers and is not
/// atomic. [`create_file_result`](Self::create_file_result) therefore holds an
/// instance-wide lock for its whole duration: one resolution runs at a time.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use tiercache::config::CacheConfig;
/// use tiercache::schema::{SchemaRegistry, SystemFlags};
/// use tiercache::templating::{Substitutions, TemplateCache};
///
/// # fn example() -> anyhow::Result<()> {
/// let templates = TemplateCache::new(
///     &CacheConfig::default(),
///     Arc::new(SystemFlags::new(false)),
///     Arc::new(SchemaRegistry::with_plugins_dir("/srv/schemas")),
/// )?;
///
/// let result = templates.create_file_result(
///     Path::new("/srv/schemas/iso19139/formatter/xsl-view"),
///     Some(Path::new("/srv/schemas/iso19139/formatter")),
///     Path::new("/srv/formatters"),
///     "view.html",
///     Substitutions::new(),
/// )?;
/// println!("{} from {}", result.template(), result.file().display());
/// # Ok(())
/// # }
/// ```
pub struct TemplateCache {
    cache: WeightedCache,
    system_info: Arc<dyn SystemInfo>,
    schemas: Arc<dyn SchemaLocator>,
    configs: Arc<dyn ConfigLoader>,
    resolution: Mutex<()>,
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache").field("cache", &self.cache).finish_non_exhaustive()
    }
}

impl TemplateCache {
    /// Validates `config`, builds the cache and wires the collaborators.
    ///
    /// Dependency declarations are read with [`TomlConfigLoader`]; use
    /// [`with_config_loader`](Self::with_config_loader) to replace it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache tunables are invalid.
    pub fn new(
        config: &CacheConfig,
        system_info: Arc<dyn SystemInfo>,
        schemas: Arc<dyn SchemaLocator>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: WeightedCache::new(config)?,
            system_info,
            schemas,
            configs: Arc::new(TomlConfigLoader::new()),
            resolution: Mutex::new(()),
        })
    }

    /// Replaces the loader used for dependency declarations.
    #[must_use]
    pub fn with_config_loader(mut self, configs: Arc<dyn ConfigLoader>) -> Self {
        self.configs = configs;
        self
    }

    /// The underlying content cache.
    pub fn cache(&self) -> &WeightedCache {
        &self.cache
    }

    /// Resolves `path` against the tiers and returns its content bound to `substitutions`.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::NotFound`] if no tier contains the file
    /// - [`TemplateError::Read`] if the selected file cannot be read
    /// - config, schema lookup and cycle errors from walking the parent-schema chain
    pub fn create_file_result(
        &self,
        formatter_dir: &Path,
        schema_dir: Option<&Path>,
        root_formatter_dir: &Path,
        path: &str,
        substitutions: Substitutions,
    ) -> Result<FileResult, TemplateError> {
        let _resolution = self.resolution.lock().unwrap_or_else(PoisonError::into_inner);

        // None: not computed yet. Some(None): computed, no parent file.
        let mut from_parent_schema: Option<Option<PathBuf>> = None;

        if !self.system_info.is_dev_mode() {
            let formatter_file = join_template(formatter_dir, path);
            if let Some(template) = self.cached(&formatter_file)? {
                return Ok(FileResult::new(formatter_file, template, substitutions));
            }

            if let Some(schema_dir) = schema_dir {
                let schema_file = join_template(schema_dir, path);
                if let Some(template) = self.cached(&schema_file)? {
                    return Ok(FileResult::new(schema_file, template, substitutions));
                }
            }

            let parent_file = self.parent_schema_template(formatter_dir, schema_dir, path)?;
            if let Some(parent_file) = &parent_file
                && let Some(template) = self.cached(parent_file)?
            {
                return Ok(FileResult::new(parent_file.clone(), template, substitutions));
            }
            from_parent_schema = Some(parent_file);

            let root_file = join_template(root_formatter_dir, path);
            if let Some(template) = self.cached(&root_file)? {
                return Ok(FileResult::new(root_file, template, substitutions));
            }
        }

        let mut file = join_template(formatter_dir, path);
        if !file.exists()
            && let Some(schema_dir) = schema_dir
        {
            file = join_template(schema_dir, path);
        }

        if !file.exists() {
            let parent_file = match from_parent_schema.take() {
                Some(parent_file) => parent_file,
                None => self.parent_schema_template(formatter_dir, schema_dir, path)?,
            };
            if let Some(parent_file) = &parent_file {
                file = parent_file.clone();
            }
            from_parent_schema = Some(parent_file);
        }

        if !file.exists() {
            file = join_template(root_formatter_dir, path);
        }

        if !file.exists() {
            return Err(TemplateError::NotFound {
                path: path.to_string(),
                tried: Box::new(TriedLocations {
                    formatter_dir: formatter_dir.to_path_buf(),
                    schema_dir: schema_dir.map(Path::to_path_buf),
                    parent_schema: from_parent_schema.flatten(),
                    root_formatter_dir: root_formatter_dir.to_path_buf(),
                }),
            });
        }

        debug!("Reading template {} from disk", file.display());
        let template = std::fs::read_to_string(&file).map_err(|source| TemplateError::Read {
            path: file.clone(),
            source,
        })?;
        self.cache.put(cache_key(&file)?, template.clone());

        Ok(FileResult::new(file, template, substitutions))
    }

    /// Finds `path` in the formatter directory of an upstream schema.
    ///
    /// The formatter directory's config (falling back to the schema
    /// directory's) names the first upstream schema; each schema's formatter
    /// directory then names the next. The walk stops at the first formatter
    /// directory containing `path`, or when a schema declares no dependency.
    ///
    /// # Errors
    ///
    /// - config read/parse errors and [`TemplateError::UnknownSchema`] from the collaborators
    /// - [`TemplateError::CyclicSchemaDependency`] if a schema is reached twice
    pub fn parent_schema_template(
        &self,
        formatter_dir: &Path,
        schema_dir: Option<&Path>,
        path: &str,
    ) -> Result<Option<PathBuf>, TemplateError> {
        let mut config = self.configs.load(formatter_dir, ConfigScope::Formatter { schema_dir })?;
        let mut visited: Vec<String> = Vec::new();

        while let Some(schema) = config.depends_on() {
            if visited.iter().any(|seen| seen == schema) {
                visited.push(schema.to_string());
                warn!("Schema dependency cycle: {}", visited.join(" -> "));
                return Err(TemplateError::CyclicSchemaDependency { chain: visited });
            }
            visited.push(schema.to_string());

            let parent_dir = self.schemas.schema_dir(schema)?.join(SCHEMA_PLUGIN_FORMATTER_DIR);
            let candidate = join_template(&parent_dir, path);
            trace!("Checking parent schema '{}' for {}", schema, candidate.display());
            if candidate.exists() {
                return Ok(Some(candidate));
            }

            config = self.configs.load(&parent_dir, ConfigScope::Schema)?;
        }

        Ok(None)
    }

    fn cached(&self, file: &Path) -> Result<Option<String>, TemplateError> {
        let key = cache_key(file)?;
        let template = self.cache.get(&key);
        if template.is_some() {
            debug!("Template cache hit for {key}");
        }
        Ok(template)
    }
}

fn cache_key(file: &Path) -> Result<String, TemplateError> {
    let canonical = canonical_path(file).map_err(|source| TemplateError::Canonicalize {
        path: file.to_path_buf(),
        source,
    })?;
    canonical
        .into_os_string()
        .into_string()
        .map_err(|path| TemplateError::NonUtf8Path { path: path.into() })
}
