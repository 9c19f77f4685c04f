//! tiercache - tiered template resolution with a weight-bounded content cache
//!
//! Formatter templates may live in one of several layered directories. For a
//! template path, tiercache decides which physical file backs it, serves its
//! text from an in-memory cache when possible, and populates the cache on
//! every disk read. Template lookups happen once per rendering request, so
//! the cache avoids repeated disk reads while development mode keeps edits
//! immediately visible.
//!
//! # Resolution Tiers
//!
//! 1. The formatter directory
//! 2. The schema's formatter directory
//! 3. Formatter directories of upstream schemas, following `depends_on`
//!    declarations in `config.toml` files
//! 4. The root (global) formatter directory
//!
//! # Core Modules
//!
//! - [`templating`] - The tiered resolver ([`templating::TemplateCache`]) and its result type
//! - [`cache`] - Segmented, weight-bounded LRU cache of template content
//! - [`config`] - Cache tunables, startup validation and the settings file
//! - [`schema`] - Dev-mode flag, schema lookup and dependency declarations
//!
//! ## Supporting Modules
//! - [`cli`] - The `tiercache` command-line interface
//! - [`constants`] - Defaults and fixed names
//! - [`utils`] - Canonical path helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tiercache::config::CacheConfig;
//! use tiercache::schema::{SchemaRegistry, SystemFlags};
//! use tiercache::templating::{Substitutions, TemplateCache};
//!
//! # fn example() -> anyhow::Result<()> {
//! let templates = TemplateCache::new(
//!     &CacheConfig::default(),
//!     Arc::new(SystemFlags::new(false)),
//!     Arc::new(SchemaRegistry::with_plugins_dir("/srv/schemas")),
//! )?;
//!
//! let view = templates.create_file_result(
//!     Path::new("/srv/schemas/iso19139/formatter/xsl-view"),
//!     Some(Path::new("/srv/schemas/iso19139/formatter")),
//!     Path::new("/srv/formatters"),
//!     "view.html",
//!     Substitutions::new(),
//! )?;
//! assert!(!view.template().is_empty());
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod cache;
pub mod config;
pub mod schema;
pub mod templating;

// Supporting modules
pub mod cli;
pub mod constants;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
