//! Configuration management for tiercache
//!
//! Two layers of configuration exist:
//!
//! 1. **Cache tunables** ([`CacheConfig`]) - the size cap and concurrency hint,
//!    validated once before the cache is built.
//! 2. **Application settings** ([`Settings`]) - a TOML file that carries the
//!    cache tunables plus the dev-mode flag and schema directory mappings used
//!    by the binary.
//!
//! # Modules
//!
//! - `cache` - Cache tunables and startup validation
//! - `parser` - Generic TOML parsing utilities with error context
//! - `settings` - Settings file loading
//!
//! # Configuration Priority
//!
//! 1. `--config <path>` command-line flag
//! 2. `TIERCACHE_CONFIG` environment variable
//! 3. Default values

mod cache;
mod parser;
mod settings;

pub use cache::{CacheConfig, ConfigError};
pub use parser::parse_config;
pub use settings::Settings;
