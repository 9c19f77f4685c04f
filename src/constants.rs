//! Global constants used throughout the tiercache codebase.
//!
//! This module contains configuration defaults, weight accounting factors and
//! the fixed file-system names that the resolver relies on. Defining them
//! centrally keeps magic numbers discoverable.

/// Default soft cap on cached template content, in kilobytes.
pub const DEFAULT_MAX_SIZE_KB: i64 = 100_000;

/// Default number of independently locked cache segments requested.
pub const DEFAULT_CONCURRENCY_LEVEL: i64 = 4;

/// Divisor applied after converting `max_size_kb` to the weight unit.
///
/// The capacity is `(max_size_kb * 1024) / WEIGHT_DIVISOR`. This is a fixed
/// conservative factor and not a byte/bit conversion.
pub const WEIGHT_DIVISOR: i64 = 8;

/// Largest total weight the cache accounting counter can hold.
pub const MAX_CACHE_WEIGHT: i64 = i32::MAX as i64;

/// Upper bound on the number of cache segments.
pub const MAX_SEGMENTS: usize = 1 << 16;

/// Initial number of entry slots reserved across all segments.
pub const INITIAL_CACHE_CAPACITY: usize = 100;

/// Sub-directory of a schema plugin that holds its formatter templates.
pub const SCHEMA_PLUGIN_FORMATTER_DIR: &str = "formatter";

/// File name of the dependency-declaring configuration artifact.
pub const FORMATTER_CONFIG_FILE: &str = "config.toml";

/// Environment variable naming the application settings file.
pub const CONFIG_PATH_ENV: &str = "TIERCACHE_CONFIG";
