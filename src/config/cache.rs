//! Cache tunables and their startup validation.
//!
//! The cache is configured with two values: a soft size cap in kilobytes and a
//! concurrency hint that controls how many independently locked segments the
//! cache is split into. Both are validated once, before the cache is built, so
//! an unusable configuration never produces a reachable cache.
//!
//! The size cap is converted to the cache's weight unit with
//!
//! ```text
//! capacity = (max_size_kb * 1024) / 8
//! ```
//!
//! and must land in `1..=i32::MAX`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONCURRENCY_LEVEL, DEFAULT_MAX_SIZE_KB, MAX_CACHE_WEIGHT, WEIGHT_DIVISOR,
};

/// Fatal configuration errors detected while building the cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The derived capacity does not fit the weight counter.
    #[error("maxSizeKB is too large: {max_size_kb} max allowed value is: {max_allowed}")]
    MaxSizeTooLarge {
        /// The configured value
        max_size_kb: i64,
        /// The largest value whose capacity still fits the counter
        max_allowed: i64,
    },

    /// The derived capacity is below one weight unit.
    #[error("maxSizeKB is too small: {max_size_kb}")]
    MaxSizeTooSmall {
        /// The configured value
        max_size_kb: i64,
    },

    /// The concurrency hint must request at least one segment.
    #[error("concurrencyLevel must be at least 1: {level}")]
    InvalidConcurrencyLevel {
        /// The configured value
        level: i64,
    },
}

/// Tunables for the template content cache.
///
/// # Examples
///
/// ```
/// use tiercache::config::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert_eq!(config.capacity().unwrap(), 12_800_000);
///
/// let tiny = CacheConfig { max_size_kb: 0, ..CacheConfig::default() };
/// assert!(tiny.capacity().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Soft cap on total cached content, in kilobytes.
    pub max_size_kb: i64,
    /// Hint for the number of independently locked cache segments.
    pub concurrency_level: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            concurrency_level: DEFAULT_CONCURRENCY_LEVEL,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with the given size cap and the default concurrency level.
    pub fn with_max_size_kb(max_size_kb: i64) -> Self {
        Self {
            max_size_kb,
            ..Self::default()
        }
    }

    /// The largest `max_size_kb` whose derived capacity fits the weight counter.
    pub const fn max_allowed_size_kb() -> i64 {
        (MAX_CACHE_WEIGHT * WEIGHT_DIVISOR) / 1024
    }

    /// Validates the size cap and returns the weight capacity it derives.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MaxSizeTooLarge`] if the capacity exceeds `i32::MAX`
    /// - [`ConfigError::MaxSizeTooSmall`] if the capacity is below 1
    pub fn capacity(&self) -> Result<u64, ConfigError> {
        let too_large = || ConfigError::MaxSizeTooLarge {
            max_size_kb: self.max_size_kb,
            max_allowed: Self::max_allowed_size_kb(),
        };

        let capacity = self.max_size_kb.checked_mul(1024).ok_or_else(too_large)? / WEIGHT_DIVISOR;

        if capacity > MAX_CACHE_WEIGHT {
            return Err(too_large());
        }
        if capacity < 1 {
            return Err(ConfigError::MaxSizeTooSmall {
                max_size_kb: self.max_size_kb,
            });
        }

        Ok(capacity as u64)
    }

    /// Validates the concurrency hint and returns it as a segment request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConcurrencyLevel`] if the level is below 1.
    pub fn segment_request(&self) -> Result<usize, ConfigError> {
        if self.concurrency_level < 1 {
            return Err(ConfigError::InvalidConcurrencyLevel {
                level: self.concurrency_level,
            });
        }
        Ok(usize::try_from(self.concurrency_level).unwrap_or(usize::MAX))
    }

    /// Runs every startup check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacity()?;
        self.segment_request()?;
        Ok(())
    }
}
