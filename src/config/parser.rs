//! Generic configuration parsing utilities.
//!
//! Reads a TOML file into any `DeserializeOwned` type, attaching the file path
//! to both read and parse failures.
//!
//! Example error output:
//! ```text
//! Failed to parse config file: /path/to/tiercache.toml
//! Caused by:
//!     invalid TOML value, expected string
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use tiercache::config::{parse_config, Settings};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let settings: Settings = parse_config(Path::new("tiercache.toml"))?;
/// println!("dev mode: {}", settings.dev_mode);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read, contains invalid TOML, or does
/// not match the structure of `T`. The path is included in the error context.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
