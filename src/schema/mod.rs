//! Collaborators the resolver consults but does not own.
//!
//! The tiered resolver needs three answers from its environment:
//!
//! - whether the process runs in development mode ([`SystemInfo`]),
//! - where a named schema lives on disk ([`SchemaLocator`]),
//! - which schema a formatter or schema directory depends on ([`ConfigLoader`]).
//!
//! Each is a trait so embedders can plug in their own sources. The defaults
//! here ([`SystemFlags`], [`SchemaRegistry`], [`TomlConfigLoader`]) cover
//! the binary and the test suite.

mod formatter_config;
mod registry;

pub use formatter_config::{ConfigLoader, ConfigScope, FormatterConfig, TomlConfigLoader};
pub use registry::{SchemaLocator, SchemaRegistry};

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-level facts queried on every resolution.
pub trait SystemInfo: Send + Sync {
    /// Whether template reads must bypass the cache.
    fn is_dev_mode(&self) -> bool;
}

/// [`SystemInfo`] backed by a flag that can be flipped at runtime.
///
/// # Examples
///
/// ```
/// use tiercache::schema::{SystemFlags, SystemInfo};
///
/// let flags = SystemFlags::new(false);
/// assert!(!flags.is_dev_mode());
/// flags.set_dev_mode(true);
/// assert!(flags.is_dev_mode());
/// ```
#[derive(Debug, Default)]
pub struct SystemFlags {
    dev_mode: AtomicBool,
}

impl SystemFlags {
    /// Create flags with the given initial dev-mode value.
    pub fn new(dev_mode: bool) -> Self {
        Self {
            dev_mode: AtomicBool::new(dev_mode),
        }
    }

    /// Switch development mode on or off.
    pub fn set_dev_mode(&self, dev_mode: bool) {
        self.dev_mode.store(dev_mode, Ordering::SeqCst);
    }
}

impl SystemInfo for SystemFlags {
    fn is_dev_mode(&self) -> bool {
        self.dev_mode.load(Ordering::SeqCst)
    }
}
