//! Test utilities for tiercache
//!
//! Helpers for writing tests: a `Once`-guarded tracing initializer and an
//! on-disk fixture that lays out schema plugins, formatter directories and
//! dependency declarations in a temporary directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use tiercache::test_utils::FormatterFixture;
//!
//! # fn example() -> anyhow::Result<()> {
//! let fixture = FormatterFixture::new()?;
//! fixture.add_schema("iso19139", None)?;
//! let view = fixture.add_formatter("iso19139", "xsl-view", None)?;
//! fixture.write(&view, "view.html", "<h1/>")?;
//! # Ok(())
//! # }
//! ```

pub mod fixtures;

pub use fixtures::FormatterFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Respects `RUST_LOG` when set, otherwise uses `level`; with neither, logging
/// stays off. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=tiercache=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
