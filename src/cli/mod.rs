//! Command-line interface for tiercache.
//!
//! # Available Commands
//!
//! - `resolve` - Resolve one or more template paths across the formatter tiers
//! - `check-config` - Validate the cache configuration and show the derived capacity
//!
//! # Global Options
//!
//! - `--config <path>` - Settings file (also `TIERCACHE_CONFIG`)
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Disable logging
//!
//! # Examples
//!
//! ```bash
//! # Resolve a template for a formatter of the iso19139 schema
//! tiercache --config tiercache.toml resolve \
//!     --formatter-dir schemas/iso19139/formatter/xsl-view \
//!     --schema-dir schemas/iso19139/formatter \
//!     --root-formatter-dir formatters \
//!     view.html
//!
//! # Show the capacity derived from a size cap
//! tiercache check-config --max-size-kb 2048
//! ```
//!
//! Log output goes to stderr so resolved content on stdout can be piped.

mod check_config;
mod resolve;

pub use check_config::CheckConfigCommand;
pub use resolve::{OutputFormat, ResolveCommand};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::constants::CONFIG_PATH_ENV;

/// Top-level command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "tiercache",
    about = "Resolve formatter templates across layered directories with an in-memory cache",
    version
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the settings file.
    ///
    /// A missing file means defaults are used.
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve template paths and print their content.
    Resolve(ResolveCommand),

    /// Validate the cache configuration.
    CheckConfig(CheckConfigCommand),
}

impl Cli {
    /// The log filter implied by `--verbose` / `--quiet`; `None` disables logging.
    #[must_use]
    pub fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            None
        } else {
            Some("info")
        }
    }

    /// Loads settings and runs the selected command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load_with_optional(self.config.as_deref())?;

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&settings),
            Commands::CheckConfig(cmd) => cmd.execute(&settings),
        }
    }
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_logging(level: Option<&str>) {
    let Some(level) = level else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
