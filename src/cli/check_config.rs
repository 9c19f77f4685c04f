//! Validate cache settings without resolving anything.

use anyhow::Result;
use clap::Args;

use crate::cache::WeightedCache;
use crate::config::Settings;

/// Validate the cache configuration and print the derived capacity.
#[derive(Args, Debug)]
pub struct CheckConfigCommand {
    /// Override `cache.max_size_kb` from the settings file.
    #[arg(long, allow_negative_numbers = true)]
    max_size_kb: Option<i64>,

    /// Override `cache.concurrency_level` from the settings file.
    #[arg(long, allow_negative_numbers = true)]
    concurrency_level: Option<i64>,
}

impl CheckConfigCommand {
    /// Builds the cache once and reports its shape.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let mut config = settings.cache;
        if let Some(max_size_kb) = self.max_size_kb {
            config.max_size_kb = max_size_kb;
        }
        if let Some(concurrency_level) = self.concurrency_level {
            config.concurrency_level = concurrency_level;
        }

        let cache = WeightedCache::new(&config)?;
        tracing::debug!("Cache configuration is valid");

        println!("max_size_kb = {}", config.max_size_kb);
        println!("concurrency_level = {}", config.concurrency_level);
        println!("capacity = {}", cache.capacity());
        println!("segments = {}", cache.segment_count());
        Ok(())
    }
}
