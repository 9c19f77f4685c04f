//! Resolve template paths from the command line.

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::schema::SystemFlags;
use crate::templating::{Substitutions, TemplateCache};

/// How resolved templates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The raw template content
    Text,
    /// File, content and substitutions as JSON
    Json,
}

/// Resolve one or more template paths through a single cache.
///
/// Paths are resolved in order, so repeating a path shows the cache at work
/// (see `--stats`).
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// The formatter directory (first tier).
    #[arg(long)]
    formatter_dir: PathBuf,

    /// The schema formatter directory (second tier).
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// The global root formatter directory (last tier).
    #[arg(long)]
    root_formatter_dir: PathBuf,

    /// Bypass the cache on reads, as in development mode.
    #[arg(long)]
    dev: bool,

    /// Substitution passed through to the result; VALUE is parsed as JSON
    /// when possible and used as a string otherwise.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_substitution)]
    vars: Vec<(String, serde_json::Value)>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print cache statistics after resolving.
    #[arg(long)]
    stats: bool,

    /// Template paths relative to the tier directories.
    #[arg(required = true)]
    paths: Vec<String>,
}

impl ResolveCommand {
    /// Resolves every path and prints the results.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        settings.validate()?;

        let templates = TemplateCache::new(
            &settings.cache,
            Arc::new(SystemFlags::new(settings.dev_mode || self.dev)),
            Arc::new(settings.schema_registry()),
        )?;

        let substitutions: Substitutions = self.vars.into_iter().collect();
        let mut results = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let result = templates
                .create_file_result(
                    &self.formatter_dir,
                    self.schema_dir.as_deref(),
                    &self.root_formatter_dir,
                    path,
                    substitutions.clone(),
                )
                .with_context(|| format!("Failed to resolve template '{path}'"))?;
            results.push(result);
        }

        let stats = templates.cache().stats();
        match self.format {
            OutputFormat::Text => {
                for result in &results {
                    let template = result.template();
                    if template.ends_with('\n') {
                        print!("{template}");
                    } else {
                        println!("{template}");
                    }
                }
                if self.stats {
                    eprintln!(
                        "cache: hits={} misses={} entries={} weight={}/{} hit_rate={:.1}%",
                        stats.hits,
                        stats.misses,
                        stats.entries,
                        stats.weight,
                        stats.capacity,
                        stats.hit_rate()
                    );
                }
            }
            OutputFormat::Json => {
                let mut output = json!({ "results": results });
                if self.stats {
                    output["stats"] = serde_json::to_value(stats)?;
                }
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        Ok(())
    }
}

fn parse_substitution(raw: &str) -> Result<(String, serde_json::Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(anyhow!("substitution key must not be empty"));
    }
    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
