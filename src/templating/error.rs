//! Error types for template resolution.
//!
//! Resolution can fail in three ways: no tier holds the requested file, a
//! selected file or dependency artifact cannot be read, or the parent-schema
//! chain cannot be followed. None of these are retried; each is returned to
//! the caller of [`TemplateCache::create_file_result`](super::TemplateCache::create_file_result).

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The locations searched for a template, in search order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriedLocations {
    /// The formatter directory (tier 1)
    pub formatter_dir: PathBuf,
    /// The schema directory (tier 2), if one was given
    pub schema_dir: Option<PathBuf>,
    /// The parent-schema candidate (tier 3), if the dependency chain produced one
    pub parent_schema: Option<PathBuf>,
    /// The root formatter directory (tier 4)
    pub root_formatter_dir: PathBuf,
}

impl fmt::Display for TriedLocations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_none(path: Option<&PathBuf>) -> String {
            path.map_or_else(|| "<none>".to_string(), |p| p.display().to_string())
        }

        writeln!(f, "\t * {}", self.formatter_dir.display())?;
        writeln!(f, "\t * {}", or_none(self.schema_dir.as_ref()))?;
        writeln!(f, "\t * if parent exists: {}", or_none(self.parent_schema.as_ref()))?;
        write!(f, "\t * {}", self.root_formatter_dir.display())
    }
}

/// Errors raised while resolving a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// No tier contains the requested file.
    #[error("There is no file: {path} in any of: \n{tried}")]
    NotFound {
        /// The requested relative path
        path: String,
        /// Every location that was searched
        tried: Box<TriedLocations>,
    },

    /// The selected template file could not be read.
    #[error("Failed to read template {}", path.display())]
    Read {
        /// The file being read
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A canonical path could not be computed.
    #[error("Failed to canonicalize path {}", path.display())]
    Canonicalize {
        /// The path being canonicalized
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A canonical path is not valid UTF-8 and cannot serve as a cache key.
    #[error("Path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The canonical path
        path: PathBuf,
    },

    /// A dependency-declaring config file exists but could not be read.
    #[error("Failed to read formatter config {}", path.display())]
    ConfigRead {
        /// The config file
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A dependency-declaring config file is malformed.
    #[error("Failed to parse formatter config {}", path.display())]
    ConfigParse {
        /// The config file
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A config file depends on a schema the lookup does not know.
    #[error("No schema named '{name}' is registered")]
    UnknownSchema {
        /// The schema name from the `depends_on` declaration
        name: String,
    },

    /// The parent-schema chain returns to a schema already visited.
    #[error("Cyclic schema dependency: {}", chain.join(" -> "))]
    CyclicSchemaDependency {
        /// Schema names in visit order, ending with the repeated one
        chain: Vec<String>,
    },
}

impl TemplateError {
    /// Whether this error means the template simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TemplateError::NotFound { .. })
    }
}
