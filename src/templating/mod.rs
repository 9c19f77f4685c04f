//! Template resolution for formatter plugins.
//!
//! Formatter templates can live in several layered directories: the
//! formatter's own directory, the schema's formatter directory, the
//! formatter directories of the schemas it depends on, and a global root
//! formatter directory. This module picks the file that backs a template
//! path and serves its content from an in-memory cache whenever it can.
//!
//! # Overview
//!
//! - [`TemplateCache`] - the tiered resolver; owns the content cache
//! - [`FileResult`] - the winning file, its text and the caller's substitutions
//! - [`TemplateError`] - not-found, I/O and schema chain failures
//!
//! # Development Mode
//!
//! When [`SystemInfo::is_dev_mode`](crate::schema::SystemInfo::is_dev_mode)
//! reports `true`, cache probes are skipped and every resolution reads from
//! disk. The freshly read content still replaces the cached entry, so leaving
//! development mode serves the latest content.

mod error;
mod file_result;
mod resolver;

pub use error::{TemplateError, TriedLocations};
pub use file_result::{FileResult, Substitutions};
pub use resolver::TemplateCache;
