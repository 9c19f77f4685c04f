//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Path normalization and canonical path computation

pub mod fs;

pub use fs::{canonical_path, join_template, normalize_path};
