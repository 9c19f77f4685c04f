//! The value produced by a successful resolution.

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Caller-supplied values handed through to whoever renders the template.
///
/// The resolver never inspects or modifies them.
pub type Substitutions = HashMap<String, serde_json::Value>;

/// A resolved template: the winning file, its full text and the caller's substitutions.
///
/// # Examples
///
/// ```
/// use tiercache::templating::{FileResult, Substitutions};
/// use std::path::Path;
///
/// let mut substitutions = Substitutions::new();
/// substitutions.insert("title".into(), serde_json::json!("Record"));
///
/// let result = FileResult::new("/srv/view.html".into(), "<h1/>".into(), substitutions);
/// assert_eq!(result.file(), Path::new("/srv/view.html"));
/// assert_eq!(result.template(), "<h1/>");
/// assert_eq!(result.substitutions()["title"], "Record");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResult {
    file: PathBuf,
    template: String,
    substitutions: Substitutions,
}

impl FileResult {
    /// Binds content read from (or cached for) `file` to the given substitutions.
    pub fn new(file: PathBuf, template: String, substitutions: Substitutions) -> Self {
        Self {
            file,
            template,
            substitutions,
        }
    }

    /// The physical file backing the template.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The full template text.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The substitutions supplied by the caller.
    pub fn substitutions(&self) -> &Substitutions {
        &self.substitutions
    }

    /// Splits the result into its parts.
    pub fn into_parts(self) -> (PathBuf, String, Substitutions) {
        (self.file, self.template, self.substitutions)
    }
}
