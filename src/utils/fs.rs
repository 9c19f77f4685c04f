//! File system path helpers.
//!
//! Cache keys are canonical paths, and the resolver needs a canonical form even
//! for template files that do not exist (a cache probe for a missing file must
//! simply miss). [`canonical_path`] therefore resolves symlinks for the longest
//! existing ancestor and appends the remaining components unchanged.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components lexically.
///
/// `..` never climbs above the root or a leading `..` of a relative path.
///
/// # Examples
///
/// ```
/// use tiercache::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/foo/./bar/../baz")), PathBuf::from("/foo/baz"));
/// assert_eq!(normalize_path(Path::new("../src/./lib.rs")), PathBuf::from("../src/lib.rs"));
/// assert_eq!(normalize_path(Path::new("/../etc")), PathBuf::from("/etc"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Computes the canonical, absolute form of `path`, whether or not it exists.
///
/// The path is made absolute against the current directory and normalized,
/// then the longest existing ancestor is canonicalized (resolving symlinks)
/// and the missing tail is appended.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined or an
/// existing ancestor cannot be canonicalized for a reason other than absence.
pub fn canonical_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = normalize_path(&std::path::absolute(path)?);

    let mut existing = absolute.as_path();
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                for name in missing.iter().rev() {
                    resolved.push(name);
                }
                return Ok(resolved);
            }
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        existing = parent;
                    }
                    _ => return Ok(absolute),
                }
            }
            Err(err) => return Err(err),
        }
    }
}

/// Joins a template path onto a tier directory.
///
/// Leading separators are stripped so the result always lies under `dir`,
/// matching how a `dir` + relative-name pair is interpreted.
pub fn join_template(dir: &Path, template: &str) -> PathBuf {
    dir.join(template.trim_start_matches(['/', '\\']))
}
