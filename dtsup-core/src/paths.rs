//! Path helpers.
//!
//! Output paths usually do not exist yet when they are computed, so
//! normalization here is purely lexical and never touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute, then normalize.
pub fn to_absolute_path(path: impl AsRef<Path>, base: &Path) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Lexically remove `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Render `path` relative to `base` for display, falling back to the full path.
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
