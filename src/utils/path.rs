//! Path normalization.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first. Falls back to the path itself when
/// absolute, or joined onto the current directory when relative.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a path that may be relative to cwd or a fallback directory.
///
/// Absolute paths are kept. A relative path that exists from cwd wins;
/// otherwise it is taken relative to `fallback_dir`.
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if path.exists() {
        return normalize_path(path);
    }
    normalize_path(&fallback_dir.join(path))
}

/// Resolve a configured path against the project root.
///
/// Expands a leading `~`; absolute paths are kept, relative ones are joined
/// onto `root`. The result is not required to exist.
pub fn resolve_under(root: &Path, path: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    };
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}
