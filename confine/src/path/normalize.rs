//! Lexical path cleaning.
//!
//! Cleaning processes path components without touching the filesystem:
//! current-directory (`.`) references are removed, parent-directory (`..`)
//! references are resolved against the preceding component, and duplicate
//! separators disappear as a side effect of component iteration.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Clean an absolute path by resolving `.` and `..` components.
///
/// The result has no `.` or `..` segments and no trailing separator
/// (except for the root itself). Trailing and duplicate separators in the
/// input are dropped by component iteration.
///
/// # Errors
///
/// Returns an error if the path contains too many `..` components that
/// would escape the root directory.
///
/// # Examples
///
/// ```
/// use confine::path::normalize::clean;
/// use std::path::{Path, PathBuf};
///
/// // Resolves . and ..
/// let cleaned = clean(Path::new("/a/./b/../c")).unwrap();
/// assert_eq!(cleaned, PathBuf::from("/a/c"));
///
/// // Trailing separators are dropped
/// let cleaned = clean(Path::new("/tmp/build/")).unwrap();
/// assert_eq!(cleaned, PathBuf::from("/tmp/build"));
/// ```
pub fn clean(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut has_root = false;

    for component in path.components() {
        match component {
            Component::RootDir => {
                result.push(component);
                has_root = true;
            }
            Component::Prefix(prefix) => {
                // Windows prefix
                result.push(prefix.as_os_str());
                has_root = true;
            }
            Component::Normal(c) => {
                result.push(c);
            }
            Component::CurDir => {
                // "." does not change the path
            }
            Component::ParentDir => {
                if !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
            }
        }
    }

    // Popping everything must still leave the root we started with
    if has_root && result.as_os_str().is_empty() {
        result.push(Component::RootDir);
    }

    Ok(result)
}
