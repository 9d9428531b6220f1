//! Path templates and their resolution against a home directory.
//!
//! Templates are the configuration form of the policy: short strings that
//! may reference the invoking user's home directory. Resolution turns a
//! template into a [`ResolvedPath`], the absolute, lexically cleaned form
//! every later stage of the compiler works with.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::clean;
use crate::path::relationship::PathRelationship;

/// A path template that may reference the home directory.
///
/// Three template forms are recognized:
///
/// - `~` or `~/rest`: the home placeholder, expanded to the home directory
/// - a relative name (`bin`, `.cache/uv`): joined beneath the home directory
/// - an absolute path (`/tmp/build`): stands for itself
///
/// `~user` syntax is not supported and is rejected at resolution time.
///
/// # Examples
///
/// ```
/// use confine::path::PathTemplate;
/// use std::path::Path;
///
/// let home = Path::new("/Users/alice");
///
/// let tilde = PathTemplate::from("~/bin");
/// assert_eq!(tilde.resolve(home).unwrap().as_path(), Path::new("/Users/alice/bin"));
///
/// let relative = PathTemplate::from(".cache/uv");
/// assert_eq!(relative.resolve(home).unwrap().as_path(), Path::new("/Users/alice/.cache/uv"));
///
/// let absolute = PathTemplate::from("/tmp/build");
/// assert_eq!(absolute.resolve(home).unwrap().as_path(), Path::new("/tmp/build"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate(String);

impl PathTemplate {
    /// Create a template from a string.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw template string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve this template against `home`.
    ///
    /// Pure and deterministic: the same template and home directory always
    /// produce the same [`ResolvedPath`]. The result is absolute and
    /// lexically cleaned.
    ///
    /// # Errors
    ///
    /// Returns an error if the template uses `~user` syntax, if the
    /// resolved path is not absolute (a relative `home`), or if `..`
    /// components escape the root.
    pub fn resolve(&self, home: &Path) -> Result<ResolvedPath> {
        let expanded = if let Some(rest) = self.0.strip_prefix('~') {
            if rest.is_empty() {
                home.to_path_buf()
            } else if let Some(rest) = rest.strip_prefix('/') {
                home.join(rest)
            } else {
                // ~user syntax not supported
                return Err(Error::InvalidPath {
                    path: PathBuf::from(&self.0),
                    reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
                });
            }
        } else if Path::new(&self.0).is_absolute() {
            PathBuf::from(&self.0)
        } else {
            home.join(&self.0)
        };

        ResolvedPath::new(expanded)
    }
}

impl From<&str> for PathTemplate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PathTemplate {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An absolute, lexically cleaned filesystem path.
///
/// Two resolved paths are equal iff their cleaned forms are equal. The
/// ordering is lexical on the cleaned string form, which gives the
/// deterministic, reviewable output ordering the renderer relies on.
///
/// # Examples
///
/// ```
/// use confine::path::ResolvedPath;
/// use std::path::{Path, PathBuf};
///
/// let a = ResolvedPath::new(PathBuf::from("/tmp/build/")).unwrap();
/// let b = ResolvedPath::new(PathBuf::from("/tmp/./build")).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_path(), Path::new("/tmp/build"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    /// Create a resolved path from an absolute path, cleaning it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute or if `..` components
    /// escape the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use confine::path::ResolvedPath;
    /// use std::path::PathBuf;
    ///
    /// assert!(ResolvedPath::new(PathBuf::from("/tmp/build")).is_ok());
    /// assert!(ResolvedPath::new(PathBuf::from("relative/path")).is_err());
    /// ```
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.is_absolute() {
            return Err(Error::InvalidPath {
                path,
                reason: "path must be absolute".to_string(),
            });
        }
        Ok(Self(clean(&path)?))
    }

    /// Get a reference to the cleaned path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The parent directory, or `None` for the root.
    ///
    /// The parent of a cleaned absolute path is itself cleaned and
    /// absolute, so no re-validation is needed.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| Self(p.to_path_buf()))
    }

    /// Check whether `other` is a strict descendant of this path.
    ///
    /// A path is never a strict descendant of itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use confine::path::ResolvedPath;
    /// use std::path::PathBuf;
    ///
    /// let home = ResolvedPath::new(PathBuf::from("/Users/alice")).unwrap();
    /// let bin = ResolvedPath::new(PathBuf::from("/Users/alice/bin")).unwrap();
    /// assert!(home.strictly_contains(&bin));
    /// assert!(!home.strictly_contains(&home));
    /// assert!(!bin.strictly_contains(&home));
    /// ```
    #[must_use]
    pub fn strictly_contains(&self, other: &Self) -> bool {
        PathRelationship::between(&self.0, &other.0) == PathRelationship::Ancestor
    }

    /// Convert into the underlying `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// Ordering is byte-lexical on the cleaned string form, not component-wise:
// the rendered profile is sorted the way a reviewer reading plain text
// would expect.
impl Ord for ResolvedPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.as_os_str().cmp(other.0.as_os_str())
    }
}

impl PartialOrd for ResolvedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
