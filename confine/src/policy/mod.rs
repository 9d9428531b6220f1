//! Declarative path access policy.
//!
//! A [`Policy`] is three sets of path templates: paths denied for reading,
//! paths allowed for reading, and paths allowed for writing. Templates are
//! configuration; the sets carry no required ordering and duplicates are
//! permitted until resolution.
//!
//! The compile pipeline runs strictly left to right: templates are
//! resolved into absolute cleaned paths ([`Policy::resolve`]), traversal
//! literals are synthesized from deny/allow overlaps
//! ([`traversal_literals`]), and the sets are reconciled into their final
//! deduplicated, sorted form ([`ReconciledPolicy`]).
//!
//! # Examples
//!
//! ```
//! use confine::policy::Policy;
//! use std::path::Path;
//!
//! let policy = Policy::builder()
//!     .deny("~")
//!     .allow_read("bin")
//!     .allow_write("/tmp/build")
//!     .build();
//!
//! let sets = policy.resolve(Path::new("/Users/alice")).unwrap();
//! assert_eq!(sets.deny.len(), 1);
//! ```

mod reconcile;
mod traversal;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use reconcile::ReconciledPolicy;
pub use traversal::traversal_literals;

use std::path::Path;

use crate::error::Result;
use crate::path::{PathTemplate, ResolvedPath};

/// Home-relative paths a confined build tool may write: agent state and
/// package-manager cache directories.
const BASE_ALLOW_WRITE: [&str; 6] = [
    ".amp",
    ".bun",
    ".cache/amp",
    ".cache/uv",
    ".local/share/amp",
    ".local/share/uv",
];

/// Home-relative paths a confined build tool may read.
const BASE_ALLOW_READ: [&str; 3] = ["bin", ".local/bin", ".gitconfig"];

/// A declarative path access policy: deny, allow-read, and allow-write
/// template sets.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    deny: Vec<PathTemplate>,
    allow_read: Vec<PathTemplate>,
    allow_write: Vec<PathTemplate>,
}

impl Policy {
    /// Start building a policy.
    #[must_use]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::new()
    }

    /// The built-in base policy.
    ///
    /// Denies the entire home directory, then allows reading the user's
    /// `bin` directories and git configuration and writing the agent and
    /// package-manager cache directories. Project-specific and toolchain
    /// paths are merged in by the compile pipeline.
    ///
    /// # Examples
    ///
    /// ```
    /// use confine::policy::Policy;
    ///
    /// let policy = Policy::base();
    /// assert_eq!(policy.deny().len(), 1);
    /// assert!(!policy.allow_write().is_empty());
    /// ```
    #[must_use]
    pub fn base() -> Self {
        let mut builder = Self::builder().deny("~");
        for template in BASE_ALLOW_READ {
            builder = builder.allow_read(template);
        }
        for template in BASE_ALLOW_WRITE {
            builder = builder.allow_write(template);
        }
        builder.build()
    }

    /// The deny template set.
    #[must_use]
    pub fn deny(&self) -> &[PathTemplate] {
        &self.deny
    }

    /// The allow-read template set.
    #[must_use]
    pub fn allow_read(&self) -> &[PathTemplate] {
        &self.allow_read
    }

    /// The allow-write template set.
    #[must_use]
    pub fn allow_write(&self) -> &[PathTemplate] {
        &self.allow_write
    }

    /// Resolve all three template sets against `home`.
    ///
    /// Duplicates survive resolution; they are eliminated later by
    /// reconciliation.
    ///
    /// # Errors
    ///
    /// Returns the first template resolution error encountered.
    pub fn resolve(&self, home: &Path) -> Result<PolicySets> {
        Ok(PolicySets {
            deny: resolve_all(&self.deny, home)?,
            read: resolve_all(&self.allow_read, home)?,
            write: resolve_all(&self.allow_write, home)?,
        })
    }
}

fn resolve_all(templates: &[PathTemplate], home: &Path) -> Result<Vec<ResolvedPath>> {
    templates.iter().map(|t| t.resolve(home)).collect()
}

/// Builder for [`Policy`].
///
/// # Examples
///
/// ```
/// use confine::policy::Policy;
///
/// let policy = Policy::builder()
///     .deny("~")
///     .allow_read("~/bin")
///     .allow_write("/tmp/scratch")
///     .build();
/// assert_eq!(policy.allow_read().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    deny: Vec<PathTemplate>,
    allow_read: Vec<PathTemplate>,
    allow_write: Vec<PathTemplate>,
}

impl PolicyBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deny reads under a subtree.
    #[must_use]
    pub fn deny(mut self, template: impl Into<PathTemplate>) -> Self {
        self.deny.push(template.into());
        self
    }

    /// Allow reads under a subtree.
    #[must_use]
    pub fn allow_read(mut self, template: impl Into<PathTemplate>) -> Self {
        self.allow_read.push(template.into());
        self
    }

    /// Allow writes under a subtree.
    #[must_use]
    pub fn allow_write(mut self, template: impl Into<PathTemplate>) -> Self {
        self.allow_write.push(template.into());
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Policy {
        Policy {
            deny: self.deny,
            allow_read: self.allow_read,
            allow_write: self.allow_write,
        }
    }
}

/// The resolved (but not yet reconciled) form of a policy.
///
/// This is the working form between pipeline stages: absolute cleaned
/// paths, possibly with duplicates, in no particular order. The compile
/// pipeline appends project, toolchain, and temp-directory paths here
/// before reconciliation.
#[derive(Debug, Clone)]
pub struct PolicySets {
    /// Subtrees denied for reading.
    pub deny: Vec<ResolvedPath>,
    /// Subtrees allowed for reading.
    pub read: Vec<ResolvedPath>,
    /// Subtrees allowed for writing.
    pub write: Vec<ResolvedPath>,
}

impl PolicySets {
    /// The merged allow sets (read and write), used by the traversal
    /// resolver.
    #[must_use]
    pub fn merged_allow(&self) -> Vec<ResolvedPath> {
        let mut merged = self.read.clone();
        merged.extend(self.write.iter().cloned());
        merged
    }
}
