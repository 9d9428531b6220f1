//! Set reconciliation.
//!
//! The enforcement model treats write permission as requiring read
//! permission to be usable, so every write-allowed path is folded into
//! the read-allow set before output. Each final set is then sorted
//! lexically on the cleaned string form and deduplicated; the ordering
//! exists for deterministic, reviewable output, not for correctness.

use crate::path::ResolvedPath;
use crate::policy::PolicySets;

/// The final, reconciled form of a policy.
///
/// Invariants: every path in the write-allow set also appears in the
/// read-allow set; all three sets are sorted and free of duplicates.
///
/// # Examples
///
/// ```
/// use confine::policy::{Policy, ReconciledPolicy};
/// use std::path::Path;
///
/// let sets = Policy::builder()
///     .deny("~")
///     .allow_read("bin")
///     .allow_write("/tmp/build")
///     .build()
///     .resolve(Path::new("/Users/alice"))
///     .unwrap();
///
/// let reconciled = ReconciledPolicy::reconcile(sets);
/// // Subsumption: the write path is readable too
/// assert!(reconciled
///     .read_allow()
///     .iter()
///     .any(|p| p.as_path() == Path::new("/tmp/build")));
/// ```
#[derive(Debug, Clone)]
pub struct ReconciledPolicy {
    deny: Vec<ResolvedPath>,
    read_allow: Vec<ResolvedPath>,
    write_allow: Vec<ResolvedPath>,
}

impl ReconciledPolicy {
    /// Apply the subsumption rule and fix ordering.
    #[must_use]
    pub fn reconcile(sets: PolicySets) -> Self {
        let PolicySets {
            deny,
            mut read,
            write,
        } = sets;

        // Subsumption: write permission implies read permission
        read.extend(write.iter().cloned());

        Self {
            deny: sort_dedup(deny),
            read_allow: sort_dedup(read),
            write_allow: sort_dedup(write),
        }
    }

    /// Subtrees denied for reading.
    #[must_use]
    pub fn deny(&self) -> &[ResolvedPath] {
        &self.deny
    }

    /// Subtrees allowed for reading (includes every write-allowed path).
    #[must_use]
    pub fn read_allow(&self) -> &[ResolvedPath] {
        &self.read_allow
    }

    /// Subtrees allowed for writing.
    #[must_use]
    pub fn write_allow(&self) -> &[ResolvedPath] {
        &self.write_allow
    }
}

fn sort_dedup(mut paths: Vec<ResolvedPath>) -> Vec<ResolvedPath> {
    paths.sort();
    paths.dedup();
    paths
}
