//! Traversal literal synthesis.
//!
//! Deny and allow rules are evaluated by subpath matching, so an allowed
//! subtree nested below a denied root is reachable at its leaf while the
//! intermediate directories on the way down are not: path resolution and
//! directory listing through them would trip the deny rule. Each such
//! intermediate must be granted as an exact-match read, never as a
//! subtree grant, which would expose everything beneath the ancestor
//! instead of just the route to the allowed leaf.

use std::collections::BTreeSet;

use crate::path::ResolvedPath;

/// Compute the exact-match read grants needed to traverse from each deny
/// root down into its allowed descendants.
///
/// For every pair of a deny root `D` and an allowed path `A` that is a
/// strict descendant of `D`, every ancestor of `A` that is itself a
/// strict descendant of `D` is collected, walking upward from `A`'s
/// parent and stopping only at `D` (never at the filesystem root, since
/// allowed paths can be arbitrarily nested). If at least one allowed path
/// nests under `D`, the deny root itself is also emitted: it must be
/// listable to reach its children even though it is not a readable
/// subtree.
///
/// A path equal to a deny root contributes nothing. The result is sorted
/// and deduplicated.
///
/// # Examples
///
/// ```
/// use confine::policy::traversal_literals;
/// use confine::path::ResolvedPath;
/// use std::path::{Path, PathBuf};
///
/// let deny = vec![ResolvedPath::new(PathBuf::from("/Users/alice")).unwrap()];
/// let allowed = vec![ResolvedPath::new(PathBuf::from("/Users/alice/go/pkg/mod")).unwrap()];
///
/// let literals = traversal_literals(&deny, &allowed);
/// let paths: Vec<_> = literals.iter().map(ResolvedPath::as_path).collect();
/// assert_eq!(paths, vec![
///     Path::new("/Users/alice"),
///     Path::new("/Users/alice/go"),
///     Path::new("/Users/alice/go/pkg"),
/// ]);
/// ```
#[must_use]
pub fn traversal_literals(deny: &[ResolvedPath], allowed: &[ResolvedPath]) -> Vec<ResolvedPath> {
    let mut literals = BTreeSet::new();

    for root in deny {
        let mut nested = false;

        for path in allowed {
            if !root.strictly_contains(path) {
                continue;
            }
            nested = true;

            // Ancestors of `path` strictly between `root` and `path`
            let mut ancestor = path.parent();
            while let Some(dir) = ancestor {
                if !root.strictly_contains(&dir) {
                    break;
                }
                ancestor = dir.parent();
                literals.insert(dir);
            }
        }

        if nested {
            literals.insert(root.clone());
        }
    }

    literals.into_iter().collect()
}
