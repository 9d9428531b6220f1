//! Property-based tests for policy reconciliation and traversal.

use std::path::PathBuf;

use proptest::prelude::*;

use crate::path::ResolvedPath;
use crate::policy::{traversal_literals, PolicySets, ReconciledPolicy};

fn component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,8}"
}

fn resolved_path_strategy() -> impl Strategy<Value = ResolvedPath> {
    prop::collection::vec(component_strategy(), 1..6).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        ResolvedPath::new(path).unwrap()
    })
}

fn path_set_strategy(max: usize) -> impl Strategy<Value = Vec<ResolvedPath>> {
    prop::collection::vec(resolved_path_strategy(), 0..max)
}

fn is_sorted_dedup(paths: &[ResolvedPath]) -> bool {
    paths.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Subsumption: every write-allowed path is read-allowed
    #[test]
    fn write_always_subset_of_read(
        deny in path_set_strategy(4),
        read in path_set_strategy(8),
        write in path_set_strategy(8),
    ) {
        let reconciled = ReconciledPolicy::reconcile(PolicySets { deny, read, write });
        for path in reconciled.write_allow() {
            prop_assert!(reconciled.read_allow().contains(path));
        }
    }

    // All reconciled sets are strictly sorted (sorted and duplicate-free)
    #[test]
    fn reconciled_sets_sorted_and_unique(
        deny in path_set_strategy(4),
        read in path_set_strategy(8),
        write in path_set_strategy(8),
    ) {
        let reconciled = ReconciledPolicy::reconcile(PolicySets { deny, read, write });
        prop_assert!(is_sorted_dedup(reconciled.deny()));
        prop_assert!(is_sorted_dedup(reconciled.read_allow()));
        prop_assert!(is_sorted_dedup(reconciled.write_allow()));
    }

    // Every traversal literal is a deny root or a strict descendant of one
    #[test]
    fn literals_live_under_deny_roots(
        deny in path_set_strategy(3),
        allowed in path_set_strategy(8),
    ) {
        let literals = traversal_literals(&deny, &allowed);
        for literal in &literals {
            prop_assert!(
                deny.iter().any(|d| d == literal || d.strictly_contains(literal)),
                "literal {} outside every deny root", literal
            );
        }
    }

    // Completeness: for each allowed path nested under a deny root, every
    // ancestor strictly between them (and the root itself) is granted
    #[test]
    fn literals_cover_every_intermediate(
        deny in path_set_strategy(3),
        allowed in path_set_strategy(8),
    ) {
        let literals = traversal_literals(&deny, &allowed);
        for root in &deny {
            for path in &allowed {
                if !root.strictly_contains(path) {
                    continue;
                }
                prop_assert!(literals.contains(root));
                let mut ancestor = path.parent();
                while let Some(dir) = ancestor {
                    if !root.strictly_contains(&dir) {
                        break;
                    }
                    prop_assert!(literals.contains(&dir), "missing intermediate {}", dir);
                    ancestor = dir.parent();
                }
            }
        }
    }

    // Traversal output is deterministic: sorted and duplicate-free
    #[test]
    fn literals_sorted_and_unique(
        deny in path_set_strategy(3),
        allowed in path_set_strategy(8),
    ) {
        let literals = traversal_literals(&deny, &allowed);
        prop_assert!(is_sorted_dedup(&literals));
    }
}
