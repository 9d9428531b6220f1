//! Property-based tests for path handling.
//!
//! The normalize module has example-based tests for cleaning; this module
//! checks the invariants the rest of the compiler leans on: cleaning is
//! idempotent, template resolution always produces absolute cleaned
//! paths, and relationship checking behaves like a partial order.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use super::normalize::clean;
use super::relationship::PathRelationship;
use super::template::PathTemplate;

fn path_component_strategy() -> impl Strategy<Value = String> {
    // No '.' in the class: components are never "." or ".."
    "[a-z0-9_-]{1,12}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

fn template_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(".".to_string()),
            path_component_strategy(),
        ],
        1..6,
    )
    .prop_map(|parts| parts.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Cleaning is idempotent: clean(clean(p)) == clean(p)
    #[test]
    fn clean_idempotent(path in absolute_path_strategy()) {
        if let Ok(once) = clean(&path) {
            let twice = clean(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    // Cleaned paths contain no . or .. components
    #[test]
    fn clean_removes_dot_components(path in absolute_path_strategy()) {
        if let Ok(cleaned) = clean(&path) {
            for component in cleaned.components() {
                prop_assert_ne!(component, std::path::Component::CurDir);
                prop_assert_ne!(component, std::path::Component::ParentDir);
            }
        }
    }

    // Template resolution always produces an absolute path
    #[test]
    fn resolve_always_absolute(template in template_strategy()) {
        let home = Path::new("/Users/alice");
        if let Ok(resolved) = PathTemplate::from(template.as_str()).resolve(home) {
            prop_assert!(resolved.as_path().is_absolute());
        }
    }

    // Relative templates always land under the home directory
    #[test]
    fn relative_templates_stay_under_home(template in template_strategy()) {
        let home = Path::new("/Users/alice");
        if let Ok(resolved) = PathTemplate::from(template.as_str()).resolve(home) {
            prop_assert!(resolved.as_path().starts_with(home));
        }
    }

    // Relationship checking is reflexive
    #[test]
    fn relationship_reflexive(path in absolute_path_strategy()) {
        prop_assert_eq!(
            PathRelationship::between(&path, &path),
            PathRelationship::Same
        );
    }

    // Ancestor/descendant are mirror images
    #[test]
    fn relationship_symmetric(p1 in absolute_path_strategy(), p2 in absolute_path_strategy()) {
        let forward = PathRelationship::between(&p1, &p2);
        let backward = PathRelationship::between(&p2, &p1);
        let consistent = matches!(
            (forward, backward),
            (PathRelationship::Ancestor, PathRelationship::Descendant)
                | (PathRelationship::Descendant, PathRelationship::Ancestor)
                | (PathRelationship::Same, PathRelationship::Same)
                | (PathRelationship::Unrelated, PathRelationship::Unrelated)
        );
        prop_assert!(consistent, "inconsistent: {:?} vs {:?}", forward, backward);
    }

    // A joined child is always strictly contained by its base
    #[test]
    fn join_produces_strict_descendant(
        base in absolute_path_strategy(),
        child in path_component_strategy(),
    ) {
        let joined = base.join(child);
        prop_assert!(PathRelationship::strictly_contains(&base, &joined));
    }
}
