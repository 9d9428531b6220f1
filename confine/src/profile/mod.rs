//! Sandbox profile rendering.
//!
//! Serializes a reconciled policy into the profile grammar consumed by
//! the OS sandbox runtime. Paths are interpolated in their cleaned
//! absolute form with quoting only; quote and backslash characters are
//! assumed not to occur in paths and are not escaped.

use std::fmt;

use crate::path::ResolvedPath;
use crate::policy::ReconciledPolicy;

/// Device nodes every confined process keeps write access to. A process
/// needs its standard streams and terminal regardless of the filesystem
/// policy, so these are unconditional.
const DEVICE_LITERALS: [&str; 4] = ["/dev/null", "/dev/ptmx", "/dev/stderr", "/dev/stdout"];

/// Pattern matching the pseudo-terminal device nodes.
const TTY_PATTERN: &str = "^/dev/ttys[0-9]*$";

/// A complete sandbox profile: the reconciled policy plus the traversal
/// literals synthesized for it.
///
/// Rendering is deterministic: the same profile always produces
/// byte-identical text.
///
/// # Examples
///
/// ```
/// use confine::policy::{traversal_literals, Policy, ReconciledPolicy};
/// use confine::profile::Profile;
/// use std::path::Path;
///
/// let sets = Policy::builder()
///     .deny("~")
///     .allow_read("bin")
///     .build()
///     .resolve(Path::new("/Users/alice"))
///     .unwrap();
///
/// let traversal = traversal_literals(&sets.deny, &sets.merged_allow());
/// let profile = Profile::new(ReconciledPolicy::reconcile(sets), traversal);
///
/// let text = profile.render();
/// assert!(text.starts_with("(version 1)\n(allow default)\n"));
/// assert!(text.contains("(literal \"/dev/null\")"));
/// ```
#[derive(Debug, Clone)]
pub struct Profile {
    policy: ReconciledPolicy,
    traversal: Vec<ResolvedPath>,
}

impl Profile {
    /// Assemble a profile from a reconciled policy and its traversal
    /// literals.
    #[must_use]
    pub fn new(policy: ReconciledPolicy, traversal: Vec<ResolvedPath>) -> Self {
        Self { policy, traversal }
    }

    /// The reconciled policy behind this profile.
    #[must_use]
    pub fn policy(&self) -> &ReconciledPolicy {
        &self.policy
    }

    /// The synthesized traversal literals.
    #[must_use]
    pub fn traversal(&self) -> &[ResolvedPath] {
        &self.traversal
    }

    /// Render the profile text.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(version 1)")?;
        writeln!(f, "(allow default)")?;

        writeln!(f, "(deny file-read*")?;
        for path in self.policy.deny() {
            writeln!(f, "  (subpath \"{path}\")")?;
        }
        writeln!(f, ")")?;

        writeln!(f, "(allow file-read*")?;
        for path in self.policy.read_allow() {
            writeln!(f, "  (subpath \"{path}\")")?;
        }
        for path in &self.traversal {
            writeln!(f, "  (literal \"{path}\")")?;
        }
        writeln!(f, ")")?;

        writeln!(f, "(deny file-write*)")?;
        writeln!(f, "(allow file-write*")?;
        for path in self.policy.write_allow() {
            writeln!(f, "  (subpath \"{path}\")")?;
        }
        for device in DEVICE_LITERALS {
            writeln!(f, "  (literal \"{device}\")")?;
        }
        writeln!(f, "  (regex #\"{TTY_PATTERN}\")")?;
        writeln!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{traversal_literals, PolicySets};
    use std::path::PathBuf;

    fn resolved(s: &str) -> ResolvedPath {
        ResolvedPath::new(PathBuf::from(s)).unwrap()
    }

    fn scenario_profile() -> Profile {
        // home = /Users/alice, deny = {home}, read = {home/bin},
        // write = {/tmp/build}
        let sets = PolicySets {
            deny: vec![resolved("/Users/alice")],
            read: vec![resolved("/Users/alice/bin")],
            write: vec![resolved("/tmp/build")],
        };
        let traversal = traversal_literals(&sets.deny, &sets.merged_allow());
        Profile::new(ReconciledPolicy::reconcile(sets), traversal)
    }

    #[test]
    fn test_render_scenario_exact() {
        let expected = "\
(version 1)
(allow default)
(deny file-read*
  (subpath \"/Users/alice\")
)
(allow file-read*
  (subpath \"/Users/alice/bin\")
  (subpath \"/tmp/build\")
  (literal \"/Users/alice\")
)
(deny file-write*)
(allow file-write*
  (subpath \"/tmp/build\")
  (literal \"/dev/null\")
  (literal \"/dev/ptmx\")
  (literal \"/dev/stderr\")
  (literal \"/dev/stdout\")
  (regex #\"^/dev/ttys[0-9]*$\")
)
";
        assert_eq!(scenario_profile().render(), expected);
    }

    #[test]
    fn test_scenario_traversal_is_deny_root_only() {
        let profile = scenario_profile();
        // bin nests directly under the deny root: the root is listable,
        // nothing deeper is granted
        assert_eq!(profile.traversal(), &[resolved("/Users/alice")]);
    }

    #[test]
    fn test_fixed_literals_always_present() {
        // Even a completely empty policy keeps the device grants
        let empty = Profile::new(
            ReconciledPolicy::reconcile(PolicySets {
                deny: vec![],
                read: vec![],
                write: vec![],
            }),
            vec![],
        );
        let text = empty.render();
        for device in DEVICE_LITERALS {
            assert!(text.contains(&format!("(literal \"{device}\")")));
        }
        assert!(text.contains("(regex #\"^/dev/ttys[0-9]*$\")"));
    }

    #[test]
    fn test_render_deterministic() {
        assert_eq!(scenario_profile().render(), scenario_profile().render());
    }

    #[test]
    fn test_no_duplicate_grant_lines() {
        let sets = PolicySets {
            deny: vec![resolved("/Users/alice"), resolved("/Users/alice")],
            read: vec![
                resolved("/Users/alice/bin"),
                resolved("/Users/alice/bin/"),
                resolved("/Users/alice/./bin"),
            ],
            write: vec![resolved("/tmp/build"), resolved("/tmp/build")],
        };
        let traversal = traversal_literals(&sets.deny, &sets.merged_allow());
        let text = Profile::new(ReconciledPolicy::reconcile(sets), traversal).render();

        // The same subpath may appear in both the read and write blocks;
        // within one block every grant line is unique
        let mut block: Vec<&str> = Vec::new();
        for line in text.lines() {
            if line.starts_with("  (") {
                assert!(
                    !block.contains(&line),
                    "duplicate grant line {line:?} in:\n{text}"
                );
                block.push(line);
            } else {
                block.clear();
            }
        }
    }

    #[test]
    fn test_messy_input_renders_cleaned_form() {
        // Trailing slashes and ./ segments render identically to the
        // cleaned form
        let messy = PolicySets {
            deny: vec![resolved("/Users/alice/")],
            read: vec![],
            write: vec![resolved("/tmp/./build/")],
        };
        let clean = PolicySets {
            deny: vec![resolved("/Users/alice")],
            read: vec![],
            write: vec![resolved("/tmp/build")],
        };
        let render = |sets: PolicySets| {
            let traversal = traversal_literals(&sets.deny, &sets.merged_allow());
            Profile::new(ReconciledPolicy::reconcile(sets), traversal).render()
        };
        assert_eq!(render(messy), render(clean));
    }

    #[test]
    fn test_subsumed_write_appears_in_read_block() {
        let text = scenario_profile().render();
        let read_block = text
            .split("(allow file-read*")
            .nth(1)
            .and_then(|s| s.split("\n)").next())
            .unwrap();
        assert!(read_block.contains("(subpath \"/tmp/build\")"));
    }
}
