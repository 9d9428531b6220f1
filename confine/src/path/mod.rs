//! Path templates and lexical path handling.
//!
//! This module provides the path layer of the profile compiler: templates
//! that may reference the home directory, lexical cleaning, and the
//! relationship checks the traversal resolver is built on.
//!
//! # Key Concepts
//!
//! ## Templates
//!
//! A [`PathTemplate`] is configuration, not runtime state. It may start
//! with the home placeholder (`~` or `~/...`), denote a home-relative name
//! (`bin`, `.cache/uv`), or stand for an absolute path. Resolution against
//! a home directory is a pure function.
//!
//! ## Cleaning
//!
//! Resolution is strictly lexical: `.` components are dropped, `..`
//! components are resolved, duplicate separators disappear. Symlinks are
//! never followed and the filesystem is never consulted, so profiles can
//! be compiled for paths that do not exist yet.
//!
//! # Examples
//!
//! ```
//! use confine::path::PathTemplate;
//! use std::path::Path;
//!
//! let template = PathTemplate::from("~/.cache/uv");
//! let resolved = template.resolve(Path::new("/Users/alice")).unwrap();
//! assert_eq!(resolved.as_path(), Path::new("/Users/alice/.cache/uv"));
//! ```

pub mod normalize;
pub mod relationship;
pub mod template;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use relationship::PathRelationship;
pub use template::{PathTemplate, ResolvedPath};
