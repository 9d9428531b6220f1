#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # confine
//!
//! A library for compiling declarative path access policies into sandbox
//! profiles.
//!
//! The compiler takes a small policy — deny the home directory, allow a
//! project root, a handful of user-config paths, and the language
//! toolchain's cache directories — and produces the least-privilege
//! profile text an OS-level file-access enforcement facility consumes.
//! Enforcement itself is out of scope; this crate only emits the policy
//! document.
//!
//! ## Core Types
//!
//! - [`PathTemplate`] and [`ResolvedPath`]: home-relative templates and
//!   their absolute, lexically cleaned forms
//! - [`Policy`] and [`ReconciledPolicy`]: the declarative sets and their
//!   final deduplicated form
//! - [`ToolchainPathProvider`]: the injectable source of toolchain
//!   directories
//! - [`Profile`]: the rendered artifact
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use confine::PathTemplate;
//! use std::path::Path;
//!
//! // Templates resolve purely and deterministically
//! let template = PathTemplate::from("~/.cache/uv");
//! let resolved = template.resolve(Path::new("/Users/alice")).unwrap();
//! assert_eq!(resolved.as_path(), Path::new("/Users/alice/.cache/uv"));
//! ```

pub mod compile;
pub mod error;
pub mod logging;
pub mod path;
pub mod policy;
pub mod profile;
pub mod toolchain;

// Re-export key types at crate root for convenience
pub use compile::{compile_profile, CompileOptions, Environment};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{PathRelationship, PathTemplate, ResolvedPath};
pub use policy::{traversal_literals, Policy, PolicyBuilder, PolicySets, ReconciledPolicy};
pub use profile::Profile;
pub use toolchain::{FixedToolchain, GoToolchain, ToolchainPathProvider, ToolchainPaths};
