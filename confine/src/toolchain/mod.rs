//! Toolchain path discovery.
//!
//! A confined build process needs read access to the host Go toolchain
//! and read/write access to its shared caches. Those directories are not
//! fixed: they come from the toolchain's own environment query. The query
//! runs exactly once per process; its result is memoized inside the
//! provider value, so the cache is injectable state owned by the caller
//! rather than a hidden global.
//!
//! There is no partial or degraded mode. An incomplete policy is unsafe
//! to emit silently, so any failure to obtain or parse the toolchain
//! directories is fatal to the whole compilation.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::path::ResolvedPath;

/// The toolchain directories merged into every compiled policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainPaths {
    /// The toolchain installation root (read-only for confined processes).
    pub root: ResolvedPath,
    /// The shared build cache directory (read/write).
    pub build_cache: ResolvedPath,
    /// The shared module cache directory (read/write).
    pub module_cache: ResolvedPath,
}

/// Source of toolchain directories.
///
/// The production implementation is [`GoToolchain`]; tests inject a
/// [`FixedToolchain`] so compilation is deterministic and runs no
/// subprocess.
pub trait ToolchainPathProvider {
    /// Supply the toolchain directories.
    ///
    /// Implementations must be idempotent: repeated calls within one
    /// process return the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be determined; callers
    /// treat this as fatal.
    fn toolchain_paths(&self) -> Result<ToolchainPaths>;
}

/// The key-value subset of `go env -json` output we consume.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct GoEnv {
    goroot: String,
    gocache: String,
    gomodcache: String,
}

/// Provider backed by the Go toolchain's environment query.
///
/// Runs `go env -json GOROOT GOCACHE GOMODCACHE` at most once per
/// provider and memoizes the parsed result. The subprocess inherits
/// stderr so toolchain diagnostics reach the user directly.
///
/// # Examples
///
/// ```no_run
/// use confine::toolchain::{GoToolchain, ToolchainPathProvider};
///
/// let provider = GoToolchain::new();
/// let paths = provider.toolchain_paths().unwrap();
/// assert!(paths.root.as_path().is_absolute());
/// ```
#[derive(Debug, Default)]
pub struct GoToolchain {
    cache: OnceLock<ToolchainPaths>,
}

impl GoToolchain {
    /// Create a provider with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: OnceLock::new(),
        }
    }

    fn query() -> Result<ToolchainPaths> {
        log::debug!("querying go env for GOROOT, GOCACHE, GOMODCACHE");
        let output = Command::new("go")
            .args(["env", "-json", "GOROOT", "GOCACHE", "GOMODCACHE"])
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| Error::ToolchainQuery {
                details: format!("cannot run `go env`: {e}"),
            })?;

        if !output.status.success() {
            return Err(Error::ToolchainQuery {
                details: format!("`go env` exited with {}", output.status),
            });
        }

        parse_go_env(&output.stdout)
    }
}

impl ToolchainPathProvider for GoToolchain {
    fn toolchain_paths(&self) -> Result<ToolchainPaths> {
        if let Some(paths) = self.cache.get() {
            return Ok(paths.clone());
        }
        let paths = Self::query()?;
        // A concurrent query may have won the race; either value is the
        // same subprocess result
        Ok(self.cache.get_or_init(|| paths).clone())
    }
}

/// Provider returning fixed directories.
///
/// Used by tests and by callers that already know the toolchain layout.
///
/// # Examples
///
/// ```
/// use confine::path::ResolvedPath;
/// use confine::toolchain::{FixedToolchain, ToolchainPathProvider, ToolchainPaths};
/// use std::path::PathBuf;
///
/// let provider = FixedToolchain::new(ToolchainPaths {
///     root: ResolvedPath::new(PathBuf::from("/usr/local/go")).unwrap(),
///     build_cache: ResolvedPath::new(PathBuf::from("/Users/alice/Library/Caches/go-build")).unwrap(),
///     module_cache: ResolvedPath::new(PathBuf::from("/Users/alice/go/pkg/mod")).unwrap(),
/// });
/// assert!(provider.toolchain_paths().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FixedToolchain {
    paths: ToolchainPaths,
}

impl FixedToolchain {
    /// Create a provider that always returns `paths`.
    #[must_use]
    pub fn new(paths: ToolchainPaths) -> Self {
        Self { paths }
    }
}

impl ToolchainPathProvider for FixedToolchain {
    fn toolchain_paths(&self) -> Result<ToolchainPaths> {
        Ok(self.paths.clone())
    }
}

fn parse_go_env(bytes: &[u8]) -> Result<ToolchainPaths> {
    let env: GoEnv = serde_json::from_slice(bytes).map_err(|e| Error::ToolchainOutput {
        details: format!("cannot parse `go env -json` output: {e}"),
    })?;

    Ok(ToolchainPaths {
        root: env_path("GOROOT", &env.goroot)?,
        build_cache: env_path("GOCACHE", &env.gocache)?,
        module_cache: env_path("GOMODCACHE", &env.gomodcache)?,
    })
}

fn env_path(key: &str, value: &str) -> Result<ResolvedPath> {
    if value.is_empty() {
        return Err(Error::ToolchainOutput {
            details: format!("{key} is empty"),
        });
    }
    ResolvedPath::new(PathBuf::from(value)).map_err(|_| Error::ToolchainOutput {
        details: format!("{key} is not an absolute path: {value}"),
    })
}
