//! Profile compilation pipeline.
//!
//! Wires the stages together: the base policy plus caller extras is
//! resolved against the home directory, the project root, toolchain, and
//! temp directories are merged in, traversal literals are synthesized,
//! and the reconciled result is wrapped in a [`Profile`]. Data flows
//! strictly left to right; there is no feedback loop.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::{PathTemplate, ResolvedPath};
use crate::policy::{traversal_literals, Policy, ReconciledPolicy};
use crate::profile::Profile;
use crate::toolchain::ToolchainPathProvider;

/// The process environment inputs to path resolution: the invoking
/// user's home directory and the temporary directory.
///
/// Resolved once per invocation; [`Environment::from_process`] is the
/// production path, tests construct fixed values directly.
#[derive(Debug, Clone)]
pub struct Environment {
    home: PathBuf,
    tmp_dir: PathBuf,
}

impl Environment {
    /// Create an environment from explicit values.
    #[must_use]
    pub fn new(home: PathBuf, tmp_dir: PathBuf) -> Self {
        Self { home, tmp_dir }
    }

    /// Resolve the environment from the running process.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or
    /// `TMPDIR` is not set. Both are required; a profile compiled
    /// without them would be incomplete.
    pub fn from_process() -> Result<Self> {
        let home = home::home_dir().ok_or_else(|| Error::EnvironmentResolution {
            variable: "HOME".to_string(),
            reason: "cannot determine home directory".to_string(),
        })?;
        let tmp_dir = env::var_os("TMPDIR")
            .map(PathBuf::from)
            .ok_or_else(|| Error::EnvironmentResolution {
                variable: "TMPDIR".to_string(),
                reason: "not set".to_string(),
            })?;
        Ok(Self { home, tmp_dir })
    }

    /// The home directory.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The temporary directory.
    #[must_use]
    pub fn tmp_dir(&self) -> &Path {
        &self.tmp_dir
    }
}

/// Options for one compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// The project root the confined process works in. A relative root
    /// is resolved against the current directory.
    pub root: PathBuf,

    /// Additional write-allow path templates supplied by the caller.
    pub extra_write: Vec<PathTemplate>,
}

/// Compile a policy into a complete sandbox profile.
///
/// The project root and the temp directory become read/write grants, the
/// toolchain root becomes a read grant, and the toolchain caches become
/// read/write grants. The temp directory is granted twice: as given and
/// under the `/private` prefix, covering the symlinked temp tree.
///
/// # Errors
///
/// Any template resolution, environment, or toolchain failure aborts the
/// whole compilation; no partial profile is produced.
///
/// # Examples
///
/// ```
/// use confine::compile::{compile_profile, CompileOptions, Environment};
/// use confine::path::ResolvedPath;
/// use confine::policy::Policy;
/// use confine::toolchain::{FixedToolchain, ToolchainPaths};
/// use std::path::PathBuf;
///
/// let environment = Environment::new(
///     PathBuf::from("/Users/alice"),
///     PathBuf::from("/var/folders/zz/T"),
/// );
/// let provider = FixedToolchain::new(ToolchainPaths {
///     root: ResolvedPath::new(PathBuf::from("/usr/local/go")).unwrap(),
///     build_cache: ResolvedPath::new(PathBuf::from("/Users/alice/Library/Caches/go-build")).unwrap(),
///     module_cache: ResolvedPath::new(PathBuf::from("/Users/alice/go/pkg/mod")).unwrap(),
/// });
/// let options = CompileOptions {
///     root: PathBuf::from("/Users/alice/src/project"),
///     extra_write: vec![],
/// };
///
/// let profile = compile_profile(&environment, &Policy::base(), &provider, &options).unwrap();
/// assert!(profile.render().contains("(subpath \"/Users/alice/src/project\")"));
/// ```
pub fn compile_profile(
    environment: &Environment,
    policy: &Policy,
    provider: &dyn ToolchainPathProvider,
    options: &CompileOptions,
) -> Result<Profile> {
    let toolchain = provider.toolchain_paths()?;

    let root = absolute_root(&options.root)?;
    let tmp = ResolvedPath::new(environment.tmp_dir().to_path_buf())?;
    let private_tmp = private_twin(&tmp)?;

    let mut sets = policy.resolve(environment.home())?;

    sets.read.push(root.clone());
    sets.read.push(toolchain.root.clone());
    sets.read.push(toolchain.build_cache.clone());
    sets.read.push(toolchain.module_cache.clone());

    sets.write.push(tmp);
    sets.write.push(private_tmp);
    sets.write.push(root);
    sets.write.push(toolchain.build_cache);
    sets.write.push(toolchain.module_cache);

    for template in &options.extra_write {
        sets.write.push(template.resolve(environment.home())?);
    }

    let traversal = traversal_literals(&sets.deny, &sets.merged_allow());
    Ok(Profile::new(ReconciledPolicy::reconcile(sets), traversal))
}

/// Resolve the project root to absolute form. Relative roots are joined
/// to the current directory.
fn absolute_root(root: &Path) -> Result<ResolvedPath> {
    if root.is_absolute() {
        ResolvedPath::new(root.to_path_buf())
    } else {
        let cwd = env::current_dir()?;
        ResolvedPath::new(cwd.join(root))
    }
}

/// The `/private`-prefixed twin of the temp directory. On macOS the temp
/// tree is reachable under both spellings.
fn private_twin(tmp: &ResolvedPath) -> Result<ResolvedPath> {
    let stripped = tmp.as_path().strip_prefix("/").unwrap_or(tmp.as_path());
    ResolvedPath::new(Path::new("/private").join(stripped))
}
