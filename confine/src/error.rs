//! Error types for the confine library.
//!
//! This module provides the error hierarchy for profile compilation,
//! using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a confine error.
///
/// # Examples
///
/// ```
/// use confine::{Error, Result};
///
/// fn example_operation() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the confine library.
///
/// Every failure is a configuration or environment problem that will not
/// succeed on immediate retry; callers are expected to report the error
/// and abort without emitting any profile output.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path or path template was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A required piece of the process environment could not be resolved.
    #[error("cannot resolve {variable}: {reason}")]
    EnvironmentResolution {
        /// The environment input that could not be resolved.
        variable: String,
        /// The reason resolution failed.
        reason: String,
    },

    /// The toolchain environment query failed to run or exited non-zero.
    #[error("toolchain query failed: {details}")]
    ToolchainQuery {
        /// Details about the failure.
        details: String,
    },

    /// The toolchain environment query produced unusable output.
    #[error("toolchain output unusable: {details}")]
    ToolchainOutput {
        /// Details about the unusable output.
        details: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error originated in the process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use confine::Error;
    ///
    /// let err = Error::EnvironmentResolution {
    ///     variable: "TMPDIR".to_string(),
    ///     reason: "not set".to_string(),
    /// };
    /// assert!(err.is_environment());
    /// ```
    #[must_use]
    pub fn is_environment(&self) -> bool {
        matches!(self, Self::EnvironmentResolution { .. })
    }

    /// Check if this error originated in the toolchain query.
    ///
    /// # Examples
    ///
    /// ```
    /// use confine::Error;
    ///
    /// let err = Error::ToolchainQuery {
    ///     details: "exit status 1".to_string(),
    /// };
    /// assert!(err.is_toolchain());
    /// ```
    #[must_use]
    pub fn is_toolchain(&self) -> bool {
        matches!(
            self,
            Self::ToolchainQuery { .. } | Self::ToolchainOutput { .. }
        )
    }
}
