//! Build configuration.
//!
//! The process environment is read once, up front, and turned into a plain
//! value. Nothing downstream looks at environment variables.

use crate::errors::BuildflowError;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that disables the native executable stage.
pub const SKIP_NATIVE_BUILD_VAR: &str = "SKIP_NATIVE_BUILD";

/// The only value of [`SKIP_NATIVE_BUILD_VAR`] that counts as set.
pub const SKIP_NATIVE_BUILD_SENTINEL: &str = "true";

/// Settings for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Skip the native executable stage; another build host produces it.
    pub skip_native_build: bool,
    /// Directory every stage runs in.
    pub project_root: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            skip_native_build: false,
            project_root: PathBuf::from("."),
        }
    }
}

impl BuildConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// The native build is skipped only when the variable is exactly
    /// `"true"`; absence, empty, `"TRUE"`, `"1"` and everything else leave it
    /// enabled.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(SKIP_NATIVE_BUILD_VAR);
        let skip_native_build = raw.as_deref() == Some(SKIP_NATIVE_BUILD_SENTINEL);
        debug!(
            var = SKIP_NATIVE_BUILD_VAR,
            value = ?raw,
            skip_native_build,
            "read build configuration"
        );

        Self {
            skip_native_build,
            ..Self::default()
        }
    }

    /// Sets the directory every stage runs in.
    #[must_use]
    pub fn with_project_root(mut self, root: impl AsRef<Path>) -> Self {
        self.project_root = root.as_ref().to_path_buf();
        self
    }

    /// Forces the native stage to be skipped when `skip` is true.
    ///
    /// A `false` here never re-enables a stage the environment disabled.
    #[must_use]
    pub fn with_skip_native_build(mut self, skip: bool) -> Self {
        self.skip_native_build |= skip;
        self
    }

    /// Checks that the project root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`BuildflowError::Io`] when the root cannot be read or is not
    /// a directory.
    pub fn ensure_project_root(&self) -> Result<(), BuildflowError> {
        let metadata = std::fs::metadata(&self.project_root).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("project root {}: {e}", self.project_root.display()),
            )
        })?;

        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("project root {} is not a directory", self.project_root.display()),
            )
            .into());
        }
        Ok(())
    }
}
