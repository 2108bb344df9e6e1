//! Subprocess invocation.
//!
//! Everything the pipeline does to the outside world goes through the
//! [`Invoker`] trait: command in, success/failure plus exit code out.
//! [`ProcessInvoker`] spawns real processes with inherited console streams;
//! tests substitute a recording fake.

mod command;
mod process;

pub use command::CommandSpec;
pub use process::ProcessInvoker;

use crate::errors::InvokeError;
use async_trait::async_trait;

/// The outcome of running an external command to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// The exit code, or `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl Invocation {
    /// A process that exited with `code`.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self {
            success: code == 0,
            exit_code: Some(code),
        }
    }

    /// A process that exited with status zero.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self::exited(0)
    }

    /// A process that ended without an exit code.
    #[must_use]
    pub const fn terminated() -> Self {
        Self {
            success: false,
            exit_code: None,
        }
    }
}

/// Runs external commands on behalf of pipeline stages.
///
/// Implementations block (asynchronously) until the command terminates and
/// must forward its output to the caller's console as it is produced. They
/// report failure but never decide whether the pipeline halts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::Spawn`] if the process could not be started.
    async fn invoke(&self, command: &CommandSpec) -> Result<Invocation, InvokeError>;
}
