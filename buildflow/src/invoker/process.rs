//! Real subprocess invoker.

use super::{CommandSpec, Invocation, Invoker};
use crate::errors::InvokeError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Spawns commands as child processes sharing the orchestrator's console.
///
/// Stdout and stderr are inherited rather than piped, so tool output appears
/// live and interleaved with progress lines. Stdin is closed: build tools
/// must not prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    /// Creates a new process invoker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build(command: &CommandSpec) -> Command {
        // npx, tsc and friends are .cmd shims on Windows and need the shell.
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&command.program).args(&command.args);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new(&command.program);
            cmd.args(&command.args);
            cmd
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &command.envs {
            cmd.env(key, value);
        }

        cmd
    }
}

#[async_trait]
impl Invoker for ProcessInvoker {
    async fn invoke(&self, command: &CommandSpec) -> Result<Invocation, InvokeError> {
        debug!(command = %command, cwd = ?command.current_dir, "spawning process");

        let status = Self::build(command)
            .status()
            .await
            .map_err(|e| InvokeError::spawn(&command.program, e))?;

        debug!(command = %command, status = %status, "process exited");

        Ok(status
            .code()
            .map_or_else(Invocation::terminated, Invocation::exited))
    }
}
