//! Fake invokers for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::InvokeError;
use crate::invoker::{CommandSpec, Invocation, Invoker};

#[derive(Debug, Clone, Copy)]
enum Response {
    Exit(Invocation),
    SpawnError(std::io::ErrorKind),
}

/// An invoker that records every command and returns scripted results.
///
/// Commands succeed unless a response was configured for their full command
/// line or, failing that, their program.
#[derive(Debug, Default)]
pub struct RecordingInvoker {
    calls: Mutex<Vec<CommandSpec>>,
    by_line: Mutex<HashMap<String, Response>>,
    by_program: Mutex<HashMap<String, Response>>,
}

impl RecordingInvoker {
    /// Creates an invoker where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the command with this exact command line exit with `code`.
    #[must_use]
    pub fn fail_command(self, line: impl Into<String>, code: i32) -> Self {
        self.by_line
            .lock()
            .insert(line.into(), Response::Exit(Invocation::exited(code)));
        self
    }

    /// Makes the command with this exact command line die without an exit code.
    #[must_use]
    pub fn terminate_command(self, line: impl Into<String>) -> Self {
        self.by_line
            .lock()
            .insert(line.into(), Response::Exit(Invocation::terminated()));
        self
    }

    /// Makes every invocation of `program` exit with `code`.
    #[must_use]
    pub fn fail_program(self, program: impl Into<String>, code: i32) -> Self {
        self.by_program
            .lock()
            .insert(program.into(), Response::Exit(Invocation::exited(code)));
        self
    }

    /// Makes every invocation of `program` fail to spawn.
    #[must_use]
    pub fn missing_program(self, program: impl Into<String>) -> Self {
        self.by_program.lock().insert(
            program.into(),
            Response::SpawnError(std::io::ErrorKind::NotFound),
        );
        self
    }

    /// Returns every command received, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }

    /// Returns the command lines received, in order.
    #[must_use]
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(CommandSpec::command_line).collect()
    }

    /// Returns the number of commands received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forgets recorded calls; scripted responses are kept.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    fn response_for(&self, command: &CommandSpec) -> Option<Response> {
        if let Some(response) = self.by_line.lock().get(&command.command_line()).copied() {
            return Some(response);
        }
        self.by_program.lock().get(&command.program).copied()
    }
}

#[async_trait]
impl Invoker for RecordingInvoker {
    async fn invoke(&self, command: &CommandSpec) -> Result<Invocation, InvokeError> {
        self.calls.lock().push(command.clone());

        match self.response_for(command) {
            None => Ok(Invocation::succeeded()),
            Some(Response::Exit(invocation)) => Ok(invocation),
            Some(Response::SpawnError(kind)) => Err(InvokeError::spawn(
                &command.program,
                std::io::Error::from(kind),
            )),
        }
    }
}
