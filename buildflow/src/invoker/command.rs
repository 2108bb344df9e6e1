//! External command descriptions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// An external command: program, arguments, and where to run it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path, resolved through `PATH`.
    pub program: String,
    /// Arguments passed verbatim.
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory; inherits the orchestrator's when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_dir: Option<PathBuf>,
    /// Extra environment variables layered over the inherited environment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    /// Creates a command with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Splits a whitespace-separated command line into program and args.
    ///
    /// No quoting or escaping is interpreted. Returns `None` for a blank line.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program).args(parts))
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds an environment variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Returns the command line as it would be typed in a shell.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_command_line() {
        let cmd = CommandSpec::parse("npx tailwindcss -i ./src/client/styles.css --minify").unwrap();
        assert_eq!(cmd.program, "npx");
        assert_eq!(
            cmd.args,
            vec!["tailwindcss", "-i", "./src/client/styles.css", "--minify"]
        );
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let cmd = CommandSpec::parse("  tsc   ").unwrap();
        assert_eq!(cmd, CommandSpec::new("tsc"));
    }

    #[test]
    fn test_parse_blank_line() {
        assert!(CommandSpec::parse("").is_none());
        assert!(CommandSpec::parse("   \t").is_none());
    }

    #[test]
    fn test_display_round_trips_simple_lines() {
        let line = "esbuild src/client/app-entry.ts --bundle --format=esm";
        assert_eq!(CommandSpec::parse(line).unwrap().command_line(), line);
    }

    #[test]
    fn test_builder_methods() {
        let cmd = CommandSpec::new("node")
            .arg("build-native.js")
            .current_dir("/tmp/web")
            .env("NODE_ENV", "production");

        assert_eq!(cmd.args, vec!["build-native.js"]);
        assert_eq!(cmd.current_dir.as_deref(), Some(Path::new("/tmp/web")));
        assert_eq!(cmd.envs, vec![("NODE_ENV".to_string(), "production".to_string())]);
    }
}
