//! End-to-end tests for the `buildflow` binary.
//!
//! Each test builds a throwaway project directory with fake `node`, `npx`,
//! `esbuild` and `tsc` executables on `PATH`. The fakes append their command
//! line to `invocations.log` in their working directory, so the log also shows
//! that every stage ran from the project root. Tests run serially: writing an
//! executable while another test forks can make its exec fail with ETXTBSY.

#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TOOLS: [&str; 4] = ["node", "npx", "esbuild", "tsc"];
const LOG: &str = "invocations.log";
const SKIP_NOTICE: &str = "Skipping native executable build (handled by Xcode)...";

struct Project {
    root: TempDir,
    bin: TempDir,
}

impl Project {
    fn new() -> Self {
        let bin = TempDir::new().unwrap();
        for tool in TOOLS {
            let var = format!("FAKE_{}_EXIT", tool.to_uppercase());
            let script =
                format!("#!/bin/sh\necho \"{tool} $*\" >> {LOG}\nexit \"${{{var}:-0}}\"\n");
            let path = bin.path().join(tool);
            std::fs::write(&path, script).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        Self {
            root: TempDir::new().unwrap(),
            bin,
        }
    }

    fn path_var(&self) -> std::ffi::OsString {
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = std::iter::once(self.bin.path().to_path_buf())
            .chain(std::env::split_paths(&inherited));
        std::env::join_paths(dirs).unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("buildflow");
        cmd.arg("-C")
            .arg(self.root.path())
            .env("PATH", self.path_var())
            .env_remove("SKIP_NATIVE_BUILD")
            .env_remove("RUST_LOG");
        cmd
    }

    fn log_path(&self) -> PathBuf {
        self.root.path().join(LOG)
    }

    fn invocations(&self) -> Vec<String> {
        read_lines(&self.log_path())
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(ToString::to_string)
        .collect()
}

#[test]
#[serial]
fn full_build_exits_zero_and_runs_every_stage() {
    let project = Project::new();

    project
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Starting build process...\n"))
        .stdout(predicate::str::contains("Building native executable..."))
        .stdout(predicate::str::ends_with("Build completed successfully!\n"));

    let log = project.invocations();
    assert_eq!(log.len(), 7, "{log:#?}");
    assert_eq!(log[0], "node scripts/ensure-dirs.js");
    assert_eq!(log[5], "tsc ");
    assert_eq!(log[6], "node build-native.js");
}

#[test]
#[serial]
fn failing_tool_exit_code_is_passed_through() {
    let project = Project::new();

    project
        .cmd()
        .env("FAKE_TSC_EXIT", "3")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Building server..."))
        .stdout(predicate::str::contains("Build completed successfully!").not())
        .stderr(predicate::str::contains("Stage 6 'server' failed: exited with status 3"));

    let log = project.invocations();
    assert_eq!(log.len(), 6, "{log:#?}");
    assert_eq!(log.last().map(String::as_str), Some("tsc "));
}

#[test]
#[serial]
fn first_stage_failure_runs_nothing_else() {
    let project = Project::new();

    project
        .cmd()
        .env("FAKE_NODE_EXIT", "2")
        .assert()
        .code(2)
        .stdout("Starting build process...\nCreating directories...\n");

    assert_eq!(project.invocations(), vec!["node scripts/ensure-dirs.js"]);
}

#[test]
#[serial]
fn skip_variable_skips_native_stage() {
    let project = Project::new();

    project
        .cmd()
        .env("SKIP_NATIVE_BUILD", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains(SKIP_NOTICE))
        .stdout(predicate::str::contains("Building native executable...").not());

    let log = project.invocations();
    assert_eq!(log.len(), 6, "{log:#?}");
    assert!(!log.iter().any(|line| line == "node build-native.js"));
}

#[test]
#[serial]
fn skip_variable_must_be_exactly_true() {
    let project = Project::new();

    project
        .cmd()
        .env("SKIP_NATIVE_BUILD", "TRUE")
        .assert()
        .success()
        .stdout(predicate::str::contains(SKIP_NOTICE).not());

    assert_eq!(project.invocations().len(), 7);
}

#[test]
#[serial]
fn skip_flag_skips_native_stage() {
    let project = Project::new();

    project
        .cmd()
        .arg("--skip-native-build")
        .assert()
        .success()
        .stdout(predicate::str::contains(SKIP_NOTICE));

    assert_eq!(project.invocations().len(), 6);
}

#[test]
#[serial]
fn missing_project_root_exits_one_without_invoking() {
    let project = Project::new();
    let missing = project.root.path().join("absent");

    cargo_bin_cmd!("buildflow")
        .arg("-C")
        .arg(&missing)
        .env("PATH", project.path_var())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("project root"));

    assert!(!project.log_path().exists());
}
