//! The web build pipeline.
//!
//! Seven stages, in an order dictated by what each tool needs on disk:
//! output directories first, then assets, stylesheet, the two client
//! bundles, the server, and finally the optional native executable.

use crate::config::BuildConfig;
use crate::errors::PipelineValidationError;
use crate::invoker::CommandSpec;
use crate::pipeline::{Pipeline, PipelineBuilder};
use crate::stages::Stage;

/// Pipeline name used in logs and events.
pub const PIPELINE_NAME: &str = "web";

/// Stage names, in execution order.
pub mod stage {
    /// Creates the output directory tree.
    pub const ENSURE_DIRS: &str = "ensure-dirs";
    /// Copies static assets into the output tree.
    pub const COPY_ASSETS: &str = "copy-assets";
    /// Compiles and minifies the stylesheet.
    pub const CSS: &str = "css";
    /// Bundles the main client entry point.
    pub const CLIENT_BUNDLE: &str = "client-bundle";
    /// Bundles the terminal test-harness entry point.
    pub const TERMINAL_BUNDLE: &str = "terminal-bundle";
    /// Compiles the server with the project's tsconfig.
    pub const SERVER: &str = "server";
    /// Builds the native executable.
    pub const NATIVE: &str = "native";

    /// All stage names in execution order.
    pub const ALL: [&str; 7] = [
        ENSURE_DIRS,
        COPY_ASSETS,
        CSS,
        CLIENT_BUNDLE,
        TERMINAL_BUNDLE,
        SERVER,
        NATIVE,
    ];
}

/// Printed instead of running the native stage when it is disabled.
pub const NATIVE_SKIP_NOTICE: &str = "Skipping native executable build (handled by Xcode)...";

fn esbuild(entry: &str, outfile: &str) -> CommandSpec {
    CommandSpec::new("esbuild")
        .arg(entry)
        .arg("--bundle")
        .arg(format!("--outfile={outfile}"))
        .arg("--format=esm")
        .arg("--minify")
}

/// Returns the web build's stages, commands rooted at the project root.
#[must_use]
pub fn web_stages(config: &BuildConfig) -> Vec<Stage> {
    let root = &config.project_root;
    let cmd = |command: CommandSpec| command.current_dir(root);

    vec![
        Stage::new(
            stage::ENSURE_DIRS,
            "Creating directories...",
            cmd(CommandSpec::new("node").arg("scripts/ensure-dirs.js")),
        ),
        Stage::new(
            stage::COPY_ASSETS,
            "Copying assets...",
            cmd(CommandSpec::new("node").arg("scripts/copy-assets.js")),
        ),
        Stage::new(
            stage::CSS,
            "Building CSS...",
            cmd(CommandSpec::new("npx").args([
                "tailwindcss",
                "-i",
                "./src/client/styles.css",
                "-o",
                "./public/bundle/styles.css",
                "--minify",
            ])),
        ),
        Stage::new(
            stage::CLIENT_BUNDLE,
            "Bundling client JavaScript...",
            cmd(esbuild("src/client/app-entry.ts", "public/bundle/client-bundle.js")),
        ),
        Stage::new(
            stage::TERMINAL_BUNDLE,
            "Bundling terminal JavaScript...",
            cmd(esbuild(
                "src/client/test-terminals-entry.ts",
                "public/bundle/terminal.js",
            )),
        ),
        Stage::new(stage::SERVER, "Building server...", cmd(CommandSpec::new("tsc"))),
        Stage::new(
            stage::NATIVE,
            "Building native executable...",
            cmd(CommandSpec::new("node").arg("build-native.js")),
        )
        .skip_if(config.skip_native_build, NATIVE_SKIP_NOTICE),
    ]
}

/// Builds the web pipeline for `config`.
///
/// # Errors
///
/// Only fails if the stage table itself is malformed.
pub fn web_pipeline(config: &BuildConfig) -> Result<Pipeline, PipelineValidationError> {
    let mut builder = PipelineBuilder::new(PIPELINE_NAME);
    for stage in web_stages(config) {
        builder.add_stage(stage)?;
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_stage_order() {
        let pipeline = web_pipeline(&BuildConfig::default()).unwrap();
        assert_eq!(pipeline.name(), PIPELINE_NAME);
        assert_eq!(pipeline.stage_names(), stage::ALL.to_vec());
    }

    #[test]
    fn test_command_lines() {
        let pipeline = web_pipeline(&BuildConfig::default()).unwrap();
        let lines: Vec<String> = pipeline
            .stages()
            .iter()
            .map(|s| s.command().command_line())
            .collect();

        assert_eq!(
            lines,
            vec![
                "node scripts/ensure-dirs.js",
                "node scripts/copy-assets.js",
                "npx tailwindcss -i ./src/client/styles.css -o ./public/bundle/styles.css --minify",
                "esbuild src/client/app-entry.ts --bundle --outfile=public/bundle/client-bundle.js --format=esm --minify",
                "esbuild src/client/test-terminals-entry.ts --bundle --outfile=public/bundle/terminal.js --format=esm --minify",
                "tsc",
                "node build-native.js",
            ]
        );
    }

    #[test]
    fn test_server_stage_passes_no_flags() {
        let pipeline = web_pipeline(&BuildConfig::default()).unwrap();
        let server = pipeline.stage(stage::SERVER).unwrap();
        assert!(server.command().args.is_empty());
    }

    #[test]
    fn test_commands_run_in_project_root() {
        let config = BuildConfig::default().with_project_root("/work/web");
        for stage in web_stages(&config) {
            assert_eq!(
                stage.command().current_dir.as_deref(),
                Some(Path::new("/work/web")),
                "stage {}",
                stage.name()
            );
        }
    }

    #[test]
    fn test_only_native_stage_can_skip() {
        let config = BuildConfig::default().with_skip_native_build(true);
        let stages = web_stages(&config);
        let skipping: Vec<&str> = stages
            .iter()
            .filter(|s| s.skip_notice().is_some())
            .map(Stage::name)
            .collect();
        assert_eq!(skipping, vec![stage::NATIVE]);
    }

    #[test]
    fn test_native_stage_skip_follows_config() {
        let skip = web_pipeline(&BuildConfig::default().with_skip_native_build(true)).unwrap();
        assert_eq!(
            skip.stage(stage::NATIVE).unwrap().skip_notice(),
            Some(NATIVE_SKIP_NOTICE)
        );

        let run = web_pipeline(&BuildConfig::default()).unwrap();
        assert_eq!(run.stage(stage::NATIVE).unwrap().skip_notice(), None);
    }
}
