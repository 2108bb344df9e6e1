use anyhow::Result;
use buildflow::config::BuildConfig;
use buildflow::errors::BuildflowError;
use buildflow::events::ConsoleEventSink;
use buildflow::invoker::ProcessInvoker;
use buildflow::observability::init_logging;
use buildflow::pipeline::PipelineRunner;
use buildflow::web::web_pipeline;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

/// buildflow - builds the web client, server and native executable
#[derive(Parser)]
#[command(name = "buildflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to run the build in (default: current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Skip the native executable stage (same as SKIP_NATIVE_BUILD=true)
    #[arg(long)]
    skip_native_build: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<BuildflowError>()
                .map_or(1, BuildflowError::exit_code);
            eprintln!("error: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let root = cli.project_root.unwrap_or_else(|| PathBuf::from("."));
    let config = BuildConfig::from_env()
        .with_project_root(&root)
        .with_skip_native_build(cli.skip_native_build);
    config.ensure_project_root()?;
    debug!(?config, "starting build");

    let runner = PipelineRunner::new(web_pipeline(&config)?, Arc::new(ProcessInvoker::new()))
        .with_event_sink(Arc::new(ConsoleEventSink::stdout()));

    runner.run().await?;
    Ok(())
}
