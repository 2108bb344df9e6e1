//! `tracing-subscriber` setup for the binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "buildflow=debug"
    } else {
        "warn"
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `verbose`. Output goes to stderr without timestamps
/// so it can sit next to tool output without reformatting it. Calling this
/// twice is harmless; the second call is ignored.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if let Err(e) = installed {
        tracing::debug!(error = %e, "subscriber already installed");
    }
}
