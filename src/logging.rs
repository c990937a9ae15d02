use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize stderr logging.
///
/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG`
/// is honoured and falls back to warnings only.
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        EnvFilter::new("dart_data_gen=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dart_data_gen=warn"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
