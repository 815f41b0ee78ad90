//! Log subscriber setup

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: `-v`, then `RUST_LOG`, then the config file
pub fn filter_directive(verbose: bool, env: Option<String>, configured: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    env.filter(|directive| !directive.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global `fmt` subscriber, writing to stderr
pub fn init(verbose: bool, configured: Option<&str>) -> Result<()> {
    let directive = filter_directive(
        verbose,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        configured,
    );
    let filter = EnvFilter::try_new(&directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    tracing::debug!(%directive, "logging initialized");
    Ok(())
}
