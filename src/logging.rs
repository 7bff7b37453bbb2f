//! Logging setup
//!
//! Diagnostics go through `tracing` and are written to stderr so they never mix
//! with the frame and source output on stdout. The default filter is `warn`.

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber with the given filter directive
pub fn init(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{}'", filter))?;

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(())
}
