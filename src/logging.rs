//! Logging initialization for the harness binary.
//!
//! Logs to stderr; `RUST_LOG` overrides the level, `--debug` forces debug.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging. Call once, from the binary entry point.
pub fn init_logging(debug_override: bool) -> Result<()> {
    let log_level = if debug_override { "debug" } else { "info" };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}
