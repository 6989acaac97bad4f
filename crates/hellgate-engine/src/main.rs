//! # Hellgate Engine
//!
//! Headless runner for the Hellgate simulation. Loads `hellgate.toml`
//! (or the path given as the first argument), builds a small scripted
//! scene and drives it for a fixed number of ticks, logging every event.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("hellgate=info".parse()?))
        .init();

    info!("Hellgate starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| hellgate_gameplay::CONFIG_FILE.to_string());
    app::run(&config_path, app::DEMO_TICKS)?;

    info!("Hellgate shutdown complete");
    Ok(())
}
