//=========================================================================
// Cursor Trail - Binary Entry Point
//=========================================================================
//
// Parses arguments, installs logging, loads `config.json`, then hands
// the main thread to the engine until the window closes.
//
// Log filtering follows `RUST_LOG` (e.g. `RUST_LOG=core::frame=debug`),
// defaulting to `info`, or `debug`/`trace` with `-v`/`-vv`.
//
//=========================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cursor_trail::{Config, EngineBuilder};

/// Command-line arguments for cursor-trail
#[derive(Parser, Debug)]
#[command(name = "cursor-trail")]
#[command(version, about = "Custom mouse cursor with a fading trail", long_about = None)]
struct Args {
    /// Configuration file path (missing file means defaults)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;
    info!("cursor-trail v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default(&args.config)
        .with_context(|| format!("Invalid configuration in '{}'", args.config.display()))?;
    tracing::debug!("Config: {:?}", config);

    EngineBuilder::new()
        .with_config(config)
        .build()
        .context("Failed to build engine")?
        .run()
        .context("Cursor trail terminated with an error")?;

    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},wgpu_core=warn,wgpu_hal=warn,naga=warn")));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
