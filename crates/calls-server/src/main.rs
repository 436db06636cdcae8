//! call-manager server binary.
//!
//! Reads `/etc/call-manager/configuration.yml`, connects the SQLite store,
//! serves the `/calls` API, and shuts down cleanly on SIGINT/SIGTERM.

use std::process::ExitCode;

use anyhow::Context as _;
use calls_server::{App, ServerConfig, config::CONFIG_PATH};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  match run().await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{e:#}");
      ExitCode::FAILURE
    }
  }
}

async fn run() -> anyhow::Result<()> {
  let config = ServerConfig::load(CONFIG_PATH)
    .with_context(|| format!("failed to read {CONFIG_PATH}"))?;

  let app = App::new(&config).await?;
  app.run().await
}
