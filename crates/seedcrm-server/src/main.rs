//! seedcrm server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), takes the HubSpot
//! token from `HUBSPOT_API_KEY`, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use seedcrm_core::crm::CrmClient as _;
use seedcrm_hubspot::HubSpotClient;
use seedcrm_server::{API_PREFIX, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Seed HubSpot with generated CRM data")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let api_key = std::env::var("HUBSPOT_API_KEY").ok();
  let crm = HubSpotClient::new(server_cfg.hubspot(api_key))?;
  if !crm.has_credential() {
    tracing::warn!("HUBSPOT_API_KEY is not set; CRM operations will be refused");
  }

  let app = seedcrm_server::app(Arc::new(crm), server_cfg.api_settings());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}{API_PREFIX}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
