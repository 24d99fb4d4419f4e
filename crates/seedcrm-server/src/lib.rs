//! HTTP front end for seedcrm: configuration and the top-level router.

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context as _;
use axum::Router;
use seedcrm_api::{ApiSettings, api_router};
use seedcrm_core::crm::CrmClient;
use seedcrm_hubspot::{DEFAULT_BASE_URL, HubSpotConfig};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Where the API is mounted.
pub const API_PREFIX: &str = "/api/hubspot";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SEEDCRM_*` environment variables. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                    String,
  pub port:                    u16,
  pub hubspot_base_url:        String,
  pub contact_link_delay_secs: u64,
  pub ticket_link_delay_secs:  u64,
  pub request_timeout_secs:    Option<u64>,
  pub seed:                    Option<u64>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                    "127.0.0.1".to_string(),
      port:                    3000,
      hubspot_base_url:        DEFAULT_BASE_URL.to_string(),
      contact_link_delay_secs: 10,
      ticket_link_delay_secs:  5,
      request_timeout_secs:    None,
      seed:                    None,
    }
  }
}

impl ServerConfig {
  /// Layer the file at `path` (if it exists) under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SEEDCRM").try_parsing(true))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn api_settings(&self) -> ApiSettings {
    ApiSettings {
      contact_link_delay: Duration::from_secs(self.contact_link_delay_secs),
      ticket_link_delay:  Duration::from_secs(self.ticket_link_delay_secs),
      seed:               self.seed,
    }
  }

  pub fn hubspot(&self, api_key: Option<String>) -> HubSpotConfig {
    HubSpotConfig {
      base_url: self.hubspot_base_url.clone(),
      api_key,
      timeout: self.request_timeout_secs.map(Duration::from_secs),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API under [`API_PREFIX`] with request tracing.
pub fn app<C>(crm: Arc<C>, settings: ApiSettings) -> Router
where
  C: CrmClient + 'static,
{
  Router::new()
    .nest(API_PREFIX, api_router(crm, settings))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
  };
  use config::{File, FileFormat};
  use seedcrm_core::fake::FakeCrm;
  use tower::ServiceExt as _;

  use super::*;

  fn from_toml(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_gives_defaults() {
    assert_eq!(from_toml(""), ServerConfig::default());
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        port = 8080
        ticket_link_delay_secs = 0
        request_timeout_secs = 30
        seed = 42
      "#,
    );
    assert_eq!(cfg.address(), "127.0.0.1:8080");
    assert_eq!(cfg.contact_link_delay_secs, 10);

    let settings = cfg.api_settings();
    assert_eq!(settings.ticket_link_delay, Duration::ZERO);
    assert_eq!(settings.seed, Some(42));
    assert_eq!(cfg.hubspot(None).timeout, Some(Duration::from_secs(30)));
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/seedcrm.toml")).unwrap();
    assert_eq!(cfg.hubspot_base_url, DEFAULT_BASE_URL);
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let app = app(Arc::new(FakeCrm::new()), ApiSettings::default());
    let req = Request::builder()
      .uri("/api/hubspot/config")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["configured"], true);
  }
}
