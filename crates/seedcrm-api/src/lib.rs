//! JSON API for seedcrm.
//!
//! Exposes an axum [`Router`] backed by any [`CrmClient`]. Every workflow
//! response carries the narrative log of its run as `logs`.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/hubspot", seedcrm_api::api_router(crm, settings))
//! ```

pub mod associations;
pub mod config;
pub mod error;
pub mod generate;
pub mod push;

use std::{sync::Arc, time::Duration};

use axum::{
  Json, Router,
  routing::{get, post},
};
use rand::{SeedableRng, rngs::StdRng};
use seedcrm_core::{crm::CrmClient, event::EventLog};
use seedcrm_engine::{CONTACT_LINK_DELAY, TICKET_LINK_DELAY};
use serde::{Serialize, de::DeserializeOwned};

pub use error::ApiError;

/// Knobs the handlers need beyond the CRM client.
#[derive(Debug, Clone)]
pub struct ApiSettings {
  pub contact_link_delay: Duration,
  pub ticket_link_delay:  Duration,
  /// Fixed RNG seed; fresh OS entropy per request when unset.
  pub seed:               Option<u64>,
}

impl Default for ApiSettings {
  fn default() -> Self {
    Self {
      contact_link_delay: CONTACT_LINK_DELAY,
      ticket_link_delay:  TICKET_LINK_DELAY,
      seed:               None,
    }
  }
}

impl ApiSettings {
  pub fn rng(&self) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    }
  }
}

/// Shared handler state.
pub struct AppState<C> {
  pub crm:      Arc<C>,
  pub settings: Arc<ApiSettings>,
}

impl<C> Clone for AppState<C> {
  fn clone(&self) -> Self {
    Self {
      crm:      Arc::clone(&self.crm),
      settings: Arc::clone(&self.settings),
    }
  }
}

/// Build the API router for `crm`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<C>(crm: Arc<C>, settings: ApiSettings) -> Router<()>
where
  C: CrmClient + 'static,
{
  let state = AppState {
    crm,
    settings: Arc::new(settings),
  };

  Router::new()
    .route("/config", get(config::handler::<C>))
    // Pushes
    .route("/companies", post(push::companies::<C>))
    .route("/companies/fetch", get(push::fetch_companies::<C>))
    .route("/contacts", post(push::contacts::<C>))
    .route("/tickets", post(push::tickets::<C>))
    // Associations
    .route("/associations", post(associations::pairs::<C>))
    .route("/associations/discover", post(associations::by_domain::<C>))
    .route("/contact-ticket-associations", post(associations::by_priority::<C>))
    // Generator
    .route("/generate/{kind}", get(generate::handler::<C>))
    .with_state(state)
}

// ─── Shared response plumbing ────────────────────────────────────────────────

/// Successful workflow response: the report's fields next to `success` and
/// `logs`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(flatten)]
  pub report:  T,
  pub logs:    Vec<String>,
}

pub(crate) fn respond<T: Serialize>(report: T, log: &EventLog) -> Json<Envelope<T>> {
  Json(Envelope {
    success: true,
    report,
    logs: log.lines(),
  })
}

/// Decode a JSON request body, answering 400 with `requirement` when it does
/// not have the expected shape.
pub(crate) fn parse_body<T: DeserializeOwned>(
  body: &[u8],
  requirement: &str,
  log: &mut EventLog,
) -> Result<T, ApiError> {
  serde_json::from_slice(body).map_err(|e| {
    tracing::debug!("rejected request body: {e}");
    ApiError::bad_request(requirement, log)
  })
}

#[cfg(test)]
pub(crate) mod test_util {
  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
  };
  use serde_json::Value;
  use tower::ServiceExt;

  use super::*;

  pub fn settings() -> ApiSettings {
    ApiSettings {
      contact_link_delay: Duration::ZERO,
      ticket_link_delay:  Duration::ZERO,
      seed:               Some(7),
    }
  }

  pub async fn call<C: CrmClient + 'static>(
    crm: Arc<C>,
    method: &str,
    uri: &str,
    body: Option<&str>,
  ) -> (StatusCode, Value) {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header("content-type", "application/json")
      .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
      .unwrap();
    let resp = api_router(crm, settings()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }
}
