//! Handlers that link existing CRM records.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/associations` | Body: `{"associations":[{"contactId":..,"companyId":..}]}` |
//! | `POST` | `/associations/discover` | Contacts to companies by email domain |
//! | `POST` | `/contact-ticket-associations` | Contacts to tickets by priority |

use axum::{Json, extract::State};
use bytes::Bytes;
use seedcrm_core::{crm::CrmClient, event::EventLog};
use seedcrm_engine::{
  PairInput,
  gateway::ensure_configured,
  matching::{DomainMatch, TicketMatch},
  report::{DiscoveryReport, PairsReport},
};
use serde::Deserialize;

use crate::{AppState, Envelope, error::ApiError, parse_body, respond};

#[derive(Debug, Deserialize)]
pub struct PairsBody {
  pub associations: Vec<PairInput>,
}

/// `POST /associations`
pub async fn pairs<C: CrmClient>(
  State(state): State<AppState<C>>,
  body: Bytes,
) -> Result<Json<Envelope<PairsReport>>, ApiError> {
  let mut log = EventLog::new();
  ensure_configured(&*state.crm, &mut log).map_err(|e| ApiError::workflow(e, &log))?;
  let body: PairsBody = parse_body(&body, "Associations array is required", &mut log)?;

  let report = seedcrm_engine::link_pairs(&*state.crm, &body.associations, &mut log)
    .await
    .map_err(|e| ApiError::workflow(e, &log))?;
  Ok(respond(report, &log))
}

/// `POST /associations/discover`
pub async fn by_domain<C: CrmClient>(
  State(state): State<AppState<C>>,
) -> Result<Json<Envelope<DiscoveryReport<DomainMatch>>>, ApiError> {
  let mut log = EventLog::new();
  let report = seedcrm_engine::associate_by_domain(&*state.crm, &mut log)
    .await
    .map_err(|e| ApiError::workflow(e, &log))?;
  Ok(respond(report, &log))
}

/// `POST /contact-ticket-associations`
pub async fn by_priority<C: CrmClient>(
  State(state): State<AppState<C>>,
) -> Result<Json<Envelope<DiscoveryReport<TicketMatch>>>, ApiError> {
  let mut log = EventLog::new();
  let report = seedcrm_engine::associate_by_priority(&*state.crm, &mut log)
    .await
    .map_err(|e| ApiError::workflow(e, &log))?;
  Ok(respond(report, &log))
}
