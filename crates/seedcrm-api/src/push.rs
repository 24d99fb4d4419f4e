//! Handlers that create records in the CRM.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/companies` | Body: `{"companies":[..]}` |
//! | `GET`  | `/companies/fetch` | Up to 10 pages of 100 |
//! | `POST` | `/contacts` | Body: `{"contacts":[..]}`; links to random existing companies |
//! | `POST` | `/tickets` | Body: `{"tickets":[..]}`; links to random existing contacts |

use axum::{Json, extract::State};
use bytes::Bytes;
use seedcrm_core::{
  crm::CrmClient,
  entity::{Company, Contact, Ticket},
  event::EventLog,
};
use seedcrm_engine::{
  gateway::ensure_configured,
  report::{FetchReport, LinkedPushReport, PushReport},
};
use serde::Deserialize;

use crate::{AppState, Envelope, error::ApiError, parse_body, respond};

type Reply<T> = Result<Json<Envelope<T>>, ApiError>;

// ─── Companies ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompaniesBody {
  pub companies: Vec<Company>,
}

/// `POST /companies`
pub async fn companies<C: CrmClient>(
  State(state): State<AppState<C>>,
  body: Bytes,
) -> Reply<PushReport> {
  let mut log = EventLog::new();
  ensure_configured(&*state.crm, &mut log).map_err(|e| ApiError::workflow(e, &log))?;
  let body: CompaniesBody = parse_body(&body, "Companies array is required", &mut log)?;

  let report = seedcrm_engine::push_companies(&*state.crm, &body.companies, &mut log)
    .await
    .map_err(|e| ApiError::workflow(e, &log))?;
  Ok(respond(report, &log))
}

/// `GET /companies/fetch`
pub async fn fetch_companies<C: CrmClient>(
  State(state): State<AppState<C>>,
) -> Reply<FetchReport> {
  let mut log = EventLog::new();
  let report = seedcrm_engine::fetch_companies(&*state.crm, &mut log)
    .await
    .map_err(|e| ApiError::workflow(e, &log))?;
  Ok(respond(report, &log))
}

// ─── Contacts ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ContactsBody {
  pub contacts: Vec<Contact>,
}

/// `POST /contacts`
pub async fn contacts<C: CrmClient>(
  State(state): State<AppState<C>>,
  body: Bytes,
) -> Reply<LinkedPushReport> {
  let mut log = EventLog::new();
  ensure_configured(&*state.crm, &mut log).map_err(|e| ApiError::workflow(e, &log))?;
  let body: ContactsBody = parse_body(&body, "Contacts array is required", &mut log)?;

  let mut rng = state.settings.rng();
  let report = seedcrm_engine::push_contacts(
    &*state.crm,
    &mut rng,
    &body.contacts,
    state.settings.contact_link_delay,
    &mut log,
  )
  .await
  .map_err(|e| ApiError::workflow(e, &log))?;
  Ok(respond(report, &log))
}

// ─── Tickets ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TicketsBody {
  pub tickets: Vec<Ticket>,
}

/// `POST /tickets`
pub async fn tickets<C: CrmClient>(
  State(state): State<AppState<C>>,
  body: Bytes,
) -> Reply<LinkedPushReport> {
  let mut log = EventLog::new();
  ensure_configured(&*state.crm, &mut log).map_err(|e| ApiError::workflow(e, &log))?;
  let body: TicketsBody = parse_body(&body, "Tickets array is required", &mut log)?;

  let mut rng = state.settings.rng();
  let report = seedcrm_engine::push_tickets(
    &*state.crm,
    &mut rng,
    &body.tickets,
    state.settings.ticket_link_delay,
    &mut log,
  )
  .await
  .map_err(|e| ApiError::workflow(e, &log))?;
  Ok(respond(report, &log))
}
