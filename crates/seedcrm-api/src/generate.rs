//! `GET /generate/{kind}?count=N`: synthetic records, nothing sent upstream.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use seedcrm_core::{
  entity::{Company, Contact, Ticket},
  event::EventLog,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Envelope, error::ApiError, respond};

pub const DEFAULT_COUNT: usize = 5;
pub const MAX_COUNT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct GenerateParams {
  pub count: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Records {
  Contacts(Vec<Contact>),
  Companies(Vec<Company>),
  Tickets(Vec<Ticket>),
}

#[derive(Debug, Serialize)]
pub struct Generated {
  pub kind:    String,
  pub count:   usize,
  pub records: Records,
}

/// `GET /generate/{contacts|companies|tickets}[?count=N]`
pub async fn handler<C>(
  State(state): State<AppState<C>>,
  Path(kind): Path<String>,
  Query(params): Query<GenerateParams>,
) -> Result<Json<Envelope<Generated>>, ApiError> {
  let mut log = EventLog::new();

  let count = match params.count.as_deref() {
    None => DEFAULT_COUNT,
    Some(raw) => match raw.trim().parse::<usize>() {
      Ok(n) if (1..=MAX_COUNT).contains(&n) => n,
      _ => {
        return Err(ApiError::bad_request(
          format!("count must be an integer between 1 and {MAX_COUNT}"),
          &mut log,
        ));
      }
    },
  };

  let mut rng = state.settings.rng();
  let records = match kind.as_str() {
    "contacts" => Records::Contacts(seedcrm_faker::generate_contacts(&mut rng, count)),
    "companies" => Records::Companies(seedcrm_faker::generate_companies(&mut rng, count)),
    "tickets" => Records::Tickets(seedcrm_faker::generate_tickets(&mut rng, count)),
    other => {
      return Err(ApiError::bad_request(
        format!("unknown record kind '{other}'; expected contacts, companies or tickets"),
        &mut log,
      ));
    }
  };

  log.success(format!("Generated {count} {kind}"));
  Ok(respond(Generated { kind, count, records }, &log))
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::http::StatusCode;
  use seedcrm_core::fake::FakeCrm;

  use crate::test_util::call;

  #[tokio::test]
  async fn default_count_is_five() {
    let crm = Arc::new(FakeCrm::unconfigured());
    let (status, body) = call(crm.clone(), "GET", "/generate/tickets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"].as_array().unwrap().len(), 5);
    assert_eq!(crm.call_count(), 0);
  }

  #[tokio::test]
  async fn explicit_count_is_honoured() {
    let crm = Arc::new(FakeCrm::new());
    let (_, body) = call(crm, "GET", "/generate/contacts?count=12", None).await;
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 12);
    assert!(records[0]["email"].as_str().unwrap().contains('@'));
  }

  #[tokio::test]
  async fn out_of_range_count_is_a_400() {
    for uri in [
      "/generate/companies?count=0",
      "/generate/companies?count=101",
      "/generate/companies?count=lots",
    ] {
      let (status, _) = call(Arc::new(FakeCrm::new()), "GET", uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
  }

  #[tokio::test]
  async fn unknown_kind_is_a_400() {
    let (status, body) = call(Arc::new(FakeCrm::new()), "GET", "/generate/deals", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("deals"));
  }
}
