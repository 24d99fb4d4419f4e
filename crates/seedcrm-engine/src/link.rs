//! Creating associations, with and without the legacy fallback.

use seedcrm_core::{
  CrmError,
  association::{LinkApi, LinkRequest},
  crm::CrmClient,
  event::EventLog,
};
use serde::Serialize;

use crate::gateway::log_call_error;

/// Lifecycle of one association attempt.
///
/// `Pending → Succeeded | PrimaryFailed` on the current API, then
/// `PrimaryFailed → Succeeded | Failed` on the legacy API. There is no
/// further retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkState {
  Pending,
  PrimaryFailed { error: String },
  Succeeded { via: LinkApi },
  Failed { error: String },
}

impl LinkState {
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
  }

  pub fn succeeded(&self) -> bool { matches!(self, Self::Succeeded { .. }) }
}

/// Issue exactly one link request as given.
pub async fn link_once<C: CrmClient>(
  crm: &C,
  link: LinkRequest,
  log: &mut EventLog,
) -> Result<(), CrmError> {
  log.info(format!("Creating association: {link}"));
  let description = link.to_string();
  let result = crm.create_association(link).await;
  match &result {
    Ok(()) => log.success(format!("Association created successfully: {description}")),
    Err(e) => log_call_error(log, &format!("creating association {description}"), e),
  }
  result
}

/// Link over the current API and, if that fails, once more over the legacy
/// API. Returns the terminal state.
pub async fn link_with_fallback<C: CrmClient>(
  crm: &C,
  link: LinkRequest,
  log: &mut EventLog,
) -> LinkState {
  let mut state = LinkState::Pending;

  while !state.is_terminal() {
    state = match state {
      LinkState::Pending => {
        match link_once(crm, link.clone().via(LinkApi::V4), log).await {
          Ok(()) => LinkState::Succeeded { via: LinkApi::V4 },
          Err(e) => {
            log.warning("v4 API failed, trying v3 API");
            LinkState::PrimaryFailed { error: e.payload() }
          }
        }
      }
      LinkState::PrimaryFailed { .. } => {
        match link_once(crm, link.clone().via(LinkApi::V3), log).await {
          Ok(()) => LinkState::Succeeded { via: LinkApi::V3 },
          Err(e) => {
            log.failure(format!("Both v4 and v3 APIs failed for association {link}"));
            LinkState::Failed { error: e.payload() }
          }
        }
      }
      terminal => terminal,
    };
  }

  state
}
