//! Serializable workflow results.
//!
//! Field names are camelCase on the wire. Every report carries a `summary`
//! of integer counts; the narrative log travels separately.

use seedcrm_core::{
  association::{AssociationType, LinkRequest},
  object::CrmObject,
};
use serde::Serialize;
use uuid::Uuid;

use crate::link::LinkState;

// ─── Gateway ─────────────────────────────────────────────────────────────────

/// A record the CRM accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItem {
  pub local_id:  Uuid,
  pub remote_id: String,
  pub success:   bool,
}

/// A record that could not be created, keyed by its local id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedItem {
  pub local_id: Uuid,
  pub error:    String,
  pub success:  bool,
}

impl FailedItem {
  pub fn new(local_id: Uuid, error: impl Into<String>) -> Self {
    Self {
      local_id,
      error: error.into(),
      success: false,
    }
  }
}

/// Per-item results of one gateway batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
  pub results: Vec<CreatedItem>,
  pub errors:  Vec<FailedItem>,
}

impl BatchOutcome {
  /// Items accounted for; equals the batch size once the batch is done.
  pub fn total(&self) -> usize { self.results.len() + self.errors.len() }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
  pub total:      usize,
  pub successful: usize,
  pub failed:     usize,
}

/// Result of pushing companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushReport {
  #[serde(flatten)]
  pub outcome: BatchOutcome,
  pub summary: BatchSummary,
}

// ─── Create-and-link batches ─────────────────────────────────────────────────

/// An association queued by a create-and-link batch, with its final state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedLink {
  pub association: AssociationType,
  pub from_id:     String,
  pub to_id:       String,
  pub state:       LinkState,
}

impl QueuedLink {
  pub fn pending(link: &LinkRequest) -> Self {
    Self {
      association: link.association,
      from_id:     link.from_id.clone(),
      to_id:       link.to_id.clone(),
      state:       LinkState::Pending,
    }
  }

  pub fn request(&self) -> LinkRequest {
    LinkRequest::new(self.association, self.from_id.clone(), self.to_id.clone())
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedPushSummary {
  pub total:                  usize,
  pub successful:             usize,
  pub failed:                 usize,
  pub associations_attempted: usize,
  pub associations_created:   usize,
  pub associations_failed:    usize,
}

/// Result of pushing contacts or tickets and linking each to an existing
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedPushReport {
  #[serde(flatten)]
  pub outcome:      BatchOutcome,
  pub associations: Vec<QueuedLink>,
  pub summary:      LinkedPushSummary,
}

// ─── Explicit pairs ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairLinked {
  pub contact_id: String,
  pub company_id: String,
  pub success:    bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairFailed {
  pub contact_id: Option<String>,
  pub company_id: Option<String>,
  pub error:      String,
  pub success:    bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairsReport {
  pub results: Vec<PairLinked>,
  pub errors:  Vec<PairFailed>,
  pub summary: BatchSummary,
}

// ─── Discovery ───────────────────────────────────────────────────────────────

/// A matched pair whose link was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Linked<P> {
  #[serde(flatten)]
  pub pair:    P,
  pub success: bool,
}

/// A matched pair whose link failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkFailed<P> {
  #[serde(flatten)]
  pub pair:    P,
  pub error:   String,
  pub success: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverySummary {
  pub total_contacts:       usize,
  pub total_targets:        usize,
  pub matches_found:        usize,
  pub associations_created: usize,
  pub associations_failed:  usize,
}

/// Result of a match-then-link workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport<P> {
  /// Set when the run stopped early with nothing to link.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  pub matches: Vec<P>,
  pub results: Vec<Linked<P>>,
  pub errors:  Vec<LinkFailed<P>>,
  pub summary: DiscoverySummary,
}

impl<P> DiscoveryReport<P> {
  pub(crate) fn nothing_to_link(message: String, summary: DiscoverySummary) -> Self {
    Self {
      message: Some(message),
      matches: Vec::new(),
      results: Vec::new(),
      errors: Vec::new(),
      summary,
    }
  }
}

// ─── Fetch ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
  pub total: usize,
  pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
  pub companies: Vec<CrmObject>,
  pub summary:   FetchSummary,
}
