//! Workflow-fatal errors.
//!
//! Per-item failures are not errors; they are collected into the reports.

use seedcrm_core::{CrmError, object::ObjectKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "HubSpot API key not configured. Please set HUBSPOT_API_KEY environment variable."
  )]
  NotConfigured,

  /// A read the workflow depends on failed.
  #[error("failed to fetch existing {kind} from HubSpot: {source}")]
  Fetch {
    kind:   ObjectKind,
    #[source]
    source: CrmError,
  },

  /// A create-and-link batch found nothing to link its records to.
  #[error("no existing {0} found in HubSpot; please create some {0} first")]
  NothingToAssign(ObjectKind),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
