//! One-directional pushes of local records into the CRM.

use seedcrm_core::{
  CrmError,
  crm::CrmClient,
  entity::Record,
  event::EventLog,
  object::{CrmObject, ObjectKind, Properties},
};
use uuid::Uuid;

use crate::{
  Error, Result,
  report::{BatchOutcome, CreatedItem, FailedItem},
};

/// Fail fast, before any network call, when no credential is configured.
pub fn ensure_configured<C: CrmClient>(crm: &C, log: &mut EventLog) -> Result<()> {
  if crm.has_credential() {
    Ok(())
  } else {
    log.failure("HubSpot API key not configured");
    Err(Error::NotConfigured)
  }
}

/// Create every item independently.
///
/// Failures are recorded against the item's local id and do not stop the
/// batch; every item ends up in exactly one of `results` or `errors`.
pub async fn create_many<C, T>(
  crm: &C,
  items: &[T],
  log: &mut EventLog,
) -> Result<BatchOutcome>
where
  C: CrmClient,
  T: Record + Sync,
{
  ensure_configured(crm, log)?;
  log.info(format!("Starting to process {} {}...", items.len(), T::KIND));

  let mut outcome = BatchOutcome::default();
  for item in items {
    let label = item.label();
    log.info(format!("Sending {}: {label}", T::KIND.singular()));
    match create_one(crm, T::KIND, item.local_id(), &label, item.properties(), log).await {
      Ok(created) => outcome.results.push(CreatedItem {
        local_id:  item.local_id(),
        remote_id: created.id,
        success:   true,
      }),
      Err(failed) => outcome.errors.push(failed),
    }
  }

  log.info(format!(
    "{} processing complete: {} successful, {} failed",
    T::KIND,
    outcome.results.len(),
    outcome.errors.len()
  ));
  Ok(outcome)
}

/// Create a single object, logging the outcome.
pub(crate) async fn create_one<C: CrmClient>(
  crm: &C,
  kind: ObjectKind,
  local_id: Uuid,
  label: &str,
  properties: Properties,
  log: &mut EventLog,
) -> std::result::Result<CrmObject, FailedItem> {
  match crm.create_object(kind, properties).await {
    Ok(created) => {
      log.success(format!(
        "{} created successfully: {label} -> HubSpot ID: {}",
        kind.singular(),
        created.id
      ));
      Ok(created)
    }
    Err(e) => {
      log_call_error(log, &format!("creating {} {label}", kind.singular()), &e);
      Err(FailedItem::new(local_id, e.payload()))
    }
  }
}

/// Status failures are `Failure`s; calls that raised are `Exception`s.
pub(crate) fn log_call_error(log: &mut EventLog, action: &str, error: &CrmError) {
  if error.is_exception() {
    log.exception(format!("Exception {action}: {}", error.payload()));
  } else {
    log.failure(format!("Failed {action}: {error}"));
  }
}

#[cfg(test)]
mod tests {
  use seedcrm_core::{entity::Company, fake::FakeCrm};

  use super::*;

  fn companies(n: usize) -> Vec<Company> {
    (0..n)
      .map(|i| Company {
        id: Uuid::new_v4(),
        name: format!("Company {i}"),
        domain: format!("company{i}.com"),
        ..Default::default()
      })
      .collect()
  }

  #[tokio::test]
  async fn every_item_is_accounted_for_once() {
    let crm = FakeCrm::new().script_creates([
      None,
      Some(CrmError::Status { status: 400, body: "duplicate domain".into() }),
      Some(CrmError::Transport("connection reset".into())),
      None,
    ]);
    let items = companies(5);
    let mut log = EventLog::new();
    let outcome = create_many(&crm, &items, &mut log).await.unwrap();

    assert_eq!(outcome.total(), items.len());
    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.errors[0].local_id, items[1].id);
    assert_eq!(outcome.errors[0].error, "duplicate domain");
    assert_eq!(outcome.errors[1].error, "connection reset");
    assert!(outcome.errors.iter().all(|e| !e.success));
  }

  #[tokio::test]
  async fn remote_ids_are_reported_next_to_local_ids() {
    let crm = FakeCrm::new();
    let items = companies(2);
    let mut log = EventLog::new();
    let outcome = create_many(&crm, &items, &mut log).await.unwrap();
    for (created, item) in outcome.results.iter().zip(&items) {
      assert_eq!(created.local_id, item.id);
      assert_ne!(created.remote_id, item.id.to_string());
    }
    assert_eq!(crm.created(ObjectKind::Company)[0]["domain"], "company0.com");
  }

  #[tokio::test]
  async fn missing_credential_makes_no_calls() {
    let crm = FakeCrm::unconfigured();
    let mut log = EventLog::new();
    let err = create_many(&crm, &companies(3), &mut log).await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured));
    assert_eq!(crm.call_count(), 0);
  }
}
