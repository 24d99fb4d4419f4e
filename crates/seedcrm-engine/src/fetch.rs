//! Reading existing records back from the CRM.

use seedcrm_core::{
  crm::CrmClient,
  event::EventLog,
  object::{CrmObject, ListQuery, ObjectKind},
};

use crate::{
  Error, Result,
  gateway::{ensure_configured, log_call_error},
  report::{FetchReport, FetchSummary},
};

/// How many recent records the matching workflows look at.
pub const RECENT_LIMIT: u32 = 100;
pub const PAGE_SIZE: u32 = 100;
/// Hard stop for cursor pagination.
pub const MAX_PAGES: usize = 10;

/// One page of the most recent objects of `kind`.
///
/// The workflows cannot proceed without this data, so a failed read is
/// fatal.
pub async fn fetch_recent<C: CrmClient>(
  crm: &C,
  kind: ObjectKind,
  log: &mut EventLog,
) -> Result<Vec<CrmObject>> {
  log.info(format!("Fetching latest {RECENT_LIMIT} {kind} from HubSpot..."));
  let query = ListQuery::first_page(kind, RECENT_LIMIT);
  match crm.list_objects(kind, &query).await {
    Ok(page) => {
      log.success(format!("Fetched {} {kind} from HubSpot", page.results.len()));
      Ok(page.results)
    }
    Err(source) => {
      log_call_error(log, &format!("fetching {kind}"), &source);
      Err(Error::Fetch { kind, source })
    }
  }
}

/// Every company, following the cursor for at most [`MAX_PAGES`] pages.
///
/// A failed page ends pagination; whatever was gathered before it is still
/// returned.
pub async fn fetch_companies<C: CrmClient>(
  crm: &C,
  log: &mut EventLog,
) -> Result<FetchReport> {
  ensure_configured(crm, log)?;
  log.info("Fetching companies from HubSpot...");

  let kind = ObjectKind::Company;
  let mut query = ListQuery::first_page(kind, PAGE_SIZE);
  let mut companies = Vec::new();
  let mut pages = 0;

  while pages < MAX_PAGES {
    pages += 1;
    log.info(format!("Fetching page {pages}..."));

    let page = match crm.list_objects(kind, &query).await {
      Ok(page) => page,
      Err(e) => {
        log_call_error(log, "fetching companies", &e);
        break;
      }
    };
    if page.results.is_empty() {
      break;
    }

    log.success(format!(
      "Fetched {} companies from page {pages}",
      page.results.len()
    ));
    companies.extend(page.results);

    match page.next_after {
      Some(after) => query = query.continued(after),
      None => break,
    }
  }

  log.info(format!(
    "Company fetch complete: {} companies retrieved",
    companies.len()
  ));
  Ok(FetchReport {
    summary: FetchSummary {
      total: companies.len(),
      pages,
    },
    companies,
  })
}

#[cfg(test)]
mod tests {
  use seedcrm_core::{CrmError, fake::FakeCrm};

  use super::*;

  fn companies(n: usize) -> Vec<CrmObject> {
    (0..n).map(|i| CrmObject::new(format!("c{i}"))).collect()
  }

  #[tokio::test]
  async fn follows_cursor_until_last_page() {
    let crm = FakeCrm::new().with_objects(ObjectKind::Company, companies(250));
    let mut log = EventLog::new();
    let report = fetch_companies(&crm, &mut log).await.unwrap();
    assert_eq!(report.summary.total, 250);
    assert_eq!(report.summary.pages, 3);
    assert_eq!(report.companies[249].id, "c249");
  }

  #[tokio::test]
  async fn stops_at_page_cap() {
    let crm = FakeCrm::new().with_objects(ObjectKind::Company, companies(1_500));
    let mut log = EventLog::new();
    let report = fetch_companies(&crm, &mut log).await.unwrap();
    assert_eq!(report.summary.pages, MAX_PAGES);
    assert_eq!(report.summary.total, 1_000);
    assert_eq!(crm.call_count(), MAX_PAGES);
  }

  #[tokio::test]
  async fn page_failure_ends_pagination_without_error() {
    let crm = FakeCrm::new().fail_list(
      ObjectKind::Company,
      CrmError::Status { status: 502, body: "bad gateway".into() },
    );
    let mut log = EventLog::new();
    let report = fetch_companies(&crm, &mut log).await.unwrap();
    assert_eq!(report.summary.total, 0);
    assert_eq!(report.summary.pages, 1);
  }

  #[tokio::test]
  async fn recent_fetch_failure_is_fatal() {
    let crm = FakeCrm::new().fail_list(
      ObjectKind::Contact,
      CrmError::Transport("dns".into()),
    );
    let mut log = EventLog::new();
    let err = fetch_recent(&crm, ObjectKind::Contact, &mut log).await.unwrap_err();
    assert!(matches!(err, Error::Fetch { kind: ObjectKind::Contact, .. }));
  }
}
