//! Fetch, match, link: associating existing CRM records.

use seedcrm_core::{
  association::{AssociationType, LinkRequest},
  crm::CrmClient,
  event::EventLog,
  object::{CrmObject, ObjectKind},
};
use serde::Serialize;

use crate::{
  Result,
  fetch::fetch_recent,
  gateway::ensure_configured,
  link::link_once,
  matching::{DomainMatch, TicketMatch, match_by_domain, match_by_priority},
  report::{DiscoveryReport, DiscoverySummary, LinkFailed, Linked},
};

/// A pairing rule between contacts and one other object kind.
pub trait Matcher {
  type Pair: Serialize + Clone + Send + Sync;

  /// The kind contacts are matched against.
  const TARGET: ObjectKind;
  const ASSOCIATION: AssociationType;

  fn pair(
    contacts: &[CrmObject],
    targets: &[CrmObject],
    log: &mut EventLog,
  ) -> Vec<Self::Pair>;

  /// `(contact id, target id)` of a pair.
  fn endpoints(pair: &Self::Pair) -> (&str, &str);
}

/// Contacts to companies by email host.
pub struct ByDomain;

impl Matcher for ByDomain {
  type Pair = DomainMatch;

  const ASSOCIATION: AssociationType = AssociationType::ContactToCompany;
  const TARGET: ObjectKind = ObjectKind::Company;

  fn pair(
    contacts: &[CrmObject],
    targets: &[CrmObject],
    log: &mut EventLog,
  ) -> Vec<DomainMatch> {
    match_by_domain(contacts, targets, log)
  }

  fn endpoints(pair: &DomainMatch) -> (&str, &str) {
    (&pair.contact_id, &pair.company_id)
  }
}

/// Contacts to tickets by priority bucket, with fallback.
pub struct ByPriority;

impl Matcher for ByPriority {
  type Pair = TicketMatch;

  const ASSOCIATION: AssociationType = AssociationType::ContactToTicket;
  const TARGET: ObjectKind = ObjectKind::Ticket;

  fn pair(
    contacts: &[CrmObject],
    targets: &[CrmObject],
    log: &mut EventLog,
  ) -> Vec<TicketMatch> {
    match_by_priority(contacts, targets, log)
  }

  fn endpoints(pair: &TicketMatch) -> (&str, &str) {
    (&pair.contact_id, &pair.ticket_id)
  }
}

/// Run one discovery pass with matcher `M`.
///
/// Either fetch failing is fatal. Empty inputs and an empty match set are
/// successful runs that link nothing. Link failures are collected per pair.
pub async fn discover<M, C>(
  crm: &C,
  log: &mut EventLog,
) -> Result<DiscoveryReport<M::Pair>>
where
  M: Matcher,
  C: CrmClient,
{
  ensure_configured(crm, log)?;
  let target = M::TARGET;
  log.info(format!("Starting contact-{} association process...", target.singular()));

  let targets = fetch_recent(crm, target, log).await?;
  let contacts = fetch_recent(crm, ObjectKind::Contact, log).await?;

  let mut summary = DiscoverySummary {
    total_contacts: contacts.len(),
    total_targets: targets.len(),
    ..DiscoverySummary::default()
  };

  if targets.is_empty() || contacts.is_empty() {
    let message = format!("No {target} or contacts found in HubSpot; nothing to associate");
    log.warning(message.clone());
    return Ok(DiscoveryReport::nothing_to_link(message, summary));
  }

  log.info(format!("Searching for contact-{} matches...", target.singular()));
  let matches = M::pair(&contacts, &targets, log);
  summary.matches_found = matches.len();

  if matches.is_empty() {
    let message = format!("No contact-{} matches found", target.singular());
    log.warning(message.clone());
    return Ok(DiscoveryReport::nothing_to_link(message, summary));
  }

  log.info(format!("Creating associations for {} matches...", matches.len()));
  let mut results = Vec::new();
  let mut errors = Vec::new();

  for pair in &matches {
    let (contact_id, target_id) = M::endpoints(pair);
    let link = LinkRequest::new(M::ASSOCIATION, contact_id, target_id);
    match link_once(crm, link, log).await {
      Ok(()) => results.push(Linked {
        pair:    pair.clone(),
        success: true,
      }),
      Err(e) => errors.push(LinkFailed {
        pair:    pair.clone(),
        error:   e.payload(),
        success: false,
      }),
    }
  }

  summary.associations_created = results.len();
  summary.associations_failed = errors.len();
  log.info(format!(
    "Association processing complete: {} successful, {} failed",
    results.len(),
    errors.len()
  ));

  Ok(DiscoveryReport {
    message: None,
    matches,
    results,
    errors,
    summary,
  })
}

pub async fn associate_by_domain<C: CrmClient>(
  crm: &C,
  log: &mut EventLog,
) -> Result<DiscoveryReport<DomainMatch>> {
  discover::<ByDomain, C>(crm, log).await
}

pub async fn associate_by_priority<C: CrmClient>(
  crm: &C,
  log: &mut EventLog,
) -> Result<DiscoveryReport<TicketMatch>> {
  discover::<ByPriority, C>(crm, log).await
}

#[cfg(test)]
mod tests {
  use seedcrm_core::{
    CrmError,
    fake::{Call, FakeCrm},
  };

  use super::*;
  use crate::Error;

  fn company(id: &str, domain: &str) -> CrmObject {
    CrmObject::new(id).with_property("domain", domain)
  }

  fn contact(id: &str, email: &str) -> CrmObject {
    CrmObject::new(id).with_property("email", email)
  }

  #[tokio::test]
  async fn no_contacts_is_a_successful_empty_run() {
    let crm = FakeCrm::new().with_objects(ObjectKind::Company, [company("k1", "acme.com")]);
    let mut log = EventLog::new();
    let report = associate_by_domain(&crm, &mut log).await.unwrap();

    assert_eq!(report.summary.matches_found, 0);
    assert_eq!(report.summary.total_targets, 1);
    assert!(report.message.is_some());
    assert!(crm.links().is_empty());
  }

  #[tokio::test]
  async fn no_matching_domains_links_nothing() {
    let crm = FakeCrm::new()
      .with_objects(ObjectKind::Company, [company("k1", "acme.com")])
      .with_objects(ObjectKind::Contact, [contact("c1", "eve@nowhere.net")]);
    let mut log = EventLog::new();
    let report = associate_by_domain(&crm, &mut log).await.unwrap();

    assert_eq!(report.summary.matches_found, 0);
    assert_eq!(report.summary.total_contacts, 1);
    assert_eq!(report.summary.total_targets, 1);
    assert!(report.message.is_some());
    assert!(report.results.is_empty());
    assert!(crm.links().is_empty());
  }

  #[tokio::test]
  async fn links_each_domain_match() {
    let crm = FakeCrm::new()
      .with_objects(ObjectKind::Company, [company("k1", "acme.com"), company("k2", "hooli.io")])
      .with_objects(ObjectKind::Contact, [
        contact("c1", "bob@acme.com"),
        contact("c2", "eve@nowhere.net"),
        contact("c3", "gavin@hooli.io"),
      ])
      .script_links([None, Some(CrmError::Status { status: 400, body: "nope".into() })]);
    let mut log = EventLog::new();
    let report = associate_by_domain(&crm, &mut log).await.unwrap();

    assert_eq!(report.summary, DiscoverySummary {
      total_contacts:       3,
      total_targets:        2,
      matches_found:        2,
      associations_created: 1,
      associations_failed:  1,
    });
    assert_eq!(report.results[0].pair.company_id, "k1");
    assert_eq!(report.errors[0].pair.contact_id, "c3");
    assert_eq!(report.errors[0].error, "nope");

    let links = crm.links();
    assert_eq!(links[0].from_id, "c1");
    assert_eq!(links[0].association, AssociationType::ContactToCompany);
  }

  #[tokio::test]
  async fn targets_are_fetched_before_contacts() {
    let crm = FakeCrm::new();
    let mut log = EventLog::new();
    associate_by_priority(&crm, &mut log).await.unwrap();

    let kinds: Vec<_> = crm
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        Call::List { kind, .. } => Some(kind),
        _ => None,
      })
      .collect();
    assert_eq!(kinds, [ObjectKind::Ticket, ObjectKind::Contact]);
  }

  #[tokio::test]
  async fn ticket_links_go_contact_to_ticket() {
    let crm = FakeCrm::new()
      .with_objects(ObjectKind::Ticket, [
        CrmObject::new("t1").with_property("hs_ticket_priority", "LOW"),
      ])
      .with_objects(ObjectKind::Contact, [contact("c1", "sam@shop.com")]);
    let mut log = EventLog::new();
    let report = associate_by_priority(&crm, &mut log).await.unwrap();

    assert_eq!(report.summary.associations_created, 1);
    let links = crm.links();
    assert_eq!(links[0].association, AssociationType::ContactToTicket);
    assert_eq!((links[0].from_id.as_str(), links[0].to_id.as_str()), ("c1", "t1"));
  }

  #[tokio::test]
  async fn fetch_failure_aborts() {
    let crm = FakeCrm::new()
      .with_objects(ObjectKind::Company, [company("k1", "acme.com")])
      .fail_list(ObjectKind::Contact, CrmError::Status { status: 401, body: "expired".into() });
    let mut log = EventLog::new();
    let err = associate_by_domain(&crm, &mut log).await.unwrap_err();
    assert!(matches!(err, Error::Fetch { kind: ObjectKind::Contact, .. }));
    assert!(crm.links().is_empty());
  }

  #[tokio::test]
  async fn missing_credential_makes_no_calls() {
    let crm = FakeCrm::unconfigured();
    let mut log = EventLog::new();
    let err = associate_by_priority(&crm, &mut log).await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured));
    assert_eq!(crm.call_count(), 0);
  }
}
