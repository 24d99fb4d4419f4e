//! Push batches: companies on their own, contacts and tickets linked to
//! records that already exist in the CRM.

use std::time::Duration;

use rand::Rng;
use seedcrm_core::{
  association::{AssociationType, LinkRequest},
  crm::CrmClient,
  domain::company_domain,
  entity::{Company, Contact, Record, Ticket},
  event::EventLog,
  object::{CrmObject, ObjectKind},
};
use seedcrm_faker::email_for;

use crate::{
  Error, Result,
  fetch::fetch_recent,
  gateway::{create_many, create_one, ensure_configured},
  link::link_with_fallback,
  report::{
    BatchOutcome, BatchSummary, CreatedItem, FailedItem, LinkedPushReport,
    LinkedPushSummary, PushReport, QueuedLink,
  },
};

/// Default settle time before linking freshly created contacts.
pub const CONTACT_LINK_DELAY: Duration = Duration::from_secs(10);
/// Default settle time before linking freshly created tickets.
pub const TICKET_LINK_DELAY: Duration = Duration::from_secs(5);

// ─── Companies ───────────────────────────────────────────────────────────────

pub async fn push_companies<C: CrmClient>(
  crm: &C,
  companies: &[Company],
  log: &mut EventLog,
) -> Result<PushReport> {
  let outcome = create_many(crm, companies, log).await?;
  Ok(PushReport {
    summary: BatchSummary {
      total:      companies.len(),
      successful: outcome.results.len(),
      failed:     outcome.errors.len(),
    },
    outcome,
  })
}

// ─── Contacts ────────────────────────────────────────────────────────────────

/// Create each contact at a randomly chosen existing company, then link it
/// to that company.
///
/// The contact's email and website are rewritten onto the company's domain
/// and its `company` field to the company's name. Linking starts once the
/// whole batch is created and `delay` has elapsed.
pub async fn push_contacts<C, R>(
  crm: &C,
  rng: &mut R,
  contacts: &[Contact],
  delay: Duration,
  log: &mut EventLog,
) -> Result<LinkedPushReport>
where
  C: CrmClient,
  R: Rng + Send,
{
  ensure_configured(crm, log)?;
  let companies = existing(crm, ObjectKind::Company, log).await?;
  log.info(format!("Starting to process {} contacts...", contacts.len()));

  let mut outcome = BatchOutcome::default();
  let mut queued = Vec::new();

  for contact in contacts {
    let company = &companies[rng.random_range(0..companies.len())];
    let company_name = company.property("name").unwrap_or(&company.id);

    let Some(domain) = company_domain(company) else {
      log.failure(format!("No domain found for company: {company_name}"));
      outcome
        .errors
        .push(FailedItem::new(contact.id, "No domain found for selected company"));
      continue;
    };
    log.info(format!("Selected company: {company_name} ({domain})"));

    let placed = Contact {
      email: email_for(rng, &contact.firstname, &contact.lastname, &domain),
      website: format!("https://www.{domain}"),
      company: company_name.to_owned(),
      ..contact.clone()
    };
    let label = placed.label();
    log.info(format!("Sending contact: {label}"));

    match create_one(crm, ObjectKind::Contact, placed.id, &label, placed.properties(), log).await
    {
      Ok(created) => {
        queue(
          &mut queued,
          LinkRequest::new(AssociationType::ContactToCompany, &created.id, &company.id),
          log,
        );
        outcome.results.push(created_item(contact.id, created));
      }
      Err(failed) => outcome.errors.push(failed),
    }
  }

  settle_and_link(crm, &mut queued, delay, log).await;
  Ok(linked_report(outcome, queued))
}

// ─── Tickets ─────────────────────────────────────────────────────────────────

/// Create each ticket, then link it to a randomly chosen existing contact
/// once the batch is done and `delay` has elapsed.
pub async fn push_tickets<C, R>(
  crm: &C,
  rng: &mut R,
  tickets: &[Ticket],
  delay: Duration,
  log: &mut EventLog,
) -> Result<LinkedPushReport>
where
  C: CrmClient,
  R: Rng + Send,
{
  ensure_configured(crm, log)?;
  let contacts = existing(crm, ObjectKind::Contact, log).await?;
  log.info(format!("Starting to process {} tickets...", tickets.len()));

  let mut outcome = BatchOutcome::default();
  let mut queued = Vec::new();

  for ticket in tickets {
    let contact = &contacts[rng.random_range(0..contacts.len())];
    log.info(format!(
      "Selected contact: {} ({})",
      contact.id,
      contact.property("email").unwrap_or("no email")
    ));

    let label = ticket.label();
    log.info(format!("Sending ticket: {label}"));

    match create_one(crm, ObjectKind::Ticket, ticket.id, &label, ticket.properties(), log).await
    {
      Ok(created) => {
        queue(
          &mut queued,
          LinkRequest::new(AssociationType::TicketToContact, &created.id, &contact.id),
          log,
        );
        outcome.results.push(created_item(ticket.id, created));
      }
      Err(failed) => outcome.errors.push(failed),
    }
  }

  settle_and_link(crm, &mut queued, delay, log).await;
  Ok(linked_report(outcome, queued))
}

// ─── Shared steps ────────────────────────────────────────────────────────────

/// The records a batch links to; there must be at least one.
async fn existing<C: CrmClient>(
  crm: &C,
  kind: ObjectKind,
  log: &mut EventLog,
) -> Result<Vec<CrmObject>> {
  let objects = fetch_recent(crm, kind, log).await?;
  if objects.is_empty() {
    log.failure(format!("No {kind} found in HubSpot"));
    return Err(Error::NothingToAssign(kind));
  }
  Ok(objects)
}

fn created_item(local_id: uuid::Uuid, created: CrmObject) -> CreatedItem {
  CreatedItem {
    local_id,
    remote_id: created.id,
    success: true,
  }
}

fn queue(queued: &mut Vec<QueuedLink>, link: LinkRequest, log: &mut EventLog) {
  log.info(format!("Queued association: {link}"));
  queued.push(QueuedLink::pending(&link));
}

/// Wait out `delay`, then drive every queued link to a terminal state.
async fn settle_and_link<C: CrmClient>(
  crm: &C,
  queued: &mut [QueuedLink],
  delay: Duration,
  log: &mut EventLog,
) {
  if queued.is_empty() {
    return;
  }

  log.info(format!("Creating {} associations...", queued.len()));
  if !delay.is_zero() {
    log.info(format!(
      "Waiting {} seconds for HubSpot to index the new records...",
      delay.as_secs_f32()
    ));
    tokio::time::sleep(delay).await;
  }

  for link in queued.iter_mut() {
    link.state = link_with_fallback(crm, link.request(), log).await;
  }
}

fn linked_report(outcome: BatchOutcome, associations: Vec<QueuedLink>) -> LinkedPushReport {
  let created = associations.iter().filter(|l| l.state.succeeded()).count();
  LinkedPushReport {
    summary: LinkedPushSummary {
      total:                  outcome.total(),
      successful:             outcome.results.len(),
      failed:                 outcome.errors.len(),
      associations_attempted: associations.len(),
      associations_created:   created,
      associations_failed:    associations.len() - created,
    },
    outcome,
    associations,
  }
}
