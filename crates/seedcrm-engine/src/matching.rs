//! Pairing rules for discovery.
//!
//! Both rules are pure: they take already-fetched objects and produce
//! matches in contact fetch order, logging why contacts were skipped.

use std::collections::HashSet;

use seedcrm_core::{
  domain::{company_domain, email_domain},
  entity::{TicketCategory, TicketPriority},
  event::EventLog,
  object::CrmObject,
};
use serde::Serialize;

/// A contact whose email host equals a company's domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainMatch {
  pub contact_id:    String,
  pub company_id:    String,
  pub contact_email: String,
  pub company_name:  Option<String>,
  pub domain:        String,
}

/// A contact paired with a ticket, by priority bucket or by fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMatch {
  pub contact_id:     String,
  pub ticket_id:      String,
  pub contact_email:  String,
  pub ticket_subject: Option<String>,
  pub priority:       TicketPriority,
  pub category:       String,
}

/// A contact with a usable email, and the lowercased host of that email.
struct Keyed<'a> {
  contact: &'a CrmObject,
  email:   &'a str,
  domain:  String,
}

fn keyed<'a>(contacts: &'a [CrmObject], log: &mut EventLog) -> Vec<Keyed<'a>> {
  let mut out = Vec::with_capacity(contacts.len());
  for contact in contacts {
    let Some(email) = contact.property("email") else {
      log.warning(format!("Contact {} has no email address, skipping", contact.id));
      continue;
    };
    let Some(domain) = email_domain(email) else {
      log.warning(format!("Contact {} has invalid email domain, skipping", contact.id));
      continue;
    };
    out.push(Keyed { contact, email, domain });
  }
  out
}

// ─── Domain ──────────────────────────────────────────────────────────────────

/// Pair each contact with the first company (in fetch order) whose domain
/// equals the contact's email host.
pub fn match_by_domain(
  contacts: &[CrmObject],
  companies: &[CrmObject],
  log: &mut EventLog,
) -> Vec<DomainMatch> {
  let domains: Vec<(&CrmObject, Option<String>)> =
    companies.iter().map(|c| (c, company_domain(c))).collect();

  let mut matches = Vec::new();
  for k in keyed(contacts, log) {
    log.info(format!(
      "Checking contact {} ({}) with domain: {}",
      k.contact.id, k.email, k.domain
    ));

    let found = domains
      .iter()
      .find(|(_, d)| d.as_deref() == Some(k.domain.as_str()));
    match found {
      Some((company, _)) => {
        let company_name = company.property("name").map(str::to_owned);
        log.success(format!(
          "Domain match found: Contact {} ({}) → Company {} ({})",
          k.contact.id,
          k.email,
          company.id,
          company_name.as_deref().unwrap_or("unnamed"),
        ));
        matches.push(DomainMatch {
          contact_id: k.contact.id.clone(),
          company_id: company.id.clone(),
          contact_email: k.email.to_owned(),
          company_name,
          domain: k.domain,
        });
      }
      None => log.info(format!("No company found for domain: {}", k.domain)),
    }
  }

  log.info(format!(
    "Found {} domain matches out of {} contacts",
    matches.len(),
    contacts.len()
  ));
  matches
}

// ─── Priority ────────────────────────────────────────────────────────────────

fn ticket_priority(ticket: &CrmObject) -> &str {
  ticket
    .property("hs_ticket_priority")
    .unwrap_or(TicketPriority::Medium.as_str())
}

fn ticket_category(ticket: &CrmObject) -> String {
  ticket
    .property("hs_ticket_category")
    .unwrap_or(TicketCategory::General.as_str())
    .to_owned()
}

/// Pair contacts with tickets.
///
/// First pass: each contact takes the first ticket whose priority equals the
/// contact's bucket (see [`TicketPriority::for_email_domain`]); several
/// contacts may share a ticket here. Second pass: each contact still
/// unmatched takes the first ticket that no contact has yet, recorded with
/// `Medium` priority. A ticket is handed out at most once by the second
/// pass and never one already taken by the first.
///
/// The fallback runs only after every contact has had its priority pass, so
/// a later contact's priority match takes precedence over an earlier
/// contact's fallback.
pub fn match_by_priority(
  contacts: &[CrmObject],
  tickets: &[CrmObject],
  log: &mut EventLog,
) -> Vec<TicketMatch> {
  let keyed = keyed(contacts, log);
  let mut slots: Vec<Option<TicketMatch>> = vec![None; keyed.len()];
  let mut taken: HashSet<&str> = HashSet::new();

  for (slot, k) in slots.iter_mut().zip(&keyed) {
    let bucket = TicketPriority::for_email_domain(&k.domain);
    log.info(format!(
      "Checking contact {} ({}) with domain: {}",
      k.contact.id, k.email, k.domain
    ));

    if let Some(ticket) = tickets.iter().find(|t| ticket_priority(t) == bucket.as_str()) {
      log.success(format!(
        "Priority match found: Contact {} ({}) → Ticket {} - Priority: {}",
        k.contact.id,
        k.email,
        ticket.id,
        bucket.as_str()
      ));
      taken.insert(&ticket.id);
      *slot = Some(pair(k, ticket, bucket));
    }
  }

  for (slot, k) in slots.iter_mut().zip(&keyed) {
    if slot.is_some() {
      continue;
    }
    match tickets.iter().find(|t| !taken.contains(t.id.as_str())) {
      Some(ticket) => {
        log.success(format!(
          "Fallback match: Contact {} ({}) → Ticket {}",
          k.contact.id, k.email, ticket.id
        ));
        taken.insert(&ticket.id);
        *slot = Some(pair(k, ticket, TicketPriority::Medium));
      }
      None => log.info(format!(
        "No ticket left for contact {} ({})",
        k.contact.id, k.email
      )),
    }
  }

  let matches: Vec<_> = slots.into_iter().flatten().collect();
  log.info(format!(
    "Found {} contact-ticket matches out of {} contacts",
    matches.len(),
    contacts.len()
  ));
  matches
}

fn pair(k: &Keyed<'_>, ticket: &CrmObject, priority: TicketPriority) -> TicketMatch {
  TicketMatch {
    contact_id: k.contact.id.clone(),
    ticket_id: ticket.id.clone(),
    contact_email: k.email.to_owned(),
    ticket_subject: ticket.property("subject").map(str::to_owned),
    priority,
    category: ticket_category(ticket),
  }
}
