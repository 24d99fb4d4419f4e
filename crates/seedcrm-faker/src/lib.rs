//! Synthetic contacts, companies and tickets.
//!
//! Every generator takes the random source as a parameter: pass a seeded
//! [`rand::rngs::StdRng`] for reproducible output. Nothing here performs I/O.

pub mod identity;
pub mod pools;

use rand::Rng;
use seedcrm_core::entity::{
  Company, Contact, Industry, PipelineStage, Ticket, TicketCategory,
  TicketPriority, TicketSource, TicketType,
};
use uuid::{Builder, Uuid};

pub use identity::{derive_domain, email_for};
use pools::*;

/// Uniform pick from a non-empty pool.
pub(crate) fn pick<'a, R: Rng, T>(rng: &mut R, pool: &'a [T]) -> &'a T {
  &pool[rng.random_range(0..pool.len())]
}

fn local_id<R: Rng>(rng: &mut R) -> Uuid {
  Builder::from_random_bytes(rng.random()).into_uuid()
}

// ─── Contacts ────────────────────────────────────────────────────────────────

pub fn generate_contacts<R: Rng>(rng: &mut R, count: usize) -> Vec<Contact> {
  (0..count).map(|_| contact(rng)).collect()
}

/// One contact employed by a company from [`COMPANY_NAMES`], with an email
/// and website on that company's derived domain.
pub fn contact<R: Rng>(rng: &mut R) -> Contact {
  let firstname = pick(rng, FIRST_NAMES).to_string();
  let lastname = pick(rng, LAST_NAMES).to_string();
  let company = pick(rng, COMPANY_NAMES).to_string();
  let domain = derive_domain(rng, &company);
  let email = email_for(rng, &firstname, &lastname, &domain);

  Contact {
    id: local_id(rng),
    email,
    firstname,
    lastname,
    phone: phone(rng),
    company,
    jobtitle: job_title(rng),
    address: street_address(rng),
    city: pick(rng, CITIES).to_string(),
    state: pick(rng, STATES).to_string(),
    zip: zip(rng),
    country: pick(rng, COUNTRIES).to_string(),
    website: format!("https://www.{domain}"),
  }
}

// ─── Companies ───────────────────────────────────────────────────────────────

pub fn generate_companies<R: Rng>(rng: &mut R, count: usize) -> Vec<Company> {
  (0..count).map(|_| company(rng)).collect()
}

pub fn company<R: Rng>(rng: &mut R) -> Company {
  let name = company_name(rng);
  let domain = derive_domain(rng, &name);

  Company {
    id: local_id(rng),
    website: format!("https://www.{domain}"),
    name,
    domain,
    phone: phone(rng),
    address: street_address(rng),
    city: pick(rng, CITIES).to_string(),
    state: pick(rng, STATES).to_string(),
    zip: zip(rng),
    country: pick(rng, COUNTRIES).to_string(),
    industry: *pick(rng, &Industry::ALL),
    description: catch_phrase(rng),
    numberofemployees: rng.random_range(1..=10_000),
    annualrevenue: rng.random_range(10_000..=1_000_000_000),
  }
}

/// A surname-based company name such as `"Novak-Reyes"` or
/// `"Silva, Weber and Ito"`.
pub fn company_name<R: Rng>(rng: &mut R) -> String {
  match rng.random_range(0..3) {
    0 => format!("{} {}", pick(rng, LAST_NAMES), pick(rng, COMPANY_SUFFIXES)),
    1 => format!("{}-{}", pick(rng, LAST_NAMES), pick(rng, LAST_NAMES)),
    _ => format!(
      "{}, {} and {}",
      pick(rng, LAST_NAMES),
      pick(rng, LAST_NAMES),
      pick(rng, LAST_NAMES)
    ),
  }
}

// ─── Tickets ─────────────────────────────────────────────────────────────────

pub fn generate_tickets<R: Rng>(rng: &mut R, count: usize) -> Vec<Ticket> {
  (0..count).map(|_| ticket(rng)).collect()
}

pub fn ticket<R: Rng>(rng: &mut R) -> Ticket {
  Ticket {
    id:                 local_id(rng),
    subject:            pick(rng, TICKET_SUBJECTS).to_string(),
    content:            format!("{}\n\n{}", paragraph(rng), paragraph(rng)),
    hs_ticket_priority: *pick(rng, &TicketPriority::ALL),
    hs_ticket_category: *pick(rng, TicketCategory::ALL),
    hs_ticket_owner_id: format!("{:06}", rng.random_range(0..1_000_000)),
    hs_pipeline:        "0".to_owned(),
    hs_pipeline_stage:  *pick(rng, PipelineStage::ALL),
    hs_ticket_source:   *pick(rng, TicketSource::ALL),
    hs_ticket_type:     *pick(rng, TicketType::ALL),
  }
}

// ─── Field helpers ───────────────────────────────────────────────────────────

fn phone<R: Rng>(rng: &mut R) -> String {
  format!(
    "({}) {:03}-{:04}",
    rng.random_range(200..1000),
    rng.random_range(0..1000),
    rng.random_range(0..10_000)
  )
}

fn zip<R: Rng>(rng: &mut R) -> String { format!("{:05}", rng.random_range(501..100_000)) }

fn street_address<R: Rng>(rng: &mut R) -> String {
  format!(
    "{} {} {}",
    rng.random_range(1..10_000),
    pick(rng, STREET_NAMES),
    pick(rng, STREET_SUFFIXES)
  )
}

fn job_title<R: Rng>(rng: &mut R) -> String {
  format!(
    "{} {} {}",
    pick(rng, JOB_LEVELS),
    pick(rng, JOB_AREAS),
    pick(rng, JOB_ROLES)
  )
}

fn catch_phrase<R: Rng>(rng: &mut R) -> String {
  format!(
    "{} {} {}",
    pick(rng, CATCH_ADJECTIVES),
    pick(rng, CATCH_DESCRIPTORS),
    pick(rng, CATCH_NOUNS)
  )
}

fn paragraph<R: Rng>(rng: &mut R) -> String {
  let sentences = rng.random_range(3..=5);
  (0..sentences)
    .map(|_| *pick(rng, TICKET_SENTENCES))
    .collect::<Vec<_>>()
    .join(" ")
}
