//! Locally generated records, before and while they are pushed to the CRM.
//!
//! Field names follow the CRM's property names so the JSON accepted by the
//! API and the properties sent upstream line up one to one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::object::{ObjectKind, Properties};

// ─── Record trait ────────────────────────────────────────────────────────────

/// A local record that can be created as a CRM object.
pub trait Record {
  const KIND: ObjectKind;

  /// Identifier assigned at generation time; never sent to the CRM.
  fn local_id(&self) -> Uuid;

  /// Short description used in log lines.
  fn label(&self) -> String;

  /// Properties for the creation request. Blank values are omitted.
  fn properties(&self) -> Properties;
}

fn put(props: &mut Properties, key: &str, value: impl ToString) {
  let value = value.to_string();
  if !value.trim().is_empty() {
    props.insert(key.to_owned(), value);
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
  pub id:        Uuid,
  pub email:     String,
  pub firstname: String,
  pub lastname:  String,
  pub phone:     String,
  /// Name of the employer; the email domain is derived from it.
  pub company:   String,
  pub jobtitle:  String,
  pub address:   String,
  pub city:      String,
  pub state:     String,
  pub zip:       String,
  pub country:   String,
  pub website:   String,
}

impl Record for Contact {
  const KIND: ObjectKind = ObjectKind::Contact;

  fn local_id(&self) -> Uuid { self.id }

  fn label(&self) -> String {
    format!("{} {} ({})", self.firstname, self.lastname, self.email)
  }

  fn properties(&self) -> Properties {
    let mut p = Properties::new();
    put(&mut p, "email", &self.email);
    put(&mut p, "firstname", &self.firstname);
    put(&mut p, "lastname", &self.lastname);
    put(&mut p, "phone", &self.phone);
    put(&mut p, "company", &self.company);
    put(&mut p, "jobtitle", &self.jobtitle);
    put(&mut p, "address", &self.address);
    put(&mut p, "city", &self.city);
    put(&mut p, "state", &self.state);
    put(&mut p, "zip", &self.zip);
    put(&mut p, "country", &self.country);
    put(&mut p, "website", &self.website);
    p
  }
}

// ─── Company ─────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
  #[default]
  Technology,
  Healthcare,
  Finance,
  Education,
  Retail,
  Manufacturing,
  Consulting,
  RealEstate,
}

impl Industry {
  pub const ALL: [Self; 8] = [
    Self::Technology,
    Self::Healthcare,
    Self::Finance,
    Self::Education,
    Self::Retail,
    Self::Manufacturing,
    Self::Consulting,
    Self::RealEstate,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Technology => "technology",
      Self::Healthcare => "healthcare",
      Self::Finance => "finance",
      Self::Education => "education",
      Self::Retail => "retail",
      Self::Manufacturing => "manufacturing",
      Self::Consulting => "consulting",
      Self::RealEstate => "real_estate",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
  pub id:                Uuid,
  pub name:              String,
  pub domain:            String,
  pub phone:             String,
  pub address:           String,
  pub city:              String,
  pub state:             String,
  pub zip:               String,
  pub country:           String,
  pub website:           String,
  pub industry:          Industry,
  pub description:       String,
  pub numberofemployees: u32,
  pub annualrevenue:     u64,
}

impl Record for Company {
  const KIND: ObjectKind = ObjectKind::Company;

  fn local_id(&self) -> Uuid { self.id }

  fn label(&self) -> String { format!("{} ({})", self.name, self.domain) }

  fn properties(&self) -> Properties {
    let mut p = Properties::new();
    put(&mut p, "name", &self.name);
    put(&mut p, "domain", &self.domain);
    put(&mut p, "phone", &self.phone);
    put(&mut p, "address", &self.address);
    put(&mut p, "city", &self.city);
    put(&mut p, "state", &self.state);
    put(&mut p, "zip", &self.zip);
    put(&mut p, "country", &self.country);
    put(&mut p, "website", &self.website);
    put(&mut p, "industry", self.industry.as_str());
    put(&mut p, "description", &self.description);
    put(&mut p, "numberofemployees", self.numberofemployees);
    put(&mut p, "annualrevenue", self.annualrevenue);
    p
  }
}

// ─── Ticket ──────────────────────────────────────────────────────────────────

/// Ticket priority, also used to bucket contacts when matching them to
/// tickets.
///
/// Serialised in the CRM's uppercase spelling; lowercase is accepted on
/// input.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketPriority {
  #[serde(alias = "low")]
  Low,
  #[default]
  #[serde(alias = "medium")]
  Medium,
  #[serde(alias = "high")]
  High,
  #[serde(alias = "urgent")]
  Urgent,
}

impl TicketPriority {
  pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "LOW",
      Self::Medium => "MEDIUM",
      Self::High => "HIGH",
      Self::Urgent => "URGENT",
    }
  }

  /// Bucket a contact by keywords in its email domain: executives are
  /// `High`, managers and directors `Medium`, everyone else `Low`.
  pub fn for_email_domain(domain: &str) -> Self {
    const HIGH: &[&str] = &["exec", "ceo", "president"];
    const MEDIUM: &[&str] = &["manager", "director"];

    if HIGH.iter().any(|k| domain.contains(k)) {
      Self::High
    } else if MEDIUM.iter().any(|k| domain.contains(k)) {
      Self::Medium
    } else {
      Self::Low
    }
  }
}

macro_rules! snake_enum {
  (
    $(#[$meta:meta])*
    $name:ident { $first:ident => $first_s:literal $(, $variant:ident => $s:literal)* $(,)? }
  ) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    )]
    #[serde(rename_all = "snake_case")]
    pub enum $name {
      #[default]
      $first,
      $($variant,)*
    }

    impl $name {
      pub const ALL: &'static [Self] = &[Self::$first $(, Self::$variant)*];

      pub fn as_str(self) -> &'static str {
        match self {
          Self::$first => $first_s,
          $(Self::$variant => $s,)*
        }
      }
    }
  };
}

snake_enum!(TicketCategory {
  General => "general",
  Technical => "technical",
  Billing => "billing",
  FeatureRequest => "feature_request",
  BugReport => "bug_report",
});

snake_enum!(PipelineStage {
  Open => "open",
  WaitingOnCustomer => "waiting_on_customer",
  WaitingOnThirdParty => "waiting_on_third_party",
  Closed => "closed",
});

snake_enum!(TicketSource {
  Email => "email",
  Chat => "chat",
  Phone => "phone",
  WebForm => "web_form",
  SocialMedia => "social_media",
});

snake_enum!(TicketType {
  Question => "question",
  Bug => "bug",
  FeatureRequest => "feature_request",
  Complaint => "complaint",
  Compliment => "compliment",
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticket {
  pub id:                 Uuid,
  pub subject:            String,
  pub content:            String,
  pub hs_ticket_priority: TicketPriority,
  pub hs_ticket_category: TicketCategory,
  pub hs_ticket_owner_id: String,
  pub hs_pipeline:        String,
  pub hs_pipeline_stage:  PipelineStage,
  pub hs_ticket_source:   TicketSource,
  pub hs_ticket_type:     TicketType,
}

impl Record for Ticket {
  const KIND: ObjectKind = ObjectKind::Ticket;

  fn local_id(&self) -> Uuid { self.id }

  fn label(&self) -> String {
    format!("{} ({} priority)", self.subject, self.hs_ticket_priority.as_str())
  }

  // Stage and type are local only; the CRM rejects values outside the
  // portal's configured pipeline.
  fn properties(&self) -> Properties {
    let mut p = Properties::new();
    put(&mut p, "subject", &self.subject);
    put(&mut p, "content", &self.content);
    put(&mut p, "hs_ticket_priority", self.hs_ticket_priority.as_str());
    put(&mut p, "hs_ticket_category", self.hs_ticket_category.as_str());
    put(&mut p, "hs_ticket_owner_id", &self.hs_ticket_owner_id);
    put(&mut p, "hs_pipeline", &self.hs_pipeline);
    put(&mut p, "hs_ticket_source", self.hs_ticket_source.as_str());
    p
  }
}
