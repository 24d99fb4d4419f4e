//! Association types and link requests.
//!
//! The CRM identifies each directed kind pair by a numeric association type
//! id fixed by its schema. Keep the mapping here and nowhere else.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::object::ObjectKind;

/// A directed, CRM-defined association between two object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationType {
  ContactToCompany,
  CompanyToContact,
  ContactToTicket,
  TicketToContact,
  CompanyToTicket,
  TicketToCompany,
}

impl AssociationType {
  pub fn from_kind(self) -> ObjectKind {
    match self {
      Self::ContactToCompany | Self::ContactToTicket => ObjectKind::Contact,
      Self::CompanyToContact | Self::CompanyToTicket => ObjectKind::Company,
      Self::TicketToContact | Self::TicketToCompany => ObjectKind::Ticket,
    }
  }

  pub fn to_kind(self) -> ObjectKind {
    match self {
      Self::CompanyToContact | Self::TicketToContact => ObjectKind::Contact,
      Self::ContactToCompany | Self::TicketToCompany => ObjectKind::Company,
      Self::ContactToTicket | Self::CompanyToTicket => ObjectKind::Ticket,
    }
  }

  /// HubSpot's `associationTypeId` for this pair.
  pub fn type_id(self) -> u32 {
    match self {
      Self::ContactToCompany => 1,
      Self::CompanyToContact => 2,
      Self::ContactToTicket => 15,
      Self::TicketToContact => 16,
      Self::CompanyToTicket => 25,
      Self::TicketToCompany => 26,
    }
  }

  /// All of the above are defined by the CRM, not by the portal owner.
  pub fn category(self) -> &'static str { "HUBSPOT_DEFINED" }
}

/// Which generation of the association API a link request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkApi {
  /// Current API; type ids travel in the request body.
  V4,
  /// Legacy API; the type id is the last path segment.
  V3,
}

/// A request to link two existing CRM objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
  pub api:         LinkApi,
  pub association: AssociationType,
  pub from_id:     String,
  pub to_id:       String,
}

impl LinkRequest {
  /// A link over the current API.
  pub fn new(
    association: AssociationType,
    from_id: impl Into<String>,
    to_id: impl Into<String>,
  ) -> Self {
    Self {
      api: LinkApi::V4,
      association,
      from_id: from_id.into(),
      to_id: to_id.into(),
    }
  }

  /// The same link addressed to another API generation.
  pub fn via(self, api: LinkApi) -> Self { Self { api, ..self } }
}

impl fmt::Display for LinkRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} → {} {}",
      capitalised(self.association.from_kind().singular()),
      self.from_id,
      capitalised(self.association.to_kind().singular()),
      self.to_id,
    )
  }
}

fn capitalised(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const EVERY: [AssociationType; 6] = [
    AssociationType::ContactToCompany,
    AssociationType::CompanyToContact,
    AssociationType::ContactToTicket,
    AssociationType::TicketToContact,
    AssociationType::CompanyToTicket,
    AssociationType::TicketToCompany,
  ];

  #[test]
  fn no_self_associations() {
    for t in EVERY {
      assert_ne!(t.from_kind(), t.to_kind(), "{t:?}");
    }
  }

  #[test]
  fn type_ids_are_distinct() {
    let mut ids: Vec<_> = EVERY.iter().map(|t| t.type_id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), EVERY.len());
  }

  #[test]
  fn ticket_contact_ids_follow_direction() {
    assert_eq!(AssociationType::ContactToTicket.type_id(), 15);
    assert_eq!(AssociationType::TicketToContact.type_id(), 16);
    assert_eq!(AssociationType::TicketToContact.from_kind(), ObjectKind::Ticket);
  }

  #[test]
  fn display_names_both_ends() {
    let link = LinkRequest::new(AssociationType::TicketToContact, "7", "9");
    assert_eq!(link.to_string(), "Ticket 7 → Contact 9");
    assert_eq!(link.via(LinkApi::V3).api, LinkApi::V3);
  }
}
