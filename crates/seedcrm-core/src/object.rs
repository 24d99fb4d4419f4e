//! Remote CRM records as the CRM itself reports them.
//!
//! Locally generated entities live in [`crate::entity`]; once pushed, the CRM
//! hands back a [`CrmObject`] carrying its own identifier and a loose bag of
//! string properties.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// The object types seedcrm reads and writes.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
  Contact,
  Company,
  Ticket,
}

impl ObjectKind {
  /// Path segment used by the object endpoints, e.g. `contacts`.
  pub fn plural(self) -> &'static str {
    match self {
      Self::Contact => "contacts",
      Self::Company => "companies",
      Self::Ticket => "tickets",
    }
  }

  pub fn singular(self) -> &'static str {
    match self {
      Self::Contact => "contact",
      Self::Company => "company",
      Self::Ticket => "ticket",
    }
  }

  /// Property names requested when listing objects of this kind.
  pub fn list_properties(self) -> &'static [&'static str] {
    match self {
      Self::Contact => &["email", "firstname", "lastname"],
      Self::Company => &["name", "domain", "website", "industry"],
      Self::Ticket => &[
        "subject",
        "content",
        "hs_ticket_priority",
        "hs_ticket_category",
      ],
    }
  }
}

impl fmt::Display for ObjectKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.plural())
  }
}

// ─── Objects ─────────────────────────────────────────────────────────────────

/// Outbound property map for object creation.
pub type Properties = BTreeMap<String, String>;

/// A record as stored by the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrmObject {
  /// The CRM-assigned identifier.
  pub id:         String,
  /// Property values; the CRM reports unset properties as `null`.
  #[serde(default)]
  pub properties: BTreeMap<String, Option<String>>,
}

impl CrmObject {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id:         id.into(),
      properties: BTreeMap::new(),
    }
  }

  pub fn with_property(
    mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.properties.insert(key.into(), Some(value.into()));
    self
  }

  /// A property's value, treating `null` and blank strings as absent.
  pub fn property(&self, key: &str) -> Option<&str> {
    self
      .properties
      .get(key)
      .and_then(|v| v.as_deref())
      .filter(|v| !v.trim().is_empty())
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// Parameters for one page of [`crate::crm::CrmClient::list_objects`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
  pub limit:      u32,
  /// Cursor returned by the previous page, if any.
  pub after:      Option<String>,
  pub properties: Vec<String>,
}

impl ListQuery {
  /// The first page of `kind`, requesting its standard property set.
  pub fn first_page(kind: ObjectKind, limit: u32) -> Self {
    Self {
      limit,
      after: None,
      properties: kind
        .list_properties()
        .iter()
        .map(|p| (*p).to_owned())
        .collect(),
    }
  }

  /// The same query continued from `after`.
  pub fn continued(&self, after: impl Into<String>) -> Self {
    Self {
      after: Some(after.into()),
      ..self.clone()
    }
  }
}

/// One page of listed objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
  pub results:    Vec<CrmObject>,
  /// Cursor for the next page; `None` on the last page.
  pub next_after: Option<String>,
}
