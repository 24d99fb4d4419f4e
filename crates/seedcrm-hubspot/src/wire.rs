//! HubSpot request and response bodies.

use seedcrm_core::{
  association::AssociationType,
  object::{CrmObject, Page, Properties},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct CreateBody<'a> {
  pub properties: &'a Properties,
}

/// Element of the v4 association body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssociationSpec {
  pub association_category: &'static str,
  pub association_type_id:  u32,
}

impl From<AssociationType> for AssociationSpec {
  fn from(t: AssociationType) -> Self {
    Self {
      association_category: t.category(),
      association_type_id:  t.type_id(),
    }
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListBody {
  #[serde(default)]
  pub results: Vec<CrmObject>,
  pub paging:  Option<Paging>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paging {
  pub next: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NextPage {
  pub after: String,
}

impl From<ListBody> for Page {
  fn from(body: ListBody) -> Self {
    Page {
      results:    body.results,
      next_after: body.paging.and_then(|p| p.next).map(|n| n.after),
    }
  }
}
