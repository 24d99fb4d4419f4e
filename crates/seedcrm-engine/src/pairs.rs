//! Linking caller-supplied contact/company pairs.

use seedcrm_core::{
  association::{AssociationType, LinkRequest},
  crm::CrmClient,
  event::EventLog,
};
use serde::{Deserialize, Deserializer};

use crate::{
  Result,
  gateway::ensure_configured,
  link::link_once,
  report::{BatchSummary, PairFailed, PairLinked, PairsReport},
};

/// One requested contact → company link.
///
/// Ids may arrive as JSON strings or numbers; null, missing and blank ids
/// all read as `None`. Whether the ids exist in the CRM is left to the CRM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInput {
  #[serde(default, deserialize_with = "lenient_id")]
  pub contact_id: Option<String>,
  #[serde(default, deserialize_with = "lenient_id")]
  pub company_id: Option<String>,
}

impl PairInput {
  pub fn new(contact_id: impl Into<String>, company_id: impl Into<String>) -> Self {
    Self {
      contact_id: Some(contact_id.into()),
      company_id: Some(company_id.into()),
    }
  }
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum RawId {
    Text(String),
    Number(u64),
  }

  Ok(match Option::<RawId>::deserialize(d)? {
    Some(RawId::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
    Some(RawId::Number(n)) => Some(n.to_string()),
    _ => None,
  })
}

/// Link each pair once over the current API, without fallback. Pairs
/// missing an id are recorded as errors without a request.
pub async fn link_pairs<C: CrmClient>(
  crm: &C,
  pairs: &[PairInput],
  log: &mut EventLog,
) -> Result<PairsReport> {
  ensure_configured(crm, log)?;
  log.info(format!(
    "Starting to create {} contact-company associations...",
    pairs.len()
  ));

  let mut results = Vec::new();
  let mut errors = Vec::new();

  for pair in pairs {
    let (Some(contact_id), Some(company_id)) = (&pair.contact_id, &pair.company_id) else {
      log.failure(format!(
        "Invalid association data: contactId={}, companyId={}",
        pair.contact_id.as_deref().unwrap_or("none"),
        pair.company_id.as_deref().unwrap_or("none"),
      ));
      errors.push(PairFailed {
        contact_id: pair.contact_id.clone(),
        company_id: pair.company_id.clone(),
        error:      "Missing contactId or companyId".to_owned(),
        success:    false,
      });
      continue;
    };

    let link = LinkRequest::new(
      AssociationType::ContactToCompany,
      contact_id.clone(),
      company_id.clone(),
    );
    match link_once(crm, link, log).await {
      Ok(()) => results.push(PairLinked {
        contact_id: contact_id.clone(),
        company_id: company_id.clone(),
        success:    true,
      }),
      Err(e) => errors.push(PairFailed {
        contact_id: Some(contact_id.clone()),
        company_id: Some(company_id.clone()),
        error:      e.payload(),
        success:    false,
      }),
    }
  }

  log.info(format!(
    "Association processing complete: {} successful, {} failed",
    results.len(),
    errors.len()
  ));
  Ok(PairsReport {
    summary: BatchSummary {
      total:      pairs.len(),
      successful: results.len(),
      failed:     errors.len(),
    },
    results,
    errors,
  })
}

#[cfg(test)]
mod tests {
  use seedcrm_core::{CrmError, association::LinkApi, fake::FakeCrm};

  use super::*;

  #[test]
  fn ids_may_be_numbers_strings_or_absent() {
    let pairs: Vec<PairInput> = serde_json::from_str(
      r#"[{"contactId":101,"companyId":"202"},{"contactId":"  ","companyId":null},{}]"#,
    )
    .unwrap();
    assert_eq!(pairs[0], PairInput::new("101", "202"));
    assert_eq!(pairs[1], PairInput::default());
    assert_eq!(pairs[2], PairInput::default());
  }

  #[tokio::test]
  async fn missing_ids_are_recorded_without_a_request() {
    let crm = FakeCrm::new();
    let pairs = [
      PairInput::new("1", "2"),
      PairInput {
        contact_id: Some("3".into()),
        company_id: None,
      },
    ];
    let mut log = EventLog::new();
    let report = link_pairs(&crm, &pairs, &mut log).await.unwrap();

    assert_eq!(report.summary, BatchSummary { total: 2, successful: 1, failed: 1 });
    assert_eq!(report.errors[0].error, "Missing contactId or companyId");
    assert_eq!(crm.links().len(), 1);
  }

  #[tokio::test]
  async fn failures_do_not_fall_back() {
    let crm = FakeCrm::new().script_links([Some(CrmError::Status {
      status: 404,
      body:   "not found".into(),
    })]);
    let mut log = EventLog::new();
    let report = link_pairs(&crm, &[PairInput::new("1", "2")], &mut log)
      .await
      .unwrap();

    assert_eq!(report.errors[0].error, "not found");
    let links = crm.links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].api, LinkApi::V4);
    assert_eq!(links[0].association, AssociationType::ContactToCompany);
  }
}
