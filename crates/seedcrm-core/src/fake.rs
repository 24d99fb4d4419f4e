//! In-memory [`CrmClient`] with scripted failures and call recording.
//!
//! Available to this crate's tests and, through the `test-support` feature,
//! to the engine and API tests.

use std::{
  collections::{HashMap, VecDeque},
  future::{Future, ready},
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
  association::LinkRequest,
  crm::CrmClient,
  error::CrmError,
  object::{CrmObject, ListQuery, ObjectKind, Page, Properties},
};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  Create { kind: ObjectKind, properties: Properties },
  List { kind: ObjectKind, after: Option<String> },
  Link(LinkRequest),
}

#[derive(Default)]
struct State {
  objects:     HashMap<ObjectKind, Vec<CrmObject>>,
  list_errors: HashMap<ObjectKind, CrmError>,
  creates:     VecDeque<Option<CrmError>>,
  links:       VecDeque<Option<CrmError>>,
  calls:       Vec<Call>,
  next_id:     u64,
}

/// A scripted CRM.
///
/// Creates and links succeed unless a failure has been queued with
/// [`FakeCrm::script_creates`] / [`FakeCrm::script_links`]; queued entries
/// are consumed one per call. Created objects are appended to the store and
/// show up in later listings.
pub struct FakeCrm {
  configured: bool,
  state:      Mutex<State>,
}

impl Default for FakeCrm {
  fn default() -> Self { Self::new() }
}

impl FakeCrm {
  pub fn new() -> Self {
    Self {
      configured: true,
      state:      Mutex::new(State {
        next_id: 1000,
        ..State::default()
      }),
    }
  }

  /// A client with no credential.
  pub fn unconfigured() -> Self {
    Self {
      configured: false,
      ..Self::new()
    }
  }

  fn state(&self) -> MutexGuard<'_, State> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn with_objects(
    self,
    kind: ObjectKind,
    objects: impl IntoIterator<Item = CrmObject>,
  ) -> Self {
    self.state().objects.entry(kind).or_default().extend(objects);
    self
  }

  /// Make every listing of `kind` fail with `error`.
  pub fn fail_list(self, kind: ObjectKind, error: CrmError) -> Self {
    self.state().list_errors.insert(kind, error);
    self
  }

  /// Queue outcomes for the next create calls; `None` means success.
  pub fn script_creates(self, outcomes: impl IntoIterator<Item = Option<CrmError>>) -> Self {
    self.state().creates.extend(outcomes);
    self
  }

  /// Queue outcomes for the next link calls; `None` means success.
  pub fn script_links(self, outcomes: impl IntoIterator<Item = Option<CrmError>>) -> Self {
    self.state().links.extend(outcomes);
    self
  }

  pub fn calls(&self) -> Vec<Call> { self.state().calls.clone() }

  pub fn call_count(&self) -> usize { self.state().calls.len() }

  pub fn links(&self) -> Vec<LinkRequest> {
    self
      .state()
      .calls
      .iter()
      .filter_map(|c| match c {
        Call::Link(l) => Some(l.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn created(&self, kind: ObjectKind) -> Vec<Properties> {
    self
      .state()
      .calls
      .iter()
      .filter_map(|c| match c {
        Call::Create { kind: k, properties } if *k == kind => Some(properties.clone()),
        _ => None,
      })
      .collect()
  }

  fn create(&self, kind: ObjectKind, properties: Properties) -> Result<CrmObject, CrmError> {
    let mut state = self.state();
    state.calls.push(Call::Create {
      kind,
      properties: properties.clone(),
    });
    if let Some(Some(error)) = state.creates.pop_front() {
      return Err(error);
    }
    state.next_id += 1;
    let object = CrmObject {
      id:         state.next_id.to_string(),
      properties: properties.into_iter().map(|(k, v)| (k, Some(v))).collect(),
    };
    state.objects.entry(kind).or_default().push(object.clone());
    Ok(object)
  }

  fn list(&self, kind: ObjectKind, query: &ListQuery) -> Result<Page, CrmError> {
    let mut state = self.state();
    state.calls.push(Call::List {
      kind,
      after: query.after.clone(),
    });
    if let Some(error) = state.list_errors.get(&kind) {
      return Err(error.clone());
    }
    let all = state.objects.get(&kind).map(Vec::as_slice).unwrap_or_default();
    let start = query
      .after
      .as_deref()
      .and_then(|a| a.parse::<usize>().ok())
      .unwrap_or(0)
      .min(all.len());
    let end = (start + query.limit as usize).min(all.len());
    Ok(Page {
      results:    all[start..end].to_vec(),
      next_after: (end < all.len()).then(|| end.to_string()),
    })
  }

  fn link(&self, link: LinkRequest) -> Result<(), CrmError> {
    let mut state = self.state();
    state.calls.push(Call::Link(link));
    match state.links.pop_front() {
      Some(Some(error)) => Err(error),
      _ => Ok(()),
    }
  }
}

impl CrmClient for FakeCrm {
  fn has_credential(&self) -> bool { self.configured }

  fn create_object(
    &self,
    kind: ObjectKind,
    properties: Properties,
  ) -> impl Future<Output = Result<CrmObject, CrmError>> + Send + '_ {
    ready(self.create(kind, properties))
  }

  fn list_objects<'a>(
    &'a self,
    kind: ObjectKind,
    query: &'a ListQuery,
  ) -> impl Future<Output = Result<Page, CrmError>> + Send + 'a {
    ready(self.list(kind, query))
  }

  fn create_association(
    &self,
    link: LinkRequest,
  ) -> impl Future<Output = Result<(), CrmError>> + Send + '_ {
    ready(self.link(link))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::association::AssociationType;

  #[tokio::test]
  async fn listing_pages_through_stored_objects() {
    let crm = FakeCrm::new().with_objects(
      ObjectKind::Company,
      (0..5).map(|i| CrmObject::new(i.to_string())),
    );
    let first = ListQuery::first_page(ObjectKind::Company, 2);
    let page = crm.list_objects(ObjectKind::Company, &first).await.unwrap();
    assert_eq!(page.results.len(), 2);
    let after = page.next_after.unwrap();

    let page = crm
      .list_objects(ObjectKind::Company, &first.continued(after))
      .await
      .unwrap();
    assert_eq!(page.results[0].id, "2");
    assert_eq!(crm.call_count(), 2);
  }

  #[tokio::test]
  async fn scripted_link_failures_are_consumed_in_order() {
    let crm = FakeCrm::new().script_links([
      Some(CrmError::Status { status: 404, body: "gone".into() }),
      None,
    ]);
    let link = LinkRequest::new(AssociationType::ContactToCompany, "1", "2");
    assert!(crm.create_association(link.clone()).await.is_err());
    assert!(crm.create_association(link.clone()).await.is_ok());
    assert!(crm.create_association(link).await.is_ok());
    assert_eq!(crm.links().len(), 3);
  }

  #[tokio::test]
  async fn created_objects_become_listable() {
    let crm = FakeCrm::new();
    let mut props = Properties::new();
    props.insert("email".into(), "a@b.com".into());
    let created = crm.create_object(ObjectKind::Contact, props).await.unwrap();

    let page = crm
      .list_objects(ObjectKind::Contact, &ListQuery::first_page(ObjectKind::Contact, 100))
      .await
      .unwrap();
    assert_eq!(page.results, vec![created]);
  }
}
