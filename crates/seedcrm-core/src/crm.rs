//! The `CrmClient` trait.
//!
//! Implemented by `seedcrm-hubspot` against the real API and by
//! [`crate::fake::FakeCrm`] in tests. The gateway and association workflows
//! depend on this abstraction only.

use std::future::Future;

use crate::{
  association::LinkRequest,
  error::CrmError,
  object::{CrmObject, ListQuery, ObjectKind, Page, Properties},
};

/// Outbound operations against a CRM.
///
/// Every method is a single network round trip. Implementations must not
/// retry; retry and fallback policy belongs to the caller.
pub trait CrmClient: Send + Sync {
  /// Whether a credential is available. Callers check this before issuing
  /// any request.
  fn has_credential(&self) -> bool;

  /// Create one object and return it with its remote identifier.
  fn create_object(
    &self,
    kind: ObjectKind,
    properties: Properties,
  ) -> impl Future<Output = Result<CrmObject, CrmError>> + Send + '_;

  /// Fetch one page of objects, most recent first.
  fn list_objects<'a>(
    &'a self,
    kind: ObjectKind,
    query: &'a ListQuery,
  ) -> impl Future<Output = Result<Page, CrmError>> + Send + 'a;

  /// Link two existing objects.
  fn create_association(
    &self,
    link: LinkRequest,
  ) -> impl Future<Output = Result<(), CrmError>> + Send + '_;
}
