//! [`CrmClient`] over HubSpot's CRM REST API.
//!
//! One method call is one HTTP request. Nothing is retried here; the
//! workflows in `seedcrm-engine` decide what happens after a failure.

mod wire;

use std::{future::Future, time::Duration};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use seedcrm_core::{
  CrmError,
  association::{LinkApi, LinkRequest},
  crm::CrmClient,
  object::{CrmObject, ListQuery, ObjectKind, Page, Properties},
};
use serde::de::DeserializeOwned;

use crate::wire::{AssociationSpec, CreateBody, ListBody};

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Connection settings for the HubSpot API.
#[derive(Debug, Clone)]
pub struct HubSpotConfig {
  pub base_url: String,
  /// Private-app access token. Blank counts as absent.
  pub api_key:  Option<String>,
  /// Per-request timeout; none when unset.
  pub timeout:  Option<Duration>,
}

impl Default for HubSpotConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_owned(),
      api_key:  None,
      timeout:  None,
    }
  }
}

/// Async HubSpot client.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HubSpotClient {
  client:   Client,
  base_url: String,
  api_key:  Option<String>,
}

impl HubSpotClient {
  pub fn new(config: HubSpotConfig) -> Result<Self> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().context("failed to build HTTP client")?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_owned(),
      api_key: config.api_key.filter(|k| !k.trim().is_empty()),
    })
  }

  fn url(&self, path: &str) -> String { format!("{}{path}", self.base_url) }

  fn auth(&self, req: RequestBuilder) -> Result<RequestBuilder, CrmError> {
    match &self.api_key {
      Some(key) => Ok(req.bearer_auth(key)),
      None => Err(CrmError::MissingCredential),
    }
  }

  // ── Objects ───────────────────────────────────────────────────────────────

  /// `POST /crm/v3/objects/{kind}`
  async fn create(&self, kind: ObjectKind, properties: Properties) -> Result<CrmObject, CrmError> {
    let url = self.url(&format!("/crm/v3/objects/{}", kind.plural()));
    tracing::debug!(%url, "creating {}", kind.singular());

    let req = self
      .auth(self.client.post(&url))?
      .json(&CreateBody { properties: &properties });
    decode(send(req).await?).await
  }

  /// `GET /crm/v3/objects/{kind}?limit=..&properties=..[&after=..]`
  async fn list(&self, kind: ObjectKind, query: &ListQuery) -> Result<Page, CrmError> {
    let url = self.url(&format!("/crm/v3/objects/{}", kind.plural()));
    tracing::debug!(%url, after = ?query.after, "listing {kind}");

    let mut params = vec![
      ("limit", query.limit.to_string()),
      ("properties", query.properties.join(",")),
    ];
    if let Some(after) = &query.after {
      params.push(("after", after.clone()));
    }

    let req = self.auth(self.client.get(&url))?.query(&params);
    let body: ListBody = decode(send(req).await?).await?;
    Ok(body.into())
  }

  // ── Associations ──────────────────────────────────────────────────────────

  /// v4: `PUT /crm/v4/objects/{from}/{id}/associations/{to}/{id}` with the
  /// type in the body.
  /// v3: `PUT /crm/v3/objects/{from}/{id}/associations/{to}/{id}/{type}`.
  async fn link(&self, link: LinkRequest) -> Result<(), CrmError> {
    let from = link.association.from_kind().plural();
    let to = link.association.to_kind().plural();
    let type_id = link.association.type_id();

    let req = match link.api {
      LinkApi::V4 => {
        let url = self.url(&format!(
          "/crm/v4/objects/{from}/{}/associations/{to}/{}",
          link.from_id, link.to_id
        ));
        tracing::debug!(%url, type_id, "linking (v4)");
        self
          .auth(self.client.put(&url))?
          .json(&[AssociationSpec::from(link.association)])
      }
      LinkApi::V3 => {
        let url = self.url(&format!(
          "/crm/v3/objects/{from}/{}/associations/{to}/{}/{type_id}",
          link.from_id, link.to_id
        ));
        tracing::debug!(%url, "linking (v3)");
        self.auth(self.client.put(&url))?
      }
    };

    send(req).await.map(drop)
  }
}

/// Send and turn non-success statuses into [`CrmError::Status`] carrying the
/// response body.
async fn send(req: RequestBuilder) -> Result<Response, CrmError> {
  let resp = req
    .send()
    .await
    .map_err(|e| CrmError::Transport(e.to_string()))?;

  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp
    .text()
    .await
    .map_err(|e| CrmError::Transport(e.to_string()))?;
  tracing::debug!(status = status.as_u16(), %body, "HubSpot rejected request");
  Err(CrmError::Status {
    status: status.as_u16(),
    body,
  })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, CrmError> {
  let bytes = resp
    .bytes()
    .await
    .map_err(|e| CrmError::Transport(e.to_string()))?;
  serde_json::from_slice(&bytes).map_err(|e| CrmError::Decode(e.to_string()))
}

impl CrmClient for HubSpotClient {
  fn has_credential(&self) -> bool { self.api_key.is_some() }

  fn create_object(
    &self,
    kind: ObjectKind,
    properties: Properties,
  ) -> impl Future<Output = Result<CrmObject, CrmError>> + Send + '_ {
    self.create(kind, properties)
  }

  fn list_objects<'a>(
    &'a self,
    kind: ObjectKind,
    query: &'a ListQuery,
  ) -> impl Future<Output = Result<Page, CrmError>> + Send + 'a {
    self.list(kind, query)
  }

  fn create_association(
    &self,
    link: LinkRequest,
  ) -> impl Future<Output = Result<(), CrmError>> + Send + '_ {
    self.link(link)
  }
}

#[cfg(test)]
mod tests {
  use seedcrm_core::association::AssociationType;
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
  };

  use super::*;

  fn client(server: &MockServer) -> HubSpotClient {
    HubSpotClient::new(HubSpotConfig {
      base_url: server.uri(),
      api_key:  Some("pat-test".into()),
      timeout:  None,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn create_posts_properties_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/crm/v3/objects/companies"))
      .and(header("authorization", "Bearer pat-test"))
      .and(body_json(serde_json::json!({"properties": {"name": "Acme", "domain": "acme.com"}})))
      .respond_with(
        ResponseTemplate::new(201)
          .set_body_json(serde_json::json!({"id": "901", "properties": {"name": "Acme"}})),
      )
      .expect(1)
      .mount(&server)
      .await;

    let props = Properties::from([
      ("name".to_owned(), "Acme".to_owned()),
      ("domain".to_owned(), "acme.com".to_owned()),
    ]);
    let created = client(&server)
      .create_object(ObjectKind::Company, props)
      .await
      .unwrap();
    assert_eq!(created.id, "901");
  }

  #[tokio::test]
  async fn error_status_carries_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/crm/v3/objects/contacts"))
      .respond_with(ResponseTemplate::new(409).set_body_string("Contact already exists"))
      .mount(&server)
      .await;

    let err = client(&server)
      .create_object(ObjectKind::Contact, Properties::new())
      .await
      .unwrap_err();
    assert_eq!(err, CrmError::Status {
      status: 409,
      body:   "Contact already exists".into(),
    });
  }

  #[tokio::test]
  async fn list_sends_limit_properties_and_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/crm/v3/objects/contacts"))
      .and(query_param("limit", "100"))
      .and(query_param("properties", "email,firstname,lastname"))
      .and(query_param("after", "abc"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "results": [{"id": "7", "properties": {"email": "bob@acme.com"}}]
      })))
      .mount(&server)
      .await;

    let query = ListQuery::first_page(ObjectKind::Contact, 100).continued("abc");
    let page = client(&server)
      .list_objects(ObjectKind::Contact, &query)
      .await
      .unwrap();
    assert_eq!(page.results[0].property("email"), Some("bob@acme.com"));
    assert_eq!(page.next_after, None);
  }

  #[tokio::test]
  async fn v4_link_puts_typed_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
      .and(path("/crm/v4/objects/tickets/5/associations/contacts/9"))
      .and(body_json(serde_json::json!([
        {"associationCategory": "HUBSPOT_DEFINED", "associationTypeId": 16}
      ])))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
      .expect(1)
      .mount(&server)
      .await;

    client(&server)
      .create_association(LinkRequest::new(AssociationType::TicketToContact, "5", "9"))
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn v3_link_puts_type_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
      .and(path("/crm/v3/objects/contacts/1/associations/companies/2/1"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&server)
      .await;

    let link = LinkRequest::new(AssociationType::ContactToCompany, "1", "2").via(LinkApi::V3);
    client(&server).create_association(link).await.unwrap();
  }

  #[tokio::test]
  async fn garbage_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
      .mount(&server)
      .await;

    let err = client(&server)
      .create_object(ObjectKind::Ticket, Properties::new())
      .await
      .unwrap_err();
    assert!(matches!(err, CrmError::Decode(_)));
  }

  #[tokio::test]
  async fn no_credential_sends_nothing() {
    let server = MockServer::start().await;
    let client = HubSpotClient::new(HubSpotConfig {
      base_url: server.uri(),
      api_key:  Some("   ".into()),
      timeout:  None,
    })
    .unwrap();

    assert!(!client.has_credential());
    let err = client
      .create_object(ObjectKind::Company, Properties::new())
      .await
      .unwrap_err();
    assert_eq!(err, CrmError::MissingCredential);
    assert!(server.received_requests().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn unreachable_host_is_a_transport_error() {
    let client = HubSpotClient::new(HubSpotConfig {
      base_url: "http://127.0.0.1:1".into(),
      api_key:  Some("pat-test".into()),
      timeout:  Some(Duration::from_secs(2)),
    })
    .unwrap();
    let err = client
      .create_object(ObjectKind::Company, Properties::new())
      .await
      .unwrap_err();
    assert!(err.is_exception());
  }
}
