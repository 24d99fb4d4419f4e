//! `GET /config`: whether a HubSpot credential is configured.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use seedcrm_core::crm::CrmClient;
use seedcrm_engine::Error as WorkflowError;
use serde_json::json;

use crate::AppState;

pub async fn handler<C: CrmClient>(State(state): State<AppState<C>>) -> impl IntoResponse {
  if state.crm.has_credential() {
    (
      StatusCode::OK,
      Json(json!({ "configured": true, "message": "HubSpot API key is configured" })),
    )
  } else {
    (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "configured": false, "error": WorkflowError::NotConfigured.to_string() })),
    )
  }
}
