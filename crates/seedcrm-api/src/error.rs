//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use seedcrm_core::event::EventLog;
use seedcrm_engine::Error as WorkflowError;
use serde_json::json;
use thiserror::Error;

/// A handler failure, carrying the log lines recorded before it.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {message}")]
  BadRequest { message: String, logs: Vec<String> },

  #[error("{source}")]
  Workflow {
    #[source]
    source: WorkflowError,
    logs:   Vec<String>,
  },
}

impl ApiError {
  /// Record `message` as a failure and turn the log into a 400.
  pub fn bad_request(message: impl Into<String>, log: &mut EventLog) -> Self {
    let message = message.into();
    log.failure(message.clone());
    Self::BadRequest {
      message,
      logs: log.lines(),
    }
  }

  pub fn workflow(source: WorkflowError, log: &EventLog) -> Self {
    Self::Workflow {
      source,
      logs: log.lines(),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
      Self::Workflow { source, .. } => match source {
        WorkflowError::NothingToAssign(_) => StatusCode::BAD_REQUEST,
        WorkflowError::NotConfigured | WorkflowError::Fetch { .. } => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match self {
      Self::BadRequest { message, logs } => json!({ "error": message, "logs": logs }),
      Self::Workflow {
        source: source @ WorkflowError::NotConfigured,
        logs,
      } => json!({ "configured": false, "error": source.to_string(), "logs": logs }),
      Self::Workflow { source, logs } => {
        json!({ "error": source.to_string(), "logs": logs })
      }
    };
    if status.is_server_error() {
      tracing::error!(%status, "{}", body["error"]);
    }
    (status, Json(body)).into_response()
  }
}
