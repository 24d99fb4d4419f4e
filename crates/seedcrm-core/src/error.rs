//! Error type for a single outbound CRM call.

use thiserror::Error;

/// Why one call to the CRM did not produce the expected result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrmError {
  /// The CRM answered with a non-success status.
  #[error("status {status} - {body}")]
  Status { status: u16, body: String },

  /// The request never produced a response (connect, TLS, reset, ...).
  #[error("transport error: {0}")]
  Transport(String),

  /// A success response whose body could not be understood.
  #[error("unexpected response body: {0}")]
  Decode(String),

  #[error("no CRM credential configured")]
  MissingCredential,
}

impl CrmError {
  /// Text reported as the `error` field of a failed item: the response body
  /// for status failures, the message otherwise.
  pub fn payload(&self) -> String {
    match self {
      Self::Status { body, .. } => body.clone(),
      Self::Transport(m) | Self::Decode(m) => m.clone(),
      Self::MissingCredential => self.to_string(),
    }
  }

  /// `true` when the call raised instead of returning a status.
  pub fn is_exception(&self) -> bool {
    matches!(self, Self::Transport(_) | Self::Decode(_))
  }
}

pub type Result<T, E = CrmError> = std::result::Result<T, E>;
