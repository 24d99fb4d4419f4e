//! The narrative log threaded through every workflow.
//!
//! Each workflow run owns one [`EventLog`]. Events are kept in order so the
//! API can return them to the caller, and mirrored to `tracing` as they are
//! recorded.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Info,
  Success,
  Warning,
  Failure,
  /// A call raised instead of returning a response.
  Exception,
}

impl Severity {
  /// Marker prefixed to rendered log lines.
  pub fn marker(self) -> &'static str {
    match self {
      Self::Info => "📋",
      Self::Success => "✅",
      Self::Warning => "⚠️",
      Self::Failure => "❌",
      Self::Exception => "💥",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
  pub severity: Severity,
  pub message:  String,
}

impl LogEvent {
  pub fn render(&self) -> String {
    format!("{} {}", self.severity.marker(), self.message)
  }
}

/// Ordered sink of [`LogEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
  events: Vec<LogEvent>,
}

impl EventLog {
  pub fn new() -> Self { Self::default() }

  pub fn record(&mut self, severity: Severity, message: impl Into<String>) {
    let message = message.into();
    match severity {
      Severity::Info | Severity::Success => tracing::info!("{message}"),
      Severity::Warning | Severity::Failure => tracing::warn!("{message}"),
      Severity::Exception => tracing::error!("{message}"),
    }
    self.events.push(LogEvent { severity, message });
  }

  pub fn info(&mut self, message: impl Into<String>) {
    self.record(Severity::Info, message);
  }

  pub fn success(&mut self, message: impl Into<String>) {
    self.record(Severity::Success, message);
  }

  pub fn warning(&mut self, message: impl Into<String>) {
    self.record(Severity::Warning, message);
  }

  pub fn failure(&mut self, message: impl Into<String>) {
    self.record(Severity::Failure, message);
  }

  pub fn exception(&mut self, message: impl Into<String>) {
    self.record(Severity::Exception, message);
  }

  /// Events of one severity, in recording order.
  pub fn filter(&self, severity: Severity) -> impl Iterator<Item = &LogEvent> {
    self.events.iter().filter(move |e| e.severity == severity)
  }

  /// Rendered, marker-prefixed lines in recording order.
  pub fn lines(&self) -> Vec<String> {
    self.events.iter().map(LogEvent::render).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lines_keep_order_and_markers() {
    let mut log = EventLog::new();
    log.info("fetching");
    log.failure("nope");
    log.success("done");
    assert_eq!(log.lines(), vec!["📋 fetching", "❌ nope", "✅ done"]);
  }

  #[test]
  fn filter_by_severity() {
    let mut log = EventLog::new();
    log.warning("a");
    log.info("b");
    log.warning("c");
    let warnings: Vec<_> = log.filter(Severity::Warning).map(|e| e.message.as_str()).collect();
    assert_eq!(warnings, ["a", "c"]);
  }
}
