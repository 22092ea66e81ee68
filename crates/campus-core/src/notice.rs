//! Transient status messages shared by all controllers.

use std::time::{Duration, Instant};

/// How long a posted notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Success,
  Error,
  Info,
}

/// One status banner: text plus severity.
#[derive(Debug, Clone)]
pub struct Notice {
  pub severity: Severity,
  pub text:     String,
}

/// Shows one transient message at a time.
///
/// A new message replaces the current one immediately; every message expires
/// after the notifier's TTL whether or not anyone read it. Expiry is checked
/// lazily on read — there is no timer.
#[derive(Debug)]
pub struct StatusNotifier {
  ttl:     Duration,
  current: Option<(Notice, Instant)>,
}

impl StatusNotifier {
  pub fn new() -> Self {
    Self::with_ttl(NOTICE_TTL)
  }

  /// TTL injection point for tests.
  pub fn with_ttl(ttl: Duration) -> Self {
    Self { ttl, current: None }
  }

  pub fn success(&mut self, text: impl Into<String>) {
    self.post(Severity::Success, text);
  }

  pub fn error(&mut self, text: impl Into<String>) {
    self.post(Severity::Error, text);
  }

  pub fn info(&mut self, text: impl Into<String>) {
    self.post(Severity::Info, text);
  }

  pub fn post(&mut self, severity: Severity, text: impl Into<String>) {
    self.current = Some((
      Notice { severity, text: text.into() },
      Instant::now(),
    ));
  }

  /// The currently-visible notice, or `None` once the TTL has elapsed.
  pub fn current(&self) -> Option<&Notice> {
    self
      .current
      .as_ref()
      .filter(|(_, posted)| posted.elapsed() < self.ttl)
      .map(|(notice, _)| notice)
  }

  /// Manual dismissal. Cosmetic — the TTL clears everything anyway.
  pub fn clear(&mut self) {
    self.current = None;
  }
}

impl Default for StatusNotifier {
  fn default() -> Self {
    Self::new()
  }
}
