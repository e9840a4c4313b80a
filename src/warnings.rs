//! Advisory warning channel.
//!
//! Warnings never fail a build. The host decides where they go: the default
//! sink forwards them to `tracing`, the collecting sink keeps them for later.

use std::sync::Arc;

use parking_lot::Mutex;

/// Receiver for human-readable, non-fatal warnings.
pub trait WarningSink: Send + Sync {
  /// Report one warning.
  fn warn(&self, message: String);
}

/// Forwards every warning to `tracing::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingWarnings;

impl WarningSink for TracingWarnings {
  fn warn(&self, message: String) {
    tracing::warn!(target: "smart_asset", "{message}");
  }
}

/// Records warnings in memory and mirrors them to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct CollectedWarnings {
  messages: Arc<Mutex<Vec<String>>>,
}

impl CollectedWarnings {
  /// Create an empty collector.
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of the warnings received so far.
  pub fn messages(&self) -> Vec<String> {
    self.messages.lock().clone()
  }

  /// Remove and return the warnings received so far.
  pub fn drain(&self) -> Vec<String> {
    std::mem::take(&mut *self.messages.lock())
  }
}

impl WarningSink for CollectedWarnings {
  fn warn(&self, message: String) {
    tracing::warn!(target: "smart_asset", "{message}");
    self.messages.lock().push(message);
  }
}
