//! Pending copy jobs shared between resolution and materialization.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::PendingCopyJob;

/// Build-scoped queue of copy-mode assets awaiting the next bundle write.
///
/// Clones share the same queue. The lock is never held across an await.
#[derive(Debug, Clone, Default)]
pub struct CopyQueue {
  jobs: Arc<Mutex<Vec<PendingCopyJob>>>,
}

impl CopyQueue {
  /// Create an empty queue.
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a job; enqueue order is preserved.
  pub fn push(&self, job: PendingCopyJob) {
    self.jobs.lock().push(job);
  }

  /// Remove and return every queued job, leaving the queue empty.
  pub fn take(&self) -> Vec<PendingCopyJob> {
    std::mem::take(&mut *self.jobs.lock())
  }

  /// Copy of the queued jobs.
  pub fn snapshot(&self) -> Vec<PendingCopyJob> {
    self.jobs.lock().clone()
  }

  /// Number of queued jobs.
  pub fn len(&self) -> usize {
    self.jobs.lock().len()
  }

  /// Whether the queue is empty.
  pub fn is_empty(&self) -> bool {
    self.jobs.lock().is_empty()
  }
}
