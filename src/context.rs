//! Execution context handed to directives by the host.
//!
//! An [`ExecutorContext`] is scoped to one pipeline run. It owns the run's
//! [`TransientStore`] and carries the metrics sink every stage of the run
//! reports into. Stages receive the context by mutable reference on each
//! call; they never own it, and the host guarantees calls are serialized,
//! so no locking happens here.

use crate::metrics::{MetricsSink, NoopMetrics};
use crate::state::TransientStore;
use std::sync::Arc;

/// Per-run execution scope: transient state plus the metrics sink.
pub struct ExecutorContext {
  store: TransientStore,
  metrics: Arc<dyn MetricsSink>,
}

impl ExecutorContext {
  /// Creates a context with an empty store and a no-op metrics sink.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a context reporting into the given sink.
  pub fn with_metrics(metrics: Arc<dyn MetricsSink>) -> Self {
    Self {
      store: TransientStore::new(),
      metrics,
    }
  }

  /// Returns the run's transient store.
  pub fn store(&self) -> &TransientStore {
    &self.store
  }

  /// Returns the run's transient store mutably.
  pub fn store_mut(&mut self) -> &mut TransientStore {
    &mut self.store
  }

  /// Returns the run's metrics sink.
  pub fn metrics(&self) -> &dyn MetricsSink {
    self.metrics.as_ref()
  }
}

impl Default for ExecutorContext {
  fn default() -> Self {
    Self {
      store: TransientStore::new(),
      metrics: Arc::new(NoopMetrics),
    }
  }
}

impl std::fmt::Debug for ExecutorContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ExecutorContext")
      .field("store", &self.store)
      .finish_non_exhaustive()
  }
}
