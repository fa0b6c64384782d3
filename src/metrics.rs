//! Metrics sink for stage observability.
//!
//! Stages report operational events (parse failures, skipped nulls) through
//! an injected [`MetricsSink`] so hosts can route them to their own backend
//! and tests can record them in memory. The sink is diagnostics-only:
//! aggregation results never depend on whether counts were delivered.
//!
//! [`RuntimeMetrics`] forwards to the `metrics` crate's counters, so a host
//! that installs a recorder (e.g. a Prometheus exporter) at startup gets
//! every stage event as `rowweave_stage_events_total` with an `event`
//! label. Without a recorder, recording is a no-op.

use metrics::counter;
use std::collections::HashMap;
use std::sync::Mutex;

/// Capability for counting named stage events.
///
/// Implementations must be cheap and infallible; a failing or absent
/// backend must not affect the stage that reports into it.
pub trait MetricsSink: Send + Sync {
  /// Adds `delta` to the named counter.
  fn count(&self, name: &str, delta: u64);
}

/// A sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
  fn count(&self, _name: &str, _delta: u64) {}
}

/// A sink that records counts in memory, for tests and inspection.
#[derive(Debug, Default)]
pub struct MemoryMetrics {
  counts: Mutex<HashMap<String, u64>>,
}

impl MemoryMetrics {
  /// Creates an empty recorder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the recorded total for a counter, 0 when never counted.
  pub fn get(&self, name: &str) -> u64 {
    self
      .counts
      .lock()
      .map(|counts| counts.get(name).copied().unwrap_or(0))
      .unwrap_or(0)
  }
}

impl MetricsSink for MemoryMetrics {
  fn count(&self, name: &str, delta: u64) {
    if let Ok(mut counts) = self.counts.lock() {
      *counts.entry(name.to_string()).or_insert(0) += delta;
    }
  }
}

/// A sink that forwards to the `metrics` crate.
///
/// Events land on the `rowweave_stage_events_total` counter, keyed by an
/// `event` label carrying the stage's event name.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuntimeMetrics;

impl MetricsSink for RuntimeMetrics {
  fn count(&self, name: &str, delta: u64) {
    counter!("rowweave_stage_events_total", "event" => name.to_string()).increment(delta);
  }
}
