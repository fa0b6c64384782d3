//! Run-scoped transient state for accumulating stages.
//!
//! One pipeline run owns a [`TransientStore`]; every `process` call of a run
//! reads and writes the same store, and finalization clears it so the next
//! run starts clean. The store is scoped, with [`Scope::Global`] spanning
//! all batches of a run.
//!
//! The aggregate slot is strongly typed: [`AggregateState`] holds the four
//! running counters by field instead of behind string keys and casts, so a
//! reader can see every slot the stage uses.

/// Visibility scope of a transient state slot.
///
/// `Global` state persists across all `process` calls of one run and is
/// cleared exactly once, at finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
  /// Spans every batch of the current run.
  Global,
}

/// Running counters for the aggregate-stats stage.
///
/// Invariant: `row_count >= valid_time_count`; every processed row
/// increments `row_count`, while only rows with a resolvable duration
/// increment `valid_time_count`. `total_bytes` only accumulates from rows
/// whose size value resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateState {
  /// Sum of resolved byte sizes.
  pub total_bytes: i64,
  /// Sum of resolved durations, in nanoseconds.
  pub total_nanos: i64,
  /// Number of rows processed, valid or not.
  pub row_count: i64,
  /// Number of rows whose duration resolved.
  pub valid_time_count: i64,
}

impl AggregateState {
  /// Adds a resolved byte count to the running total.
  ///
  /// Accumulation wraps on i64 overflow.
  pub fn record_bytes(&mut self, bytes: i64) {
    self.total_bytes = self.total_bytes.wrapping_add(bytes);
  }

  /// Adds a resolved nanosecond count and bumps `valid_time_count`.
  ///
  /// Accumulation wraps on i64 overflow.
  pub fn record_nanos(&mut self, nanos: i64) {
    self.total_nanos = self.total_nanos.wrapping_add(nanos);
    self.valid_time_count += 1;
  }

  /// Counts a processed row, whether or not its values resolved.
  pub fn record_row(&mut self) {
    self.row_count += 1;
  }
}

/// Keyed transient state owned by one pipeline run.
///
/// The stage reads and writes state through this store but never owns it;
/// the host execution context does. After [`TransientStore::reset`] the
/// aggregate slot reads as absent again.
#[derive(Debug, Default)]
pub struct TransientStore {
  aggregate: Option<AggregateState>,
}

impl TransientStore {
  /// Creates an empty store.
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the aggregate slot, or `None` when never written or reset.
  pub fn aggregate(&self) -> Option<&AggregateState> {
    self.aggregate.as_ref()
  }

  /// Returns the aggregate slot, initializing it to zeros on first access.
  pub fn aggregate_mut(&mut self) -> &mut AggregateState {
    self.aggregate.get_or_insert_with(AggregateState::default)
  }

  /// Clears every slot in the given scope.
  pub fn reset(&mut self, scope: Scope) {
    match scope {
      Scope::Global => self.aggregate = None,
    }
  }
}
