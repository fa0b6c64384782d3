//! Aggregate statistics over byte-size and time-duration columns.
//!
//! [`AggregateStats`] is a pure accumulator: `process` consumes row batches
//! and only mutates run-scoped state, and a separate `finalize` call emits
//! the single summary row and clears that state. Across one run the stage
//! moves `Uninitialized → Accumulating → Finalized`; calling `process`
//! after `finalize` is outside the contract, since the state is gone.
//!
//! # Per-row behavior
//!
//! Every row counts toward `aggregate_count`, valid or not. Each source
//! column is resolved independently: a null (or missing) value is skipped
//! and counted on the `*.null.skipped` event; an unresolvable value is
//! skipped and counted on the `*.parse.errors` event. Neither aborts the
//! run. Already-canonical integers, floats (truncated), parsed tokens, and
//! literal text are all accepted as inputs.
//!
//! # Example
//!
//! ```rust
//! use rowweave::context::ExecutorContext;
//! use rowweave::directives::AggregateStats;
//! use rowweave::row::{Row, Value};
//!
//! let directive = AggregateStats::new("size", "elapsed", "total_size", "avg_time");
//! let mut ctx = ExecutorContext::new();
//!
//! let mut row = Row::new();
//! row.add("size", Value::Text("1KB".to_string()));
//! row.add("elapsed", Value::Text("500ms".to_string()));
//!
//! assert!(directive.process(&[row], &mut ctx).is_empty());
//! let summary = directive.finalize(&mut ctx);
//! assert_eq!(summary.value("total_size"), Some(&Value::Int(1024)));
//! ```

use crate::context::ExecutorContext;
use crate::directives::Arguments;
use crate::error::DirectiveError;
use crate::row::{Row, Value};
use crate::state::Scope;
use crate::tokens::{ByteSize, TimeDuration, TokenParseError};
use tracing::debug;

/// Column name of the row count in the summary row.
pub const AGGREGATE_COUNT_COLUMN: &str = "aggregate_count";

/// Accumulates byte-size totals and time-duration averages across every
/// batch of a run, then emits one summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateStats {
  size_source: String,
  time_source: String,
  size_target: String,
  time_target: String,
}

impl AggregateStats {
  /// Directive name, as a host registry would list it.
  pub const NAME: &'static str = "aggregate-stats";

  /// Argument names, in invocation order. All four are required column
  /// references.
  pub const USAGE: [&'static str; 4] =
    ["size_source", "time_source", "size_target", "time_target"];

  /// Event counted when a size value fails to resolve.
  pub const SIZE_PARSE_ERRORS: &'static str = "aggstats.size.parse.errors";
  /// Event counted when a size value is null or missing.
  pub const SIZE_NULL_SKIPPED: &'static str = "aggstats.size.null.skipped";
  /// Event counted when a time value fails to resolve.
  pub const TIME_PARSE_ERRORS: &'static str = "aggstats.time.parse.errors";
  /// Event counted when a time value is null or missing.
  pub const TIME_NULL_SKIPPED: &'static str = "aggstats.time.null.skipped";

  /// Creates a configured stage from explicit column names.
  pub fn new(
    size_source: impl Into<String>,
    time_source: impl Into<String>,
    size_target: impl Into<String>,
    time_target: impl Into<String>,
  ) -> Self {
    Self {
      size_source: size_source.into(),
      time_source: time_source.into(),
      size_target: size_target.into(),
      time_target: time_target.into(),
    }
  }

  /// Configures the stage from a directive argument list.
  ///
  /// All four arguments of [`AggregateStats::USAGE`] are required column
  /// references; there are no defaults.
  ///
  /// # Errors
  ///
  /// [`DirectiveError::Configuration`] when any argument is absent or not
  /// a column reference.
  pub fn from_args(args: &Arguments) -> Result<Self, DirectiveError> {
    Ok(Self::new(
      args.column("size_source")?,
      args.column("time_source")?,
      args.column("size_target")?,
      args.column("time_target")?,
    ))
  }

  /// Processes one batch of rows, accumulating into the run's state.
  ///
  /// Returns no rows; this stage only emits on [`AggregateStats::finalize`].
  pub fn process(&self, rows: &[Row], ctx: &mut ExecutorContext) -> Vec<Row> {
    if rows.is_empty() {
      return Vec::new();
    }

    // Accumulate locally, write back once per batch.
    let mut state = ctx.store().aggregate().copied().unwrap_or_default();

    for row in rows {
      state.record_row();

      match row.value(&self.size_source) {
        None | Some(Value::Null) => ctx.metrics().count(Self::SIZE_NULL_SKIPPED, 1),
        Some(value) => match resolve_bytes(value) {
          Ok(bytes) => state.record_bytes(bytes),
          Err(error) => {
            debug!(column = %self.size_source, %error, "skipping unresolvable size value");
            ctx.metrics().count(Self::SIZE_PARSE_ERRORS, 1);
          }
        },
      }

      match row.value(&self.time_source) {
        None | Some(Value::Null) => ctx.metrics().count(Self::TIME_NULL_SKIPPED, 1),
        Some(value) => match resolve_nanos(value) {
          Ok(nanos) => state.record_nanos(nanos),
          Err(error) => {
            debug!(column = %self.time_source, %error, "skipping unresolvable time value");
            ctx.metrics().count(Self::TIME_PARSE_ERRORS, 1);
          }
        },
      }
    }

    *ctx.store_mut().aggregate_mut() = state;
    Vec::new()
  }

  /// Emits the summary row and clears the run's state.
  ///
  /// With no rows processed, the summary carries integer 0 for the size
  /// target, float 0.0 for the time target, and an `aggregate_count` of 0.
  /// Otherwise the size target is the byte total and the time target is
  /// the mean of resolved durations in nanoseconds (0.0 when none
  /// resolved). Expected to run exactly once per run.
  pub fn finalize(&self, ctx: &mut ExecutorContext) -> Row {
    let state = ctx.store().aggregate().copied().unwrap_or_default();

    let mut summary = Row::new();
    if state.row_count == 0 {
      summary.add(self.size_target.as_str(), Value::Int(0));
      summary.add(self.time_target.as_str(), Value::Float(0.0));
      summary.add(AGGREGATE_COUNT_COLUMN, Value::Int(0));
    } else {
      let mean_nanos = if state.valid_time_count == 0 {
        0.0
      } else {
        state.total_nanos as f64 / state.valid_time_count as f64
      };
      summary.add(self.size_target.as_str(), Value::Int(state.total_bytes));
      summary.add(self.time_target.as_str(), Value::Float(mean_nanos));
      summary.add(AGGREGATE_COUNT_COLUMN, Value::Int(state.row_count));
    }

    ctx.store_mut().reset(Scope::Global);
    summary
  }

  /// The configured size source column.
  pub fn size_source(&self) -> &str {
    &self.size_source
  }

  /// The configured time source column.
  pub fn time_source(&self) -> &str {
    &self.time_source
  }
}

/// Resolves a column value to a canonical byte count.
fn resolve_bytes(value: &Value) -> Result<i64, TokenParseError> {
  match value {
    Value::Int(n) => Ok(*n),
    Value::Float(x) => Ok(*x as i64),
    Value::Size(token) => Ok(token.bytes()),
    Value::Text(text) => ByteSize::parse(text).map(|token| token.bytes()),
    other => Err(TokenParseError::InvalidFormat(format!(
      "cannot read {} value as a byte size",
      other.kind()
    ))),
  }
}

/// Resolves a column value to canonical nanoseconds.
fn resolve_nanos(value: &Value) -> Result<i64, TokenParseError> {
  match value {
    Value::Int(n) => Ok(*n),
    Value::Float(x) => Ok(*x as i64),
    Value::Duration(token) => Ok(token.nanoseconds()),
    Value::Text(text) => TimeDuration::parse(text).map(|token| token.nanoseconds()),
    other => Err(TokenParseError::InvalidFormat(format!(
      "cannot read {} value as a time duration",
      other.kind()
    ))),
  }
}
