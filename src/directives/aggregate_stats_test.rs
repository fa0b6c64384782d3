//! Tests for the aggregate-stats directive: configuration, accumulation
//! across batches, finalization, and state reset.

use crate::context::ExecutorContext;
use crate::directives::{AggregateStats, Arguments};
use crate::directives::aggregate_stats::AGGREGATE_COUNT_COLUMN;
use crate::error::DirectiveError;
use crate::metrics::{MemoryMetrics, MetricsSink};
use crate::row::{Row, Value};
use crate::tokens::{ByteSize, TimeDuration};
use std::sync::Arc;

fn directive() -> AggregateStats {
  AggregateStats::new("size", "elapsed", "total_size", "avg_time")
}

fn row(size: Value, elapsed: Value) -> Row {
  let mut row = Row::new();
  row.add("size", size);
  row.add("elapsed", elapsed);
  row
}

fn text(value: &str) -> Value {
  Value::Text(value.to_string())
}

fn int_value(summary: &Row, column: &str) -> i64 {
  match summary.value(column) {
    Some(Value::Int(n)) => *n,
    other => panic!("expected Int in '{}', got {:?}", column, other),
  }
}

fn float_value(summary: &Row, column: &str) -> f64 {
  match summary.value(column) {
    Some(Value::Float(x)) => *x,
    other => panic!("expected Float in '{}', got {:?}", column, other),
  }
}

#[test]
fn test_from_args_with_all_columns() {
  let args = Arguments::new()
    .with_column("size_source", "size")
    .with_column("time_source", "elapsed")
    .with_column("size_target", "total_size")
    .with_column("time_target", "avg_time");

  let directive = AggregateStats::from_args(&args).unwrap();
  assert_eq!(directive.size_source(), "size");
  assert_eq!(directive.time_source(), "elapsed");
}

#[test]
fn test_from_args_missing_argument() {
  let args = Arguments::new()
    .with_column("size_source", "size")
    .with_column("time_source", "elapsed")
    .with_column("size_target", "total_size");

  let error = AggregateStats::from_args(&args).unwrap_err();
  assert!(matches!(error, DirectiveError::Configuration(_)));
}

#[test]
fn test_from_args_rejects_literal_argument() {
  let args = Arguments::new()
    .with_text("size_source", "size")
    .with_column("time_source", "elapsed")
    .with_column("size_target", "total_size")
    .with_column("time_target", "avg_time");

  let error = AggregateStats::from_args(&args).unwrap_err();
  assert!(matches!(error, DirectiveError::Configuration(_)));
}

#[test]
fn test_process_returns_no_rows() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();
  let rows = vec![row(text("1KB"), text("500ms"))];
  assert!(directive.process(&rows, &mut ctx).is_empty());
}

#[test]
fn test_aggregation_end_to_end() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();

  let rows = vec![
    row(text("1KB"), text("500ms")),
    row(text("2KB"), text("1s")),
    row(text("10B"), text("1500ms")),
  ];
  directive.process(&rows, &mut ctx);

  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, "total_size"), 3082);
  assert_eq!(float_value(&summary, "avg_time"), 1_000_000_000.0);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 3);
}

#[test]
fn test_accumulation_spans_batches() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();

  directive.process(&[row(text("1KB"), text("1s"))], &mut ctx);
  directive.process(&[row(text("1KB"), text("3s"))], &mut ctx);
  directive.process(&[], &mut ctx);

  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, "total_size"), 2048);
  assert_eq!(float_value(&summary, "avg_time"), 2_000_000_000.0);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 2);
}

#[test]
fn test_empty_run_summary() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();

  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, "total_size"), 0);
  assert_eq!(float_value(&summary, "avg_time"), 0.0);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 0);
}

#[test]
fn test_rows_without_valid_times_average_to_zero() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();

  let rows = vec![
    row(text("1KB"), Value::Null),
    row(text("2KB"), text("not a duration")),
  ];
  directive.process(&rows, &mut ctx);

  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, "total_size"), 3072);
  assert_eq!(float_value(&summary, "avg_time"), 0.0);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 2);
}

#[test]
fn test_mixed_valid_invalid_and_null_values() {
  let directive = directive();
  let metrics = Arc::new(MemoryMetrics::new());
  let mut ctx = ExecutorContext::with_metrics(metrics.clone());

  let rows = vec![
    row(text("1KB"), text("1s")),
    row(Value::Null, text("2s")),
    row(text("bogus"), text("3s")),
    row(text("2KB"), Value::Null),
    row(text("4KB"), text("bogus")),
  ];
  directive.process(&rows, &mut ctx);

  let summary = directive.finalize(&mut ctx);
  // Totals reflect only the valid contributions; every row still counts.
  assert_eq!(int_value(&summary, "total_size"), 7168);
  assert_eq!(float_value(&summary, "avg_time"), 2_000_000_000.0);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 5);

  assert_eq!(metrics.get(AggregateStats::SIZE_NULL_SKIPPED), 1);
  assert_eq!(metrics.get(AggregateStats::SIZE_PARSE_ERRORS), 1);
  assert_eq!(metrics.get(AggregateStats::TIME_NULL_SKIPPED), 1);
  assert_eq!(metrics.get(AggregateStats::TIME_PARSE_ERRORS), 1);
}

#[test]
fn test_missing_column_counts_as_null_skipped() {
  let directive = directive();
  let metrics = Arc::new(MemoryMetrics::new());
  let mut ctx = ExecutorContext::with_metrics(metrics.clone());

  let mut only_size = Row::new();
  only_size.add("size", text("1KB"));
  directive.process(&[only_size], &mut ctx);

  assert_eq!(metrics.get(AggregateStats::TIME_NULL_SKIPPED), 1);
  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 1);
}

#[test]
fn test_already_canonical_inputs_are_accepted() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();

  let rows = vec![
    row(Value::Int(512), Value::Int(1_000)),
    row(
      Value::Size(ByteSize::parse("1KB").unwrap()),
      Value::Duration(TimeDuration::parse("1us").unwrap()),
    ),
    // Floats truncate toward zero.
    row(Value::Float(10.9), Value::Float(99.9)),
  ];
  directive.process(&rows, &mut ctx);

  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, "total_size"), 512 + 1024 + 10);
  assert_eq!(
    float_value(&summary, "avg_time"),
    (1_000.0 + 1_000.0 + 99.0) / 3.0
  );
}

#[test]
fn test_wrong_kind_token_counts_as_parse_error() {
  let directive = directive();
  let metrics = Arc::new(MemoryMetrics::new());
  let mut ctx = ExecutorContext::with_metrics(metrics.clone());

  // A duration where a size belongs, and vice versa.
  let rows = vec![row(
    Value::Duration(TimeDuration::parse("1s").unwrap()),
    Value::Size(ByteSize::parse("1KB").unwrap()),
  )];
  directive.process(&rows, &mut ctx);

  assert_eq!(metrics.get(AggregateStats::SIZE_PARSE_ERRORS), 1);
  assert_eq!(metrics.get(AggregateStats::TIME_PARSE_ERRORS), 1);

  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, "total_size"), 0);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 1);
}

#[test]
fn test_finalize_resets_state_for_the_next_run() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();

  directive.process(&[row(text("1KB"), text("1s"))], &mut ctx);
  let first = directive.finalize(&mut ctx);
  assert_eq!(int_value(&first, AGGREGATE_COUNT_COLUMN), 1);
  assert!(ctx.store().aggregate().is_none());

  // A fresh run over the same context starts from zeros.
  directive.process(&[row(text("2KB"), text("2s"))], &mut ctx);
  let second = directive.finalize(&mut ctx);
  assert_eq!(int_value(&second, "total_size"), 2048);
  assert_eq!(int_value(&second, AGGREGATE_COUNT_COLUMN), 1);
}

#[test]
fn test_metrics_failures_do_not_affect_results() {
  struct DroppingMetrics;
  impl MetricsSink for DroppingMetrics {
    fn count(&self, _name: &str, _delta: u64) {
      // Drops every event; results must not change.
    }
  }

  let directive = directive();
  let mut ctx = ExecutorContext::with_metrics(Arc::new(DroppingMetrics));

  directive.process(&[row(Value::Null, text("bogus"))], &mut ctx);
  let summary = directive.finalize(&mut ctx);
  assert_eq!(int_value(&summary, AGGREGATE_COUNT_COLUMN), 1);
}

#[test]
fn test_summary_column_order() {
  let directive = directive();
  let mut ctx = ExecutorContext::new();
  directive.process(&[row(text("1KB"), text("1s"))], &mut ctx);

  let summary = directive.finalize(&mut ctx);
  let columns: Vec<&str> = summary.iter().map(|(name, _)| name).collect();
  assert_eq!(columns, vec!["total_size", "avg_time", AGGREGATE_COUNT_COLUMN]);
}
