//! End-to-end aggregation: producer → aggregate-stats transformer →
//! consumer, over multiple batches of one run.

use rowweave::consumers::CollectConsumer;
use rowweave::context::ExecutorContext;
use rowweave::directives::{AggregateStats, Arguments};
use rowweave::metrics::MemoryMetrics;
use rowweave::producers::RowBatchProducer;
use rowweave::row::{Row, Value};
use rowweave::{Consumer, Producer, Transformer};
use rowweave::transformers::AggregateStatsTransformer;
use std::sync::Arc;
use tokio::sync::Mutex;

fn init_tracing() {
  let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn sample_row(size: &str, elapsed: &str) -> Row {
  let mut row = Row::new();
  row.add("size", Value::Text(size.to_string()));
  row.add("elapsed", Value::Text(elapsed.to_string()));
  row
}

fn null_row() -> Row {
  let mut row = Row::new();
  row.add("size", Value::Null);
  row.add("elapsed", Value::Null);
  row
}

async fn run_pipeline(
  mut producer: RowBatchProducer,
  mut transformer: AggregateStatsTransformer,
) -> Vec<Row> {
  let summaries = transformer.transform(producer.produce()).await;
  let mut consumer = CollectConsumer::new();
  consumer.consume(summaries).await;
  consumer.collected().await
}

#[tokio::test]
async fn test_pipeline_aggregates_across_batches() {
  init_tracing();

  let directive = AggregateStats::from_args(
    &Arguments::new()
      .with_column("size_source", "size")
      .with_column("time_source", "elapsed")
      .with_column("size_target", "total_size")
      .with_column("time_target", "avg_time"),
  )
  .unwrap();

  let producer = RowBatchProducer::new(vec![
    vec![sample_row("1KB", "500ms"), sample_row("2KB", "1s")],
    vec![sample_row("10B", "1500ms")],
  ]);
  let transformer = AggregateStatsTransformer::new(directive);

  let collected = run_pipeline(producer, transformer).await;
  assert_eq!(collected.len(), 1);

  let summary = &collected[0];
  assert_eq!(summary.value("total_size"), Some(&Value::Int(3082)));
  assert_eq!(
    summary.value("avg_time"),
    Some(&Value::Float(1_000_000_000.0))
  );
  assert_eq!(summary.value("aggregate_count"), Some(&Value::Int(3)));
}

#[tokio::test]
async fn test_pipeline_with_empty_input() {
  init_tracing();

  let directive = AggregateStats::new("size", "elapsed", "total_size", "avg_time");
  let producer = RowBatchProducer::new(vec![]);
  let transformer = AggregateStatsTransformer::new(directive);

  let collected = run_pipeline(producer, transformer).await;
  assert_eq!(collected.len(), 1);

  let summary = &collected[0];
  assert_eq!(summary.value("total_size"), Some(&Value::Int(0)));
  assert_eq!(summary.value("avg_time"), Some(&Value::Float(0.0)));
  assert_eq!(summary.value("aggregate_count"), Some(&Value::Int(0)));
}

#[tokio::test]
async fn test_pipeline_counts_skips_on_host_metrics() {
  init_tracing();

  let metrics = Arc::new(MemoryMetrics::new());
  let ctx = Arc::new(Mutex::new(ExecutorContext::with_metrics(metrics.clone())));

  let directive = AggregateStats::new("size", "elapsed", "total_size", "avg_time");
  let producer = RowBatchProducer::new(vec![
    vec![
      sample_row("1KB", "1s"),
      null_row(),
      sample_row("not a size", "3s"),
    ],
    vec![sample_row("4KB", "not a duration"), sample_row("8KB", "5s")],
  ]);
  let transformer = AggregateStatsTransformer::with_context(directive, ctx.clone());

  let collected = run_pipeline(producer, transformer).await;
  let summary = &collected[0];

  // 5 rows, 2 size failures/nulls, 2 time failures/nulls.
  assert_eq!(summary.value("aggregate_count"), Some(&Value::Int(5)));
  assert_eq!(
    summary.value("total_size"),
    Some(&Value::Int(1024 + 4096 + 8192))
  );
  assert_eq!(
    summary.value("avg_time"),
    Some(&Value::Float(3_000_000_000.0))
  );

  assert_eq!(metrics.get(AggregateStats::SIZE_NULL_SKIPPED), 1);
  assert_eq!(metrics.get(AggregateStats::SIZE_PARSE_ERRORS), 1);
  assert_eq!(metrics.get(AggregateStats::TIME_NULL_SKIPPED), 1);
  assert_eq!(metrics.get(AggregateStats::TIME_PARSE_ERRORS), 1);

  // Run-global state is cleared once the summary is out.
  assert!(ctx.lock().await.store().aggregate().is_none());
}

#[tokio::test]
async fn test_two_runs_over_one_host_context() {
  init_tracing();

  let ctx = Arc::new(Mutex::new(ExecutorContext::new()));
  let directive = AggregateStats::new("size", "elapsed", "total_size", "avg_time");

  let first = run_pipeline(
    RowBatchProducer::single_batch(vec![sample_row("1KB", "1s")]),
    AggregateStatsTransformer::with_context(directive.clone(), ctx.clone()),
  )
  .await;
  assert_eq!(first[0].value("total_size"), Some(&Value::Int(1024)));

  // The second run starts from a clean slate, not from 1KB.
  let second = run_pipeline(
    RowBatchProducer::single_batch(vec![sample_row("2KB", "2s")]),
    AggregateStatsTransformer::with_context(directive, ctx.clone()),
  )
  .await;
  assert_eq!(second[0].value("total_size"), Some(&Value::Int(2048)));
  assert_eq!(second[0].value("aggregate_count"), Some(&Value::Int(1)));
}
