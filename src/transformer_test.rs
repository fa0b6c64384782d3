//! Tests for the `Transformer` trait: configuration plumbing, error
//! strategy resolution, and component information.

use crate::directives::AggregateStats;
use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError, StringError};
use crate::row::Row;
use crate::transformer::{Transformer, TransformerConfig};
use crate::transformers::AggregateStatsTransformer;

fn transformer() -> AggregateStatsTransformer {
  AggregateStatsTransformer::new(AggregateStats::new(
    "size",
    "elapsed",
    "total_size",
    "avg_time",
  ))
}

fn stream_error(retries: usize) -> StreamError<Vec<Row>> {
  StreamError {
    source: Box::new(StringError("boom".to_string())),
    context: ErrorContext::default(),
    component: ComponentInfo::default(),
    retries,
  }
}

#[test]
fn test_transformer_config_default() {
  let config = TransformerConfig::<Vec<Row>>::default();
  assert_eq!(config.name(), None);
  match config.error_strategy() {
    ErrorStrategy::Stop => {}
    _ => panic!("Expected Stop strategy by default"),
  }
}

#[test]
fn test_transformer_config_builder_chain() {
  let config = TransformerConfig::<Vec<Row>>::default()
    .with_error_strategy(ErrorStrategy::Retry(3))
    .with_name("aggregate".to_string());

  assert_eq!(config.name(), Some("aggregate".to_string()));
  match config.error_strategy() {
    ErrorStrategy::Retry(3) => {}
    _ => panic!("Expected Retry(3) strategy"),
  }
}

#[test]
fn test_set_and_get_config() {
  let mut transformer = transformer();
  let config = TransformerConfig::default().with_name("renamed".to_string());
  transformer.set_config(config);
  assert_eq!(transformer.config().name(), Some("renamed".to_string()));
}

#[test]
fn test_config_mut() {
  let mut transformer = transformer();
  transformer.config_mut().name = Some("via_mut".to_string());
  assert_eq!(transformer.config().name(), Some("via_mut".to_string()));
}

#[test]
fn test_handle_error_stop() {
  let transformer = transformer();
  assert_eq!(transformer.handle_error(&stream_error(0)), ErrorAction::Stop);
}

#[test]
fn test_handle_error_skip() {
  let transformer =
    transformer().with_config(TransformerConfig::default().with_error_strategy(ErrorStrategy::Skip));
  assert_eq!(transformer.handle_error(&stream_error(0)), ErrorAction::Skip);
}

#[test]
fn test_handle_error_retry_until_exhausted() {
  let transformer = transformer()
    .with_config(TransformerConfig::default().with_error_strategy(ErrorStrategy::Retry(2)));
  assert_eq!(transformer.handle_error(&stream_error(0)), ErrorAction::Retry);
  assert_eq!(transformer.handle_error(&stream_error(1)), ErrorAction::Retry);
  assert_eq!(transformer.handle_error(&stream_error(2)), ErrorAction::Stop);
}

#[test]
fn test_handle_error_custom() {
  let strategy = ErrorStrategy::new_custom(|error: &StreamError<Vec<Row>>| {
    if error.retries == 0 {
      ErrorAction::Retry
    } else {
      ErrorAction::Skip
    }
  });
  let transformer =
    transformer().with_config(TransformerConfig::default().with_error_strategy(strategy));
  assert_eq!(transformer.handle_error(&stream_error(0)), ErrorAction::Retry);
  assert_eq!(transformer.handle_error(&stream_error(5)), ErrorAction::Skip);
}

#[test]
fn test_create_error_context_carries_component_identity() {
  let transformer = transformer().with_name("agg".to_string());
  let context = transformer.create_error_context(None);
  assert_eq!(context.component_name, "agg");
  assert!(context.component_type.contains("AggregateStatsTransformer"));
  assert!(context.item.is_none());
}

#[test]
fn test_component_info_defaults_to_type_name() {
  let transformer = transformer();
  let info = transformer.component_info();
  assert_eq!(info.name, "aggregate_stats_transformer");
  assert!(info.type_name.contains("AggregateStatsTransformer"));
}
