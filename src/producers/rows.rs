//! In-memory row-batch producer.
//!
//! [`RowBatchProducer`] turns a vector of row batches into a stream, one
//! `Vec<Row>` per item: the shape an accumulating stage sees as one
//! `process` call per batch.

use crate::error::ComponentInfo;
use crate::output::Output;
use crate::producer::{Producer, ProducerConfig};
use crate::row::Row;
use futures::Stream;
use std::pin::Pin;

/// A producer that yields a fixed sequence of row batches.
pub struct RowBatchProducer {
  batches: Vec<Vec<Row>>,
  config: ProducerConfig<Vec<Row>>,
}

impl RowBatchProducer {
  /// Creates a producer over the given batches.
  pub fn new(batches: Vec<Vec<Row>>) -> Self {
    Self {
      batches,
      config: ProducerConfig::default(),
    }
  }

  /// Creates a producer delivering all rows as a single batch.
  pub fn single_batch(rows: Vec<Row>) -> Self {
    Self::new(vec![rows])
  }
}

impl Output for RowBatchProducer {
  type Output = Vec<Row>;
  type OutputStream = Pin<Box<dyn Stream<Item = Vec<Row>> + Send>>;
}

impl Producer for RowBatchProducer {
  fn produce(&mut self) -> Self::OutputStream {
    Box::pin(futures::stream::iter(self.batches.clone()))
  }

  fn set_config_impl(&mut self, config: ProducerConfig<Vec<Row>>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig<Vec<Row>> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<Vec<Row>> {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name
        .clone()
        .unwrap_or_else(|| "row_batch_producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::row::Value;
  use futures::StreamExt;

  #[tokio::test]
  async fn test_row_batch_producer() {
    let mut row = Row::new();
    row.add("size", Value::Text("1KB".to_string()));

    let mut producer = RowBatchProducer::new(vec![vec![row.clone()], vec![row]]);
    let batches: Vec<Vec<Row>> = producer.produce().collect().await;
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
  }

  #[tokio::test]
  async fn test_row_batch_producer_empty() {
    let mut producer = RowBatchProducer::new(vec![]);
    let batches: Vec<Vec<Row>> = producer.produce().collect().await;
    assert!(batches.is_empty());
  }

  #[tokio::test]
  async fn test_single_batch() {
    let rows = vec![Row::new(), Row::new()];
    let mut producer = RowBatchProducer::single_batch(rows);
    let batches: Vec<Vec<Row>> = producer.produce().collect().await;
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
  }
}
