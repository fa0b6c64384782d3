//! Row-collecting consumer.
//!
//! [`CollectConsumer`] drains its input stream into shared storage. For an
//! aggregate run the input is the single summary row; the host reads it
//! back through [`CollectConsumer::collected`].

use crate::consumer::{Consumer, ConsumerConfig};
use crate::error::ComponentInfo;
use crate::input::Input;
use crate::row::Row;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A consumer that collects every received row.
pub struct CollectConsumer {
  rows: Arc<Mutex<Vec<Row>>>,
  config: ConsumerConfig<Row>,
}

impl CollectConsumer {
  /// Creates an empty collector.
  pub fn new() -> Self {
    Self {
      rows: Arc::new(Mutex::new(Vec::new())),
      config: ConsumerConfig::default(),
    }
  }

  /// Returns the rows collected so far.
  pub async fn collected(&self) -> Vec<Row> {
    self.rows.lock().await.clone()
  }
}

impl Default for CollectConsumer {
  fn default() -> Self {
    Self::new()
  }
}

impl Input for CollectConsumer {
  type Input = Row;
  type InputStream = Pin<Box<dyn Stream<Item = Row> + Send>>;
}

#[async_trait]
impl Consumer for CollectConsumer {
  async fn consume(&mut self, mut stream: Self::InputStream) {
    while let Some(row) = stream.next().await {
      self.rows.lock().await.push(row);
    }
  }

  fn set_config_impl(&mut self, config: ConsumerConfig<Row>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ConsumerConfig<Row> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ConsumerConfig<Row> {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: if self.config.name.is_empty() {
        "collect_consumer".to_string()
      } else {
        self.config.name.clone()
      },
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}
