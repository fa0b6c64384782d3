//! # Consumer Trait
//!
//! The [`Consumer`] trait is the seam for components at the end of a
//! pipeline: they receive processed items and perform the final action. In
//! rowweave the typical consumer collects the aggregate stage's summary
//! rows for the host to read back.
//!
//! ## Example
//!
//! ```rust
//! use rowweave::consumer::Consumer;
//! use rowweave::consumers::CollectConsumer;
//! use rowweave::row::Row;
//! use futures::stream;
//!
//! # async fn example() {
//! let mut consumer = CollectConsumer::new();
//! let rows: Vec<Row> = vec![Row::new()];
//! consumer.consume(Box::pin(stream::iter(rows))).await;
//! assert_eq!(consumer.collected().await.len(), 1);
//! # }
//! ```

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::input::Input;
use async_trait::async_trait;

/// Configuration for consumers: error handling strategy plus a name used in
/// logs and metrics.
#[derive(Debug, Clone)]
pub struct ConsumerConfig<M: std::fmt::Debug + Clone + Send + Sync + 'static> {
  /// The error handling strategy to use when processing items.
  pub error_strategy: ErrorStrategy<M>,
  /// The name of this consumer component.
  pub name: String,
}

impl<M: std::fmt::Debug + Clone + Send + Sync + 'static> Default for ConsumerConfig<M> {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: String::new(),
    }
  }
}

impl<M: std::fmt::Debug + Clone + Send + Sync + 'static> ConsumerConfig<M> {
  /// Sets the error handling strategy for this configuration.
  ///
  /// # Arguments
  ///
  /// * `strategy` - The error handling strategy to use.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<M>) -> Self {
    self.error_strategy = strategy;
    self
  }

  /// Sets the name for this configuration.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this consumer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = name;
    self
  }

  /// Returns the current error handling strategy.
  pub fn error_strategy(&self) -> ErrorStrategy<M> {
    self.error_strategy.clone()
  }

  /// Returns the current name.
  pub fn name(&self) -> &str {
    &self.name
  }
}

/// Trait for components that consume data streams.
#[async_trait]
pub trait Consumer: Input
where
  Self::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Consumes the input stream to completion.
  ///
  /// # Arguments
  ///
  /// * `stream` - The input stream to consume.
  async fn consume(&mut self, stream: Self::InputStream);

  /// Sets the configuration for this consumer.
  ///
  /// # Arguments
  ///
  /// * `config` - The new `ConsumerConfig` to apply.
  fn set_config(&mut self, config: ConsumerConfig<Self::Input>) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the consumer's configuration.
  fn config(&self) -> &ConsumerConfig<Self::Input> {
    self.get_config_impl()
  }

  /// Sets the name for this consumer.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this consumer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    let config = self.get_config_impl().clone();
    self.set_config(ConsumerConfig {
      error_strategy: config.error_strategy,
      name,
    });
    self
  }

  /// Resolves the `ErrorAction` for an error from the configured strategy.
  ///
  /// # Arguments
  ///
  /// * `error` - The `StreamError` that occurred.
  fn handle_error(&self, error: &StreamError<Self::Input>) -> ErrorAction {
    match self.config().error_strategy() {
      ErrorStrategy::Stop => ErrorAction::Stop,
      ErrorStrategy::Skip => ErrorAction::Skip,
      ErrorStrategy::Retry(n) if error.retries < n => ErrorAction::Retry,
      ErrorStrategy::Custom(ref handler) => handler(error),
      _ => ErrorAction::Stop,
    }
  }

  /// Creates an error context for error reporting.
  ///
  /// # Arguments
  ///
  /// * `item` - The item that caused the error, if available.
  fn create_error_context(&self, item: Option<Self::Input>) -> ErrorContext<Self::Input> {
    ErrorContext {
      timestamp: chrono::Utc::now(),
      item,
      component_name: self.component_info().name,
      component_type: self.component_info().type_name,
    }
  }

  /// Returns identifying information about this consumer.
  fn component_info(&self) -> ComponentInfo;

  /// Stores the configuration. Implemented by each consumer.
  fn set_config_impl(&mut self, config: ConsumerConfig<Self::Input>);

  /// Returns the stored configuration. Implemented by each consumer.
  fn get_config_impl(&self) -> &ConsumerConfig<Self::Input>;

  /// Returns the stored configuration mutably. Implemented by each
  /// consumer.
  fn get_config_mut_impl(&mut self) -> &mut ConsumerConfig<Self::Input>;
}
