//! # Producer Trait
//!
//! The [`Producer`] trait is the seam for components that originate data
//! streams: the starting point of a pipeline. In rowweave the typical
//! producer yields row batches, one `Vec<Row>` per `process` call the host
//! would otherwise make.
//!
//! ## Example
//!
//! ```rust
//! use rowweave::producer::Producer;
//! use rowweave::producers::RowBatchProducer;
//! use rowweave::row::{Row, Value};
//! use futures::StreamExt;
//!
//! # async fn example() {
//! let mut row = Row::new();
//! row.add("size", Value::Text("1KB".to_string()));
//!
//! let mut producer = RowBatchProducer::new(vec![vec![row]]);
//! let mut stream = producer.produce();
//! while let Some(batch) = stream.next().await {
//!   println!("batch of {}", batch.len());
//! }
//! # }
//! ```

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::output::Output;

/// Configuration for producers: error handling strategy plus an optional
/// name used in logs and metrics.
#[derive(Debug, Clone)]
pub struct ProducerConfig<M: std::fmt::Debug + Clone + Send + Sync> {
  /// The error handling strategy to use when errors occur.
  pub error_strategy: ErrorStrategy<M>,
  /// Optional name identifying this producer.
  pub name: Option<String>,
}

impl<M: std::fmt::Debug + Clone + Send + Sync> Default for ProducerConfig<M> {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl<M: std::fmt::Debug + Clone + Send + Sync> ProducerConfig<M> {
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
  /// * `name` - The name to assign to this producer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current error handling strategy.
  pub fn error_strategy(&self) -> ErrorStrategy<M> {
    self.error_strategy.clone()
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that produce data streams.
pub trait Producer: Output
where
  Self::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Produces the output stream for this component.
  fn produce(&mut self) -> Self::OutputStream;

  /// Sets the configuration for this producer.
  ///
  /// # Arguments
  ///
  /// * `config` - The new `ProducerConfig` to apply.
  fn set_config(&mut self, config: ProducerConfig<Self::Output>) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the producer's configuration.
  fn config(&self) -> &ProducerConfig<Self::Output> {
    self.get_config_impl()
  }

  /// Sets the name for this producer.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this producer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    let config = self.get_config_impl().clone();
    self.set_config(ProducerConfig {
      error_strategy: config.error_strategy,
      name: Some(name),
    });
    self
  }

  /// Resolves the `ErrorAction` for an error from the configured strategy.
  ///
  /// # Arguments
  ///
  /// * `error` - The `StreamError` that occurred.
  fn handle_error(&self, error: &StreamError<Self::Output>) -> ErrorAction {
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
  /// * `item` - The item being produced when the error occurred, if
  ///   available.
  fn create_error_context(&self, item: Option<Self::Output>) -> ErrorContext<Self::Output> {
    ErrorContext {
      timestamp: chrono::Utc::now(),
      item,
      component_name: self.component_info().name,
      component_type: self.component_info().type_name,
    }
  }

  /// Returns identifying information about this producer.
  fn component_info(&self) -> ComponentInfo;

  /// Stores the configuration. Implemented by each producer.
  fn set_config_impl(&mut self, config: ProducerConfig<Self::Output>);

  /// Returns the stored configuration. Implemented by each producer.
  fn get_config_impl(&self) -> &ProducerConfig<Self::Output>;

  /// Returns the stored configuration mutably. Implemented by each
  /// producer.
  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig<Self::Output>;
}
