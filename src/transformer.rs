//! # Transformer Trait
//!
//! The [`Transformer`] trait is the seam for components that transform data
//! streams: they receive an input stream from the upstream component and
//! produce the output stream the downstream component consumes. The
//! aggregate-stats stage is a transformer that consumes row batches and
//! emits a single summary row when its input ends.
//!
//! ## Overview
//!
//! The trait provides:
//!
//! - **Stream Transformation**: async transformation of input streams into
//!   output streams
//! - **Error Handling**: a configurable [`ErrorStrategy`] per transformer
//! - **Component Information**: name and type information for diagnostics
//! - **Configuration**: [`TransformerConfig`] carrying strategy and naming
//!
//! ## Example
//!
//! ```rust,no_run
//! use rowweave::directives::AggregateStats;
//! use rowweave::transformers::AggregateStatsTransformer;
//! use rowweave::transformer::Transformer;
//! use rowweave::row::Row;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() {
//! let directive = AggregateStats::new("size", "elapsed", "total_size", "avg_time");
//! let mut transformer = AggregateStatsTransformer::new(directive);
//!
//! let batches: Vec<Vec<Row>> = vec![];
//! let mut output = transformer.transform(Box::pin(stream::iter(batches))).await;
//! while let Some(summary) = output.next().await {
//!   println!("summary: {:?}", summary);
//! }
//! # }
//! ```

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::{input::Input, output::Output};
use async_trait::async_trait;

/// Configuration for transformers: error handling strategy plus an optional
/// name used in logs and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerConfig<M: std::fmt::Debug + Clone + Send + Sync> {
  /// The error handling strategy to use when errors occur.
  pub error_strategy: ErrorStrategy<M>,
  /// Optional name identifying this transformer.
  pub name: Option<String>,
}

impl<M: std::fmt::Debug + Clone + Send + Sync> Default for TransformerConfig<M> {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl<M: std::fmt::Debug + Clone + Send + Sync> TransformerConfig<M> {
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
  /// * `name` - The name to assign to this transformer.
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

/// Trait for components that transform data streams.
///
/// Transformers process items as they flow through a pipeline. They can
/// map, filter, or accumulate; an accumulating transformer may consume its
/// whole input before yielding anything.
#[async_trait]
pub trait Transformer: Input + Output
where
  Self::Input: std::fmt::Debug + Clone + Send + Sync + 'static,
  Self::Output: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Transforms a stream of input items into a stream of output items.
  ///
  /// # Arguments
  ///
  /// * `input` - The input stream to transform.
  ///
  /// # Returns
  ///
  /// A stream yielding items of type `Self::Output`.
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream;

  /// Creates a new transformer instance with the given configuration.
  ///
  /// # Arguments
  ///
  /// * `config` - The `TransformerConfig` to apply.
  #[must_use]
  fn with_config(&self, config: TransformerConfig<Self::Input>) -> Self
  where
    Self: Sized + Clone,
  {
    let mut this = self.clone();
    this.set_config(config);
    this
  }

  /// Sets the configuration for this transformer.
  ///
  /// # Arguments
  ///
  /// * `config` - The new `TransformerConfig` to apply.
  fn set_config(&mut self, config: TransformerConfig<Self::Input>) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the transformer's configuration.
  fn config(&self) -> &TransformerConfig<Self::Input> {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the transformer's configuration.
  fn config_mut(&mut self) -> &mut TransformerConfig<Self::Input> {
    self.get_config_mut_impl()
  }

  /// Sets the name for this transformer.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this transformer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    let config = self.get_config_impl().clone();
    self.set_config(TransformerConfig {
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

  /// Returns identifying information about this transformer.
  fn component_info(&self) -> ComponentInfo;

  /// Stores the configuration. Implemented by each transformer.
  fn set_config_impl(&mut self, config: TransformerConfig<Self::Input>);

  /// Returns the stored configuration. Implemented by each transformer.
  fn get_config_impl(&self) -> &TransformerConfig<Self::Input>;

  /// Returns the stored configuration mutably. Implemented by each
  /// transformer.
  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig<Self::Input>;
}
