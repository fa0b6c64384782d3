//! Stream-level wrapper for the aggregate-stats directive.
//!
//! [`AggregateStatsTransformer`] adapts [`AggregateStats`] to the
//! [`Transformer`] seam: each item of the input stream is one batch of
//! rows (one `process` call), and when the input ends the transformer
//! yields the directive's single summary row from `finalize`.
//!
//! The run's [`ExecutorContext`] stays host-owned: the transformer holds a
//! shared handle, so the host can install its metrics sink, inspect state
//! between batches, or hand the same context to a replacement stage. The
//! host still serializes batches; the lock only bridges the context into
//! the output stream.
//!
//! # Example
//!
//! ```rust
//! use rowweave::directives::AggregateStats;
//! use rowweave::transformers::AggregateStatsTransformer;
//! use rowweave::transformer::Transformer;
//! use rowweave::row::{Row, Value};
//! use futures::{stream, StreamExt};
//!
//! # async fn example() {
//! let directive = AggregateStats::new("size", "elapsed", "total_size", "avg_time");
//! let mut transformer = AggregateStatsTransformer::new(directive);
//!
//! let mut row = Row::new();
//! row.add("size", Value::Text("1KB".to_string()));
//! row.add("elapsed", Value::Text("500ms".to_string()));
//!
//! let input = Box::pin(stream::iter(vec![vec![row]]));
//! let mut output = transformer.transform(input).await;
//! let summary = output.next().await.unwrap();
//! assert_eq!(summary.value("total_size"), Some(&Value::Int(1024)));
//! # }
//! ```

use crate::context::ExecutorContext;
use crate::directives::AggregateStats;
use crate::error::{ComponentInfo, ErrorStrategy};
use crate::row::Row;
use crate::transformer::TransformerConfig;
use crate::{Input, Output, Transformer};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A transformer that accumulates row batches through the aggregate-stats
/// directive and yields its summary row at end of input.
pub struct AggregateStatsTransformer {
  /// The configured directive driven by this transformer.
  directive: AggregateStats,
  /// The host-owned run context (state store plus metrics sink).
  ctx: Arc<Mutex<ExecutorContext>>,
  /// Configuration for the transformer, including error handling strategy.
  config: TransformerConfig<Vec<Row>>,
}

impl AggregateStatsTransformer {
  /// Creates a transformer owning a fresh run context.
  pub fn new(directive: AggregateStats) -> Self {
    Self::with_context(directive, Arc::new(Mutex::new(ExecutorContext::new())))
  }

  /// Creates a transformer over a host-owned run context.
  ///
  /// # Arguments
  ///
  /// * `directive` - The configured aggregate-stats directive.
  /// * `ctx` - The context whose state this run accumulates into.
  pub fn with_context(directive: AggregateStats, ctx: Arc<Mutex<ExecutorContext>>) -> Self {
    Self {
      directive,
      ctx,
      config: TransformerConfig::default(),
    }
  }

  /// Returns a handle to the run context.
  pub fn context(&self) -> Arc<Mutex<ExecutorContext>> {
    self.ctx.clone()
  }

  /// Sets the error handling strategy for this transformer.
  ///
  /// # Arguments
  ///
  /// * `strategy` - The error handling strategy to use.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<Vec<Row>>) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Sets the name for this transformer.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this transformer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }
}

impl Clone for AggregateStatsTransformer {
  fn clone(&self) -> Self {
    Self {
      directive: self.directive.clone(),
      ctx: self.ctx.clone(),
      config: self.config.clone(),
    }
  }
}

impl Input for AggregateStatsTransformer {
  type Input = Vec<Row>;
  type InputStream = Pin<Box<dyn Stream<Item = Vec<Row>> + Send>>;
}

impl Output for AggregateStatsTransformer {
  type Output = Row;
  type OutputStream = Pin<Box<dyn Stream<Item = Row> + Send>>;
}

#[async_trait]
impl Transformer for AggregateStatsTransformer {
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let directive = self.directive.clone();
    let ctx = self.ctx.clone();

    Box::pin(async_stream::stream! {
      let mut input = input;
      while let Some(batch) = input.next().await {
        let mut guard = ctx.lock().await;
        directive.process(&batch, &mut guard);
      }
      let mut guard = ctx.lock().await;
      yield directive.finalize(&mut guard);
    })
  }

  fn set_config_impl(&mut self, config: TransformerConfig<Vec<Row>>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig<Vec<Row>> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig<Vec<Row>> {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name
        .clone()
        .unwrap_or_else(|| "aggregate_stats_transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}
