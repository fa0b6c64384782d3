//! # rowweave
//!
//! Row-oriented streaming transformation stages in pure Rust.
//!
//! rowweave parses human-readable magnitude literals, byte sizes
//! (`"10KB"`, `"1.5MB"`) and time durations (`"500ms"`, `"2.5h"`), into
//! canonical integer units, and aggregates them over streams of row
//! batches: running totals and counts accumulate across every batch of a
//! run, and finalization emits a single summary row and clears the run's
//! state.
//!
//! ## Key Features
//!
//! - **Exact literal parsing**: decimal-exact canonical values with strict
//!   grammar, rounding, and range rules
//! - **Pure accumulation**: `process` only mutates run-scoped state; the
//!   summary appears once, on `finalize`
//! - **Host-owned state**: the run context owns the transient store; stages
//!   borrow it per call
//! - **Injected observability**: parse failures and skipped nulls are
//!   counted through a pluggable metrics sink
//!
//! ## Quick Start
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
//! directive.process(&[row], &mut ctx);
//!
//! let summary = directive.finalize(&mut ctx);
//! assert_eq!(summary.value("aggregate_count"), Some(&Value::Int(1)));
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Execution context handed to directives by the host.
pub mod context;
/// Consumer trait and configuration.
pub mod consumer;
/// Collection of built-in consumers.
pub mod consumers;
/// Batch-oriented stages and their invocation surface.
pub mod directives;
/// Error handling system: stream-tier strategies and domain-tier errors.
pub mod error;
/// Input trait for stream-consuming components.
pub mod input;
/// Metrics sink for stage observability.
pub mod metrics;
/// Output trait for stream-producing components.
pub mod output;
/// Producer trait and configuration.
pub mod producer;
/// Collection of built-in producers.
pub mod producers;
/// Rows and dynamically-kinded values.
pub mod row;
/// Run-scoped transient state.
pub mod state;
/// Magnitude literal tokens.
pub mod tokens;
/// Transformer trait and configuration.
pub mod transformer;
/// Collection of built-in transformers.
pub mod transformers;

pub use consumer::{Consumer, ConsumerConfig};
pub use error::{ErrorAction, ErrorStrategy};
pub use input::Input;
pub use output::Output;
pub use producer::{Producer, ProducerConfig};
pub use transformer::{Transformer, TransformerConfig};

#[cfg(test)]
mod transformer_test;
