//! # Transformers Module
//!
//! Transformer implementations for rowweave pipelines. A transformer
//! consumes the stream produced by the upstream component and produces the
//! stream the downstream component consumes; an accumulating transformer
//! may drain its whole input before yielding anything.
//!
//! ## Implementations
//!
//! - **[`AggregateStatsTransformer`]**: drives the aggregate-stats
//!   directive over a stream of row batches and yields its single summary
//!   row when the input ends

/// Stream-level wrapper for the aggregate-stats directive.
pub mod aggregate_stats_transformer;

pub use aggregate_stats_transformer::AggregateStatsTransformer;
