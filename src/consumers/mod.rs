//! # Consumers Module
//!
//! Consumer implementations for rowweave pipelines.
//!
//! ## Implementations
//!
//! - **[`CollectConsumer`]**: collects rows into shared storage the host
//!   reads back after the run

/// Row-collecting consumer.
pub mod collect;

pub use collect::CollectConsumer;
