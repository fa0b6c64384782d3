//! # Producers Module
//!
//! Producer implementations for rowweave pipelines.
//!
//! ## Implementations
//!
//! - **[`RowBatchProducer`]**: yields in-memory row batches, one batch per
//!   stream item

/// In-memory row-batch producer.
pub mod rows;

pub use rows::RowBatchProducer;
