//! # Directives Module
//!
//! Batch-oriented stages invoked by a host pipeline through a small
//! argument surface. A directive is configured once from its argument list
//! (fatal on bad configuration, before any row is processed), then driven
//! with repeated `process` calls over row batches, and finally asked to
//! `finalize` into its output.
//!
//! ## Core Types
//!
//! - **[`Arguments`] / [`ArgValue`]**: the invocation surface of named,
//!   ordered, kind-checked arguments
//! - **[`AggregateStats`]**: running byte-size totals and duration averages
//!   across every batch of a run

/// Directive invocation arguments.
pub mod arguments;
/// Aggregate statistics over byte-size and time-duration columns.
pub mod aggregate_stats;

pub use aggregate_stats::AggregateStats;
pub use arguments::{ArgValue, Arguments};

#[cfg(test)]
mod aggregate_stats_test;
