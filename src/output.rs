//! Output trait for components that produce output streams.
//!
//! The [`Output`] trait is implemented by producers and transformers that
//! generate data for downstream components: row-batch streams out of
//! producers, summary rows out of accumulating stages.
//!
//! # Key Concepts
//!
//! - **Output Type**: the item the component produces
//! - **OutputStream**: a pinned, boxed async stream yielding those items
//! - **Send Bound**: items and streams cross task boundaries
//!
//! # Quick Start
//!
//! ```rust
//! use rowweave::output::Output;
//! use rowweave::row::Row;
//! use futures::Stream;
//! use std::pin::Pin;
//!
//! struct MyProducer;
//!
//! impl Output for MyProducer {
//!   type Output = Vec<Row>;
//!   type OutputStream = Pin<Box<dyn Stream<Item = Vec<Row>> + Send>>;
//! }
//! ```
//!
//! The trait works together with [`crate::input::Input`] to make stream
//! connections type-safe: downstream input types must match upstream
//! output types.

use futures::Stream;

/// Trait for components that produce output streams.
pub trait Output
where
  Self::Output: Send + 'static,
{
  /// The type of items this component produces.
  type Output;
  /// The output stream type that yields items of type `Self::Output`.
  type OutputStream: Stream<Item = Self::Output> + Send + 'static;
}
