//! Input trait for components that consume input streams.
//!
//! The [`Input`] trait is implemented by transformers and consumers that
//! receive data from upstream components: row-batch streams into
//! accumulating stages, summary-row streams into consumers.
//!
//! # Key Concepts
//!
//! - **Input Type**: the item the component consumes (`Vec<Row>` for
//!   batch-oriented stages, `Row` for row-at-a-time consumers)
//! - **InputStream**: a pinned, boxed async stream yielding those items
//! - **Send Bound**: items and streams cross task boundaries
//!
//! # Quick Start
//!
//! ```rust
//! use rowweave::input::Input;
//! use rowweave::row::Row;
//! use futures::Stream;
//! use std::pin::Pin;
//!
//! struct MyConsumer;
//!
//! impl Input for MyConsumer {
//!   type Input = Row;
//!   type InputStream = Pin<Box<dyn Stream<Item = Row> + Send>>;
//! }
//! ```
//!
//! The trait works together with [`crate::output::Output`] to make stream
//! connections type-safe: a component can only be fed from an upstream
//! whose output type matches its input type.

use futures::Stream;

/// Trait for components that consume input streams.
pub trait Input
where
  Self::Input: Send + 'static,
{
  /// The type of items this component consumes.
  type Input;
  /// The input stream type that yields items of type `Self::Input`.
  type InputStream: Stream<Item = Self::Input> + Send + 'static;
}
