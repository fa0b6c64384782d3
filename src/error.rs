//! # Error Handling System
//!
//! Error handling for rowweave stages, split into two tiers.
//!
//! ## Stream tier
//!
//! Components (producers, transformers, consumers) handle per-item failures
//! through a configurable policy:
//!
//! - **ErrorAction**: the action taken when an error occurs (Stop, Skip, Retry)
//! - **ErrorStrategy**: the configured policy (Stop, Skip, Retry, Custom)
//! - **StreamError**: an error enriched with context and component identity
//! - **ErrorContext**: timestamp, offending item, and component identity
//! - **ComponentInfo**: component name and type information for diagnostics
//!
//! ## Domain tier
//!
//! Directive setup and execution failures are modeled as [`DirectiveError`].
//! A `Configuration` error is fatal and raised before any row is processed;
//! value-level parse failures inside a running stage are recoverable and are
//! represented by [`crate::tokens::TokenParseError`]; they are counted
//! through the metrics sink and never abort a run.
//!
//! ## Example
//!
//! ```rust
//! use rowweave::error::ErrorStrategy;
//! use rowweave::row::Row;
//!
//! // Skip rows that fail, instead of stopping the stream.
//! let strategy: ErrorStrategy<Vec<Row>> = ErrorStrategy::Skip;
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use thiserror::Error as ThisError;

/// Action to take when an error occurs in a stage.
///
/// Error strategies resolve to one of these actions while a stream is being
/// processed.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorAction {
  /// Stop processing immediately when an error occurs.
  Stop,
  /// Skip the item that caused the error and continue processing.
  Skip,
  /// Retry the operation that caused the error.
  Retry,
}

// Type alias for the custom error handler function
type CustomErrorHandler<T> = Arc<dyn Fn(&StreamError<T>) -> ErrorAction + Send + Sync>;

/// Strategy for handling errors in stages.
///
/// Strategies can be set per component through its configuration. The
/// default is `Stop`, which preserves data integrity by refusing to emit
/// partial results after a failure.
///
/// # Example
///
/// ```rust
/// use rowweave::error::{ErrorStrategy, ErrorAction};
///
/// // Retry up to 3 times
/// let strategy: ErrorStrategy<i64> = ErrorStrategy::Retry(3);
///
/// // Custom handling based on retry count
/// let strategy = ErrorStrategy::<i64>::new_custom(|error| {
///   if error.retries < 2 {
///     ErrorAction::Retry
///   } else {
///     ErrorAction::Stop
///   }
/// });
/// ```
pub enum ErrorStrategy<T> {
  /// Stop processing immediately when an error occurs.
  Stop,
  /// Skip items that cause errors and continue processing.
  Skip,
  /// Retry failed operations up to the specified number of times.
  Retry(usize),
  /// Custom error handling logic.
  Custom(CustomErrorHandler<T>),
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Clone for ErrorStrategy<T> {
  fn clone(&self) -> Self {
    match self {
      ErrorStrategy::Stop => ErrorStrategy::Stop,
      ErrorStrategy::Skip => ErrorStrategy::Skip,
      ErrorStrategy::Retry(n) => ErrorStrategy::Retry(*n),
      ErrorStrategy::Custom(handler) => ErrorStrategy::Custom(handler.clone()),
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> fmt::Debug for ErrorStrategy<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorStrategy::Stop => write!(f, "ErrorStrategy::Stop"),
      ErrorStrategy::Skip => write!(f, "ErrorStrategy::Skip"),
      ErrorStrategy::Retry(n) => write!(f, "ErrorStrategy::Retry({})", n),
      ErrorStrategy::Custom(_) => write!(f, "ErrorStrategy::Custom"),
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> PartialEq for ErrorStrategy<T> {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (ErrorStrategy::Stop, ErrorStrategy::Stop) => true,
      (ErrorStrategy::Skip, ErrorStrategy::Skip) => true,
      (ErrorStrategy::Retry(n1), ErrorStrategy::Retry(n2)) => n1 == n2,
      (ErrorStrategy::Custom(_), ErrorStrategy::Custom(_)) => true,
      _ => false,
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> ErrorStrategy<T> {
  /// Creates a custom error handling strategy from a handler function.
  ///
  /// # Arguments
  ///
  /// * `f` - A function that maps a `StreamError` to an `ErrorAction`.
  pub fn new_custom<F>(f: F) -> Self
  where
    F: Fn(&StreamError<T>) -> ErrorAction + Send + Sync + 'static,
  {
    Self::Custom(Arc::new(f))
  }
}

/// Error that occurred during stream processing.
///
/// Carries the original error together with the context in which it
/// happened and the identity of the component that raised it.
#[derive(Debug)]
pub struct StreamError<T> {
  /// The original error that occurred.
  pub source: Box<dyn Error + Send + Sync>,
  /// Context about when and where the error occurred.
  pub context: ErrorContext<T>,
  /// Information about the component that encountered the error.
  pub component: ComponentInfo,
  /// Number of times this error has been retried.
  pub retries: usize,
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Clone for StreamError<T> {
  fn clone(&self) -> Self {
    Self {
      source: Box::new(StringError(self.source.to_string())),
      context: self.context.clone(),
      component: self.component.clone(),
      retries: self.retries,
    }
  }
}

/// A simple error type that wraps a string message.
#[derive(Debug)]
pub struct StringError(pub String);

impl std::fmt::Display for StringError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error for StringError {}

impl<T: std::fmt::Debug + Clone + Send + Sync> StreamError<T> {
  /// Creates a new `StreamError` with the given source, context, and
  /// component information. `retries` starts at 0.
  pub fn new(
    source: Box<dyn Error + Send + Sync>,
    context: ErrorContext<T>,
    component: ComponentInfo,
  ) -> Self {
    Self {
      source,
      context,
      component,
      retries: 0,
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> fmt::Display for StreamError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Error in {} ({}): {}",
      self.component.name, self.component.type_name, self.source
    )
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Error for StreamError<T> {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(self.source.as_ref())
  }
}

/// Context information about when and where an error occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext<T> {
  /// The timestamp when the error occurred.
  pub timestamp: chrono::DateTime<chrono::Utc>,
  /// The item being processed when the error occurred, if available.
  pub item: Option<T>,
  /// The name of the component that encountered the error.
  pub component_name: String,
  /// The type of the component that encountered the error.
  pub component_type: String,
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Default for ErrorContext<T> {
  fn default() -> Self {
    Self {
      timestamp: chrono::Utc::now(),
      item: None,
      component_name: "default".to_string(),
      component_type: "default".to_string(),
    }
  }
}

/// Information about a stage component.
///
/// Used in error reporting and in the metrics/log output of running stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl Default for ComponentInfo {
  fn default() -> Self {
    Self {
      name: "default".to_string(),
      type_name: "default".to_string(),
    }
  }
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}

/// Error type for directive setup and execution.
///
/// `Configuration` is raised while a directive is being configured from its
/// argument list and aborts the run before any row is processed. `Execution`
/// covers host-contract violations during a run; per-value parse failures
/// are *not* represented here; they stay inside the stage and are only
/// counted through the metrics sink.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
  /// A required argument is missing or has the wrong kind.
  #[error("configuration error: {0}")]
  Configuration(String),
  /// The directive was invoked outside its contract.
  #[error("execution error: {0}")]
  Execution(String),
}
