//! # Magnitude Literal Tokens
//!
//! Parsed, canonical-unit representations of human-readable magnitude
//! literals: byte sizes (`"10KB"`, `"1.5MB"`) and time durations (`"500ms"`,
//! `"2.5h"`).
//!
//! ## Overview
//!
//! Each token is an immutable value object constructed once from a string.
//! Construction either succeeds with an exact canonical integer value
//! (bytes, nanoseconds) or fails with a [`TokenParseError`]; no partially
//! constructed token exists. The original text is retained for display and
//! serialization, but equality, ordering, and hashing are defined solely on
//! the canonical value: two tokens spelled differently but equal in
//! magnitude compare equal and share a hash.
//!
//! ## Core Types
//!
//! - **[`ByteSize`]**: a byte-magnitude literal, canonically in bytes
//! - **[`TimeDuration`]**: a time-magnitude literal, canonically in nanoseconds
//! - **[`TokenParseError`]**: the value-level failure taxonomy
//!
//! ## Precision
//!
//! The numeric part is handled as an exact decimal (`rust_decimal`), so
//! fractional literals against large multipliers stay exact: `"1.5MB"` is
//! 1,572,864 bytes, not a float approximation.

/// Byte-size literal token.
pub mod byte_size;
/// Time-duration literal token.
pub mod time_duration;

pub use byte_size::ByteSize;
pub use time_duration::TimeDuration;

use thiserror::Error;

/// Error type for magnitude literal parsing.
///
/// All three variants are value-level errors: the aggregator catches them,
/// counts them through the metrics sink, and moves on to the next row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenParseError {
  /// The text does not match the literal grammar, including a unit prefix
  /// without its base unit (`"10K"` is missing the `B`).
  #[error("invalid literal format: '{0}'")]
  InvalidFormat(String),
  /// The numeric part is not a parseable decimal. The grammar makes this
  /// unlikely, but the parser still guards the conversion.
  #[error("invalid number in literal: '{0}'")]
  InvalidNumber(String),
  /// The canonical value does not fit in a 64-bit signed integer.
  #[error("literal out of 64-bit canonical range: '{0}'")]
  OutOfRange(String),
}
