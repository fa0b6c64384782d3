//! Time-duration literal token.
//!
//! [`TimeDuration`] parses human-readable durations (`"500ms"`, `"2.5h"`)
//! into an exact canonical nanosecond count.
//!
//! # Grammar
//!
//! `<sign>?<digits>(.<digits>)?<ws>*<unit>`, case-insensitive, where `unit`
//! is one of `ns`, `us`, `ms`, `s`, `min`, `h`. Unlike byte sizes, the unit
//! is mandatory.
//!
//! # Rounding
//!
//! The decimal value is multiplied by the unit's nanosecond factor exactly,
//! then rounded to the nearest integer nanosecond with ties away from zero.
//! A result outside the `i64` range is an [`TokenParseError::OutOfRange`]
//! failure, distinct from format errors.
//!
//! # Quick Start
//!
//! ```rust
//! use rowweave::tokens::TimeDuration;
//!
//! let duration = TimeDuration::parse("1.5h").unwrap();
//! assert_eq!(duration.nanoseconds(), 5_400_000_000_000);
//! assert_eq!(duration.as_seconds(), 5400.0);
//! ```

use crate::tokens::TokenParseError;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^(-?[0-9]+(?:\.[0-9]+)?)\s*(ns|us|ms|s|min|h)$").expect("time duration pattern")
});

const NANOS_PER_US: i64 = 1_000;
const NANOS_PER_MS: i64 = 1_000_000;
const NANOS_PER_SEC: i64 = 1_000_000_000;
const NANOS_PER_MIN: i64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MIN;

/// A parsed time-duration literal, stored canonically as nanoseconds.
///
/// Equality, ordering, and hashing are defined on the canonical nanosecond
/// count only; the raw text is retained for display and serialization.
#[derive(Debug, Clone)]
pub struct TimeDuration {
  raw: String,
  nanoseconds: i64,
}

impl TimeDuration {
  /// Parses a time-duration literal.
  ///
  /// # Errors
  ///
  /// - [`TokenParseError::InvalidFormat`] when the text does not match the
  ///   grammar.
  /// - [`TokenParseError::InvalidNumber`] when the numeric part fails to
  ///   convert to a decimal.
  /// - [`TokenParseError::OutOfRange`] when the rounded nanosecond count
  ///   does not fit in an `i64`.
  pub fn parse(text: &str) -> Result<Self, TokenParseError> {
    let caps = PATTERN
      .captures(text.trim())
      .ok_or_else(|| TokenParseError::InvalidFormat(text.to_string()))?;

    let number = &caps[1];
    let unit = caps[2].to_ascii_lowercase();

    let value =
      Decimal::from_str(number).map_err(|_| TokenParseError::InvalidNumber(number.to_string()))?;

    let multiplier = match unit.as_str() {
      "ns" => 1,
      "us" => NANOS_PER_US,
      "ms" => NANOS_PER_MS,
      "s" => NANOS_PER_SEC,
      "min" => NANOS_PER_MIN,
      "h" => NANOS_PER_HOUR,
      other => {
        return Err(TokenParseError::InvalidFormat(format!(
          "unknown unit '{}' in '{}'",
          other, text
        )));
      }
    };

    let nanoseconds = value
      .checked_mul(Decimal::from(multiplier))
      .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
      .and_then(|rounded| rounded.to_i64())
      .ok_or_else(|| TokenParseError::OutOfRange(text.to_string()))?;

    Ok(Self {
      raw: text.to_string(),
      nanoseconds,
    })
  }

  /// Returns the canonical duration in nanoseconds.
  pub fn nanoseconds(&self) -> i64 {
    self.nanoseconds
  }

  /// Returns the original literal text, as given.
  pub fn raw(&self) -> &str {
    &self.raw
  }

  /// Returns the duration in seconds.
  ///
  /// Derived from the canonical nanoseconds as a decimal quotient at scale
  /// 10, then converted to `f64`; not stored.
  pub fn as_seconds(&self) -> f64 {
    self.quotient(NANOS_PER_SEC)
  }

  /// Returns the duration in milliseconds.
  ///
  /// Derived the same way as [`TimeDuration::as_seconds`].
  pub fn as_milliseconds(&self) -> f64 {
    self.quotient(NANOS_PER_MS)
  }

  fn quotient(&self, divisor: i64) -> f64 {
    let quotient = Decimal::from(self.nanoseconds) / Decimal::from(divisor);
    quotient
      .round_dp_with_strategy(10, RoundingStrategy::MidpointAwayFromZero)
      .to_f64()
      .unwrap_or(0.0)
  }
}

impl FromStr for TimeDuration {
  type Err = TokenParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for TimeDuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.raw)
  }
}

impl PartialEq for TimeDuration {
  fn eq(&self, other: &Self) -> bool {
    self.nanoseconds == other.nanoseconds
  }
}

impl Eq for TimeDuration {}

impl PartialOrd for TimeDuration {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for TimeDuration {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.nanoseconds.cmp(&other.nanoseconds)
  }
}

impl Hash for TimeDuration {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.nanoseconds.hash(state);
  }
}

impl Serialize for TimeDuration {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.raw)
  }
}

impl<'de> Deserialize<'de> for TimeDuration {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let text = String::deserialize(deserializer)?;
    Self::parse(&text).map_err(D::Error::custom)
  }
}
