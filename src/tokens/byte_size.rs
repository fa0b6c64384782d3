//! Byte-size literal token.
//!
//! [`ByteSize`] parses human-readable byte magnitudes (`"10KB"`, `"1.5MB"`,
//! `"512"`) into an exact canonical byte count.
//!
//! # Grammar
//!
//! `<sign>?<digits>(.<digits>)?<ws>*<prefix>?<unit>?`, case-insensitive,
//! where `prefix` is one of `K`, `M`, `G`, `T`, `P` and `unit` is `B`.
//! Prefixes are binary (powers of 1024). A prefix without the `B` base unit
//! is rejected; a literal with neither prefix nor unit is read as raw bytes.
//!
//! # Quick Start
//!
//! ```rust
//! use rowweave::tokens::ByteSize;
//!
//! let size = ByteSize::parse("1.5MB").unwrap();
//! assert_eq!(size.bytes(), 1_572_864);
//! assert_eq!(size.raw(), "1.5MB");
//! ```

use crate::tokens::TokenParseError;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)^(-?[0-9]+(?:\.[0-9]+)?)\s*([KMGTP]?)(B?)$").expect("byte size pattern")
});

const BYTES_PER_KB: i64 = 1024;
const BYTES_PER_MB: i64 = 1024 * 1024;
const BYTES_PER_GB: i64 = 1024 * 1024 * 1024;
const BYTES_PER_TB: i64 = 1024 * 1024 * 1024 * 1024;
const BYTES_PER_PB: i64 = 1024 * 1024 * 1024 * 1024 * 1024;

/// A parsed byte-size literal, stored canonically as bytes.
///
/// Equality, ordering, and hashing are defined on the canonical byte count
/// only; the raw text is retained for display and serialization.
#[derive(Debug, Clone)]
pub struct ByteSize {
  raw: String,
  bytes: i64,
}

impl ByteSize {
  /// Parses a byte-size literal.
  ///
  /// Surrounding whitespace is ignored for parsing but preserved in the
  /// raw text. The canonical byte count is the exact decimal value times
  /// the prefix multiplier, truncated toward zero.
  ///
  /// # Errors
  ///
  /// - [`TokenParseError::InvalidFormat`] when the text does not match the
  ///   grammar, or a prefix appears without the `B` base unit.
  /// - [`TokenParseError::InvalidNumber`] when the numeric part fails to
  ///   convert to a decimal.
  /// - [`TokenParseError::OutOfRange`] when the truncated result does not
  ///   fit in an `i64`.
  pub fn parse(text: &str) -> Result<Self, TokenParseError> {
    let caps = PATTERN
      .captures(text.trim())
      .ok_or_else(|| TokenParseError::InvalidFormat(text.to_string()))?;

    let number = &caps[1];
    let prefix = caps[2].to_ascii_uppercase();
    let base = &caps[3];

    // A prefix like "10K" is only a size when the base unit is spelled out.
    if base.is_empty() && !prefix.is_empty() {
      return Err(TokenParseError::InvalidFormat(format!(
        "missing 'B' in '{}'",
        text
      )));
    }

    let value =
      Decimal::from_str(number).map_err(|_| TokenParseError::InvalidNumber(number.to_string()))?;

    let multiplier = match prefix.as_str() {
      "" => 1,
      "K" => BYTES_PER_KB,
      "M" => BYTES_PER_MB,
      "G" => BYTES_PER_GB,
      "T" => BYTES_PER_TB,
      "P" => BYTES_PER_PB,
      other => {
        return Err(TokenParseError::InvalidFormat(format!(
          "unknown prefix '{}' in '{}'",
          other, text
        )));
      }
    };

    let bytes = value
      .checked_mul(Decimal::from(multiplier))
      .and_then(|scaled| scaled.trunc().to_i64())
      .ok_or_else(|| TokenParseError::OutOfRange(text.to_string()))?;

    Ok(Self {
      raw: text.to_string(),
      bytes,
    })
  }

  /// Returns the canonical size in bytes.
  pub fn bytes(&self) -> i64 {
    self.bytes
  }

  /// Returns the original literal text, as given.
  pub fn raw(&self) -> &str {
    &self.raw
  }
}

impl FromStr for ByteSize {
  type Err = TokenParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for ByteSize {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.raw)
  }
}

impl PartialEq for ByteSize {
  fn eq(&self, other: &Self) -> bool {
    self.bytes == other.bytes
  }
}

impl Eq for ByteSize {}

impl PartialOrd for ByteSize {
  fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for ByteSize {
  fn cmp(&self, other: &Self) -> std::cmp::Ordering {
    self.bytes.cmp(&other.bytes)
  }
}

impl Hash for ByteSize {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.bytes.hash(state);
  }
}

impl Serialize for ByteSize {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.raw)
  }
}

impl<'de> Deserialize<'de> for ByteSize {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let text = String::deserialize(deserializer)?;
    Self::parse(&text).map_err(D::Error::custom)
  }
}
