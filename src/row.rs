//! # Rows and Values
//!
//! The minimal row contract stages read and write: an ordered mapping from
//! column name to a dynamically-kinded [`Value`].
//!
//! ## Overview
//!
//! Rows are produced and consumed by the host pipeline; stages only read
//! named columns and write new ones into freshly created output rows.
//! Column names are unique within a row: [`Row::add`] replaces the value in
//! place when the column already exists, preserving column order.
//!
//! ## Value Kinds
//!
//! [`Value`] is a closed variant type: null, 64-bit integer, 64-bit float,
//! text, or an already-parsed magnitude token ([`ByteSize`],
//! [`TimeDuration`]). Stages dispatch on the variant with a single `match`
//! instead of open-ended runtime type checks.
//!
//! ## Example
//!
//! ```rust
//! use rowweave::row::{Row, Value};
//!
//! let mut row = Row::new();
//! row.add("size", Value::Text("10KB".to_string()));
//! row.add("elapsed", Value::Text("500ms".to_string()));
//!
//! assert_eq!(row.len(), 2);
//! assert!(row.value("missing").is_none());
//! ```

use crate::tokens::{ByteSize, TimeDuration};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;

/// A dynamically-kinded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  /// Absent value.
  Null,
  /// 64-bit signed integer.
  Int(i64),
  /// 64-bit float.
  Float(f64),
  /// Text.
  Text(String),
  /// A parsed byte-size token.
  Size(ByteSize),
  /// A parsed time-duration token.
  Duration(TimeDuration),
}

impl Value {
  /// Returns `true` for [`Value::Null`].
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }

  /// Returns the kind name, for diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Int(_) => "int",
      Value::Float(_) => "float",
      Value::Text(_) => "text",
      Value::Size(_) => "size",
      Value::Duration(_) => "duration",
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => write!(f, "null"),
      Value::Int(n) => write!(f, "{}", n),
      Value::Float(x) => write!(f, "{}", x),
      Value::Text(s) => write!(f, "{}", s),
      Value::Size(size) => write!(f, "{}", size),
      Value::Duration(duration) => write!(f, "{}", duration),
    }
  }
}

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Value::Null => serializer.serialize_unit(),
      Value::Int(n) => serializer.serialize_i64(*n),
      Value::Float(x) => serializer.serialize_f64(*x),
      Value::Text(s) => serializer.serialize_str(s),
      Value::Size(size) => size.serialize(serializer),
      Value::Duration(duration) => duration.serialize(serializer),
    }
  }
}

impl From<i64> for Value {
  fn from(n: i64) -> Self {
    Value::Int(n)
  }
}

impl From<f64> for Value {
  fn from(x: f64) -> Self {
    Value::Float(x)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Text(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::Text(s)
  }
}

impl From<ByteSize> for Value {
  fn from(size: ByteSize) -> Self {
    Value::Size(size)
  }
}

impl From<TimeDuration> for Value {
  fn from(duration: TimeDuration) -> Self {
    Value::Duration(duration)
  }
}

/// An ordered mapping from column name to [`Value`].
///
/// Columns keep their insertion order; names are unique per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
  columns: Vec<(String, Value)>,
}

impl Row {
  /// Creates an empty row.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a column, replacing the value in place if the column exists.
  ///
  /// Returns `&mut self` so additions chain.
  pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
    let name = name.into();
    let value = value.into();
    match self.index_of(&name) {
      Some(index) => self.columns[index].1 = value,
      None => self.columns.push((name, value)),
    }
    self
  }

  /// Returns the value of the named column, if present.
  pub fn value(&self, name: &str) -> Option<&Value> {
    self
      .columns
      .iter()
      .find(|(column, _)| column == name)
      .map(|(_, value)| value)
  }

  /// Returns the position of the named column, if present.
  pub fn index_of(&self, name: &str) -> Option<usize> {
    self.columns.iter().position(|(column, _)| column == name)
  }

  /// Number of columns.
  pub fn len(&self) -> usize {
    self.columns.len()
  }

  /// Returns `true` when the row has no columns.
  pub fn is_empty(&self) -> bool {
    self.columns.is_empty()
  }

  /// Iterates columns in order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self
      .columns
      .iter()
      .map(|(name, value)| (name.as_str(), value))
  }
}

impl Serialize for Row {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.columns.len()))?;
    for (name, value) in &self.columns {
      map.serialize_entry(name, value)?;
    }
    map.end()
  }
}
