//! Directive invocation arguments.
//!
//! A directive is invoked with a fixed-order list of named arguments, each
//! carrying a kind. The only kinds stages accept today are column
//! references and plain text; a stage that requires a column rejects
//! anything else at configuration time, before any row is processed.

use crate::error::DirectiveError;

/// A single argument value, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
  /// A reference to a column by name.
  Column(String),
  /// A plain text literal.
  Text(String),
}

impl ArgValue {
  /// Returns the kind name, for diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      ArgValue::Column(_) => "column",
      ArgValue::Text(_) => "text",
    }
  }
}

/// An ordered collection of named directive arguments.
///
/// Later additions under an existing name replace the earlier value.
///
/// # Example
///
/// ```rust
/// use rowweave::directives::Arguments;
///
/// let args = Arguments::new()
///   .with_column("size_source", "size")
///   .with_column("time_source", "elapsed");
/// assert_eq!(args.column("size_source").unwrap(), "size");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
  entries: Vec<(String, ArgValue)>,
}

impl Arguments {
  /// Creates an empty argument list.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a column-reference argument.
  ///
  /// # Arguments
  ///
  /// * `name` - The argument name.
  /// * `column` - The referenced column name.
  #[must_use]
  pub fn with_column(self, name: impl Into<String>, column: impl Into<String>) -> Self {
    self.with_value(name, ArgValue::Column(column.into()))
  }

  /// Adds a text-literal argument.
  ///
  /// # Arguments
  ///
  /// * `name` - The argument name.
  /// * `text` - The literal text.
  #[must_use]
  pub fn with_text(self, name: impl Into<String>, text: impl Into<String>) -> Self {
    self.with_value(name, ArgValue::Text(text.into()))
  }

  /// Adds an argument of any kind.
  #[must_use]
  pub fn with_value(mut self, name: impl Into<String>, value: ArgValue) -> Self {
    let name = name.into();
    match self.entries.iter_mut().find(|(entry, _)| *entry == name) {
      Some((_, slot)) => *slot = value,
      None => self.entries.push((name, value)),
    }
    self
  }

  /// Returns the named argument, if present.
  pub fn get(&self, name: &str) -> Option<&ArgValue> {
    self
      .entries
      .iter()
      .find(|(entry, _)| entry == name)
      .map(|(_, value)| value)
  }

  /// Returns the column name of a required column-reference argument.
  ///
  /// # Errors
  ///
  /// [`DirectiveError::Configuration`] when the argument is absent or not
  /// a column reference.
  pub fn column(&self, name: &str) -> Result<&str, DirectiveError> {
    match self.get(name) {
      Some(ArgValue::Column(column)) => Ok(column),
      Some(other) => Err(DirectiveError::Configuration(format!(
        "argument '{}' must be a column name, got {}",
        name,
        other.kind()
      ))),
      None => Err(DirectiveError::Configuration(format!(
        "required argument '{}' missing",
        name
      ))),
    }
  }

  /// Number of arguments.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when no arguments were given.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_column_lookup() {
    let args = Arguments::new().with_column("size_source", "size");
    assert_eq!(args.column("size_source").unwrap(), "size");
  }

  #[test]
  fn test_missing_argument_is_configuration_error() {
    let args = Arguments::new();
    let error = args.column("size_source").unwrap_err();
    assert!(matches!(error, DirectiveError::Configuration(_)));
  }

  #[test]
  fn test_wrong_kind_is_configuration_error() {
    let args = Arguments::new().with_text("size_source", "size");
    let error = args.column("size_source").unwrap_err();
    assert!(matches!(error, DirectiveError::Configuration(_)));
  }

  #[test]
  fn test_later_value_replaces_earlier() {
    let args = Arguments::new()
      .with_column("col", "first")
      .with_column("col", "second");
    assert_eq!(args.len(), 1);
    assert_eq!(args.column("col").unwrap(), "second");
  }
}
