
//! User-adjustable parser settings.

use serde::{Serialize, Deserialize};

/// Knobs controlling how text is turned into an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
  /// Longest accepted user symbol or function name, in characters.
  pub max_name_length: usize,
  /// Number of significant digits kept in a decimal mantissa.
  pub significant_digits: usize,
  /// Decimal exponents above this saturate to infinity, and those
  /// below its negation collapse to zero.
  pub max_decimal_exponent: i64,
  /// Integer literals wider than this many bits become decimals.
  pub max_integer_bits: u64,
  /// Run the display-parenthesis pass on every successful parse.
  pub add_missing_parentheses: bool,
  /// Deepest nesting of operands the parser will descend into. Each
  /// bracket, prefix minus or right-nested operand counts one level.
  pub max_depth: usize,
}

impl ParserSettings {
  pub const DEFAULT_MAX_NAME_LENGTH: usize = 7;
  pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 14;
  pub const DEFAULT_MAX_DECIMAL_EXPONENT: i64 = 1000;
  pub const DEFAULT_MAX_INTEGER_BITS: u64 = 1024;
  pub const DEFAULT_MAX_DEPTH: usize = 128;

  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(text)
  }

  pub fn with_missing_parentheses(mut self, enabled: bool) -> Self {
    self.add_missing_parentheses = enabled;
    self
  }
}

impl Default for ParserSettings {
  fn default() -> Self {
    Self {
      max_name_length: Self::DEFAULT_MAX_NAME_LENGTH,
      significant_digits: Self::DEFAULT_SIGNIFICANT_DIGITS,
      max_decimal_exponent: Self::DEFAULT_MAX_DECIMAL_EXPONENT,
      max_integer_bits: Self::DEFAULT_MAX_INTEGER_BITS,
      add_missing_parentheses: false,
      max_depth: Self::DEFAULT_MAX_DEPTH,
    }
  }
}
