
//! Names of user variables and functions.

use regex::Regex;
use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// A named, un-evaluated quantity.
///
/// A symbol's name must begin with an ASCII letter, followed by zero
/// or more letters, digits, or underscores. Names are case-sensitive.
/// The only exceptions are the two placeholder symbols, which stand
/// for the free variable of a function being plotted
/// ([`Symbol::unknown_x`]) or the index of a sequence
/// ([`Symbol::unknown_n`]) and are written as a single control
/// character.
///
/// The maximum name length is a parser setting, not a property of
/// the symbol.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Invalid symbol name '{original_string}'")]
pub struct TryFromStringError {
  original_string: String,
}

pub static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap()
});

pub const UNKNOWN_X: char = '\u{1}';
pub const UNKNOWN_N: char = '\u{2}';

/// The symbol holding the previous result.
pub const ANS: &str = "ans";

impl Symbol {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  pub fn unknown_x() -> Self {
    Self(UNKNOWN_X.to_string())
  }

  pub fn unknown_n() -> Self {
    Self(UNKNOWN_N.to_string())
  }

  pub fn ans() -> Self {
    Self(ANS.to_owned())
  }

  /// The placeholder symbol written as `ch`, if `ch` is one.
  pub fn placeholder(ch: char) -> Option<Self> {
    match ch {
      UNKNOWN_X => Some(Self::unknown_x()),
      UNKNOWN_N => Some(Self::unknown_n()),
      _ => None,
    }
  }

  pub fn is_placeholder(&self) -> bool {
    let mut chars = self.0.chars();
    matches!((chars.next(), chars.next()), (Some(UNKNOWN_X | UNKNOWN_N), None))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Length of the name, in characters.
  pub fn len(&self) -> usize {
    self.0.chars().count()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl TryFrom<String> for Symbol {
  type Error = TryFromStringError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self(name))
    } else {
      Err(TryFromStringError { original_string: name })
    }
  }
}

impl From<Symbol> for String {
  fn from(s: Symbol) -> Self {
    s.0
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", &self.0)
  }
}
