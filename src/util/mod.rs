
//! Various utility functions.

use regex::{Regex, escape};
use itertools::Itertools;
use serde::Serialize;

use std::cmp::Reverse;
use std::ops::Neg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sign {
  Negative,
  Positive,
}

impl Sign {
  pub fn other(self) -> Self {
    match self {
      Self::Negative => Self::Positive,
      Self::Positive => Self::Negative,
    }
  }

  pub fn is_negative(self) -> bool {
    self == Self::Negative
  }
}

impl Default for Sign {
  fn default() -> Self {
    Self::Positive
  }
}

impl Neg for Sign {
  type Output = Self;

  fn neg(self) -> Self {
    self.other()
  }
}

/// Builds a regex matching any of the given literal strings, then
/// hands the alternation to `helper` for anchoring or decoration.
/// Longer options are tried first, so the longest spelling wins.
pub fn regex_opt_with<'a, I, F>(options: I, helper: F) -> Regex
where I : IntoIterator<Item = &'a str>,
      F : FnOnce(String) -> String {
  let mut options: Vec<_> = options.into_iter().collect();
  options.sort_by_key(|a| Reverse(a.len()));

  let regex_str = options.into_iter().map(escape).join("|");
  let regex_str = helper(format!("(?:{regex_str})"));
  Regex::new(&regex_str).unwrap_or_else(|_| {
    panic!("Invalid regular expression: {}", regex_str);
  })
}

pub fn clamp<T: PartialOrd>(val: T, min: T, max: T) -> T {
  if val < min { min } else if val > max { max } else { val }
}

/// Returns a count of the number of elements at the beginning of this
/// iterator which satisfy the predicate.
pub fn count_prefix<I, F>(iter: I, mut predicate: F) -> usize
where F: FnMut(I::Item) -> bool,
      I: Iterator {
  let mut count = 0;
  for item in iter {
    if !predicate(item) {
      break;
    }
    count += 1;
  }
  count
}
