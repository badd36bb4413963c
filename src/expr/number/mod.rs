
//! Numeric leaves of the expression tree.

mod literal;

pub use literal::{NumberLiteral, ParseNumberError, NUMBER_LITERAL_RE};

use crate::util::Sign;

use num::{BigUint, Zero};
use serde::Serialize;

use std::fmt::{self, Display, Formatter};

/// A rounded decimal: `sign × d.ddd… × 10^exponent`, where the digits
/// are those of `mantissa` and `exponent` is the power of ten of the
/// leading digit.
///
/// The mantissa holds at most the configured number of significant
/// digits, except after a rounding carry, where it is exactly one
/// power of ten wider. Trailing zeros are significant and kept. Zero
/// is represented with a zero mantissa and exponent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Decimal {
  sign: Sign,
  mantissa: BigUint,
  exponent: i64,
}

/// The character introducing the exponent of a number in scientific
/// notation.
pub const EXPONENT_MARKER: char = 'ᴇ';

impl Decimal {
  pub fn new(sign: Sign, mantissa: impl Into<BigUint>, exponent: i64) -> Self {
    let mantissa = mantissa.into();
    if mantissa.is_zero() {
      Self::zero()
    } else {
      Self { sign, mantissa, exponent }
    }
  }

  pub fn zero() -> Self {
    Self { sign: Sign::Positive, mantissa: BigUint::zero(), exponent: 0 }
  }

  pub fn is_zero(&self) -> bool {
    self.mantissa.is_zero()
  }

  pub fn sign(&self) -> Sign {
    self.sign
  }

  pub fn mantissa(&self) -> &BigUint {
    &self.mantissa
  }

  pub fn exponent(&self) -> i64 {
    self.exponent
  }

  pub fn is_negative(&self) -> bool {
    self.sign.is_negative()
  }
}

/// Writes the decimal in the calculator's scientific notation, with
/// one digit before the point: `1.2345ᴇ3`, `1.ᴇ-2`, `0ᴇ0`. Reading
/// the result back yields the same mantissa and exponent.
impl Display for Decimal {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.is_zero() {
      return write!(f, "0{}0", EXPONENT_MARKER);
    }
    if self.is_negative() {
      write!(f, "-")?;
    }
    let digits = self.mantissa.to_str_radix(10);
    let (lead, rest) = digits.split_at(1);
    write!(f, "{lead}.{rest}{EXPONENT_MARKER}{}", self.exponent)
  }
}
