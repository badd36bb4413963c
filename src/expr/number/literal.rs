
//! Number literals as written, and how they become exact integers
//! or rounded decimals.

use super::Decimal;
use crate::expr::Expr;
use crate::settings::ParserSettings;
use crate::util::{Sign, count_prefix};

use num::{BigInt, BigRational, BigUint};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// A complete, well-formed number literal: digits, an optional
/// decimal point and fraction, an optional signed exponent.
pub static NUMBER_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^([0-9]*)(\.([0-9]*))?(?:ᴇ([+-]?[0-9]+))?$").unwrap()
});

/// The pieces of a number literal as written, before any
/// interpretation. The mantissa always has at least one digit. A
/// literal is unsigned; a leading minus is a separate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLiteral<'a> {
  integral: &'a str,
  has_point: bool,
  fractional: &'a str,
  exponent: Option<&'a str>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to parse number literal '{0}'")]
pub struct ParseNumberError(pub String);

impl<'a> NumberLiteral<'a> {
  /// Assembles a literal from the spans the tokenizer found. The
  /// exponent, if present, is an optionally signed run of digits.
  pub fn new(
    integral: &'a str,
    fractional: Option<&'a str>,
    exponent: Option<&'a str>,
  ) -> Result<Self, ParseNumberError> {
    let fractional_digits = fractional.unwrap_or("");
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let exponent_ok = exponent.map_or(true, |e| {
      let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
      !digits.is_empty() && all_digits(digits)
    });
    if (integral.is_empty() && fractional_digits.is_empty())
      || !all_digits(integral)
      || !all_digits(fractional_digits)
      || !exponent_ok {
      let text = format!(
        "{integral}{}{fractional_digits}{}",
        if fractional.is_some() { "." } else { "" },
        exponent.map(|e| format!("ᴇ{e}")).unwrap_or_default(),
      );
      return Err(ParseNumberError(text));
    }
    Ok(Self {
      integral,
      has_point: fractional.is_some(),
      fractional: fractional_digits,
      exponent,
    })
  }

  /// Parses a whole string as a single literal, e.g. `12.5ᴇ-3`.
  pub fn parse(text: &'a str) -> Result<Self, ParseNumberError> {
    let caps = NUMBER_LITERAL_RE.captures(text).ok_or_else(|| ParseNumberError(text.to_owned()))?;
    let integral = caps.get(1).map_or("", |m| m.as_str());
    let fractional = caps.get(2).map(|_| caps.get(3).map_or("", |m| m.as_str()));
    let exponent = caps.get(4).map(|m| m.as_str());
    Self::new(integral, fractional, exponent)
  }

  pub fn integral(&self) -> &'a str {
    self.integral
  }

  pub fn fractional(&self) -> &'a str {
    self.fractional
  }

  pub fn exponent(&self) -> Option<&'a str> {
    self.exponent
  }

  /// A literal with no fractional digits and no exponent denotes an
  /// integer, even when written with a trailing point.
  pub fn is_integer(&self) -> bool {
    self.fractional.is_empty() && self.exponent.is_none()
  }

  /// Decides how the literal is represented in the tree.
  ///
  /// Integers that fit in `max_integer_bits` stay exact. Everything
  /// else is rounded half-up to `significant_digits` digits. A
  /// decimal exponent above `max_decimal_exponent` saturates to a
  /// signed infinity, and one below its negation collapses to zero.
  pub fn to_expr(&self, settings: &ParserSettings) -> Expr {
    if self.is_integer() {
      if let Some(n) = BigUint::parse_bytes(self.integral.as_bytes(), 10) {
        if n.bits() <= settings.max_integer_bits {
          return Expr::Rational(BigRational::from_integer(BigInt::from(n)));
        }
      }
    }
    self.to_decimal_expr(settings)
  }

  fn to_decimal_expr(&self, settings: &ParserSettings) -> Expr {
    let digits = format!("{}{}", self.integral, self.fractional);
    let leading_zeros = count_prefix(digits.chars(), |c| c == '0');
    let significant = &digits[leading_zeros..];
    if significant.is_empty() {
      return Expr::Decimal(Decimal::zero());
    }

    let mut exponent = (self.integral.len() as i64)
      .saturating_sub(1)
      .saturating_sub(leading_zeros as i64)
      .saturating_add(self.exponent.map_or(0, parse_exponent));

    let precision = settings.significant_digits.max(1);
    let mantissa = if significant.len() > precision {
      let (kept, dropped) = significant.split_at(precision);
      let mut mantissa = parse_digits(kept);
      if dropped.as_bytes()[0] >= b'5' {
        mantissa += 1u32;
        if mantissa == num::pow(BigUint::from(10u32), precision) {
          // The carry added a digit; keep it and shift the exponent.
          exponent = exponent.saturating_add(1);
        }
      }
      mantissa
    } else {
      parse_digits(significant)
    };

    if exponent > settings.max_decimal_exponent {
      Expr::Infinity(Sign::Positive)
    } else if exponent < settings.max_decimal_exponent.saturating_neg() {
      Expr::Decimal(Decimal::zero())
    } else {
      Expr::Decimal(Decimal::new(Sign::Positive, mantissa, exponent))
    }
  }
}

impl Display for NumberLiteral<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.integral)?;
    if self.has_point {
      write!(f, ".{}", self.fractional)?;
    }
    if let Some(exponent) = self.exponent {
      write!(f, "ᴇ{exponent}")?;
    }
    Ok(())
  }
}

fn parse_digits(digits: &str) -> BigUint {
  digits.bytes().fold(BigUint::from(0u32), |acc, b| acc * 10u32 + u32::from(b - b'0'))
}

/// Parses an optionally signed run of digits, saturating instead of
/// overflowing.
fn parse_exponent(text: &str) -> i64 {
  let (negative, digits) = match text.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, text.strip_prefix('+').unwrap_or(text)),
  };
  let magnitude = digits.bytes().fold(0i64, |acc, b| {
    acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
  });
  if negative { -magnitude } else { magnitude }
}
