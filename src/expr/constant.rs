
use serde::Serialize;

use std::fmt::{self, Display, Formatter};

/// A mathematical constant, written as a single glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Constant {
  Pi,
  E,
  ImaginaryUnit,
}

impl Constant {
  pub const ALL: [Constant; 3] = [Constant::Pi, Constant::E, Constant::ImaginaryUnit];

  pub fn glyph(self) -> char {
    match self {
      Constant::Pi => 'π',
      Constant::E => 'ℯ',
      Constant::ImaginaryUnit => '𝐢',
    }
  }

  pub fn from_glyph(ch: char) -> Option<Constant> {
    Self::ALL.into_iter().find(|c| c.glyph() == ch)
  }
}

impl Display for Constant {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.glyph())
  }
}
