
//! Fixity declarations for operators.

use super::associativity::Associativity;
use super::precedence::Precedence;

use bitflags::bitflags;

/// An operator can be infix, prefix, postfix, or any combination
/// thereof. An operator will always be at least one of prefix,
/// postfix, or infix.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct Fixity {
  as_prefix: Option<PrefixProperties>,
  as_infix: Option<InfixProperties>,
  as_postfix: Option<PostfixProperties>,
}

/// Unlike prefix and postfix operators, infix operators have both
/// associativity and precedence.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct InfixProperties {
  assoc: Associativity,
  prec: Precedence,
}

/// A prefix operator binds its operand at a fixed precedence.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct PrefixProperties {
  prec: Precedence,
}

#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct PostfixProperties {
  prec: Precedence,
}

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq)]
  pub struct FixityTypes: u8 {
    const PREFIX  = 0b0001;
    const INFIX   = 0b0010;
    const POSTFIX = 0b0100;
  }
}

/// The type of an "empty" fixity structure, only used while building
/// a [`Fixity`]. Guarantees that a `Fixity` always has at least one
/// of prefix, infix, or postfix set.
#[derive(Debug)]
pub struct EmptyFixity {
  data: Fixity,
}

impl Fixity {
  // allow: EmptyFixity is conceptually a Fixity, just with some
  // typechecks. It's intended to be used in a fluent builder style.
  #[allow(clippy::new_ret_no_self)]
  pub fn new() -> EmptyFixity {
    EmptyFixity {
      data: Fixity {
        as_prefix: None,
        as_infix: None,
        as_postfix: None,
      },
    }
  }

  pub fn with_prefix(mut self, prec: Precedence) -> Fixity {
    self.as_prefix = Some(PrefixProperties { prec });
    self
  }

  pub fn with_infix(mut self, assoc: Associativity, prec: Precedence) -> Fixity {
    self.as_infix = Some(InfixProperties { assoc, prec });
    self
  }

  pub fn with_postfix(mut self, prec: Precedence) -> Fixity {
    self.as_postfix = Some(PostfixProperties { prec });
    self
  }

  pub fn as_prefix(&self) -> Option<PrefixProperties> {
    self.as_prefix
  }

  pub fn as_infix(&self) -> Option<InfixProperties> {
    self.as_infix
  }

  pub fn as_postfix(&self) -> Option<PostfixProperties> {
    self.as_postfix
  }

  /// The precedence a parser compares against when this operator
  /// follows a complete operand.
  pub fn trailing_precedence(&self) -> Option<Precedence> {
    self.as_infix.map(|i| i.prec).or_else(|| self.as_postfix.map(|p| p.prec))
  }

  pub fn is_prefix(&self) -> bool {
    self.as_prefix.is_some()
  }

  pub fn is_infix(&self) -> bool {
    self.as_infix.is_some()
  }

  pub fn is_postfix(&self) -> bool {
    self.as_postfix.is_some()
  }

  pub fn fixity_types(&self) -> FixityTypes {
    let mut t = FixityTypes::empty();
    if self.is_prefix() {
      t |= FixityTypes::PREFIX;
    }
    if self.is_infix() {
      t |= FixityTypes::INFIX;
    }
    if self.is_postfix() {
      t |= FixityTypes::POSTFIX;
    }
    t
  }
}

impl EmptyFixity {
  pub fn with_prefix(self, prec: Precedence) -> Fixity {
    self.data.with_prefix(prec)
  }

  pub fn with_infix(self, assoc: Associativity, prec: Precedence) -> Fixity {
    self.data.with_infix(assoc, prec)
  }

  pub fn with_postfix(self, prec: Precedence) -> Fixity {
    self.data.with_postfix(prec)
  }
}

impl InfixProperties {
  pub fn associativity(&self) -> Associativity {
    self.assoc
  }

  pub fn precedence(&self) -> Precedence {
    self.prec
  }

  /// The minimum precedence an operator must have to continue the
  /// right-hand operand of this one.
  pub fn right_precedence(&self) -> Precedence {
    if self.assoc.is_right_assoc() {
      self.prec
    } else {
      self.prec.incremented()
    }
  }
}

impl PrefixProperties {
  pub fn precedence(&self) -> Precedence {
    self.prec
  }

  /// The minimum precedence an operator must have to continue the
  /// operand of this prefix operator.
  pub fn operand_precedence(&self) -> Precedence {
    self.prec.incremented()
  }
}

impl PostfixProperties {
  pub fn precedence(&self) -> Precedence {
    self.prec
  }
}
