
use super::{Operator, OperatorKind};
use super::fixity::Fixity;
use super::precedence::Precedence;
use super::associativity::Associativity;

use once_cell::sync::Lazy;

use std::collections::{hash_map, HashMap};

/// The operator table of the calculator language, shared by the
/// tokenizer, the parser, and everything that needs to re-derive
/// where parentheses go.
pub static OPERATORS: Lazy<OperatorTable> = Lazy::new(OperatorTable::calculator_operators);

/// A table of operators, indexed by kind and by spelling.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
  by_kind: HashMap<OperatorKind, Operator>,
  by_spelling: HashMap<String, OperatorKind>,
}

impl OperatorTable {
  pub fn new() -> OperatorTable {
    OperatorTable::default()
  }

  pub fn with_capacity(capacity: usize) -> OperatorTable {
    OperatorTable {
      by_kind: HashMap::with_capacity(capacity),
      by_spelling: HashMap::with_capacity(capacity),
    }
  }

  pub fn get(&self, kind: OperatorKind) -> Option<&Operator> {
    self.by_kind.get(&kind)
  }

  pub fn get_by_spelling(&self, name: &str) -> Option<&Operator> {
    self.by_spelling.get(name).and_then(|kind| self.by_kind.get(kind))
  }

  pub fn insert(&mut self, op: Operator) {
    for name in op.spellings() {
      self.by_spelling.insert(name.to_owned(), op.kind());
    }
    self.by_kind.insert(op.kind(), op);
  }

  /// Precedence of the operator when it follows a complete operand.
  /// Operators missing from the table bind tighter than anything.
  pub fn trailing_precedence(&self, kind: OperatorKind) -> Precedence {
    self.get(kind)
      .and_then(|op| op.fixity().trailing_precedence())
      .unwrap_or(Precedence::MAX)
  }

  /// Precedence of the infix form of `kind`, or the maximum for
  /// operators that are not infix.
  pub fn infix_precedence(&self, kind: OperatorKind) -> Precedence {
    self.get(kind)
      .and_then(|op| op.infix())
      .map_or(Precedence::MAX, |props| props.precedence())
  }

  /// Minimum precedence accepted to the right of the infix form of
  /// `kind`.
  pub fn right_precedence(&self, kind: OperatorKind) -> Precedence {
    self.get(kind)
      .and_then(|op| op.infix())
      .map_or(Precedence::MAX, |props| props.right_precedence())
  }

  /// Minimum precedence accepted in the operand of the prefix form of
  /// `kind`.
  pub fn operand_precedence(&self, kind: OperatorKind) -> Precedence {
    self.get(kind)
      .and_then(|op| op.fixity().as_prefix())
      .map_or(Precedence::MAX, |props| props.operand_precedence())
  }

  /// The operators of the calculator, loosest first. Assignment and
  /// equality sit below the group closers so that neither can appear
  /// inside brackets, and implicit multiplication binds tighter than
  /// division but looser than exponentiation.
  pub fn calculator_operators() -> OperatorTable {
    vec![
      Operator::new(OperatorKind::Store, "→", Fixity::new().with_infix(Associativity::NONE, Precedence::new(1))),
      Operator::new(OperatorKind::Equal, "=", Fixity::new().with_infix(Associativity::NONE, Precedence::new(2))),
      Operator::new(OperatorKind::Plus, "+", Fixity::new().with_infix(Associativity::LEFT, Precedence::new(8))),
      Operator::new(
        OperatorKind::Minus,
        "-",
        Fixity::new()
          .with_prefix(Precedence::new(9))
          .with_infix(Associativity::LEFT, Precedence::new(9)),
      ),
      Operator::new(OperatorKind::Times, "×", Fixity::new().with_infix(Associativity::LEFT, Precedence::new(10)))
        .with_alias("*"),
      Operator::new(OperatorKind::Slash, "/", Fixity::new().with_infix(Associativity::LEFT, Precedence::new(11))),
      Operator::synthetic(OperatorKind::ImplicitTimes, "×", Fixity::new().with_infix(Associativity::RIGHT, Precedence::new(12))),
      Operator::new(OperatorKind::Power, "^", Fixity::new().with_infix(Associativity::RIGHT, Precedence::new(13))),
      Operator::new(OperatorKind::Bang, "!", Fixity::new().with_postfix(Precedence::new(14))),
    ].into_iter().collect()
  }

  /// Every spelling in the table, in no particular order.
  pub fn spellings(&self) -> impl Iterator<Item = &str> {
    self.by_spelling.keys().map(String::as_str)
  }
}

impl IntoIterator for OperatorTable {
  type Item = Operator;
  type IntoIter = hash_map::IntoValues<OperatorKind, Operator>;

  fn into_iter(self) -> Self::IntoIter {
    self.by_kind.into_values()
  }
}

impl FromIterator<Operator> for OperatorTable {
  fn from_iter<I>(iter: I) -> Self
  where I : IntoIterator<Item = Operator> {
    let iter = iter.into_iter();
    let (len_bound, _) = iter.size_hint();
    let mut table = OperatorTable::with_capacity(len_bound);
    for op in iter {
      table.insert(op);
    }
    table
  }
}
