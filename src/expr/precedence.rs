
//! How tightly each kind of node binds, derived from the operator
//! table. Shared by the text renderer and the display-parenthesis pass
//! so both agree with the parser about where grouping is needed.

use super::Expr;
use crate::parsing::operator::{OperatorKind, Precedence, OPERATORS};

/// Where a child sits relative to its parent's operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  /// Written before an operator with the given precedence. The child
  /// must end before that operator would be absorbed into it.
  Left(Precedence),
  /// Parsed as the right operand of an operator, with the given
  /// minimum precedence.
  Right(Precedence),
  /// Delimited on both sides, as in function arguments and matrix
  /// entries.
  Free,
}

fn infix(kind: OperatorKind) -> Precedence {
  OPERATORS.infix_precedence(kind)
}

fn right(kind: OperatorKind) -> Precedence {
  OPERATORS.right_precedence(kind)
}

/// The precedence of the node's outermost operator. Primaries bind
/// tightest.
pub fn level(expr: &Expr) -> Precedence {
  match expr {
    Expr::Addition(_) => infix(OperatorKind::Plus),
    Expr::Subtraction(..) | Expr::Opposite(_) => infix(OperatorKind::Minus),
    Expr::Multiplication(_) => infix(OperatorKind::Times),
    Expr::Division(..) => infix(OperatorKind::Slash),
    Expr::Power(..) => infix(OperatorKind::Power),
    Expr::Factorial(_) => OPERATORS.trailing_precedence(OperatorKind::Bang),
    Expr::Equal(..) => infix(OperatorKind::Equal),
    Expr::Store(..) => infix(OperatorKind::Store),
    _ => Precedence::MAX,
  }
}

/// The minimum precedence the node's last operand was parsed with.
/// Any operator at or above it, written right after the node, would
/// be absorbed into that operand.
pub fn tail(expr: &Expr) -> Precedence {
  match expr {
    Expr::Addition(_) => right(OperatorKind::Plus),
    Expr::Subtraction(..) => right(OperatorKind::Minus),
    Expr::Opposite(_) => OPERATORS.operand_precedence(OperatorKind::Minus),
    Expr::Multiplication(_) => right(OperatorKind::Times),
    Expr::Division(..) => right(OperatorKind::Slash),
    Expr::Power(..) => right(OperatorKind::Power),
    Expr::Equal(..) => right(OperatorKind::Equal),
    _ => Precedence::MAX,
  }
}

/// The slot of the child at `index`, in [`Expr::children`] order.
pub fn slot(parent: &Expr, index: usize) -> Slot {
  match parent {
    Expr::Addition(_) if index == 0 => Slot::Left(infix(OperatorKind::Plus)),
    Expr::Addition(_) => Slot::Right(right(OperatorKind::Plus)),
    Expr::Multiplication(_) if index == 0 => Slot::Left(infix(OperatorKind::Times)),
    Expr::Multiplication(_) => Slot::Right(right(OperatorKind::Times)),
    Expr::Subtraction(..) => binary_slot(OperatorKind::Minus, index),
    Expr::Division(..) => binary_slot(OperatorKind::Slash, index),
    Expr::Power(..) => binary_slot(OperatorKind::Power, index),
    Expr::Equal(..) => binary_slot(OperatorKind::Equal, index),
    Expr::Store(..) => Slot::Left(infix(OperatorKind::Store)),
    Expr::Factorial(_) => Slot::Left(OPERATORS.trailing_precedence(OperatorKind::Bang)),
    Expr::Opposite(_) => Slot::Right(OPERATORS.operand_precedence(OperatorKind::Minus)),
    _ => Slot::Free,
  }
}

fn binary_slot(kind: OperatorKind, index: usize) -> Slot {
  if index == 0 {
    Slot::Left(infix(kind))
  } else {
    Slot::Right(right(kind))
  }
}

/// Whether `child` can be written in `slot` of `parent` without
/// grouping and still parse back to the same tree.
pub fn fits(parent: &Expr, slot: Slot, child: &Expr) -> bool {
  match slot {
    Slot::Free => true,
    Slot::Left(operator) => operator < tail(child) && !continues_chain(parent, child),
    Slot::Right(min) => level(child) >= min || matches!(child, Expr::Opposite(_)),
  }
}

/// An n-ary node in the leading slot of one of the same kind would be
/// flattened into its parent.
fn continues_chain(parent: &Expr, child: &Expr) -> bool {
  matches!(
    (parent, child),
    (Expr::Addition(_), Expr::Addition(_)) | (Expr::Multiplication(_), Expr::Multiplication(_)),
  )
}
