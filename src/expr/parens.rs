
//! Re-inserts the parentheses a two-dimensional display needs.
//!
//! The parser drops grouping that the tree structure already
//! captures, but a display that lays out `1+(-2)` inline still has to
//! show the parentheses. This pass wraps such children in
//! [`Expr::Parenthesis`] nodes, using the same binding rules as the
//! parser. Fractions and exponents are laid out in two dimensions, so
//! their operands never need wrapping.

use super::Expr;
use super::function::BuiltinFunction;
use super::precedence::{fits, slot, Slot};

/// Returns the tree with display parentheses added, and the number
/// of parenthesis nodes inserted. Applying it to its own output
/// inserts nothing.
pub fn add_missing_parentheses(expr: Expr) -> (Expr, usize) {
  let mut inserted = 0;
  let expr = add_parentheses_rec(expr, &mut inserted);
  (expr, inserted)
}

fn add_parentheses_rec(expr: Expr, inserted: &mut usize) -> Expr {
  let expr = expr.map_children(|child| add_parentheses_rec(child, inserted));
  let wrap: Vec<bool> = expr.children().into_iter()
    .enumerate()
    .map(|(index, child)| needs_parentheses(&expr, index, child))
    .collect();
  if !wrap.contains(&true) {
    return expr;
  }
  let mut wrap = wrap.into_iter();
  expr.map_children(|child| {
    if wrap.next().unwrap_or(false) {
      *inserted += 1;
      Expr::paren(child)
    } else {
      child
    }
  })
}

fn needs_parentheses(parent: &Expr, index: usize, child: &Expr) -> bool {
  let shown = look_through_conjugate(child);
  if shown.starts_with_minus() && is_sign_sensitive(parent, index) {
    return true;
  }
  match display_slot(parent, index) {
    Slot::Free => false,
    slot => !fits(parent, slot, shown),
  }
}

fn display_slot(parent: &Expr, index: usize) -> Slot {
  match parent {
    Expr::Division(..) => Slot::Free,
    Expr::Power(..) if index == 1 => Slot::Free,
    _ => slot(parent, index),
  }
}

/// Slots where a leading minus would read as a binary minus, or would
/// appear to apply to the whole parent.
fn is_sign_sensitive(parent: &Expr, index: usize) -> bool {
  match parent {
    Expr::Addition(_) | Expr::Multiplication(_) | Expr::Subtraction(..) => index > 0,
    Expr::Opposite(_) | Expr::Factorial(_) => true,
    Expr::Power(..) => index == 0,
    _ => false,
  }
}

/// A conjugate is drawn as a bar over its argument, so the argument's
/// shape decides the grouping.
fn look_through_conjugate(mut expr: &Expr) -> &Expr {
  while let Expr::Builtin(call) = expr {
    match call.args() {
      [arg] if call.function() == BuiltinFunction::Conjugate => expr = arg,
      _ => break,
    }
  }
  expr
}
