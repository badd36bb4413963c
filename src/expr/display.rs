
//! Rendering expressions back to text, either for reading or in a
//! form that parses back to the same tree.

use super::{Expr, StoreTarget};
use super::precedence::{fits, slot, Slot};
use super::symbol::{Symbol, UNKNOWN_N, UNKNOWN_X};
use super::tokenizer::{CLOSER_PRECEDENCE, SYSTEM_LEFT_PAREN, SYSTEM_RIGHT_PAREN};
use crate::parsing::operator::{OperatorKind, Precedence, OPERATORS};

use num::One;

use std::fmt::{self, Display, Formatter};

/// Renders an expression tree as calculator input.
///
/// The reversible writer groups with system parentheses, which parse
/// without producing a node, so that re-parsing its output yields the
/// same tree. The readable writer groups with ordinary parentheses
/// and spells out placeholder symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprWriter {
  reversible: bool,
}

impl ExprWriter {
  pub fn readable() -> Self {
    Self { reversible: false }
  }

  pub fn reversible() -> Self {
    Self { reversible: true }
  }

  pub fn write(&self, out: &mut String, expr: &Expr) {
    self.write_in(out, expr, Precedence::MIN.incremented())
  }

  fn group_chars(&self) -> (char, char) {
    if self.reversible {
      (SYSTEM_LEFT_PAREN, SYSTEM_RIGHT_PAREN)
    } else {
      ('(', ')')
    }
  }

  /// Writes `expr` as if parsed at minimum precedence `context`. Only
  /// a leading minus cares about the context: its operand extends as
  /// far as the surrounding operator allows.
  fn write_in(&self, out: &mut String, expr: &Expr, context: Precedence) {
    match expr {
      Expr::Rational(r) => {
        if r.denom().is_one() {
          out.push_str(&r.numer().to_string());
        } else {
          out.push_str(&format!("{}/{}", r.numer(), r.denom()));
        }
      }
      Expr::Decimal(d) => out.push_str(&d.to_string()),
      Expr::Infinity(sign) => {
        if sign.is_negative() {
          out.push('-');
        }
        out.push_str("inf");
      }
      Expr::Undefined => out.push_str("undef"),
      Expr::Symbol(s) => self.write_symbol(out, s),
      Expr::Constant(c) => out.push(c.glyph()),
      Expr::Addition(operands) => self.write_infix(out, expr, operands.iter(), OperatorKind::Plus, context),
      Expr::Multiplication(operands) => self.write_infix(out, expr, operands.iter(), OperatorKind::Times, context),
      Expr::Subtraction(a, b) => self.write_infix(out, expr, [a, b].into_iter().map(|e| &**e), OperatorKind::Minus, context),
      Expr::Division(a, b) => self.write_infix(out, expr, [a, b].into_iter().map(|e| &**e), OperatorKind::Slash, context),
      Expr::Power(a, b) => self.write_infix(out, expr, [a, b].into_iter().map(|e| &**e), OperatorKind::Power, context),
      Expr::Equal(a, b) => self.write_infix(out, expr, [a, b].into_iter().map(|e| &**e), OperatorKind::Equal, context),
      Expr::Store(value, target) => {
        self.write_child(out, expr, slot(expr, 0), value, context);
        out.push_str(&OperatorKind::Store.to_string());
        self.write_store_target(out, target);
      }
      Expr::Opposite(operand) => {
        out.push_str(&OperatorKind::Minus.to_string());
        let min = context.max(OPERATORS.operand_precedence(OperatorKind::Minus));
        self.write_child(out, expr, Slot::Right(min), operand, context);
      }
      Expr::Factorial(operand) => {
        self.write_child(out, expr, slot(expr, 0), operand, context);
        out.push_str(&OperatorKind::Bang.to_string());
      }
      Expr::Parenthesis(inner) => {
        out.push('(');
        self.write_in(out, inner, CLOSER_PRECEDENCE.incremented());
        out.push(')');
      }
      Expr::Builtin(call) => {
        out.push_str(call.function().name());
        self.write_args(out, call.args().iter());
      }
      Expr::Calculus(call) => {
        out.push_str(call.kind().name());
        let variable = Expr::Symbol(call.variable().clone());
        let args = std::iter::once(call.body()).chain(std::iter::once(&variable)).chain(call.bounds());
        self.write_args(out, args);
      }
      Expr::Function(call) => {
        self.write_symbol(out, call.name());
        self.write_args(out, std::iter::once(call.argument()));
      }
      Expr::Matrix(m) => {
        out.push('[');
        for row in m.iter_rows() {
          out.push('[');
          self.write_list(out, row.iter());
          out.push(']');
        }
        out.push(']');
      }
    }
  }

  fn write_infix<'e, I>(&self, out: &mut String, parent: &Expr, children: I, op: OperatorKind, context: Precedence)
  where I: Iterator<Item = &'e Expr> {
    for (index, child) in children.enumerate() {
      if index > 0 {
        out.push_str(&op.to_string());
      }
      self.write_child(out, parent, slot(parent, index), child, context);
    }
  }

  fn write_child(&self, out: &mut String, parent: &Expr, slot: Slot, child: &Expr, context: Precedence) {
    if fits(parent, slot, child) {
      let child_context = match slot {
        Slot::Left(_) => context,
        Slot::Right(min) => min,
        Slot::Free => CLOSER_PRECEDENCE.incremented(),
      };
      self.write_in(out, child, child_context);
    } else {
      let (open, close) = self.group_chars();
      out.push(open);
      self.write_in(out, child, CLOSER_PRECEDENCE.incremented());
      out.push(close);
    }
  }

  fn write_args<'e>(&self, out: &mut String, args: impl Iterator<Item = &'e Expr>) {
    out.push('(');
    self.write_list(out, args);
    out.push(')');
  }

  fn write_list<'e>(&self, out: &mut String, items: impl Iterator<Item = &'e Expr>) {
    for (index, item) in items.enumerate() {
      if index > 0 {
        out.push(',');
      }
      self.write_in(out, item, CLOSER_PRECEDENCE.incremented());
    }
  }

  fn write_symbol(&self, out: &mut String, symbol: &Symbol) {
    if self.reversible {
      out.push_str(symbol.as_str());
      return;
    }
    match symbol.as_str().chars().next() {
      Some(UNKNOWN_X) => out.push('x'),
      Some(UNKNOWN_N) => out.push('n'),
      _ => out.push_str(symbol.as_str()),
    }
  }

  fn write_store_target(&self, out: &mut String, target: &StoreTarget) {
    match target {
      StoreTarget::Symbol(name) => self.write_symbol(out, name),
      StoreTarget::Function { name, parameter } => {
        self.write_symbol(out, name);
        out.push('(');
        self.write_symbol(out, parameter);
        out.push(')');
      }
    }
  }
}

impl Expr {
  /// Text which parses back to a tree identical to `self`, for every
  /// tree the parser produces. The one exception is a decimal whose
  /// mantissa carried over to one digit more than the significant
  /// digit limit, which re-parses rounded.
  pub fn to_reversible_string(&self) -> String {
    let mut out = String::new();
    ExprWriter::reversible().write(&mut out, self);
    out
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut out = String::new();
    ExprWriter::readable().write(&mut out, self);
    f.write_str(&out)
  }
}

impl Display for StoreTarget {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut out = String::new();
    ExprWriter::readable().write_store_target(&mut out, self);
    f.write_str(&out)
  }
}
