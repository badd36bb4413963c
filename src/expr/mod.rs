
//! The expression tree produced by the parser.

pub mod constant;
pub mod display;
pub mod function;
pub mod matrix;
pub mod number;
pub mod parens;
pub mod parser;
pub mod precedence;
pub mod symbol;
pub mod tokenizer;

use constant::Constant;
use function::{BuiltinCall, CalculusCall, FunctionCall};
use matrix::Matrix;
use number::Decimal;
use symbol::Symbol;
use crate::util::Sign;

use num::{BigInt, BigRational};
use serde::Serialize;
use thiserror::Error;

use std::mem;

/// A node of the expression tree. Every node exclusively owns its
/// children, and each variant's payload checks its own arity when it
/// is constructed.
///
/// Two trees are identical when they are structurally equal, compared
/// with `==` or [`Expr::is_identical_to`]. `1+2` and `2+1` are not
/// identical, nor are `(1)` and `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Expr {
  /// An exact rational number.
  Rational(BigRational),
  Decimal(Decimal),
  Infinity(Sign),
  Undefined,
  Symbol(Symbol),
  Constant(Constant),
  Addition(Operands),
  Multiplication(Operands),
  Subtraction(Box<Expr>, Box<Expr>),
  Division(Box<Expr>, Box<Expr>),
  Power(Box<Expr>, Box<Expr>),
  Equal(Box<Expr>, Box<Expr>),
  /// Assignment of a value to a symbol or a one-parameter function.
  Store(Box<Expr>, StoreTarget),
  Opposite(Box<Expr>),
  Factorial(Box<Expr>),
  /// Grouping written by the user. Evaluates to its content but is
  /// kept so the expression can be displayed as it was typed.
  Parenthesis(Box<Expr>),
  Builtin(BuiltinCall),
  Calculus(CalculusCall),
  Function(FunctionCall),
  Matrix(Matrix),
}

/// Operands of an n-ary addition or multiplication. Always at least
/// two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Operands(Vec<Expr>);

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum StoreTarget {
  Symbol(Symbol),
  /// `f(x)`: defines `f` over the parameter `x`.
  Function { name: Symbol, parameter: Symbol },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArityError {
  #[error("{name} expects {expected} arguments, got {actual}")]
  WrongCount { name: String, expected: usize, actual: usize },
  #[error("{name} needs at least two operands, got {actual}")]
  TooFewOperands { name: String, actual: usize },
  #[error("Every row of a matrix must have {expected} entries, found a row with {actual}")]
  RaggedMatrix { expected: usize, actual: usize },
  #[error("A matrix needs at least one row and one column")]
  EmptyMatrix,
}

impl Operands {
  pub fn new(name: &str, operands: Vec<Expr>) -> Result<Self, ArityError> {
    if operands.len() < 2 {
      return Err(ArityError::TooFewOperands { name: name.to_owned(), actual: operands.len() });
    }
    Ok(Self(operands))
  }

  pub fn pair(a: Expr, b: Expr) -> Self {
    Self(vec![a, b])
  }

  pub fn push(&mut self, operand: Expr) {
    self.0.push(operand)
  }

  /// Always at least two.
  #[allow(clippy::len_without_is_empty)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
    self.0.iter()
  }

  pub fn first(&self) -> &Expr {
    &self.0[0]
  }

  pub fn into_vec(self) -> Vec<Expr> {
    self.0
  }

  pub fn map<F>(self, f: F) -> Self
  where F: FnMut(Expr) -> Expr {
    Self(self.0.into_iter().map(f).collect())
  }
}

impl<'a> IntoIterator for &'a Operands {
  type Item = &'a Expr;
  type IntoIter = std::slice::Iter<'a, Expr>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl StoreTarget {
  pub fn name(&self) -> &Symbol {
    match self {
      StoreTarget::Symbol(name) => name,
      StoreTarget::Function { name, .. } => name,
    }
  }
}

impl Expr {
  pub fn integer(n: impl Into<BigInt>) -> Expr {
    Expr::Rational(BigRational::from_integer(n.into()))
  }

  /// A user symbol, or `None` if `name` is not a valid symbol name.
  pub fn var(name: &str) -> Option<Expr> {
    Symbol::new(name).map(Expr::Symbol)
  }

  pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Addition(Operands::pair(a, b))
  }

  pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Multiplication(Operands::pair(a, b))
  }

  pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Subtraction(Box::new(a), Box::new(b))
  }

  pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Division(Box::new(a), Box::new(b))
  }

  pub fn pow(a: Expr, b: Expr) -> Expr {
    Expr::Power(Box::new(a), Box::new(b))
  }

  pub fn equal(a: Expr, b: Expr) -> Expr {
    Expr::Equal(Box::new(a), Box::new(b))
  }

  pub fn store(value: Expr, target: StoreTarget) -> Expr {
    Expr::Store(Box::new(value), target)
  }

  pub fn opposite(a: Expr) -> Expr {
    Expr::Opposite(Box::new(a))
  }

  pub fn factorial(a: Expr) -> Expr {
    Expr::Factorial(Box::new(a))
  }

  pub fn paren(a: Expr) -> Expr {
    Expr::Parenthesis(Box::new(a))
  }

  pub fn is_identical_to(&self, other: &Expr) -> bool {
    self == other
  }

  /// The node's direct children, in order. The bound variable of a
  /// calculus operator and the target of an assignment are names, not
  /// children.
  pub fn children(&self) -> Vec<&Expr> {
    match self {
      Expr::Rational(_) | Expr::Decimal(_) | Expr::Infinity(_) | Expr::Undefined
        | Expr::Symbol(_) | Expr::Constant(_) => Vec::new(),
      Expr::Addition(operands) | Expr::Multiplication(operands) => operands.iter().collect(),
      Expr::Subtraction(a, b) | Expr::Division(a, b) | Expr::Power(a, b) | Expr::Equal(a, b) => vec![&**a, &**b],
      Expr::Store(value, _) => vec![&**value],
      Expr::Opposite(a) | Expr::Factorial(a) | Expr::Parenthesis(a) => vec![&**a],
      Expr::Builtin(call) => call.args().iter().collect(),
      Expr::Calculus(call) => std::iter::once(call.body()).chain(call.bounds()).collect(),
      Expr::Function(call) => vec![call.argument()],
      Expr::Matrix(m) => m.entries().collect(),
    }
  }

  /// Rebuilds the node with `f` applied to each direct child, in the
  /// same order as [`Expr::children`].
  pub fn map_children<F>(self, mut f: F) -> Expr
  where F: FnMut(Expr) -> Expr {
    match self {
      leaf @ (Expr::Rational(_) | Expr::Decimal(_) | Expr::Infinity(_) | Expr::Undefined
        | Expr::Symbol(_) | Expr::Constant(_)) => leaf,
      Expr::Addition(operands) => Expr::Addition(operands.map(f)),
      Expr::Multiplication(operands) => Expr::Multiplication(operands.map(f)),
      Expr::Subtraction(a, b) => {
        let a = f(*a);
        Expr::sub(a, f(*b))
      }
      Expr::Division(a, b) => {
        let a = f(*a);
        Expr::div(a, f(*b))
      }
      Expr::Power(a, b) => {
        let a = f(*a);
        Expr::pow(a, f(*b))
      }
      Expr::Equal(a, b) => {
        let a = f(*a);
        Expr::equal(a, f(*b))
      }
      Expr::Store(value, target) => Expr::store(f(*value), target),
      Expr::Opposite(a) => Expr::opposite(f(*a)),
      Expr::Factorial(a) => Expr::factorial(f(*a)),
      Expr::Parenthesis(a) => Expr::paren(f(*a)),
      Expr::Builtin(call) => Expr::Builtin(call.map_args(f)),
      Expr::Calculus(call) => Expr::Calculus(call.map_operands(f)),
      Expr::Function(call) => Expr::Function(call.map_argument(f)),
      Expr::Matrix(m) => Expr::Matrix(m.map_entries(f)),
    }
  }

  /// Number of nodes in the tree rooted here.
  pub fn node_count(&self) -> usize {
    1 + self.children().into_iter().map(Expr::node_count).sum::<usize>()
  }

  /// Bytes charged to a node pool for this node alone: the node
  /// itself plus any out-of-line payload such as digits or names.
  pub fn allocation_size(&self) -> usize {
    let payload = match self {
      Expr::Rational(r) => ((r.numer().bits() + r.denom().bits()) / 8) as usize,
      Expr::Decimal(d) => (d.mantissa().bits() / 8) as usize,
      Expr::Symbol(s) => s.as_str().len(),
      Expr::Addition(operands) | Expr::Multiplication(operands) => operands.len() * mem::size_of::<usize>(),
      Expr::Store(_, target) => target.name().as_str().len(),
      Expr::Calculus(call) => call.variable().as_str().len(),
      Expr::Function(call) => call.name().as_str().len(),
      _ => 0,
    };
    mem::size_of::<Expr>() + payload
  }

  /// Whether the node, as written, begins with a minus sign.
  pub fn starts_with_minus(&self) -> bool {
    match self {
      Expr::Opposite(_) => true,
      Expr::Rational(r) => r.numer() < &BigInt::from(0),
      Expr::Decimal(d) => d.is_negative(),
      Expr::Infinity(sign) => sign.is_negative(),
      _ => false,
    }
  }
}

impl From<i32> for Expr {
  fn from(n: i32) -> Expr {
    Expr::integer(n)
  }
}

impl From<i64> for Expr {
  fn from(n: i64) -> Expr {
    Expr::integer(n)
  }
}

impl From<Symbol> for Expr {
  fn from(s: Symbol) -> Expr {
    Expr::Symbol(s)
  }
}

impl From<Constant> for Expr {
  fn from(c: Constant) -> Expr {
    Expr::Constant(c)
  }
}
