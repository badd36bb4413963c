
//! Function applications: reserved built-ins, calculus operators
//! with a bound variable, and user-defined functions.

pub mod registry;

use super::{Expr, ArityError};
use super::symbol::Symbol;

use serde::Serialize;

/// A reserved function of fixed arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinFunction {
  AbsoluteValue,
  ArcCosine,
  HyperbolicArcCosine,
  ComplexArgument,
  ArcSine,
  HyperbolicArcSine,
  ArcTangent,
  HyperbolicArcTangent,
  BinomialCoefficient,
  Ceiling,
  ConfidenceInterval,
  Conjugate,
  Cosine,
  HyperbolicCosine,
  Determinant,
  MatrixDimension,
  Factor,
  Floor,
  FractionalPart,
  GreatestCommonDivisor,
  ImaginaryPart,
  MatrixInverse,
  LeastCommonMultiple,
  NaturalLogarithm,
  CommonLogarithm,
  /// `log(x, b)`, the logarithm of `x` in base `b`.
  Logarithm,
  PermuteCoefficient,
  PredictionInterval95,
  SimplePredictionInterval,
  DivisionQuotient,
  Random,
  RandomInteger,
  RealPart,
  DivisionRemainder,
  NthRoot,
  Round,
  SignFunction,
  Sine,
  HyperbolicSine,
  SquareRoot,
  Tangent,
  HyperbolicTangent,
  MatrixTrace,
  MatrixTranspose,
}

/// A calculus operator. The second argument of each is the variable
/// it binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CalculusKind {
  /// `diff(f, x, a)`: derivative of `f` with respect to `x` at `a`.
  Derivative,
  /// `int(f, x, a, b)`
  Integral,
  /// `sum(f, n, a, b)`
  Sum,
  /// `product(f, n, a, b)`
  Product,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BuiltinCall {
  function: BuiltinFunction,
  args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CalculusCall {
  kind: CalculusKind,
  body: Box<Expr>,
  variable: Symbol,
  bounds: Vec<Expr>,
}

/// Application of a user-defined function to its single argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionCall {
  name: Symbol,
  argument: Box<Expr>,
}

impl BuiltinFunction {
  pub fn name(self) -> &'static str {
    use BuiltinFunction::*;
    match self {
      AbsoluteValue => "abs",
      ArcCosine => "acos",
      HyperbolicArcCosine => "acosh",
      ComplexArgument => "arg",
      ArcSine => "asin",
      HyperbolicArcSine => "asinh",
      ArcTangent => "atan",
      HyperbolicArcTangent => "atanh",
      BinomialCoefficient => "binomial",
      Ceiling => "ceil",
      ConfidenceInterval => "confidence",
      Conjugate => "conj",
      Cosine => "cos",
      HyperbolicCosine => "cosh",
      Determinant => "det",
      MatrixDimension => "dim",
      Factor => "factor",
      Floor => "floor",
      FractionalPart => "frac",
      GreatestCommonDivisor => "gcd",
      ImaginaryPart => "im",
      MatrixInverse => "inverse",
      LeastCommonMultiple => "lcm",
      NaturalLogarithm => "ln",
      CommonLogarithm | Logarithm => "log",
      PermuteCoefficient => "permute",
      PredictionInterval95 => "prediction95",
      SimplePredictionInterval => "prediction",
      DivisionQuotient => "quo",
      Random => "random",
      RandomInteger => "randint",
      RealPart => "re",
      DivisionRemainder => "rem",
      NthRoot => "root",
      Round => "round",
      SignFunction => "sign",
      Sine => "sin",
      HyperbolicSine => "sinh",
      SquareRoot => "√",
      Tangent => "tan",
      HyperbolicTangent => "tanh",
      MatrixTrace => "trace",
      MatrixTranspose => "transpose",
    }
  }

  pub fn arity(self) -> usize {
    use BuiltinFunction::*;
    match self {
      Random => 0,
      BinomialCoefficient | ConfidenceInterval | GreatestCommonDivisor | LeastCommonMultiple
        | Logarithm | PermuteCoefficient | PredictionInterval95 | SimplePredictionInterval
        | DivisionQuotient | RandomInteger | DivisionRemainder | NthRoot | Round => 2,
      _ => 1,
    }
  }
}

impl CalculusKind {
  pub fn name(self) -> &'static str {
    match self {
      CalculusKind::Derivative => "diff",
      CalculusKind::Integral => "int",
      CalculusKind::Sum => "sum",
      CalculusKind::Product => "product",
    }
  }

  /// Total number of arguments, including the body and the bound
  /// variable.
  pub fn arity(self) -> usize {
    match self {
      CalculusKind::Derivative => 3,
      CalculusKind::Integral | CalculusKind::Sum | CalculusKind::Product => 4,
    }
  }
}

impl BuiltinCall {
  pub fn new(function: BuiltinFunction, args: Vec<Expr>) -> Result<Self, ArityError> {
    if args.len() != function.arity() {
      return Err(ArityError::WrongCount {
        name: function.name().to_owned(),
        expected: function.arity(),
        actual: args.len(),
      });
    }
    Ok(Self { function, args })
  }

  pub fn function(&self) -> BuiltinFunction {
    self.function
  }

  pub fn args(&self) -> &[Expr] {
    &self.args
  }

  pub fn map_args<F>(self, f: F) -> Self
  where F: FnMut(Expr) -> Expr {
    Self { function: self.function, args: self.args.into_iter().map(f).collect() }
  }
}

impl CalculusCall {
  pub fn new(kind: CalculusKind, body: Expr, variable: Symbol, bounds: Vec<Expr>) -> Result<Self, ArityError> {
    if bounds.len() + 2 != kind.arity() {
      return Err(ArityError::WrongCount {
        name: kind.name().to_owned(),
        expected: kind.arity(),
        actual: bounds.len() + 2,
      });
    }
    Ok(Self { kind, body: Box::new(body), variable, bounds })
  }

  pub fn kind(&self) -> CalculusKind {
    self.kind
  }

  pub fn body(&self) -> &Expr {
    &self.body
  }

  pub fn variable(&self) -> &Symbol {
    &self.variable
  }

  pub fn bounds(&self) -> &[Expr] {
    &self.bounds
  }

  pub fn map_operands<F>(self, mut f: F) -> Self
  where F: FnMut(Expr) -> Expr {
    Self {
      kind: self.kind,
      body: Box::new(f(*self.body)),
      variable: self.variable,
      bounds: self.bounds.into_iter().map(f).collect(),
    }
  }
}

impl FunctionCall {
  pub fn new(name: Symbol, argument: Expr) -> Self {
    Self { name, argument: Box::new(argument) }
  }

  pub fn name(&self) -> &Symbol {
    &self.name
  }

  pub fn argument(&self) -> &Expr {
    &self.argument
  }

  pub fn map_argument<F>(self, f: F) -> Self
  where F: FnOnce(Expr) -> Expr {
    Self { name: self.name, argument: Box::new(f(*self.argument)) }
  }
}
