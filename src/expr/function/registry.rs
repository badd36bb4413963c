
//! Identifiers with a fixed meaning in the calculator language.

use super::{BuiltinFunction, CalculusKind};
use BuiltinFunction::*;

use phf::phf_map;

/// What a reserved identifier stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
  /// A built-in function. Overloads of the same name are listed by
  /// increasing arity.
  Functions(&'static [BuiltinFunction]),
  Calculus(CalculusKind),
  /// The previous result, parsed as a symbol.
  Ans,
  Infinity,
  Undefined,
  /// Names of sequences, which the parser refuses outright.
  Sequence,
}

static RESERVED: phf::Map<&'static str, Reserved> = phf_map! {
  "abs" => Reserved::Functions(&[AbsoluteValue]),
  "acos" => Reserved::Functions(&[ArcCosine]),
  "acosh" => Reserved::Functions(&[HyperbolicArcCosine]),
  "arg" => Reserved::Functions(&[ComplexArgument]),
  "asin" => Reserved::Functions(&[ArcSine]),
  "asinh" => Reserved::Functions(&[HyperbolicArcSine]),
  "atan" => Reserved::Functions(&[ArcTangent]),
  "atanh" => Reserved::Functions(&[HyperbolicArcTangent]),
  "binomial" => Reserved::Functions(&[BinomialCoefficient]),
  "ceil" => Reserved::Functions(&[Ceiling]),
  "confidence" => Reserved::Functions(&[ConfidenceInterval]),
  "conj" => Reserved::Functions(&[Conjugate]),
  "cos" => Reserved::Functions(&[Cosine]),
  "cosh" => Reserved::Functions(&[HyperbolicCosine]),
  "det" => Reserved::Functions(&[Determinant]),
  "diff" => Reserved::Calculus(CalculusKind::Derivative),
  "dim" => Reserved::Functions(&[MatrixDimension]),
  "factor" => Reserved::Functions(&[Factor]),
  "floor" => Reserved::Functions(&[Floor]),
  "frac" => Reserved::Functions(&[FractionalPart]),
  "gcd" => Reserved::Functions(&[GreatestCommonDivisor]),
  "im" => Reserved::Functions(&[ImaginaryPart]),
  "int" => Reserved::Calculus(CalculusKind::Integral),
  "inverse" => Reserved::Functions(&[MatrixInverse]),
  "lcm" => Reserved::Functions(&[LeastCommonMultiple]),
  "ln" => Reserved::Functions(&[NaturalLogarithm]),
  "log" => Reserved::Functions(&[CommonLogarithm, Logarithm]),
  "permute" => Reserved::Functions(&[PermuteCoefficient]),
  "prediction95" => Reserved::Functions(&[PredictionInterval95]),
  "prediction" => Reserved::Functions(&[SimplePredictionInterval]),
  "product" => Reserved::Calculus(CalculusKind::Product),
  "quo" => Reserved::Functions(&[DivisionQuotient]),
  "random" => Reserved::Functions(&[Random]),
  "randint" => Reserved::Functions(&[RandomInteger]),
  "re" => Reserved::Functions(&[RealPart]),
  "rem" => Reserved::Functions(&[DivisionRemainder]),
  "root" => Reserved::Functions(&[NthRoot]),
  "round" => Reserved::Functions(&[Round]),
  "sign" => Reserved::Functions(&[SignFunction]),
  "sin" => Reserved::Functions(&[Sine]),
  "sinh" => Reserved::Functions(&[HyperbolicSine]),
  "sum" => Reserved::Calculus(CalculusKind::Sum),
  "tan" => Reserved::Functions(&[Tangent]),
  "tanh" => Reserved::Functions(&[HyperbolicTangent]),
  "trace" => Reserved::Functions(&[MatrixTrace]),
  "transpose" => Reserved::Functions(&[MatrixTranspose]),
  "√" => Reserved::Functions(&[SquareRoot]),
  "ans" => Reserved::Ans,
  "inf" => Reserved::Infinity,
  "undef" => Reserved::Undefined,
  "u" => Reserved::Sequence,
  "v" => Reserved::Sequence,
};

pub fn lookup(name: &str) -> Option<Reserved> {
  RESERVED.get(name).copied()
}

/// Whether `name` has a fixed meaning and so can never be assigned
/// to.
pub fn is_reserved(name: &str) -> bool {
  RESERVED.contains_key(name)
}

/// Every reserved name, in no particular order.
pub fn reserved_names() -> impl Iterator<Item = &'static str> {
  RESERVED.keys().copied()
}

impl Reserved {
  /// The overload of a built-in function accepting `argc` arguments.
  pub fn overload(self, argc: usize) -> Option<BuiltinFunction> {
    match self {
      Reserved::Functions(overloads) => overloads.iter().copied().find(|f| f.arity() == argc),
      _ => None,
    }
  }
}
