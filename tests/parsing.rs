
//! End-to-end parsing of calculator input.

use calc_parser::{parse, parse_with, Expr, NodeAllocator, NodePool, ParseError, ParseStatus, ParserSettings};
use calc_parser::expr::{Operands, StoreTarget};
use calc_parser::expr::constant::Constant;
use calc_parser::expr::function::{BuiltinCall, BuiltinFunction, CalculusCall, CalculusKind, FunctionCall};
use calc_parser::expr::matrix::Matrix;
use calc_parser::expr::number::Decimal;
use calc_parser::expr::symbol::Symbol;
use calc_parser::expr::tokenizer::{ExprTokenizer, TokenData};
use calc_parser::util::Sign;

use num::BigUint;
use proptest::prelude::*;

fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

fn r(n: i64) -> Expr {
  Expr::from(n)
}

fn sym(name: &str) -> Expr {
  Expr::var(name).unwrap()
}

fn dec(mantissa: &str, exponent: i64) -> Expr {
  let mantissa = BigUint::parse_bytes(mantissa.as_bytes(), 10).unwrap();
  Expr::Decimal(Decimal::new(Sign::Positive, mantissa, exponent))
}

fn add_n(operands: Vec<Expr>) -> Expr {
  Expr::Addition(Operands::new("+", operands).unwrap())
}

fn mul_n(operands: Vec<Expr>) -> Expr {
  Expr::Multiplication(Operands::new("×", operands).unwrap())
}

fn call(function: BuiltinFunction, args: Vec<Expr>) -> Expr {
  Expr::Builtin(BuiltinCall::new(function, args).unwrap())
}

fn calculus(kind: CalculusKind, body: Expr, variable: &str, bounds: Vec<Expr>) -> Expr {
  Expr::Calculus(CalculusCall::new(kind, body, Symbol::new(variable).unwrap(), bounds).unwrap())
}

fn func(name: &str, argument: Expr) -> Expr {
  Expr::Function(FunctionCall::new(Symbol::new(name).unwrap(), argument))
}

fn matrix(rows: usize, columns: usize, entries: Vec<Expr>) -> Expr {
  Expr::Matrix(Matrix::from_entries(rows, columns, entries).unwrap())
}

fn store_in(value: Expr, name: &str) -> Expr {
  Expr::store(value, StoreTarget::Symbol(Symbol::new(name).unwrap()))
}

fn store_fn(value: Expr, name: &str, parameter: &str) -> Expr {
  let target = StoreTarget::Function {
    name: Symbol::new(name).unwrap(),
    parameter: Symbol::new(parameter).unwrap(),
  };
  Expr::store(value, target)
}

#[track_caller]
fn assert_parses_as(text: &str, expected: Expr) {
  match parse(text) {
    Ok(expr) => assert!(expr.is_identical_to(&expected), "{text:?} parsed as {expr:?}, expected {expected:?}"),
    Err(err) => panic!("{text:?} failed to parse: {err}"),
  }
}

#[track_caller]
fn assert_parses_with_parentheses_as(text: &str, expected: Expr) {
  let settings = ParserSettings::default().with_missing_parentheses(true);
  let expr = parse_with(text, &settings, &mut NodePool::unbounded())
    .unwrap_or_else(|err| panic!("{text:?} failed to parse: {err}"));
  assert_eq!(expr, expected, "{text:?}");
}

#[track_caller]
fn assert_not_parsable(text: &str) {
  let result = parse(text);
  assert_eq!(ParseStatus::of(&result), ParseStatus::SyntaxError, "{text:?} parsed as {result:?}");
}

fn token_kinds(text: &str) -> Vec<String> {
  let mut tokenizer = ExprTokenizer::new(text);
  let mut kinds = Vec::new();
  loop {
    let token = tokenizer.pop_token();
    if token.is_end_of_stream() {
      return kinds;
    }
    kinds.push(match token.data {
      TokenData::Number(_) => String::from("number"),
      TokenData::Undefined(_) => String::from("undefined"),
      data => data.to_string(),
    });
  }
}

#[test]
fn test_tokenize_numbers() {
  let numbers = [
    "1", "12", "123", "1.3", ".3", "1.3ᴇ3", "12.34ᴇ56", ".3ᴇ-32", "12.",
    ".999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999",
    "0.", "1.ᴇ-4", "1.ᴇ9999",
  ];
  for text in numbers {
    assert_eq!(token_kinds(text), vec!["number"], "{text:?}");
  }
}

#[test]
fn test_tokenize_undefined() {
  let malformed = ["1ᴇ", "1..", "..", "1.ᴇᴇ", "1.ᴇ", "1ᴇ--4", "1.ᴇᴇ4", "1ᴇ2ᴇ4"];
  for text in malformed {
    assert!(token_kinds(text).iter().any(|kind| kind == "undefined"), "{text:?}");
  }
}

#[test]
fn test_memory_exhaustion() {
  init_logger();
  let mut pool = NodePool::bounded(64 * 1024);
  let initial = pool.checkpoint();
  let settings = ParserSettings::default();

  let sum = parse_with("2+3", &settings, &mut pool).unwrap();
  assert_eq!(sum, Expr::add(r(2), r(3)));
  pool.restore_to(initial);
  assert_eq!(pool.used(), 0);

  let mut kept = Vec::new();
  let err = loop {
    let before = pool.used();
    match parse_with("1+2+3+4+5+6+7+8+9+10", &settings, &mut pool) {
      Ok(expr) => kept.push(expr),
      Err(err) => {
        assert_eq!(pool.used(), before);
        break err;
      }
    }
  };
  assert!(!kept.is_empty());
  assert_eq!(err.status(), ParseStatus::ResourceExhausted);
  assert!(matches!(err, ParseError::ResourceExhausted(_)));

  pool.restore_to(initial);
  assert_eq!(pool.used(), 0);
  assert_eq!(parse_with("1+1", &settings, &mut pool).unwrap(), Expr::add(r(1), r(1)));
}

#[test]
fn test_pool_capacity_boundary() {
  let settings = ParserSettings::default();
  for text in ["2×(3+4)", "[[1,2][3,4]]", "-f(x)!"] {
    let mut pool = NodePool::unbounded();
    let expected = parse_with(text, &settings, &mut pool).unwrap();
    let needed = pool.used();

    let mut pool = NodePool::bounded(needed);
    let result = parse_with(text, &settings, &mut pool);
    assert_eq!(ParseStatus::of(&result), ParseStatus::Success, "{text:?}");
    assert_eq!(result.unwrap(), expected);
    assert_eq!(pool.used(), needed);

    let mut pool = NodePool::bounded(needed - 1);
    let result = parse_with(text, &settings, &mut pool);
    assert_eq!(ParseStatus::of(&result), ParseStatus::ResourceExhausted, "{text:?}");
    assert_eq!(pool.used(), 0);
  }
}

fn nested(open: &str, inner: &str, close: &str, depth: usize) -> String {
  format!("{}{inner}{}", open.repeat(depth), close.repeat(depth))
}

#[test]
fn test_deep_nesting_is_exhaustion() {
  init_logger();
  let settings = ParserSettings::default();
  let inputs = [
    nested("(", "1", ")", 10_000),
    nested("\u{12}", "1", "\u{13}", 10_000),
    nested("-", "1", "", 200_000),
    nested("[[", "1", "]]", 10_000),
    nested("2^", "2", "", 10_000),
  ];
  for text in &inputs {
    let mut pool = NodePool::bounded(4096);
    let err = parse_with(text, &settings, &mut pool).unwrap_err();
    assert_eq!(err.status(), ParseStatus::ResourceExhausted);
    assert_eq!(pool.used(), 0);

    let err = parse(text).unwrap_err();
    assert!(matches!(err, ParseError::TooDeeplyNested { max: 128, .. }), "{err}");
  }
}

#[test]
fn test_nesting_depth_limit() {
  let settings = ParserSettings { max_depth: 4, ..ParserSettings::default() };
  let parses = |text: &str| ParseStatus::of(&parse_with(text, &settings, &mut NodePool::unbounded()));
  assert_eq!(parses("(((1)))"), ParseStatus::Success);
  assert_eq!(parses("((((1))))"), ParseStatus::ResourceExhausted);
  assert_eq!(parses("---1"), ParseStatus::Success);
  assert_eq!(parses("----1"), ParseStatus::ResourceExhausted);
  assert_eq!(parses("\u{12}\u{12}\u{12}1\u{13}\u{13}\u{13}"), ParseStatus::Success);
  assert_eq!(parses("\u{12}\u{12}\u{12}\u{12}1\u{13}\u{13}\u{13}\u{13}"), ParseStatus::ResourceExhausted);
  assert_eq!(parses("1+2+3+4+5+6+7+8"), ParseStatus::Success);

  let deep = nested("(", "1", ")", 100);
  assert_eq!(parse(&deep).map(|expr| expr.node_count()), Ok(101));
}

#[test]
fn test_parse_numbers() {
  assert_parses_as("0", r(0));
  assert_parses_as("0.1", dec("1", -1));
  assert_parses_as("1.", r(1));
  assert_parses_as(".1", dec("1", -1));
  assert_parses_as("0ᴇ2", Expr::Decimal(Decimal::zero()));
  assert_parses_as("0.1ᴇ2", dec("1", 1));
  assert_parses_as("1.ᴇ2", dec("1", 2));
  assert_parses_as(".1ᴇ2", dec("1", 1));
  assert_parses_as("0ᴇ-2", Expr::Decimal(Decimal::zero()));
  assert_parses_as("0.1ᴇ-2", dec("1", -3));
  assert_parses_as("1.ᴇ-2", dec("1", -2));
  assert_parses_as(".1ᴇ-2", dec("1", -3));
}

#[test]
fn test_parse_rounded_decimals() {
  assert_parses_as("0.0000012345678901234", dec("12345678901234", -6));
  assert_parses_as("0.00000123456789012345", dec("12345678901235", -6));
  assert_parses_as("0.00000123456789012341", dec("12345678901234", -6));
  assert_parses_as("1234567890123.4", dec("12345678901234", 12));
  assert_parses_as("123456789012345.2", dec("12345678901235", 14));
  assert_parses_as("123456789012341.2", dec("12345678901234", 14));
  assert_parses_as("12.34567", dec("1234567", 1));
  assert_parses_as(".999999999999990", dec("99999999999999", -1));
  assert_parses_as("9.99999999999994", dec("99999999999999", 0));
  assert_parses_as("99.9999999999995", dec("100000000000000", 2));
  assert_parses_as("999.999999999999", dec("100000000000000", 3));
  assert_parses_as("9999.99199999999", dec("99999920000000", 3));
  assert_parses_as("99299.9999999999", dec("99300000000000", 4));
}

#[test]
fn test_parse_large_integers() {
  let big = "123456789012345678765434567";
  assert_parses_as(big, Expr::integer(big.parse::<num::BigInt>().unwrap()));

  let max: BigUint = (BigUint::from(1u32) << 1024usize) - 1u32;
  assert_parses_as(&max.to_string(), Expr::integer(num::BigInt::from(max.clone())));

  let overflowed = max + 1u32;
  assert_parses_as(&overflowed.to_string(), dec("17976931348623", 308));
  let rounded_up = "179769313486235590772930519078902473361797697894230657273430081157732675805500963132708477322407536021120113879871393357658789768814416622492847430639474124377767893424865485276302219601246094119453082952085005768838150682342462881473913110540827237163350510684586298239947245938479716304835356329624224137216";
  assert_parses_as(rounded_up, dec("17976931348624", 308));
}

#[test]
fn test_parse_exponent_limits() {
  assert_parses_as("23ᴇ1000", Expr::Infinity(Sign::Positive));
  assert_parses_as("2.3ᴇ1000", dec("23", 1000));
  assert_parses_as("0.23ᴇ-1000", Expr::Decimal(Decimal::zero()));
  assert_parses_as("0.23ᴇ-999", dec("23", -1000));
}

#[test]
fn test_parse_operators() {
  assert_parses_as("1", r(1));
  assert_parses_as("(1)", Expr::paren(r(1)));
  assert_parses_as("((1))", Expr::paren(Expr::paren(r(1))));
  assert_parses_as("1+2", Expr::add(r(1), r(2)));
  assert_parses_as("(1)+2", Expr::add(Expr::paren(r(1)), r(2)));
  assert_parses_as("(1+2)", Expr::paren(Expr::add(r(1), r(2))));
  assert_parses_as("1+2+3", add_n(vec![r(1), r(2), r(3)]));
  assert_parses_as("1+2+(3+4)", add_n(vec![r(1), r(2), Expr::paren(Expr::add(r(3), r(4)))]));
  assert_parses_as("1×2", Expr::mul(r(1), r(2)));
  assert_parses_as("1×2×3", mul_n(vec![r(1), r(2), r(3)]));
  assert_parses_as("1+2×3", Expr::add(r(1), Expr::mul(r(2), r(3))));
  assert_parses_as("1/2", Expr::div(r(1), r(2)));
  assert_parses_as("(1/2)", Expr::paren(Expr::div(r(1), r(2))));
  assert_parses_as("1/2/3", Expr::div(Expr::div(r(1), r(2)), r(3)));
  assert_parses_as("1/2×3", Expr::mul(Expr::div(r(1), r(2)), r(3)));
  assert_parses_as("(1/2×3)", Expr::paren(Expr::mul(Expr::div(r(1), r(2)), r(3))));
  assert_parses_as("1×2/3", Expr::mul(r(1), Expr::div(r(2), r(3))));
  assert_parses_as("(1×2/3)", Expr::paren(Expr::mul(r(1), Expr::div(r(2), r(3)))));
  assert_parses_as("(1/2/3)", Expr::paren(Expr::div(Expr::div(r(1), r(2)), r(3))));
  assert_parses_as("1^2", Expr::pow(r(1), r(2)));
  assert_parses_as("1^2^3", Expr::pow(r(1), Expr::pow(r(2), r(3))));
  assert_parses_as("1=2", Expr::equal(r(1), r(2)));
  assert_parses_as("1 * 2", Expr::mul(r(1), r(2)));
}

#[test]
fn test_parse_minus() {
  assert_parses_as("-1", Expr::opposite(r(1)));
  assert_parses_as("(-1)", Expr::paren(Expr::opposite(r(1))));
  assert_parses_as("1-2", Expr::sub(r(1), r(2)));
  assert_parses_as("-1-2", Expr::sub(Expr::opposite(r(1)), r(2)));
  assert_parses_as("1-2-3", Expr::sub(Expr::sub(r(1), r(2)), r(3)));
  assert_parses_as("(1-2)", Expr::paren(Expr::sub(r(1), r(2))));
  assert_parses_as("1+-2", Expr::add(r(1), Expr::opposite(r(2))));
  assert_parses_as("--1", Expr::opposite(Expr::opposite(r(1))));
  assert_parses_as("(1+2)-3", Expr::sub(Expr::paren(Expr::add(r(1), r(2))), r(3)));
  assert_parses_as("(2×-3)", Expr::paren(Expr::mul(r(2), Expr::opposite(r(3)))));
  assert_parses_as("1^(2)-3", Expr::sub(Expr::pow(r(1), Expr::paren(r(2))), r(3)));
  assert_parses_as("1^2-3", Expr::sub(Expr::pow(r(1), r(2)), r(3)));
  assert_parses_as("2^-3", Expr::pow(r(2), Expr::opposite(r(3))));
  assert_parses_as("2--2+-1", Expr::add(Expr::sub(r(2), Expr::opposite(r(2))), Expr::opposite(r(1))));
  assert_parses_as("2--2×-1", Expr::sub(r(2), Expr::opposite(Expr::mul(r(2), Expr::opposite(r(1))))));
  assert_parses_as("-1^2", Expr::opposite(Expr::pow(r(1), r(2))));
  assert_parses_as("2/-3/-4", Expr::div(Expr::div(r(2), Expr::opposite(r(3))), Expr::opposite(r(4))));
  assert_parses_as("1×2-3×4", Expr::sub(Expr::mul(r(1), r(2)), Expr::mul(r(3), r(4))));
  assert_parses_as("-1×2", Expr::opposite(Expr::mul(r(1), r(2))));
  assert_parses_as("1+2-3", Expr::add(r(1), Expr::sub(r(2), r(3))));
}

#[test]
fn test_parse_factorial() {
  let f = Expr::factorial;
  assert_parses_as("1!", f(r(1)));
  assert_parses_as("1+2!", Expr::add(r(1), f(r(2))));
  assert_parses_as("1!+2", Expr::add(f(r(1)), r(2)));
  assert_parses_as("1!+2!", Expr::add(f(r(1)), f(r(2))));
  assert_parses_as("1×2!", Expr::mul(r(1), f(r(2))));
  assert_parses_as("1!×2", Expr::mul(f(r(1)), r(2)));
  assert_parses_as("1!×2!", Expr::mul(f(r(1)), f(r(2))));
  assert_parses_as("1-2!", Expr::sub(r(1), f(r(2))));
  assert_parses_as("1!-2", Expr::sub(f(r(1)), r(2)));
  assert_parses_as("1!-2!", Expr::sub(f(r(1)), f(r(2))));
  assert_parses_as("1/2!", Expr::div(r(1), f(r(2))));
  assert_parses_as("1!/2", Expr::div(f(r(1)), r(2)));
  assert_parses_as("1!/2!", Expr::div(f(r(1)), f(r(2))));
  assert_parses_as("1^2!", Expr::pow(r(1), f(r(2))));
  assert_parses_as("1!^2", Expr::pow(f(r(1)), r(2)));
  assert_parses_as("1!^2!", Expr::pow(f(r(1)), f(r(2))));
  assert_parses_as("(1)!", f(Expr::paren(r(1))));
}

#[test]
fn test_not_parsable() {
  let rejected = [
    "=5", "1=2=3", "1+", ")", ")(", "()", "(1", "1)", "1++2", "1//2", "×1",
    "1^^2", "^1", "t0000000", "[[t0000000[", "0→x=0", "0=0→x", "1ᴇ2ᴇ3", "",
  ];
  for text in rejected {
    assert_not_parsable(text);
  }
}

#[test]
fn test_error_details() {
  assert!(matches!(parse("1+"), Err(ParseError::UnexpectedEof(_))));
  assert!(matches!(parse("1.."), Err(ParseError::UndefinedToken { .. })));
  assert!(matches!(parse("abcdefgh"), Err(ParseError::NameTooLong { max: 7, .. })));
  assert!(matches!(parse("1=2=3"), Err(ParseError::ChainedRelation { .. })));
  assert!(matches!(parse("u"), Err(ParseError::ReservedName { .. })));
  assert!(matches!(parse("cos(1,2)"), Err(ParseError::WrongArity { actual: 2, .. })));
  assert!(matches!(parse("diff(1,2,3)"), Err(ParseError::ExpectedBoundVariable { .. })));
  assert!(matches!(parse("f(f)"), Err(ParseError::SelfReferentialFunction { .. })));
  assert!(matches!(parse("1→2"), Err(ParseError::InvalidStoreTarget { .. })));
  assert!(matches!(parse("[[1,2][3]]"), Err(ParseError::MalformedMatrix { .. })));

  let err = parse("1+abcdefgh").unwrap_err();
  assert_eq!(err.span().map(|span| span.slice("1+abcdefgh")), Some("abcdefgh"));
}

#[test]
fn test_matrices() {
  assert_parses_as("[[1]]", matrix(1, 1, vec![r(1)]));
  assert_parses_as("[[1,2,3]]", matrix(1, 3, vec![r(1), r(2), r(3)]));
  assert_parses_as("[[1,2,3][4,5,6]]", matrix(2, 3, vec![r(1), r(2), r(3), r(4), r(5), r(6)]));
  assert_parses_as("[[1,[[1]]]]", matrix(1, 2, vec![r(1), matrix(1, 1, vec![r(1)])]));
  let rejected = [
    "[", "]", "[[", "][", "[]", "[1]", "[[1,2],[3]]", "[[]", "[[1]", "[1]]",
    "[[,]]", "[[1,]]", ",", "[,]",
  ];
  for text in rejected {
    assert_not_parsable(text);
  }
}

#[test]
fn test_user_symbols() {
  for name in ["a", "x", "toot", "toto_", "t_toto", "tot12", "TOto", "TO12_Or"] {
    assert_parses_as(name, sym(name));
  }
  assert_not_parsable("_a");
  assert_not_parsable("abcdefgh");

  let settings = ParserSettings { max_name_length: 8, ..ParserSettings::default() };
  let expr = parse_with("abcdefgh", &settings, &mut NodePool::unbounded()).unwrap();
  assert_eq!(expr, sym("abcdefgh"));
}

#[test]
fn test_user_functions() {
  assert_parses_as("f(x)", func("f", sym("x")));
  assert_parses_as("f(1)", func("f", r(1)));
  assert_parses_as("ab12AB_(x)", func("ab12AB_", sym("x")));
  assert_parses_as("ab12AB_(1)", func("ab12AB_", r(1)));
  assert_parses_as("f(g(x))", func("f", func("g", sym("x"))));
  assert_parses_as("f(g(1))", func("f", func("g", r(1))));
  assert_parses_as("f((1))", func("f", Expr::paren(r(1))));
  assert_not_parsable("f(1,2)");
  assert_not_parsable("f(f)");
  assert_not_parsable("abcdefgh(1)");
}

#[test]
fn test_reserved_symbols() {
  assert_parses_as("ans", Expr::Symbol(Symbol::ans()));
  assert_parses_as("𝐢", Expr::Constant(Constant::ImaginaryUnit));
  assert_parses_as("π", Expr::Constant(Constant::Pi));
  assert_parses_as("ℯ", Expr::Constant(Constant::E));
  assert_parses_as("inf", Expr::Infinity(Sign::Positive));
  assert_parses_as("undef", Expr::Undefined);
  assert_not_parsable("u");
  assert_not_parsable("v");
}

#[test]
fn test_reserved_functions() {
  use BuiltinFunction::*;

  let unary = [
    ("acos", ArcCosine), ("acosh", HyperbolicArcCosine), ("abs", AbsoluteValue),
    ("arg", ComplexArgument), ("asin", ArcSine), ("asinh", HyperbolicArcSine),
    ("atan", ArcTangent), ("atanh", HyperbolicArcTangent), ("ceil", Ceiling),
    ("dim", MatrixDimension), ("conj", Conjugate), ("det", Determinant),
    ("cos", Cosine), ("cosh", HyperbolicCosine), ("factor", Factor),
    ("floor", Floor), ("frac", FractionalPart), ("im", ImaginaryPart),
    ("inverse", MatrixInverse), ("ln", NaturalLogarithm), ("log", CommonLogarithm),
    ("re", RealPart), ("sin", Sine), ("sign", SignFunction), ("sinh", HyperbolicSine),
    ("tan", Tangent), ("tanh", HyperbolicTangent), ("trace", MatrixTrace),
    ("transpose", MatrixTranspose), ("√", SquareRoot),
  ];
  for (name, function) in unary {
    assert_parses_as(&format!("{name}(1)"), call(function, vec![r(1)]));
  }

  let binary = [
    ("binomial(2,1)", BinomialCoefficient, 2, 1), ("confidence(1,2)", ConfidenceInterval, 1, 2),
    ("gcd(1,2)", GreatestCommonDivisor, 1, 2), ("lcm(1,2)", LeastCommonMultiple, 1, 2),
    ("log(1,2)", Logarithm, 1, 2), ("log_{2}(1)", Logarithm, 1, 2),
    ("permute(2,1)", PermuteCoefficient, 2, 1), ("prediction95(1,2)", PredictionInterval95, 1, 2),
    ("prediction(1,2)", SimplePredictionInterval, 1, 2), ("quo(1,2)", DivisionQuotient, 1, 2),
    ("randint(1,2)", RandomInteger, 1, 2), ("rem(1,2)", DivisionRemainder, 1, 2),
    ("root(1,2)", NthRoot, 1, 2), ("round(1,2)", Round, 1, 2),
  ];
  for (text, function, a, b) in binary {
    assert_parses_as(text, call(function, vec![r(a), r(b)]));
  }

  assert_parses_as("random()", call(Random, vec![]));
  assert_not_parsable("cos(1,2)");
  assert_not_parsable("log(1,2,3)");
}

#[test]
fn test_calculus_functions() {
  assert_parses_as("diff(1,x,3)", calculus(CalculusKind::Derivative, r(1), "x", vec![r(3)]));
  assert_parses_as("int(1,x,2,3)", calculus(CalculusKind::Integral, r(1), "x", vec![r(2), r(3)]));
  assert_parses_as("product(1,n,2,3)", calculus(CalculusKind::Product, r(1), "n", vec![r(2), r(3)]));
  assert_parses_as("sum(1,n,2,3)", calculus(CalculusKind::Sum, r(1), "n", vec![r(2), r(3)]));
  for text in ["diff(1,2,3)", "int(1,2,3,4)", "product(1,2,3,4)", "sum(1,2,3,4)", "sum(1,n,2)"] {
    assert_not_parsable(text);
  }
}

#[test]
fn test_store() {
  assert_parses_as("1→a", store_in(r(1), "a"));
  assert_parses_as("1→e", store_in(r(1), "e"));
  assert_parses_as("1→f(x)", store_fn(r(1), "f", "x"));
  assert_parses_as("x→f(x)", store_fn(sym("x"), "f", "x"));
  assert_parses_as("n→f(x)", store_fn(sym("n"), "f", "x"));
  assert_parses_as("[[x]]→f(x)", store_fn(matrix(1, 1, vec![sym("x")]), "f", "x"));
  let rejected = [
    "a→b→c", "1→2", "1→", "→2", "(1→a)", "1→u(n)", "1→u(n+1)", "1→v(n)",
    "1→v(n+1)", "1→u_{n}", "1→u_{n+1}", "1→v_{n}", "1→v_{n+1}", "1→inf",
    "1→undef", "1→π", "1→𝐢", "1→ℯ", "1→\u{1}", "1→\u{2}", "1→acos",
    "1→f(2)", "1→f(f)", "3→f(g(4))", "1→ans", "ans→ans",
  ];
  for text in rejected {
    assert_not_parsable(text);
  }
}

#[test]
fn test_implicit_multiplication() {
  assert_not_parsable(".1.2");
  assert_not_parsable("1 2");
  assert_parses_as("1x", Expr::mul(r(1), sym("x")));
  assert_parses_as("1ans", Expr::mul(r(1), Expr::Symbol(Symbol::ans())));
  assert_parses_as("x1", sym("x1"));
  assert_parses_as("1x+2", Expr::add(Expr::mul(r(1), sym("x")), r(2)));
  assert_parses_as("1π", Expr::mul(r(1), Expr::Constant(Constant::Pi)));
  assert_parses_as("1x-2", Expr::sub(Expr::mul(r(1), sym("x")), r(2)));
  assert_parses_as("-1x", Expr::opposite(Expr::mul(r(1), sym("x"))));
  assert_parses_as("2×1x", Expr::mul(r(2), Expr::mul(r(1), sym("x"))));
  assert_parses_as("2^1x", Expr::mul(Expr::pow(r(2), r(1)), sym("x")));
  assert_parses_as("1x^2", Expr::mul(r(1), Expr::pow(sym("x"), r(2))));
  assert_parses_as("2/1x", Expr::div(r(2), Expr::mul(r(1), sym("x"))));
  assert_parses_as("1x/2", Expr::div(Expr::mul(r(1), sym("x")), r(2)));
  assert_parses_as("(1)2", Expr::mul(Expr::paren(r(1)), r(2)));
  assert_parses_as("1(2)", Expr::mul(r(1), Expr::paren(r(2))));
  assert_parses_as("sin(1)2", Expr::mul(call(BuiltinFunction::Sine, vec![r(1)]), r(2)));
  assert_parses_as("1cos(2)", Expr::mul(r(1), call(BuiltinFunction::Cosine, vec![r(2)])));
  assert_parses_as("1!2", Expr::mul(Expr::factorial(r(1)), r(2)));
  let e = Expr::Constant(Constant::E);
  assert_parses_as("2ℯ^(3)", Expr::mul(r(2), Expr::pow(e, Expr::paren(r(3)))));
  assert_parses_as("\u{12}2^3\u{13}3", Expr::mul(Expr::pow(r(2), r(3)), r(3)));
  assert_parses_as("[[1]][[2]]", Expr::mul(matrix(1, 1, vec![r(1)]), matrix(1, 1, vec![r(2)])));
}

#[test]
fn test_adding_missing_parentheses() {
  let conj = |e| call(BuiltinFunction::Conjugate, vec![e]);
  assert_parses_with_parentheses_as("1+-2", Expr::add(r(1), Expr::paren(Expr::opposite(r(2)))));
  assert_parses_with_parentheses_as("1--2", Expr::sub(r(1), Expr::paren(Expr::opposite(r(2)))));
  assert_parses_with_parentheses_as("1+conj(-2)", Expr::add(r(1), Expr::paren(conj(Expr::opposite(r(2))))));
  assert_parses_with_parentheses_as("1-conj(-2)", Expr::sub(r(1), Expr::paren(conj(Expr::opposite(r(2))))));
  let i = Expr::Constant(Constant::ImaginaryUnit);
  assert_parses_with_parentheses_as("3conj(1+𝐢)", Expr::mul(r(3), Expr::paren(conj(Expr::add(r(1), i)))));
  assert_parses_with_parentheses_as("2×-3", Expr::mul(r(2), Expr::paren(Expr::opposite(r(3)))));
  assert_parses_with_parentheses_as("--2", Expr::opposite(Expr::paren(Expr::opposite(r(2)))));
  assert_parses_with_parentheses_as("\u{12}2/3\u{13}^2", Expr::pow(Expr::paren(Expr::div(r(2), r(3))), r(2)));
}

#[test]
fn test_missing_parentheses_are_idempotent() {
  for text in ["1+-2", "2×-3--4", "\u{12}1+2\u{13}×3", "-\u{12}1+2\u{13}!", "conj(conj(1-2))^2"] {
    let once = calc_parser::add_missing_parentheses(parse(text).unwrap()).0;
    let (twice, inserted) = calc_parser::add_missing_parentheses(once.clone());
    assert_eq!(inserted, 0, "{text:?}");
    assert_eq!(once, twice, "{text:?}");
  }
}

#[test]
fn test_reversible_rendering() {
  for text in ["1-2-3", "1-(2-3)", "\u{12}1+2\u{13}+3", "2^1x", "2/1x", "-1x", "2--2×-1", "1→f(x)", "[[1,2][3,x]]", "log_{2}(8)"] {
    let expr = parse(text).unwrap();
    let rendered = expr.to_reversible_string();
    assert_eq!(parse(&rendered).unwrap(), expr, "{text:?} rendered as {rendered:?}");
  }
}

fn expression_text() -> impl Strategy<Value = String> {
  let leaf = prop_oneof![
    Just(String::from("1")),
    Just(String::from("23")),
    Just(String::from("4.5")),
    Just(String::from("6ᴇ-7")),
    Just(String::from("x")),
    Just(String::from("ab")),
    Just(String::from("π")),
    Just(String::from("ans")),
    Just(String::from("inf")),
  ];
  leaf.prop_recursive(5, 48, 3, |inner| {
    prop_oneof![
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}+{b}")),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}-{b}")),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}×{b}")),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}/{b}")),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}^{b}")),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("{a}{b}")),
      inner.clone().prop_map(|a| format!("-{a}")),
      inner.clone().prop_map(|a| format!("{a}!")),
      inner.clone().prop_map(|a| format!("({a})")),
      inner.clone().prop_map(|a| format!("\u{12}{a}\u{13}")),
      inner.clone().prop_map(|a| format!("sin({a})")),
      inner.clone().prop_map(|a| format!("f({a})")),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("log({a},{b})")),
      (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("[[{a},{b}]]")),
    ]
  })
}

proptest! {
  #[test]
  fn prop_reversible_rendering_round_trips(text in expression_text()) {
    let parsed = parse(&text);
    prop_assume!(parsed.is_ok());
    let expr = parsed.unwrap();
    let rendered = expr.to_reversible_string();
    prop_assert_eq!(parse(&rendered), Ok(expr), "rendered as {:?}", rendered);
  }

  #[test]
  fn prop_relations_round_trip(lhs in expression_text(), rhs in expression_text()) {
    for text in [format!("{lhs}={rhs}"), format!("{lhs}→y")] {
      if let Ok(expr) = parse(&text) {
        let rendered = expr.to_reversible_string();
        prop_assert_eq!(parse(&rendered), Ok(expr), "rendered as {:?}", rendered);
      }
    }
  }

  #[test]
  fn prop_failed_parse_leaves_pool_untouched(text in expression_text(), capacity in 0usize..4096) {
    let mut pool = NodePool::bounded(capacity);
    match parse_with(&text, &ParserSettings::default(), &mut pool) {
      Ok(_) => {
        prop_assert!(pool.used() <= capacity);
      }
      Err(_) => {
        prop_assert_eq!(pool.used(), 0);
      }
    }
  }
}
