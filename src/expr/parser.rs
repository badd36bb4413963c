
//! Precedence-climbing parser from calculator input to [`Expr`].
//!
//! Tokens are pulled from an [`ExprTokenizer`] one at a time, with a
//! single token of lookahead. Every node built is charged to a
//! [`NodeAllocator`]; on any failure the allocator is rewound to the
//! state it was in before the parse began.

use super::{Expr, Operands, StoreTarget};
use super::function::{BuiltinCall, BuiltinFunction, CalculusCall, CalculusKind, FunctionCall};
use super::function::registry::{self, Reserved};
use super::matrix::Matrix;
use super::parens::add_missing_parentheses;
use super::symbol::Symbol;
use super::tokenizer::{ExprTokenizer, Token, TokenData, CLOSER_PRECEDENCE};
use crate::error::ParseError;
use crate::parsing::operator::{FixityTypes, OperatorKind, OperatorTable, Precedence, OPERATORS};
use crate::parsing::source::Span;
use crate::pool::{NodeAllocator, NodePool};
use crate::settings::ParserSettings;
use crate::util::Sign;

use std::mem;

/// Parses `text` with the default settings and no memory limit.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
  parse_with(text, &ParserSettings::default(), &mut NodePool::unbounded())
}

/// Parses `text`, charging every node to `allocator`. On failure the
/// allocator's usage is the same as before the call.
pub fn parse_with<A>(text: &str, settings: &ParserSettings, allocator: &mut A) -> Result<Expr, ParseError>
where A: NodeAllocator + ?Sized {
  ExprParser::new(text, settings, allocator).parse()
}

#[derive(Debug)]
pub struct ExprParser<'a, A> {
  tokenizer: ExprTokenizer<'a>,
  next_token: Token<'a>,
  operator_table: &'a OperatorTable,
  settings: &'a ParserSettings,
  allocator: A,
  /// Set when the operand just parsed is directly followed by
  /// something that starts another factor. The parser then behaves as
  /// if an implicit multiplication sign sat between the two.
  pending_implicit_times: bool,
  /// Number of operands currently being parsed, one inside another.
  depth: usize,
}

impl<'a, A: NodeAllocator> ExprParser<'a, A> {
  pub fn new(text: &'a str, settings: &'a ParserSettings, allocator: A) -> Self {
    let mut tokenizer = ExprTokenizer::new(text);
    let next_token = tokenizer.pop_token();
    Self {
      tokenizer,
      next_token,
      operator_table: &OPERATORS,
      settings,
      allocator,
      pending_implicit_times: false,
      depth: 0,
    }
  }

  /// Parses the whole input as a single expression.
  pub fn parse(mut self) -> Result<Expr, ParseError> {
    let checkpoint = self.allocator.checkpoint();
    match self.parse_expression() {
      Ok(expr) => Ok(expr),
      Err(err) => {
        log::debug!("Failed to parse {:?}: {err}", self.tokenizer.input());
        self.allocator.restore_to(checkpoint);
        log::debug!("Restored node allocator to checkpoint {checkpoint:?}");
        Err(err)
      }
    }
  }

  fn parse_expression(&mut self) -> Result<Expr, ParseError> {
    let expr = self.parse_until(Precedence::MIN.incremented())?;
    let token = self.pop_token();
    if !token.is_end_of_stream() {
      return Err(unexpected(token));
    }
    if self.settings.add_missing_parentheses {
      let (expr, inserted) = add_missing_parentheses(expr);
      for _ in 0..inserted {
        self.allocator.allocate(mem::size_of::<Expr>())?;
      }
      Ok(expr)
    } else {
      Ok(expr)
    }
  }

  fn pop_token(&mut self) -> Token<'a> {
    let next = self.tokenizer.pop_token();
    mem::replace(&mut self.next_token, next)
  }

  fn next_precedence(&self) -> Precedence {
    if self.pending_implicit_times {
      self.operator_table.trailing_precedence(OperatorKind::ImplicitTimes)
    } else {
      self.next_token.precedence(self.operator_table)
    }
  }

  /// Charges a freshly built node to the allocator.
  fn build(&mut self, expr: Expr) -> Result<Expr, ParseError> {
    self.allocator.allocate(expr.allocation_size())?;
    Ok(expr)
  }

  /// Parses one operand, then keeps extending it with operators whose
  /// precedence is at least `min`. Every nested operand passes through
  /// here, so this is where the nesting depth is bounded.
  fn parse_until(&mut self, min: Precedence) -> Result<Expr, ParseError> {
    let max = self.settings.max_depth;
    if self.depth >= max {
      return Err(ParseError::TooDeeplyNested { max, span: self.next_token.span });
    }
    self.depth += 1;
    let result = self.parse_operand_chain(min);
    self.depth -= 1;
    result
  }

  fn parse_operand_chain(&mut self, min: Precedence) -> Result<Expr, ParseError> {
    let token = self.pop_token();
    let mut lhs = self.parse_prefix(token, min)?;
    let mut chain = None;
    while self.next_precedence() >= min {
      if self.pending_implicit_times {
        self.pending_implicit_times = false;
        let rhs = self.parse_until(self.operator_table.right_precedence(OperatorKind::ImplicitTimes))?;
        lhs = self.build(Expr::mul(lhs, rhs))?;
        chain = None;
      } else {
        let token = self.pop_token();
        lhs = self.parse_infix(token, lhs, &mut chain)?;
      }
    }
    Ok(lhs)
  }

  fn parse_prefix(&mut self, token: Token<'a>, min: Precedence) -> Result<Expr, ParseError> {
    match token.data {
      TokenData::Number(literal) => {
        let expr = literal.to_expr(self.settings);
        let expr = self.build(expr)?;
        self.after_operand(true)?;
        Ok(expr)
      }
      TokenData::Constant(constant) => {
        let expr = self.build(Expr::Constant(constant))?;
        self.after_operand(false)?;
        Ok(expr)
      }
      TokenData::Identifier(name) => {
        let expr = self.parse_identifier(name, token.span)?;
        self.after_operand(false)?;
        Ok(expr)
      }
      TokenData::LeftParen => {
        let inner = self.parse_until(CLOSER_PRECEDENCE.incremented())?;
        self.expect(TokenData::RightParen)?;
        let expr = self.build(Expr::paren(inner))?;
        self.after_operand(false)?;
        Ok(expr)
      }
      TokenData::LeftSystemParen => {
        let inner = self.parse_until(CLOSER_PRECEDENCE.incremented())?;
        self.expect(TokenData::RightSystemParen)?;
        self.after_operand(false)?;
        Ok(inner)
      }
      TokenData::LeftBracket => {
        let expr = self.parse_matrix()?;
        self.after_operand(false)?;
        Ok(expr)
      }
      TokenData::Operator(kind) => {
        let is_prefix = self.operator_table.get(kind)
          .is_some_and(|op| op.fixity().fixity_types().contains(FixityTypes::PREFIX));
        if !is_prefix {
          return Err(unexpected(token));
        }
        let operand_min = min.max(self.operator_table.operand_precedence(kind));
        let operand = self.parse_until(operand_min)?;
        self.build(Expr::opposite(operand))
      }
      _ => Err(unexpected(token)),
    }
  }

  fn parse_infix(&mut self, token: Token<'a>, lhs: Expr, chain: &mut Option<OperatorKind>) -> Result<Expr, ParseError> {
    let TokenData::Operator(kind) = token.data else {
      return Err(unexpected(token));
    };
    let previous_chain = chain.replace(kind);
    match kind {
      OperatorKind::Plus | OperatorKind::Times => {
        let rhs = self.parse_until(self.operator_table.right_precedence(kind))?;
        match (lhs, kind) {
          (Expr::Addition(mut operands), OperatorKind::Plus) if previous_chain == Some(kind) => {
            self.allocator.allocate(mem::size_of::<Expr>())?;
            operands.push(rhs);
            Ok(Expr::Addition(operands))
          }
          (Expr::Multiplication(mut operands), OperatorKind::Times) if previous_chain == Some(kind) => {
            self.allocator.allocate(mem::size_of::<Expr>())?;
            operands.push(rhs);
            Ok(Expr::Multiplication(operands))
          }
          (lhs, OperatorKind::Plus) => self.build(Expr::Addition(Operands::pair(lhs, rhs))),
          (lhs, _) => self.build(Expr::Multiplication(Operands::pair(lhs, rhs))),
        }
      }
      OperatorKind::Minus | OperatorKind::Slash | OperatorKind::Power => {
        let rhs = self.parse_until(self.operator_table.right_precedence(kind))?;
        let expr = match kind {
          OperatorKind::Minus => Expr::sub(lhs, rhs),
          OperatorKind::Slash => Expr::div(lhs, rhs),
          _ => Expr::pow(lhs, rhs),
        };
        self.build(expr)
      }
      OperatorKind::Equal => {
        if matches!(lhs, Expr::Equal(..) | Expr::Store(..)) {
          return Err(ParseError::ChainedRelation { operator: kind, span: token.span });
        }
        let rhs = self.parse_until(self.operator_table.right_precedence(kind))?;
        self.build(Expr::equal(lhs, rhs))
      }
      OperatorKind::Store => {
        if matches!(lhs, Expr::Equal(..) | Expr::Store(..)) {
          return Err(ParseError::ChainedRelation { operator: kind, span: token.span });
        }
        let target = self.parse_store_target()?;
        self.build(Expr::store(lhs, target))
      }
      OperatorKind::Bang => {
        let expr = self.build(Expr::factorial(lhs))?;
        self.after_operand(false)?;
        Ok(expr)
      }
      OperatorKind::ImplicitTimes => Err(unexpected(token)),
    }
  }

  /// Decides whether an implicit multiplication follows the operand
  /// that was just parsed. Two adjacent numbers are never multiplied.
  fn after_operand(&mut self, was_number: bool) -> Result<(), ParseError> {
    if was_number && matches!(self.next_token.data, TokenData::Number(_)) {
      return Err(unexpected(self.next_token.clone()));
    }
    self.pending_implicit_times = self.next_token.starts_implicit_factor();
    Ok(())
  }

  fn expect(&mut self, expected: TokenData<'a>) -> Result<Token<'a>, ParseError> {
    let token = self.pop_token();
    if token.data == expected {
      Ok(token)
    } else {
      Err(unexpected(token))
    }
  }

  /// Opening of an argument list. Returns the token that closes it.
  fn expect_call_open(&mut self) -> Result<TokenData<'a>, ParseError> {
    let token = self.pop_token();
    match token.data {
      TokenData::LeftParen => Ok(TokenData::RightParen),
      TokenData::LeftSystemParen => Ok(TokenData::RightSystemParen),
      _ => Err(unexpected(token)),
    }
  }

  /// A comma-separated list, possibly empty, ending at `closer`. The
  /// opening token has already been consumed.
  fn parse_arguments(&mut self, closer: TokenData<'a>) -> Result<Vec<Expr>, ParseError> {
    let mut args = Vec::new();
    if self.next_token.data == closer {
      self.pop_token();
      return Ok(args);
    }
    loop {
      args.push(self.parse_until(CLOSER_PRECEDENCE.incremented())?);
      let token = self.pop_token();
      if token.data == TokenData::Comma {
        continue;
      } else if token.data == closer {
        return Ok(args);
      } else {
        return Err(unexpected(token));
      }
    }
  }

  fn parse_identifier(&mut self, name: &'a str, span: Span) -> Result<Expr, ParseError> {
    if let Some(placeholder) = single_char(name).and_then(Symbol::placeholder) {
      return self.build(Expr::Symbol(placeholder));
    }
    match registry::lookup(name) {
      Some(reserved @ Reserved::Functions(_)) => self.parse_builtin_call(name, reserved, span),
      Some(Reserved::Calculus(kind)) => self.parse_calculus_call(kind, span),
      Some(Reserved::Ans) => self.build(Expr::Symbol(Symbol::ans())),
      Some(Reserved::Infinity) => self.build(Expr::Infinity(Sign::Positive)),
      Some(Reserved::Undefined) => self.build(Expr::Undefined),
      Some(Reserved::Sequence) => Err(ParseError::ReservedName { name: name.to_owned(), span }),
      None => self.parse_custom_identifier(name, span),
    }
  }

  fn parse_builtin_call(&mut self, name: &str, reserved: Reserved, span: Span) -> Result<Expr, ParseError> {
    if name == BuiltinFunction::Logarithm.name() && self.next_token.data == TokenData::LeftBrace {
      // log_{b}(x)
      self.pop_token();
      let base = self.parse_until(CLOSER_PRECEDENCE.incremented())?;
      self.expect(TokenData::RightBrace)?;
      let closer = self.expect_call_open()?;
      let argument = self.parse_until(CLOSER_PRECEDENCE.incremented())?;
      self.expect(closer)?;
      let call = BuiltinCall::new(BuiltinFunction::Logarithm, vec![argument, base])?;
      return self.build(Expr::Builtin(call));
    }
    let closer = self.expect_call_open()?;
    let args = self.parse_arguments(closer)?;
    let function = reserved.overload(args.len()).ok_or_else(|| {
      ParseError::WrongArity { name: name.to_owned(), actual: args.len(), span }
    })?;
    let call = BuiltinCall::new(function, args)?;
    self.build(Expr::Builtin(call))
  }

  fn parse_calculus_call(&mut self, kind: CalculusKind, span: Span) -> Result<Expr, ParseError> {
    let closer = self.expect_call_open()?;
    let args = self.parse_arguments(closer)?;
    if args.len() != kind.arity() {
      return Err(ParseError::WrongArity { name: kind.name().to_owned(), actual: args.len(), span });
    }
    let mut args = args.into_iter();
    let (Some(body), Some(Expr::Symbol(variable))) = (args.next(), args.next()) else {
      return Err(ParseError::ExpectedBoundVariable { name: kind.name().to_owned(), span });
    };
    let call = CalculusCall::new(kind, body, variable, args.collect())?;
    self.build(Expr::Calculus(call))
  }

  fn parse_custom_identifier(&mut self, name: &str, span: Span) -> Result<Expr, ParseError> {
    let symbol = self.user_symbol(name, span)?;
    if !matches!(self.next_token.data, TokenData::LeftParen | TokenData::LeftSystemParen) {
      return self.build(Expr::Symbol(symbol));
    }
    let closer = self.expect_call_open()?;
    let mut args = self.parse_arguments(closer)?;
    if args.len() != 1 {
      return Err(ParseError::WrongArity { name: name.to_owned(), actual: args.len(), span });
    }
    let argument = args.remove(0);
    if argument == Expr::Symbol(symbol.clone()) {
      return Err(ParseError::SelfReferentialFunction { name: name.to_owned(), span });
    }
    self.build(Expr::Function(FunctionCall::new(symbol, argument)))
  }

  /// Validates a name the user is free to define.
  fn user_symbol(&self, name: &str, span: Span) -> Result<Symbol, ParseError> {
    if registry::is_reserved(name) {
      return Err(ParseError::ReservedName { name: name.to_owned(), span });
    }
    let max = self.settings.max_name_length;
    if name.chars().count() > max {
      return Err(ParseError::NameTooLong { name: name.to_owned(), max, span });
    }
    Symbol::new(name).ok_or_else(|| ParseError::InvalidName { name: name.to_owned(), span })
  }

  /// After `→`: a user symbol, or a user function applied to a bare
  /// parameter symbol. Nothing may follow.
  fn parse_store_target(&mut self) -> Result<StoreTarget, ParseError> {
    let token = self.pop_token();
    let (name, span) = match token.data {
      TokenData::Identifier(name) if single_char(name).and_then(Symbol::placeholder).is_none() => (name, token.span),
      TokenData::EndOfStream => return Err(ParseError::UnexpectedEof(token.span.start)),
      _ => {
        let target = token.span.slice(self.tokenizer.input()).to_owned();
        return Err(ParseError::InvalidStoreTarget { target, span: token.span });
      }
    };
    let name = self.user_symbol(name, span)?;

    let target = if self.next_token.data == TokenData::LeftParen {
      self.pop_token();
      let token = self.pop_token();
      let TokenData::Identifier(parameter) = token.data else {
        let target = token.span.slice(self.tokenizer.input()).to_owned();
        return Err(ParseError::InvalidStoreTarget { target, span: token.span });
      };
      let parameter = self.user_symbol(parameter, token.span)?;
      if parameter == name {
        return Err(ParseError::SelfReferentialFunction { name: name.to_string(), span });
      }
      self.expect(TokenData::RightParen)?;
      StoreTarget::Function { name, parameter }
    } else {
      StoreTarget::Symbol(name)
    };

    let token = self.pop_token();
    match token.data {
      TokenData::EndOfStream => Ok(target),
      TokenData::Operator(operator @ (OperatorKind::Store | OperatorKind::Equal)) => {
        Err(ParseError::ChainedRelation { operator, span: token.span })
      }
      _ => Err(unexpected(token)),
    }
  }

  /// After `[`: one or more rows, each a bracketed, comma-separated
  /// list of entries, then `]`.
  fn parse_matrix(&mut self) -> Result<Expr, ParseError> {
    let mut rows: Vec<Vec<Expr>> = Vec::new();
    loop {
      let token = self.pop_token();
      match token.data {
        TokenData::RightBracket if !rows.is_empty() => break,
        TokenData::LeftBracket => {
          let row = self.parse_arguments(TokenData::RightBracket)?;
          if row.is_empty() {
            return Err(ParseError::MalformedMatrix { reason: String::from("empty row"), span: token.span });
          }
          if let Some(first) = rows.first() {
            if first.len() != row.len() {
              let reason = format!("expected {} entries in each row, found {}", first.len(), row.len());
              return Err(ParseError::MalformedMatrix { reason, span: token.span });
            }
          }
          rows.push(row);
        }
        TokenData::EndOfStream => return Err(ParseError::UnexpectedEof(token.span.start)),
        _ => {
          let reason = format!("expected a row, found '{}'", token.data);
          return Err(ParseError::MalformedMatrix { reason, span: token.span });
        }
      }
    }
    let matrix = Matrix::new(rows)?;
    self.build(Expr::Matrix(matrix))
  }
}

fn unexpected(token: Token<'_>) -> ParseError {
  match token.data {
    TokenData::EndOfStream => ParseError::UnexpectedEof(token.span.start),
    TokenData::Undefined(text) => ParseError::UndefinedToken { token: text.to_owned(), span: token.span },
    data => ParseError::UnexpectedToken { token: data.to_string(), span: token.span },
  }
}

fn single_char(name: &str) -> Option<char> {
  let mut chars = name.chars();
  match (chars.next(), chars.next()) {
    (Some(ch), None) => Some(ch),
    _ => None,
  }
}
