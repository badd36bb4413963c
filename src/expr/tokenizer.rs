
//! Splits calculator input into tokens: numbers, names, constants,
//! operators and brackets.

use super::constant::Constant;
use super::number::{NumberLiteral, EXPONENT_MARKER};
use super::symbol::{UNKNOWN_N, UNKNOWN_X};
use crate::parsing::operator::{OperatorKind, OperatorTable, Precedence, OPERATORS};
use crate::parsing::source::{SourceOffset, Span};
use crate::parsing::tokenizer::TokenizerState;
use crate::util::regex_opt_with;

use regex::Regex;
use once_cell::sync::Lazy;

use std::fmt::{self, Display, Formatter};

/// Opens a grouping that produces no node in the tree. Emitted by
/// layout code where the structure is already visible on screen.
pub const SYSTEM_LEFT_PAREN: char = '\u{12}';
pub const SYSTEM_RIGHT_PAREN: char = '\u{13}';

/// Precedence shared by every token that closes a group, and by the
/// comma. Sits above assignment and equality, so neither can appear
/// inside brackets, and below every arithmetic operator.
pub const CLOSER_PRECEDENCE: Precedence = Precedence::new(3);

static OPERATOR_RE: Lazy<Regex> = Lazy::new(|| {
  regex_opt_with(OPERATORS.spellings(), |s| format!("^{s}"))
});

/// A pull-based tokenizer for calculator input. Each call to
/// [`pop_token`](ExprTokenizer::pop_token) scans exactly one token.
/// Malformed input never fails the scan; it yields
/// [`TokenData::Undefined`] and leaves the decision to the parser.
#[derive(Clone, Debug)]
pub struct ExprTokenizer<'a> {
  state: TokenizerState<'a>,
  operator_table: &'a OperatorTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
  pub data: TokenData<'a>,
  pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenData<'a> {
  Number(NumberLiteral<'a>),
  /// A name, including `√` and the placeholder characters.
  Identifier(&'a str),
  Constant(Constant),
  Operator(OperatorKind),
  LeftParen,
  RightParen,
  LeftSystemParen,
  RightSystemParen,
  LeftBracket,
  RightBracket,
  /// `{`, or `_{` directly after a name.
  LeftBrace,
  RightBrace,
  Comma,
  Undefined(&'a str),
  EndOfStream,
}

impl<'a> ExprTokenizer<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      state: TokenizerState::new(input),
      operator_table: &OPERATORS,
    }
  }

  pub fn input(&self) -> &'a str {
    self.state.whole_input()
  }

  pub fn position(&self) -> SourceOffset {
    self.state.current_pos()
  }

  /// Rewinds (or fast-forwards) to `pos`. Scanning is a pure function
  /// of the remaining input, so seeking back replays the same tokens.
  pub fn seek(&mut self, pos: SourceOffset) {
    self.state.seek(pos)
  }

  /// Scans the next token. At the end of the input this returns
  /// [`TokenData::EndOfStream`], and keeps doing so on every call.
  pub fn pop_token(&mut self) -> Token<'a> {
    self.state.consume_spaces();
    let token = self.read_token();
    log::trace!("Token {} at {}", token.data, token.span);
    token
  }

  /// The token `pop_token` would return, without consuming it.
  pub fn peek_token(&self) -> Token<'a> {
    self.clone().pop_token()
  }

  fn read_token(&mut self) -> Token<'a> {
    let Some(ch) = self.state.peek() else {
      return Token::new(TokenData::EndOfStream, Span::point(self.state.current_pos()));
    };
    if ch.is_ascii_digit() || ch == '.' {
      self.read_number()
    } else if ch.is_ascii_alphabetic() {
      self.read_identifier()
    } else if let Some(tok) = self.read_char_token() {
      tok
    } else if let Some(tok) = self.read_operator() {
      tok
    } else {
      let m = self.state.advance(ch.len_utf8());
      Token::new(TokenData::Undefined(m.as_str()), m.span())
    }
  }

  fn read_char_token(&mut self) -> Option<Token<'a>> {
    static LITERALS: [(&str, TokenData<'static>); 10] = [
      ("(", TokenData::LeftParen),
      (")", TokenData::RightParen),
      ("[", TokenData::LeftBracket),
      ("]", TokenData::RightBracket),
      ("_{", TokenData::LeftBrace),
      ("{", TokenData::LeftBrace),
      ("}", TokenData::RightBrace),
      (",", TokenData::Comma),
      ("\u{12}", TokenData::LeftSystemParen),
      ("\u{13}", TokenData::RightSystemParen),
    ];
    for (literal, data) in &LITERALS {
      if let Some(m) = self.state.read_literal(literal) {
        return Some(Token::new(data.clone(), m.span()));
      }
    }

    let ch = self.state.peek()?;
    if let Some(constant) = Constant::from_glyph(ch) {
      let m = self.state.advance(ch.len_utf8());
      Some(Token::new(TokenData::Constant(constant), m.span()))
    } else if matches!(ch, '√' | UNKNOWN_X | UNKNOWN_N) {
      let m = self.state.advance(ch.len_utf8());
      Some(Token::new(TokenData::Identifier(m.as_str()), m.span()))
    } else {
      None
    }
  }

  fn read_identifier(&mut self) -> Token<'a> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*").unwrap());
    let start = self.state.current_pos();
    let Some(m) = self.state.read_regex(&RE) else {
      let m = self.state.advance(1);
      return Token::new(TokenData::Undefined(m.as_str()), m.span());
    };
    let mut name = m.as_str();
    // `log_{2}`: the underscore belongs to the brace.
    if name.len() > 1 && name.ends_with('_') && self.state.peek() == Some('{') {
      name = &name[..name.len() - 1];
      self.state.seek(start + name.len());
    }
    Token::new(TokenData::Identifier(name), Span::new(start, start + name.len()))
  }

  fn read_operator(&mut self) -> Option<Token<'a>> {
    let m = self.state.read_regex(&OPERATOR_RE)?;
    let kind = self.operator_table.get_by_spelling(m.as_str())?.kind();
    Some(Token::new(TokenData::Operator(kind), m.span()))
  }

  /// Digits with at most one point, then optionally the exponent
  /// marker, a sign, and at least one digit. Anything short of that
  /// is consumed as a single undefined token.
  fn read_number(&mut self) -> Token<'a> {
    static MANTISSA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]*)(\.([0-9]*))?").unwrap());
    static EXPONENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+").unwrap());
    static SIGN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?").unwrap());

    let start = self.state.current_pos();
    let input = self.state.whole_input();
    let undefined = move |state: &TokenizerState<'a>| {
      let span = Span::new(start, state.current_pos());
      Token::new(TokenData::Undefined(span.slice(input)), span)
    };

    let Some(mantissa) = self.state.read_regex_with_captures(&MANTISSA_RE) else {
      return undefined(&self.state);
    };
    let integral = mantissa.get(1).unwrap_or("");
    let fractional = mantissa.get(2).map(|_| mantissa.get(3).unwrap_or(""));
    if integral.is_empty() && fractional.map_or(true, str::is_empty) {
      return undefined(&self.state);
    }

    let mut marker = [0; 4];
    let exponent = if self.state.read_literal(EXPONENT_MARKER.encode_utf8(&mut marker)).is_some() {
      match self.state.read_regex(&EXPONENT_RE) {
        Some(m) => Some(m.as_str()),
        None => {
          self.state.read_regex(&SIGN_RE);
          return undefined(&self.state);
        }
      }
    } else {
      None
    };

    match NumberLiteral::new(integral, fractional, exponent) {
      Ok(literal) => Token::new(TokenData::Number(literal), Span::new(start, self.state.current_pos())),
      Err(_) => undefined(&self.state),
    }
  }
}

impl<'a> Token<'a> {
  pub fn new(data: TokenData<'a>, span: Span) -> Self {
    Self { data, span }
  }

  /// How tightly this token binds when it follows a complete operand.
  /// The parser keeps extending an operand while the next token's
  /// precedence is at least its current minimum.
  pub fn precedence(&self, operator_table: &OperatorTable) -> Precedence {
    match &self.data {
      TokenData::EndOfStream => Precedence::MIN,
      TokenData::Operator(kind) => operator_table.trailing_precedence(*kind),
      TokenData::RightParen | TokenData::RightSystemParen | TokenData::RightBracket
        | TokenData::RightBrace | TokenData::Comma => CLOSER_PRECEDENCE,
      _ => Precedence::MAX,
    }
  }

  pub fn is_end_of_stream(&self) -> bool {
    self.data == TokenData::EndOfStream
  }

  /// Whether the token can begin the right-hand factor of an implicit
  /// multiplication.
  pub fn starts_implicit_factor(&self) -> bool {
    matches!(
      self.data,
      TokenData::Number(_) | TokenData::Constant(_) | TokenData::Identifier(_)
        | TokenData::LeftParen | TokenData::LeftSystemParen | TokenData::LeftBracket
    )
  }
}

impl<'a> Display for TokenData<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TokenData::Number(n) => write!(f, "{n}"),
      TokenData::Identifier(name) => write!(f, "{}", name.escape_debug()),
      TokenData::Constant(c) => write!(f, "{c}"),
      TokenData::Operator(op) => write!(f, "{op}"),
      TokenData::LeftParen => write!(f, "("),
      TokenData::RightParen => write!(f, ")"),
      TokenData::LeftSystemParen => write!(f, "\\u{{12}}"),
      TokenData::RightSystemParen => write!(f, "\\u{{13}}"),
      TokenData::LeftBracket => write!(f, "["),
      TokenData::RightBracket => write!(f, "]"),
      TokenData::LeftBrace => write!(f, "{{"),
      TokenData::RightBrace => write!(f, "}}"),
      TokenData::Comma => write!(f, ","),
      TokenData::Undefined(text) => write!(f, "{}", text.escape_debug()),
      TokenData::EndOfStream => write!(f, "end of input"),
    }
  }
}
