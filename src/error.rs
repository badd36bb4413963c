
//! Errors produced while parsing calculator input.

use crate::expr::ArityError;
use crate::parsing::operator::OperatorKind;
use crate::parsing::source::{SourceOffset, Span};
use crate::pool::PoolExhausted;

use serde::Serialize;
use thiserror::Error;

/// Everything that can stop a parse. A failed parse never yields a
/// partial tree.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
  #[error("Unexpected '{token}' at {span}")]
  UnexpectedToken { token: String, span: Span },
  #[error("Unexpected end of input at {0}")]
  UnexpectedEof(SourceOffset),
  #[error("Undefined token '{token}' at {span}")]
  UndefinedToken { token: String, span: Span },
  #[error("Name '{name}' is longer than {max} characters")]
  NameTooLong { name: String, max: usize, span: Span },
  #[error("'{name}' is not a valid name")]
  InvalidName { name: String, span: Span },
  #[error("'{name}' is reserved")]
  ReservedName { name: String, span: Span },
  #[error("{name} does not take {actual} arguments")]
  WrongArity { name: String, actual: usize, span: Span },
  #[error("{name} expects a symbol as its second argument")]
  ExpectedBoundVariable { name: String, span: Span },
  #[error("Cannot store into '{target}'")]
  InvalidStoreTarget { target: String, span: Span },
  #[error("'{operator}' may only appear once, outside of any brackets")]
  ChainedRelation { operator: OperatorKind, span: Span },
  #[error("Malformed matrix at {span}: {reason}")]
  MalformedMatrix { reason: String, span: Span },
  #[error("Function '{name}' cannot take itself as an argument")]
  SelfReferentialFunction { name: String, span: Span },
  #[error("{0}")]
  Arity(#[from] ArityError),
  #[error("{0}")]
  ResourceExhausted(#[from] PoolExhausted),
  #[error("Expression nested more than {max} levels deep at {span}")]
  TooDeeplyNested { max: usize, span: Span },
}

/// The outcome of a parse, reduced to what a caller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseStatus {
  Success,
  SyntaxError,
  ResourceExhausted,
}

impl ParseError {
  pub fn status(&self) -> ParseStatus {
    match self {
      ParseError::ResourceExhausted(_) | ParseError::TooDeeplyNested { .. } => ParseStatus::ResourceExhausted,
      _ => ParseStatus::SyntaxError,
    }
  }

  /// Where in the input the error was detected, if known.
  pub fn span(&self) -> Option<Span> {
    match self {
      ParseError::UnexpectedToken { span, .. }
        | ParseError::UndefinedToken { span, .. }
        | ParseError::NameTooLong { span, .. }
        | ParseError::InvalidName { span, .. }
        | ParseError::ReservedName { span, .. }
        | ParseError::WrongArity { span, .. }
        | ParseError::ExpectedBoundVariable { span, .. }
        | ParseError::InvalidStoreTarget { span, .. }
        | ParseError::ChainedRelation { span, .. }
        | ParseError::MalformedMatrix { span, .. }
        | ParseError::SelfReferentialFunction { span, .. }
        | ParseError::TooDeeplyNested { span, .. } => Some(*span),
      ParseError::UnexpectedEof(pos) => Some(Span::point(*pos)),
      ParseError::Arity(_) | ParseError::ResourceExhausted(_) => None,
    }
  }
}

impl ParseStatus {
  pub fn of<T>(result: &Result<T, ParseError>) -> ParseStatus {
    match result {
      Ok(_) => ParseStatus::Success,
      Err(err) => err.status(),
    }
  }

  pub fn is_success(self) -> bool {
    self == ParseStatus::Success
  }
}
