
mod precedence;
mod associativity;
mod fixity;
mod table;

pub use precedence::Precedence;
pub use associativity::Associativity;
pub use fixity::{Fixity, FixityTypes, EmptyFixity, InfixProperties, PrefixProperties, PostfixProperties};
pub use table::{OperatorTable, OPERATORS};

use serde::Serialize;

use std::fmt::{self, Display, Formatter};

/// The operators of the calculator language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperatorKind {
  Store,
  Equal,
  Plus,
  Minus,
  Times,
  Slash,
  /// Multiplication by adjacency. Never spelled out in the input; the
  /// parser synthesizes it between two juxtaposed operands.
  ImplicitTimes,
  Power,
  Bang,
}

/// An operator has a kind, the strings it is written as, and a
/// fixity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
  kind: OperatorKind,
  display_name: String,
  aliases: Vec<String>,
  spelled: bool,
  fixity: Fixity,
}

impl Operator {
  /// Constructs a new operator with the given properties.
  pub fn new(kind: OperatorKind, display_name: impl Into<String>, fixity: Fixity) -> Self {
    Operator {
      kind,
      display_name: display_name.into(),
      aliases: Vec::new(),
      spelled: true,
      fixity,
    }
  }

  /// An operator the tokenizer never produces. Its display name is
  /// only used when printing.
  pub fn synthetic(kind: OperatorKind, display_name: impl Into<String>, fixity: Fixity) -> Self {
    Operator {
      spelled: false,
      ..Operator::new(kind, display_name, fixity)
    }
  }

  /// An additional spelling accepted on input.
  pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
    self.aliases.push(alias.into());
    self
  }

  pub fn kind(&self) -> OperatorKind {
    self.kind
  }

  /// The name of the operator, as displayed to the user.
  pub fn display_name(&self) -> &str {
    &self.display_name
  }

  /// Every string the tokenizer should recognize as this operator.
  pub fn spellings(&self) -> impl Iterator<Item = &str> {
    let names = if self.spelled {
      Some(std::iter::once(self.display_name.as_str()).chain(self.aliases.iter().map(String::as_str)))
    } else {
      None
    };
    names.into_iter().flatten()
  }

  pub fn fixity(&self) -> &Fixity {
    &self.fixity
  }

  /// Infix properties of the operator. Every operator the
  /// calculator knows besides `!` is infix.
  pub fn infix(&self) -> Option<InfixProperties> {
    self.fixity.as_infix()
  }
}

impl Display for OperatorKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let name = OPERATORS.get(*self).map_or("?", |op| op.display_name());
    write!(f, "{name}")
  }
}
