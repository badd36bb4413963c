
use serde::Serialize;

/// The associativity of an infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Associativity {
  left_assoc: bool,
  right_assoc: bool,
}

impl Associativity {
  /// `a # b # c` groups as `(a # b) # c`.
  pub const LEFT: Associativity = Associativity {
    left_assoc: true,
    right_assoc: false,
  };
  /// `a # b # c` groups as `a # (b # c)`.
  pub const RIGHT: Associativity = Associativity {
    left_assoc: false,
    right_assoc: true,
  };
  /// A non-associative operator. A second application is never
  /// absorbed into either operand.
  pub const NONE: Associativity = Associativity {
    left_assoc: false,
    right_assoc: false,
  };

  pub const fn is_left_assoc(self) -> bool {
    self.left_assoc
  }

  pub const fn is_right_assoc(self) -> bool {
    self.right_assoc
  }
}
