
pub mod error;
pub mod expr;
pub mod parsing;
pub mod pool;
pub mod settings;
pub mod util;

pub use error::{ParseError, ParseStatus};
pub use expr::Expr;
pub use expr::parens::add_missing_parentheses;
pub use expr::parser::{parse, parse_with, ExprParser};
pub use pool::{NodeAllocator, NodePool};
pub use settings::ParserSettings;
