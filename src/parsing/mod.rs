
//! Language-independent pieces of the parser: source positions, the
//! character cursor, and the operator table.

pub mod operator;
pub mod source;
pub mod tokenizer;
