//! MiniJava pretty-printer: renders an AST back to source text.
//!
//! The output is deterministic and fully parenthesised, so printing the
//! parse of printed output reproduces it byte for byte.

mod printer;

pub use printer::print;
