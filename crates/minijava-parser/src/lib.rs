//! MiniJava parser: converts a token stream into an AST.
//!
//! Recursive descent, fail-fast. The grammar lives across the `parse_*`
//! modules; [`postcheck`] rejects statement shapes the expression grammar
//! over-accepts.

mod parse_decl;
mod parse_expr;
mod parse_stmt;
mod parse_type;
mod parser;
pub mod postcheck;

pub use parser::Parser;
pub use postcheck::StructureError;
