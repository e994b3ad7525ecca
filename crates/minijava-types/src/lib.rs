//! Shared types for the MiniJava front-end.
//!
//! This crate defines the AST node types, source spans, and the error type
//! used across all pipeline stages.

mod error;
mod span;
pub mod ast;

pub use error::{ErrorCategory, ErrorCode, MjError};
pub use span::Span;

/// Result type used throughout the MiniJava front-end.
pub type Result<T> = std::result::Result<T, MjError>;
