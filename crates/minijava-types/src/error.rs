use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Name,
    Type,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_TOKEN: Self = Self(100);
    pub const UNRECOGNISED_CHARACTER: Self = Self(101);
    pub const INVALID_INT_LITERAL: Self = Self(102);
    pub const UNTERMINATED_COMMENT: Self = Self(103);
    pub const ILLEGAL_ASSIGN_TARGET: Self = Self(110);
    pub const ILLEGAL_CALL_STATEMENT: Self = Self(111);

    // ── Name resolution errors (E200–E299) ──
    pub const UNKNOWN_VARIABLE: Self = Self(200);
    pub const UNKNOWN_FIELD: Self = Self(201);
    pub const UNKNOWN_METHOD: Self = Self(202);
    pub const UNKNOWN_CLASS: Self = Self(203);
    pub const INHERITANCE_CYCLE: Self = Self(204);
    pub const THIS_OUTSIDE_CLASS: Self = Self(205);

    // ── Type errors (E300–E399) ──
    pub const TYPE_MISMATCH: Self = Self(300);
    pub const TOO_FEW_ARGUMENTS: Self = Self(301);
    pub const TOO_MANY_ARGUMENTS: Self = Self(302);
    pub const INVALID_PRINTLN_CALL: Self = Self(303);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Syntax,
            200..=299 => ErrorCategory::Name,
            _ => ErrorCategory::Type,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Name => write!(f, "name"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// A structured MiniJava front-end error.
///
/// The whole pipeline is fail-fast: the first error aborts the stage that
/// produced it, so one `MjError` is all a caller ever sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MjError {
    /// Error code (e.g., E300).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// Source location.
    #[serde(flatten)]
    pub span: Span,
}

impl MjError {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.into(),
            span,
        }
    }

    /// The 1-based line the error starts on.
    pub fn line(&self) -> u32 {
        self.span.start_line
    }
}

impl fmt::Display for MjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error in line {}: {} [{}]",
            self.span.start_line, self.message, self.code
        )
    }
}

impl std::error::Error for MjError {}
