//! Token types for the MiniJava lexer.
//!
//! Defines [`TokenKind`] covering every lexeme in MiniJava and
//! [`Token`], which pairs a kind with a source [`Span`].

use minijava_types::Span;
use std::fmt;

/// All 17 reserved words in MiniJava.
///
/// These cannot be used as user-defined names. The lexer recognises each
/// one and emits a specific keyword token instead of [`TokenKind::Identifier`].
pub const ALL_KEYWORDS: &[&str] = &[
    "class", "public", "static", "void", "main", "String", "extends", "return",
    "int", "boolean", "if", "else", "while", "new", "this", "true", "false",
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the MiniJava lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` if this token is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the MiniJava language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────

    /// Integer literal: `42`
    IntLit(i32),

    // ── Identifiers ──────────────────────────────────────────

    /// User-defined identifier: `Factorial`, `num_aux`
    Identifier(String),

    // ── Keywords ─────────────────────────────────────────────

    /// `class`
    Class,
    /// `public`
    Public,
    /// `static`
    Static,
    /// `void`
    Void,
    /// `main`
    Main,
    /// `String` (only valid in the main method signature)
    KwString,
    /// `extends`
    Extends,
    /// `return`
    Return,
    /// `int`
    KwInt,
    /// `boolean`
    KwBoolean,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `new`
    New,
    /// `this`
    This,
    /// `true`
    True,
    /// `false`
    False,

    // ── Operators ────────────────────────────────────────────

    /// `&&`
    AndAnd,
    /// `<`
    Less,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `!`
    Bang,
    /// `=`
    Eq,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,

    // ── Special ──────────────────────────────────────────────

    /// End of file
    Eof,
}

impl TokenKind {
    /// Look up a reserved identifier. Returns `Some(kind)` for all 17
    /// reserved words, `None` for user identifiers.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "class" => TokenKind::Class,
            "public" => TokenKind::Public,
            "static" => TokenKind::Static,
            "void" => TokenKind::Void,
            "main" => TokenKind::Main,
            "String" => TokenKind::KwString,
            "extends" => TokenKind::Extends,
            "return" => TokenKind::Return,
            "int" => TokenKind::KwInt,
            "boolean" => TokenKind::KwBoolean,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "new" => TokenKind::New,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        })
    }

    /// Returns `true` if this token kind is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Public
                | TokenKind::Static
                | TokenKind::Void
                | TokenKind::Main
                | TokenKind::KwString
                | TokenKind::Extends
                | TokenKind::Return
                | TokenKind::KwInt
                | TokenKind::KwBoolean
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::New
                | TokenKind::This
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literals & identifiers
            TokenKind::IntLit(n) => write!(f, "{n}"),
            TokenKind::Identifier(s) => f.write_str(s),
            // Keywords — display the source text
            TokenKind::Class => f.write_str("class"),
            TokenKind::Public => f.write_str("public"),
            TokenKind::Static => f.write_str("static"),
            TokenKind::Void => f.write_str("void"),
            TokenKind::Main => f.write_str("main"),
            TokenKind::KwString => f.write_str("String"),
            TokenKind::Extends => f.write_str("extends"),
            TokenKind::Return => f.write_str("return"),
            TokenKind::KwInt => f.write_str("int"),
            TokenKind::KwBoolean => f.write_str("boolean"),
            TokenKind::If => f.write_str("if"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::While => f.write_str("while"),
            TokenKind::New => f.write_str("new"),
            TokenKind::This => f.write_str("this"),
            TokenKind::True => f.write_str("true"),
            TokenKind::False => f.write_str("false"),
            // Operators
            TokenKind::AndAnd => f.write_str("&&"),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Bang => f.write_str("!"),
            TokenKind::Eq => f.write_str("="),
            // Punctuation
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Dot => f.write_str("."),
            // Special
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
