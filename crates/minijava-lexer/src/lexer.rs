//! Core MiniJava lexer — converts source text to a token stream.
//!
//! Features:
//! - All MiniJava tokens (17 reserved words, operators, punctuation, int literals)
//! - Single-line comments stripped (`//`)
//! - Block comments stripped (`/* */`), unterminated ones rejected with E103
//! - Fail-fast: lexing stops at the first error
//!
//! Integer literals are range-checked here, so the parser never sees an
//! out-of-range `int`.

use minijava_types::{ErrorCode, MjError, Result, Span};

use crate::token::{Token, TokenKind};

/// The MiniJava lexer.
///
/// Converts source text into a vector of [`Token`]s, stopping at the
/// first lexical error.
pub struct Lexer<'src> {
    /// The full source text as bytes.
    source: &'src [u8],
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source into a token stream.
    ///
    /// The stream always ends with [`TokenKind::Eof`] on success.
    pub fn lex(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;
            if self.at_end() {
                tokens.push(Token::new(TokenKind::Eof, self.current_span()));
                return Ok(tokens);
            }
            tokens.push(self.scan_token()?);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> MjError {
        MjError::new(code, message, span)
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip whitespace and both comment forms until the next real token.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.advance();
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    // Consume everything until end-of-line
                    while let Some(ch) = self.peek() {
                        if ch == b'\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    self.skip_block_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Skip a `/* ... */` comment. The opening `/*` has been peeked,
    /// not consumed.
    fn skip_block_comment(&mut self) -> Result<()> {
        let start_line = self.line;
        let start_col = self.col;
        self.advance();
        self.advance();
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(
                        ErrorCode::UNTERMINATED_COMMENT,
                        "unterminated block comment",
                        self.span_from(start_line, start_col),
                    ));
                }
                Some(b'*') if self.peek_at(1) == Some(b'/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Token scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan a single token. Trivia has already been skipped and at
    /// least one byte remains.
    fn scan_token(&mut self) -> Result<Token> {
        let start_line = self.line;
        let start_col = self.col;
        let ch = self.advance().unwrap_or(b'\0');

        let kind = match ch {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'<' => TokenKind::Less,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'!' => TokenKind::Bang,
            b'=' => TokenKind::Eq,
            b'&' => {
                if self.peek() == Some(b'&') {
                    self.advance();
                    TokenKind::AndAnd
                } else {
                    return Err(self.error(
                        ErrorCode::UNRECOGNISED_CHARACTER,
                        "unrecognised character '&' (did you mean '&&'?)",
                        self.span_from(start_line, start_col),
                    ));
                }
            }
            b'0'..=b'9' => return self.scan_int(ch, start_line, start_col),
            ch if ch.is_ascii_alphabetic() || ch == b'_' => {
                return Ok(self.scan_word(ch, start_line, start_col));
            }
            other => {
                return Err(self.error(
                    ErrorCode::UNRECOGNISED_CHARACTER,
                    format!("unrecognised character '{}'", other as char),
                    self.span_from(start_line, start_col),
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(start_line, start_col)))
    }

    /// Scan an integer literal. The first digit has been consumed.
    fn scan_int(&mut self, first: u8, start_line: u32, start_col: u32) -> Result<Token> {
        let mut text = String::from(first as char);
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch as char);
                self.advance();
            } else {
                break;
            }
        }
        let span = self.span_from(start_line, start_col);
        let value: i32 = text.parse().map_err(|_| {
            self.error(
                ErrorCode::INVALID_INT_LITERAL,
                format!("integer literal '{text}' does not fit in an int"),
                span,
            )
        })?;
        Ok(Token::new(TokenKind::IntLit(value), span))
    }

    /// Scan an identifier or keyword. The first character has been consumed.
    fn scan_word(&mut self, first: u8, start_line: u32, start_col: u32) -> Token {
        let mut text = String::from(first as char);
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                text.push(ch as char);
                self.advance();
            } else {
                break;
            }
        }
        let span = self.span_from(start_line, start_col);
        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier(text));
        Token::new(kind, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .lex()
            .expect("lexing should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_err(source: &str) -> MjError {
        Lexer::new(source).lex().expect_err("lexing should fail")
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("class Foo extends Bar"),
            vec![
                TokenKind::Class,
                TokenKind::Identifier("Foo".into()),
                TokenKind::Extends,
                TokenKind::Identifier("Bar".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a && b < c + d - e * !f"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::AndAnd,
                TokenKind::Identifier("b".into()),
                TokenKind::Less,
                TokenKind::Identifier("c".into()),
                TokenKind::Plus,
                TokenKind::Identifier("d".into()),
                TokenKind::Minus,
                TokenKind::Identifier("e".into()),
                TokenKind::Star,
                TokenKind::Bang,
                TokenKind::Identifier("f".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_int_literal() {
        assert_eq!(kinds("42"), vec![TokenKind::IntLit(42), TokenKind::Eof]);
        assert_eq!(
            kinds("2147483647"),
            vec![TokenKind::IntLit(i32::MAX), TokenKind::Eof]
        );
    }

    #[test]
    fn test_int_literal_out_of_range() {
        let err = lex_err("2147483648");
        assert_eq!(err.code, ErrorCode::INVALID_INT_LITERAL);
    }

    #[test]
    fn test_line_comment_stripped() {
        assert_eq!(
            kinds("a // rest of line\nb"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comment_stripped() {
        assert_eq!(
            kinds("a /* multi\nline */ b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex_err("a /* never closed");
        assert_eq!(err.code, ErrorCode::UNTERMINATED_COMMENT);
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn test_single_ampersand_rejected() {
        let err = lex_err("a & b");
        assert_eq!(err.code, ErrorCode::UNRECOGNISED_CHARACTER);
    }

    #[test]
    fn test_unrecognised_character() {
        let err = lex_err("a # b");
        assert_eq!(err.code, ErrorCode::UNRECOGNISED_CHARACTER);
        assert_eq!(err.span.start_col, 3);
    }

    #[test]
    fn test_spans_track_lines() {
        let tokens = Lexer::new("class\n  Foo").lex().unwrap();
        assert_eq!(tokens[0].span, Span::new(1, 1, 1, 5));
        assert_eq!(tokens[1].span, Span::new(2, 3, 2, 5));
    }

    #[test]
    fn test_brackets_not_glued() {
        // `int[]` is three tokens; the parser reassembles the array type
        assert_eq!(
            kinds("int[] x"),
            vec![
                TokenKind::KwInt,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Identifier("x".into()),
                TokenKind::Eof,
            ]
        );
    }
}
