//! Parsing of type annotations.

use minijava_lexer::token::TokenKind;
use minijava_types::ast::{TypeAnn, TypeKind};
use minijava_types::Result;

use crate::parser::Parser;

impl Parser {
    /// Parse a type annotation: `int`, `int[]`, `boolean`, or a class name.
    pub(crate) fn parse_type(&mut self) -> Result<TypeAnn> {
        let start = self.current_span();
        let kind = match self.peek_kind().clone() {
            TokenKind::KwInt => {
                self.advance();
                if self.eat(&TokenKind::LBracket) {
                    self.expect(&TokenKind::RBracket)?;
                    TypeKind::IntArray
                } else {
                    TypeKind::Int
                }
            }
            TokenKind::KwBoolean => {
                self.advance();
                TypeKind::Bool
            }
            TokenKind::Identifier(name) => {
                self.advance();
                TypeKind::Class(name)
            }
            _ => return Err(self.unexpected("a type")),
        };
        Ok(TypeAnn {
            kind,
            span: self.span_from(start),
        })
    }
}
