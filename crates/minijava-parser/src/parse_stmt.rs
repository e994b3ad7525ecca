//! Parsing of statements.
//!
//! Grammar (statements):
//! ```text
//! Stmt := "{" Stmt* "}"
//!       | "if" "(" Expr ")" Stmt "else" Stmt
//!       | "while" "(" Expr ")" Stmt
//!       | Expr "=" Expr ";"
//!       | Expr ";"
//! ```
//!
//! Assignment targets and call statements are parsed as general
//! expressions; the shapes the grammar over-accepts are rejected by the
//! post-parse check in [`crate::postcheck`].

use minijava_lexer::token::TokenKind;
use minijava_types::ast::{Stmt, StmtKind};
use minijava_types::Result;

use crate::parser::Parser;

impl Parser {
    /// Parse a single statement.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt> {
        let start = self.current_span();
        let id = self.fresh_id();

        let kind = match self.peek_kind() {
            TokenKind::LBrace => {
                self.advance();
                let mut stmts = Vec::new();
                while !self.check(&TokenKind::RBrace) {
                    stmts.push(self.parse_stmt()?);
                }
                self.expect(&TokenKind::RBrace)?;
                StmtKind::Block(stmts)
            }
            TokenKind::If => {
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                let then_branch = Box::new(self.parse_stmt()?);
                // MiniJava has no dangling else: the branch is mandatory
                self.expect(&TokenKind::Else)?;
                let else_branch = Box::new(self.parse_stmt()?);
                StmtKind::If {
                    cond,
                    then_branch,
                    else_branch,
                }
            }
            TokenKind::While => {
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let cond = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                let body = Box::new(self.parse_stmt()?);
                StmtKind::While { cond, body }
            }
            _ => {
                let expr = self.parse_expr()?;
                if self.eat(&TokenKind::Eq) {
                    let rhs = self.parse_expr()?;
                    self.expect(&TokenKind::Semicolon)?;
                    StmtKind::Assign { lhs: expr, rhs }
                } else {
                    self.expect(&TokenKind::Semicolon)?;
                    StmtKind::Call(expr)
                }
            }
        };

        Ok(Stmt {
            id,
            kind,
            span: self.span_from(start),
        })
    }
}
