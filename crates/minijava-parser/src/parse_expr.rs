//! Parsing of expressions by precedence climbing.
//!
//! Precedence, loosest to tightest:
//! ```text
//! &&   <   + -   *   unary ! -   postfix [ ] . ( )   primary
//! ```
//! All binary operators are left-associative. Parentheses group but leave
//! no node behind, so `(a)` parses to the same tree as `a`.

use minijava_lexer::token::TokenKind;
use minijava_types::ast::{BinaryOp, Expr, ExprKind};
use minijava_types::Result;

use crate::parser::Parser;

impl Parser {
    /// Parse an expression at the loosest precedence level.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_and()
    }

    /// `a && b && c`
    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_comparison()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.parse_comparison()?;
            left = self.binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    /// `a < b`
    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        while self.eat(&TokenKind::Less) {
            let right = self.parse_additive()?;
            left = self.binary(BinaryOp::Less, left, right);
        }
        Ok(left)
    }

    /// `a + b - c`
    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = if self.eat(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.eat(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_term()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    /// `a * b`
    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        while self.eat(&TokenKind::Star) {
            let right = self.parse_unary()?;
            left = self.binary(BinaryOp::Mul, left, right);
        }
        Ok(left)
    }

    /// `!e` and `-e`; unary operators nest (`!!b`, `--x`).
    fn parse_unary(&mut self) -> Result<Expr> {
        let start = self.current_span();
        if self.eat(&TokenKind::Bang) {
            let operand = self.parse_unary()?;
            let id = self.fresh_id();
            return Ok(Expr {
                id,
                span: start.merge(operand.span),
                kind: ExprKind::Not(Box::new(operand)),
            });
        }
        if self.eat(&TokenKind::Minus) {
            let operand = self.parse_unary()?;
            let id = self.fresh_id();
            return Ok(Expr {
                id,
                span: start.merge(operand.span),
                kind: ExprKind::Neg(Box::new(operand)),
            });
        }
        self.parse_postfix()
    }

    /// Postfix chains: `a[i]`, `a.length`, `a.f`, `a.m(args)`.
    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                self.expect(&TokenKind::RBracket)?;
                let id = self.fresh_id();
                expr = Expr {
                    id,
                    span: self.span_from(expr.span),
                    kind: ExprKind::ArrayLookup {
                        array: Box::new(expr),
                        index: Box::new(index),
                    },
                };
            } else if self.eat(&TokenKind::Dot) {
                let member = self.expect_identifier("a field or method name")?;
                if self.eat(&TokenKind::LParen) {
                    let mut args = Vec::new();
                    if !self.check(&TokenKind::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if !self.eat(&TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(&TokenKind::RParen)?;
                    let id = self.fresh_id();
                    expr = Expr {
                        id,
                        span: self.span_from(expr.span),
                        kind: ExprKind::MethodCall {
                            object: Box::new(expr),
                            method: member,
                            args,
                        },
                    };
                } else {
                    let id = self.fresh_id();
                    expr = Expr {
                        id,
                        span: self.span_from(expr.span),
                        kind: ExprKind::FieldAccess {
                            object: Box::new(expr),
                            field: member,
                        },
                    };
                }
            } else {
                return Ok(expr);
            }
        }
    }

    /// Literals, `this`, variables, allocations, and parenthesised groups.
    fn parse_primary(&mut self) -> Result<Expr> {
        let start = self.current_span();
        let kind = match self.peek_kind().clone() {
            TokenKind::IntLit(value) => {
                self.advance();
                ExprKind::IntLit(value)
            }
            TokenKind::True => {
                self.advance();
                ExprKind::True
            }
            TokenKind::False => {
                self.advance();
                ExprKind::False
            }
            TokenKind::This => {
                self.advance();
                ExprKind::This
            }
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                ExprKind::Identifier(minijava_types::ast::Ident::new(name, span))
            }
            TokenKind::New => {
                self.advance();
                if self.eat(&TokenKind::KwInt) {
                    self.expect(&TokenKind::LBracket)?;
                    let size = self.parse_expr()?;
                    self.expect(&TokenKind::RBracket)?;
                    ExprKind::NewArray {
                        size: Box::new(size),
                    }
                } else {
                    let class = self.expect_identifier("a class name")?;
                    self.expect(&TokenKind::LParen)?;
                    self.expect(&TokenKind::RParen)?;
                    ExprKind::NewObject { class }
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("an expression")),
        };

        let id = self.fresh_id();
        Ok(Expr {
            id,
            kind,
            span: self.span_from(start),
        })
    }

    /// Build a left-associative binary node.
    fn binary(&mut self, op: BinaryOp, left: Expr, right: Expr) -> Expr {
        let id = self.fresh_id();
        Expr {
            id,
            span: left.span.merge(right.span),
            kind: ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }
}
