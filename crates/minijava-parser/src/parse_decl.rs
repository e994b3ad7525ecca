//! Parsing of programs, classes, methods, and variable declarations.
//!
//! Grammar (declarations):
//! ```text
//! Program    := MainClass ClassDecl* EOF
//! MainClass  := "class" id "{" "public" "static" "void" "main"
//!               "(" "String" "[" "]" id ")" "{" VarDecl* Stmt* "}" "}"
//! ClassDecl  := "class" id ("extends" id)? "{" VarDecl* MethodDecl* "}"
//! MethodDecl := "public" Type id "(" ParamList? ")"
//!               "{" VarDecl* Stmt* "return" Expr ";" "}"
//! VarDecl    := Type id ";"
//! ```
//!
//! Variable declarations must precede statements in every body. The two
//! are told apart by a two-token lookahead: `int`/`boolean` always starts
//! a declaration, and `id id` is a class-typed declaration while anything
//! else starting with an identifier is a statement.

use minijava_lexer::token::TokenKind;
use minijava_types::ast::{ClassDecl, MainClass, MethodDecl, Program, Stmt, VarDecl};
use minijava_types::Result;

use crate::parser::Parser;

impl Parser {
    /// Parse a complete program: main class first, then other classes.
    pub(crate) fn parse_program(&mut self) -> Result<Program> {
        let start = self.current_span();
        let main = self.parse_main_class()?;
        let mut classes = Vec::new();
        while !self.at_end() {
            classes.push(self.parse_class_decl()?);
        }
        let span = self.span_from(start);
        Ok(Program {
            main,
            classes,
            span,
        })
    }

    /// Parse the main class with its fixed entry-point signature.
    fn parse_main_class(&mut self) -> Result<MainClass> {
        let start = self.current_span();
        let id = self.fresh_id();

        self.expect(&TokenKind::Class)?;
        let name = self.expect_identifier("a class name")?;
        self.expect(&TokenKind::LBrace)?;

        self.expect(&TokenKind::Public)?;
        self.expect(&TokenKind::Static)?;
        self.expect(&TokenKind::Void)?;
        self.expect(&TokenKind::Main)?;
        self.expect(&TokenKind::LParen)?;
        self.expect(&TokenKind::KwString)?;
        self.expect(&TokenKind::LBracket)?;
        self.expect(&TokenKind::RBracket)?;
        let args_name = self.expect_identifier("a parameter name")?;
        self.expect(&TokenKind::RParen)?;

        self.expect(&TokenKind::LBrace)?;
        let locals = self.parse_var_decls()?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::RBrace)?;
        self.expect(&TokenKind::RBrace)?;

        Ok(MainClass {
            id,
            name,
            args_name,
            locals,
            stmts,
            span: self.span_from(start),
        })
    }

    /// Parse a class declaration: fields first, then methods.
    fn parse_class_decl(&mut self) -> Result<ClassDecl> {
        let start = self.current_span();
        let id = self.fresh_id();

        self.expect(&TokenKind::Class)?;
        let name = self.expect_identifier("a class name")?;
        let superclass = if self.eat(&TokenKind::Extends) {
            Some(self.expect_identifier("a superclass name")?)
        } else {
            None
        };
        self.expect(&TokenKind::LBrace)?;

        let fields = self.parse_var_decls()?;
        let mut methods = Vec::new();
        while self.check(&TokenKind::Public) {
            methods.push(self.parse_method_decl()?);
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(ClassDecl {
            id,
            name,
            superclass,
            fields,
            methods,
            span: self.span_from(start),
        })
    }

    /// Parse a method declaration including the mandatory trailing return.
    fn parse_method_decl(&mut self) -> Result<MethodDecl> {
        let start = self.current_span();
        let id = self.fresh_id();

        self.expect(&TokenKind::Public)?;
        let ret_type = self.parse_type()?;
        let name = self.expect_identifier("a method name")?;

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        self.expect(&TokenKind::LBrace)?;
        let locals = self.parse_var_decls()?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::Return) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::Return)?;
        let ret_exp = self.parse_expr()?;
        self.expect(&TokenKind::Semicolon)?;
        self.expect(&TokenKind::RBrace)?;

        Ok(MethodDecl {
            id,
            ret_type,
            name,
            params,
            locals,
            stmts,
            ret_exp,
            span: self.span_from(start),
        })
    }

    /// Parse a single parameter: `Type id` (no trailing semicolon).
    fn parse_param(&mut self) -> Result<VarDecl> {
        let start = self.current_span();
        let id = self.fresh_id();
        let ty = self.parse_type()?;
        let name = self.expect_identifier("a parameter name")?;
        Ok(VarDecl {
            id,
            ty,
            name,
            span: self.span_from(start),
        })
    }

    /// Parse the run of variable declarations at the start of a body.
    fn parse_var_decls(&mut self) -> Result<Vec<VarDecl>> {
        let mut decls = Vec::new();
        while self.at_var_decl() {
            decls.push(self.parse_var_decl()?);
        }
        Ok(decls)
    }

    /// Parse `Type id ;`.
    fn parse_var_decl(&mut self) -> Result<VarDecl> {
        let start = self.current_span();
        let id = self.fresh_id();
        let ty = self.parse_type()?;
        let name = self.expect_identifier("a variable name")?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(VarDecl {
            id,
            ty,
            name,
            span: self.span_from(start),
        })
    }

    /// Two-token lookahead: does a variable declaration start here?
    fn at_var_decl(&self) -> bool {
        match self.peek_kind() {
            TokenKind::KwInt | TokenKind::KwBoolean => true,
            TokenKind::Identifier(_) => matches!(self.look_ahead(1), TokenKind::Identifier(_)),
            _ => false,
        }
    }
}
