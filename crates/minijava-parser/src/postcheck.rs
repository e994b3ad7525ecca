//! Post-parse structural checks.
//!
//! The expression grammar over-accepts in two statement positions:
//! any expression can appear on the left of `=` and any expression can
//! stand alone as a call statement. This pass walks every statement and
//! rejects the shapes the language does not actually allow, before the
//! AST reaches analysis.

use minijava_types::ast::{ClassDecl, ExprKind, MainClass, Program, Stmt, StmtKind};
use minijava_types::{ErrorCode, MjError, Span};
use thiserror::Error;

/// Structural errors raised after a successful parse.
#[derive(Debug, Error, PartialEq)]
pub enum StructureError {
    /// The left-hand side of `=` is not a variable, field, or array element.
    #[error("illegal expression on the left-hand side of an assignment")]
    IllegalAssignTarget { span: Span },

    /// A call statement is neither a method call nor an object allocation.
    #[error("not a valid statement: has to be a method call or an object allocation")]
    IllegalCallStatement { span: Span },
}

impl StructureError {
    /// Source location of the offending expression.
    pub fn span(&self) -> Span {
        match self {
            Self::IllegalAssignTarget { span } | Self::IllegalCallStatement { span } => *span,
        }
    }
}

impl From<StructureError> for MjError {
    fn from(err: StructureError) -> Self {
        let code = match &err {
            StructureError::IllegalAssignTarget { .. } => ErrorCode::ILLEGAL_ASSIGN_TARGET,
            StructureError::IllegalCallStatement { .. } => ErrorCode::ILLEGAL_CALL_STATEMENT,
        };
        MjError::new(code, err.to_string(), err.span())
    }
}

/// Check every statement in the program for legal assignment targets and
/// call-statement shapes.
pub fn check(program: &Program) -> Result<(), StructureError> {
    check_main(&program.main)?;
    for class in &program.classes {
        check_class(class)?;
    }
    Ok(())
}

fn check_main(main: &MainClass) -> Result<(), StructureError> {
    for stmt in &main.stmts {
        check_stmt(stmt)?;
    }
    Ok(())
}

fn check_class(class: &ClassDecl) -> Result<(), StructureError> {
    for method in &class.methods {
        for stmt in &method.stmts {
            check_stmt(stmt)?;
        }
    }
    Ok(())
}

fn check_stmt(stmt: &Stmt) -> Result<(), StructureError> {
    match &stmt.kind {
        StmtKind::Block(stmts) => {
            for s in stmts {
                check_stmt(s)?;
            }
            Ok(())
        }
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            check_stmt(then_branch)?;
            check_stmt(else_branch)
        }
        StmtKind::While { body, .. } => check_stmt(body),
        StmtKind::Assign { lhs, .. } => match &lhs.kind {
            ExprKind::Identifier(_) | ExprKind::FieldAccess { .. } | ExprKind::ArrayLookup { .. } => {
                Ok(())
            }
            _ => Err(StructureError::IllegalAssignTarget { span: lhs.span }),
        },
        StmtKind::Call(expr) => match &expr.kind {
            ExprKind::MethodCall { .. } | ExprKind::NewObject { .. } => Ok(()),
            _ => Err(StructureError::IllegalCallStatement { span: expr.span }),
        },
    }
}
