//! The Type Checker — pass two of semantic analysis.
//!
//! A post-order walk over every method body and the main method. Children
//! are validated before their parent's own rule runs, so the innermost
//! error always surfaces first. Type inference ([`TypeChecker::type_of`])
//! is a pure function of the expression and the index: nothing is
//! memoised, and inference itself can raise name errors, because that is
//! the moment an unresolved use is finally asked about.

use minijava_types::ast::{
    BinaryOp, Expr, ExprKind, MethodDecl, Program, Stmt, StmtKind, TypeAnn, TypeKind,
};
use minijava_types::{ErrorCode, MjError, Result};

use crate::resolver::NameResolver;
use crate::symbols::DeclarationIndex;
use crate::ty::Type;

/// Validates a program against a built [`DeclarationIndex`].
pub struct TypeChecker<'a> {
    program: &'a Program,
    index: &'a DeclarationIndex,
    resolver: NameResolver<'a>,
}

impl<'a> TypeChecker<'a> {
    /// Create a checker for a program and its index.
    pub fn new(program: &'a Program, index: &'a DeclarationIndex) -> Self {
        Self {
            program,
            index,
            resolver: NameResolver::new(index),
        }
    }

    /// Check the whole program, stopping at the first error.
    pub fn check(&self) -> Result<()> {
        for stmt in &self.program.main.stmts {
            self.check_stmt(stmt)?;
        }
        for class in &self.program.classes {
            for method in &class.methods {
                self.check_method(method)?;
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────

    fn check_method(&self, method: &MethodDecl) -> Result<()> {
        for stmt in &method.stmts {
            self.check_stmt(stmt)?;
        }
        self.check_expr(&method.ret_exp)?;
        let declared = self.semantic_type(&method.ret_type)?;
        self.expect(&method.ret_exp, "the return expression", declared)
    }

    fn check_stmt(&self, stmt: &Stmt) -> Result<()> {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.check_stmt(s)?;
                }
                Ok(())
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.check_expr(cond)?;
                self.check_stmt(then_branch)?;
                self.check_stmt(else_branch)?;
                self.expect(cond, "the condition", Type::Bool)
            }
            StmtKind::While { cond, body } => {
                self.check_expr(cond)?;
                self.check_stmt(body)?;
                self.expect(cond, "the condition", Type::Bool)
            }
            StmtKind::Assign { lhs, rhs } => {
                self.check_expr(lhs)?;
                self.check_expr(rhs)?;
                let target = self.type_of(lhs)?;
                self.expect(rhs, "the right-hand side of the assignment", target)
            }
            StmtKind::Call(expr) => {
                // `System.out.println` is recognised by shape, not by name
                // resolution, so it must be intercepted before the generic
                // method-call rule asks the resolver about `println`.
                if let Some(args) = println_args(expr) {
                    return self.check_println(expr, args);
                }
                self.check_expr(expr)
            }
        }
    }

    /// `System.out.println` takes exactly one `int` argument.
    fn check_println(&self, call: &Expr, args: &[Expr]) -> Result<()> {
        for arg in args {
            self.check_expr(arg)?;
        }
        let one_int_arg = match args {
            [arg] => self.type_of(arg)?.is_subtype_of(&Type::Int, self.index),
            _ => false,
        };
        if one_int_arg {
            Ok(())
        } else {
            Err(MjError::new(
                ErrorCode::INVALID_PRINTLN_CALL,
                "invalid argument for System.out.println",
                call.span,
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Expressions — validation
    // ─────────────────────────────────────────────────────────────

    /// Validate an expression subtree post-order.
    fn check_expr(&self, expr: &Expr) -> Result<()> {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => {
                self.check_expr(left)?;
                self.check_expr(right)?;
                let operand = match op {
                    BinaryOp::And => Type::Bool,
                    BinaryOp::Less | BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => Type::Int,
                };
                self.expect(left, "the left argument", operand)?;
                self.expect(right, "the right argument", operand)
            }
            ExprKind::Not(operand) => {
                self.check_expr(operand)?;
                self.expect(operand, "the argument", Type::Bool)
            }
            ExprKind::Neg(operand) => {
                self.check_expr(operand)?;
                self.expect(operand, "the argument", Type::Int)
            }
            ExprKind::NewArray { size } => {
                self.check_expr(size)?;
                self.expect(size, "the array size", Type::Int)
            }
            ExprKind::ArrayLookup { array, index } => {
                self.check_expr(array)?;
                self.check_expr(index)?;
                self.expect(array, "the array", Type::IntArray)?;
                self.expect(index, "the index", Type::Int)
            }
            ExprKind::FieldAccess { object, field } => {
                self.check_expr(object)?;
                // `length` forces the receiver to be typeable right away;
                // a generic field access is only judged when its type is
                // queried by an enclosing rule.
                if field.name == "length" {
                    self.type_of(object)?;
                }
                Ok(())
            }
            ExprKind::MethodCall {
                object,
                method,
                args,
            } => {
                self.check_expr(object)?;
                for arg in args {
                    self.check_expr(arg)?;
                }
                let decl = self.resolver.method_call(expr.id, method)?;
                if args.len() < decl.params.len() {
                    return Err(MjError::new(
                        ErrorCode::TOO_FEW_ARGUMENTS,
                        format!(
                            "too few arguments applied: only {} out of {}",
                            args.len(),
                            decl.params.len()
                        ),
                        expr.span,
                    ));
                }
                if args.len() > decl.params.len() {
                    return Err(MjError::new(
                        ErrorCode::TOO_MANY_ARGUMENTS,
                        format!(
                            "too many arguments applied: {} instead of {}",
                            args.len(),
                            decl.params.len()
                        ),
                        expr.span,
                    ));
                }
                for (i, (arg, &param)) in args.iter().zip(decl.params.iter()).enumerate() {
                    let formal = self.semantic_type(&self.index.var(param).ty)?;
                    self.expect(arg, &format!("argument number {}", i + 1), formal)?;
                }
                Ok(())
            }
            ExprKind::IntLit(_)
            | ExprKind::True
            | ExprKind::False
            | ExprKind::This
            | ExprKind::Identifier(_)
            | ExprKind::NewObject { .. } => Ok(()),
        }
    }

    /// Check that `arg` infers to a subtype of `expected`, or report a
    /// mismatch naming `what` at the argument's span.
    fn expect(&self, arg: &Expr, what: &str, expected: Type) -> Result<()> {
        let actual = self.type_of(arg)?;
        if actual.is_subtype_of(&expected, self.index) {
            Ok(())
        } else {
            Err(MjError::new(
                ErrorCode::TYPE_MISMATCH,
                format!(
                    "{what} should have type {} but has type {}",
                    expected.describe(self.index),
                    actual.describe(self.index)
                ),
                arg.span,
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Expressions — inference
    // ─────────────────────────────────────────────────────────────

    /// Infer the type of an expression.
    ///
    /// Never memoised — shared subexpressions are re-derived on every
    /// query. Raises name errors for unresolved uses and the structured
    /// `this`-outside-class error.
    pub fn type_of(&self, expr: &Expr) -> Result<Type> {
        match &expr.kind {
            ExprKind::Binary { op, .. } => Ok(match op {
                BinaryOp::And | BinaryOp::Less => Type::Bool,
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => Type::Int,
            }),
            ExprKind::Not(_) => Ok(Type::Bool),
            ExprKind::Neg(_) | ExprKind::IntLit(_) => Ok(Type::Int),
            ExprKind::True | ExprKind::False => Ok(Type::Bool),
            ExprKind::This => self
                .resolver
                .nearest_enclosing_class(expr.id)
                .map(Type::Class)
                .ok_or_else(|| {
                    MjError::new(
                        ErrorCode::THIS_OUTSIDE_CLASS,
                        "'this' cannot be used in the main method",
                        expr.span,
                    )
                }),
            ExprKind::Identifier(ident) => {
                let var = self.resolver.variable_use(expr.id, ident)?;
                self.semantic_type(&var.ty)
            }
            ExprKind::NewArray { .. } => Ok(Type::IntArray),
            ExprKind::NewObject { class } => {
                Ok(Type::Class(self.resolver.class_reference(class)?))
            }
            ExprKind::ArrayLookup { .. } => Ok(Type::Int),
            ExprKind::FieldAccess { object, field } => {
                // `x.length` is int when the receiver is an array; only
                // otherwise is `length` looked up as an ordinary field.
                if field.name == "length" {
                    let receiver = self.type_of(object)?;
                    if receiver.is_subtype_of(&Type::IntArray, self.index) {
                        return Ok(Type::Int);
                    }
                }
                let var = self.resolver.field_access(expr.id, field)?;
                self.semantic_type(&var.ty)
            }
            ExprKind::MethodCall { method, .. } => {
                let decl = self.resolver.method_call(expr.id, method)?;
                self.semantic_type(&decl.ret_type)
            }
        }
    }

    /// Turn a syntactic annotation into a semantic type, rejecting
    /// unknown class names.
    fn semantic_type(&self, ann: &TypeAnn) -> Result<Type> {
        match &ann.kind {
            TypeKind::Int => Ok(Type::Int),
            TypeKind::Bool => Ok(Type::Bool),
            TypeKind::IntArray => Ok(Type::IntArray),
            TypeKind::Class(name) => {
                self.index.class_by_name(name).map(Type::Class).ok_or_else(|| {
                    MjError::new(
                        ErrorCode::UNKNOWN_CLASS,
                        format!("no suitable class declaration for '{name}' found"),
                        ann.span,
                    )
                })
            }
        }
    }
}

/// If `expr` is exactly `System.out.println(args)`, return the arguments.
///
/// The match is structural: an identifier `System`, a field access `out`,
/// and a call to `println`. None of the three names resolves to anything,
/// and none is ever asked to.
fn println_args(expr: &Expr) -> Option<&[Expr]> {
    let ExprKind::MethodCall {
        object,
        method,
        args,
    } = &expr.kind
    else {
        return None;
    };
    if method.name != "println" {
        return None;
    }
    let ExprKind::FieldAccess {
        object: receiver,
        field,
    } = &object.kind
    else {
        return None;
    };
    if field.name != "out" {
        return None;
    }
    let ExprKind::Identifier(ident) = &receiver.kind else {
        return None;
    };
    (ident.name == "System").then_some(args.as_slice())
}
