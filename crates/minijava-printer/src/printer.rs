//! AST rendering.
//!
//! Layout rules:
//! - tab indentation, one statement per line
//! - every binary expression is parenthesised, so no precedence is lost
//! - unary minus prints as `- ` to keep `--x` re-lexable
//! - a blank line separates declarations from statements inside a body,
//!   and consecutive members inside a class

use minijava_types::ast::{
    ClassDecl, Expr, ExprKind, MainClass, MethodDecl, Program, Stmt, StmtKind, TypeAnn, TypeKind,
    VarDecl,
};

/// Render a program as MiniJava source text.
pub fn print(program: &Program) -> String {
    let mut p = Printer {
        out: String::new(),
        indent: 0,
    };
    p.program(program);
    p.out
}

struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    // ─────────────────────────────────────────────────────────────
    // Layout helpers
    // ─────────────────────────────────────────────────────────────

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Start a new line at the current indent level.
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    /// Insert an empty separator line.
    fn blank(&mut self) {
        self.out.push('\n');
    }

    // ─────────────────────────────────────────────────────────────
    // Declarations
    // ─────────────────────────────────────────────────────────────

    fn program(&mut self, program: &Program) {
        self.main_class(&program.main);
        for class in &program.classes {
            self.blank();
            self.class_decl(class);
        }
    }

    fn main_class(&mut self, main: &MainClass) {
        self.write(&format!("class {} {{", main.name.name));
        self.indent += 1;
        self.newline();
        self.write(&format!(
            "public static void main(String[] {}) {{",
            main.args_name.name
        ));
        self.indent += 1;
        self.body(&main.locals, &main.stmts);
        self.indent -= 1;
        self.newline();
        self.write("}");
        self.indent -= 1;
        self.newline();
        self.write("}");
        self.out.push('\n');
    }

    fn class_decl(&mut self, class: &ClassDecl) {
        match &class.superclass {
            Some(superclass) => self.write(&format!(
                "class {} extends {} {{",
                class.name.name, superclass.name
            )),
            None => self.write(&format!("class {} {{", class.name.name)),
        }
        self.indent += 1;
        for field in &class.fields {
            self.newline();
            self.var_decl(field);
        }
        for (i, method) in class.methods.iter().enumerate() {
            if i > 0 || !class.fields.is_empty() {
                self.blank();
            }
            self.newline();
            self.method_decl(method);
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
        self.out.push('\n');
    }

    fn method_decl(&mut self, method: &MethodDecl) {
        self.write(&format!(
            "public {} {}(",
            type_text(&method.ret_type),
            method.name.name
        ));
        for (i, param) in method.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&format!("{} {}", type_text(&param.ty), param.name.name));
        }
        self.write(") {");
        self.indent += 1;
        self.body(&method.locals, &method.stmts);
        self.newline();
        self.write("return ");
        self.expr(&method.ret_exp);
        self.write(";");
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    /// The shared body layout: declarations, separator, statements.
    fn body(&mut self, locals: &[VarDecl], stmts: &[Stmt]) {
        for local in locals {
            self.newline();
            self.var_decl(local);
        }
        if !locals.is_empty() && !stmts.is_empty() {
            self.blank();
        }
        for stmt in stmts {
            self.newline();
            self.stmt(stmt);
        }
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        self.write(&format!("{} {};", type_text(&decl.ty), decl.name.name));
    }

    // ─────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────

    fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                self.write("{");
                self.indent += 1;
                for s in stmts {
                    self.newline();
                    self.stmt(s);
                }
                self.indent -= 1;
                self.newline();
                self.write("}");
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.write("if (");
                self.expr(cond);
                self.write(") ");
                self.stmt(then_branch);
                self.write(" else ");
                self.stmt(else_branch);
            }
            StmtKind::While { cond, body } => {
                self.write("while (");
                self.expr(cond);
                self.write(") ");
                self.stmt(body);
            }
            StmtKind::Assign { lhs, rhs } => {
                self.expr(lhs);
                self.write(" = ");
                self.expr(rhs);
                self.write(";");
            }
            StmtKind::Call(expr) => {
                self.expr(expr);
                self.write(";");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Binary { op, left, right } => {
                self.write("(");
                self.expr(left);
                self.write(&format!(" {} ", op.symbol()));
                self.expr(right);
                self.write(")");
            }
            ExprKind::Not(operand) => {
                self.write("!");
                self.expr(operand);
            }
            ExprKind::Neg(operand) => {
                self.write("- ");
                self.expr(operand);
            }
            ExprKind::IntLit(value) => self.write(&value.to_string()),
            ExprKind::True => self.write("true"),
            ExprKind::False => self.write("false"),
            ExprKind::This => self.write("this"),
            ExprKind::Identifier(ident) => self.write(&ident.name),
            ExprKind::NewArray { size } => {
                self.write("new int[");
                self.expr(size);
                self.write("]");
            }
            ExprKind::NewObject { class } => {
                self.write(&format!("new {}()", class.name));
            }
            ExprKind::ArrayLookup { array, index } => {
                self.expr(array);
                self.write("[");
                self.expr(index);
                self.write("]");
            }
            ExprKind::FieldAccess { object, field } => {
                self.expr(object);
                self.write(&format!(".{}", field.name));
            }
            ExprKind::MethodCall {
                object,
                method,
                args,
            } => {
                self.expr(object);
                self.write(&format!(".{}(", method.name));
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.expr(arg);
                }
                self.write(")");
            }
        }
    }
}

fn type_text(ty: &TypeAnn) -> String {
    match &ty.kind {
        TypeKind::Int => "int".to_string(),
        TypeKind::Bool => "boolean".to_string(),
        TypeKind::IntArray => "int[]".to_string(),
        TypeKind::Class(name) => name.clone(),
    }
}
