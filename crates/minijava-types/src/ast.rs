//! AST node types for MiniJava.
//!
//! Every node carries a [`Span`] for error reporting and a [`NodeId`] that
//! identifies it for the lifetime of the program. Analysis stages key their
//! lookup tables by `NodeId` instead of holding references into the tree.
//! Large recursive types are boxed to keep enum sizes reasonable.

use crate::Span;

// ══════════════════════════════════════════════════════════════════════════════
// Node Identity
// ══════════════════════════════════════════════════════════════════════════════

/// Stable identity of an AST node, assigned once by the parser.
///
/// Ids are dense and start at 0, so side tables can also be plain vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete MiniJava program: one main class + zero or more class declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub main: MainClass,
    pub classes: Vec<ClassDecl>,
    pub span: Span,
}

/// `class Name { public static void main(String[] args) { ... } }`
///
/// The main class cannot be referenced as a type, extended, or instantiated;
/// it exists only to host the entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct MainClass {
    pub id: NodeId,
    pub name: Ident,
    pub args_name: Ident,
    pub locals: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// `class Name extends Super { fields methods }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub id: NodeId,
    pub name: Ident,
    pub superclass: Option<Ident>,
    pub fields: Vec<VarDecl>,
    pub methods: Vec<MethodDecl>,
    pub span: Span,
}

/// `public int name(int a, boolean b) { locals stmts return expr; }`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub id: NodeId,
    pub ret_type: TypeAnn,
    pub name: Ident,
    pub params: Vec<VarDecl>,
    pub locals: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
    /// The mandatory trailing `return` expression.
    pub ret_exp: Expr,
    pub span: Span,
}

/// A variable declaration: a field, a method parameter, or a local.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub id: NodeId,
    pub ty: TypeAnn,
    pub name: Ident,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Identifiers & Type Annotations
// ══════════════════════════════════════════════════════════════════════════════

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A syntactic type annotation as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnn {
    pub kind: TypeKind,
    pub span: Span,
}

/// The four MiniJava types.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Int,
    Bool,
    IntArray,
    /// A class type, referenced by name. Resolved during analysis.
    Class(String),
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement with identity and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
}

/// All statement forms. The `else` branch of `if` is mandatory in MiniJava.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `{ stmts }`
    Block(Vec<Stmt>),
    /// `if (cond) then else otherwise`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
    /// `while (cond) body`
    While { cond: Expr, body: Box<Stmt> },
    /// `lhs = rhs;` — the grammar produces an arbitrary expression on the
    /// left; the post-parse check restricts it to assignable shapes.
    Assign { lhs: Expr, rhs: Expr },
    /// `expr;` — a call statement, including `System.out.println(e);`.
    Call(Expr),
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression with identity and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

/// The five binary operators, in one enum so each use site stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `&&`
    And,
    /// `<`
    Less,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
}

impl BinaryOp {
    /// The operator as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Less => "<",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
        }
    }
}

/// All expression forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `!expr`
    Not(Box<Expr>),
    /// `-expr`
    Neg(Box<Expr>),
    /// An integer literal, already range-checked by the lexer.
    IntLit(i32),
    /// `true`
    True,
    /// `false`
    False,
    /// `this`
    This,
    /// A bare variable use.
    Identifier(Ident),
    /// `new int[size]`
    NewArray { size: Box<Expr> },
    /// `new Class()`
    NewObject { class: Ident },
    /// `array[index]`
    ArrayLookup { array: Box<Expr>, index: Box<Expr> },
    /// `object.field` — also covers `array.length` and the `System.out`
    /// receiver chain, which are told apart structurally during analysis.
    FieldAccess { object: Box<Expr>, field: Ident },
    /// `object.method(args)`
    MethodCall {
        object: Box<Expr>,
        method: Ident,
        args: Vec<Expr>,
    },
}
