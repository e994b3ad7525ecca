//! The Declaration Index — pass one of semantic analysis.
//!
//! One traversal of the AST collects every declaration into symbol arenas
//! and resolves every name use it can to the declaration it refers to.
//! Unresolvable uses are left out of the maps rather than rejected here;
//! the error surfaces when the resolver is later asked about them. That
//! tolerance is what lets the `System.out.println` receiver chain flow
//! through name analysis even though `System` is never declared.
//!
//! The index never borrows the AST. Symbols reference each other through
//! arena indices ([`ClassId`], [`MethodId`], [`VarId`]) and use sites are
//! keyed by [`NodeId`], so the index and the tree move around freely.

use std::collections::HashMap;

use minijava_types::ast::{
    BinaryOp, Expr, ExprKind, MainClass, NodeId, Program, Stmt, StmtKind, TypeAnn, TypeKind,
    VarDecl,
};
use minijava_types::{ErrorCode, MjError, Result, Span};

use crate::ty::Type;

// ─────────────────────────────────────────────────────────────────────
// Arena ids
// ─────────────────────────────────────────────────────────────────────

/// Index into the class arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(crate) u32);

/// Index into the method arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub(crate) u32);

/// Index into the variable arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) u32);

// ─────────────────────────────────────────────────────────────────────
// Symbols
// ─────────────────────────────────────────────────────────────────────

/// A class declaration. The main class is not a symbol — it cannot be
/// named as a type, extended, or instantiated.
#[derive(Debug)]
pub struct ClassSymbol {
    pub node: NodeId,
    pub name: String,
    pub superclass: Option<ClassId>,
    pub fields: Vec<VarId>,
    pub methods: Vec<MethodId>,
    pub span: Span,
}

/// A method declaration.
#[derive(Debug)]
pub struct MethodSymbol {
    pub node: NodeId,
    pub name: String,
    pub owner: ClassId,
    pub ret_type: TypeAnn,
    pub params: Vec<VarId>,
    pub locals: Vec<VarId>,
    pub span: Span,
}

/// Where a variable declaration lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Field(ClassId),
    Param(MethodId),
    Local(MethodId),
    /// A local of the main method.
    MainLocal,
}

/// A variable declaration: field, parameter, or local.
#[derive(Debug)]
pub struct VarSymbol {
    pub node: NodeId,
    pub name: String,
    pub ty: TypeAnn,
    pub kind: VarKind,
    pub span: Span,
}

// ─────────────────────────────────────────────────────────────────────
// The index
// ─────────────────────────────────────────────────────────────────────

/// Write-once lookup tables produced by one traversal of the program.
#[derive(Debug, Default)]
pub struct DeclarationIndex {
    classes: Vec<ClassSymbol>,
    methods: Vec<MethodSymbol>,
    vars: Vec<VarSymbol>,
    /// Class name → declaration. First declaration wins on duplicates.
    class_names: HashMap<String, ClassId>,
    /// Identifier-expression node → the variable it names.
    var_uses: HashMap<NodeId, VarId>,
    /// Field-access node → the field it names.
    field_uses: HashMap<NodeId, VarId>,
    /// Method-call node → the method it names.
    method_uses: HashMap<NodeId, MethodId>,
    /// Child node → parent node, for the enclosing-class walk.
    parents: HashMap<NodeId, NodeId>,
    /// Class declaration node → its symbol.
    class_nodes: HashMap<NodeId, ClassId>,
}

impl DeclarationIndex {
    /// Build the index for a program.
    ///
    /// Fails eagerly only for declaration-level problems: an `extends`
    /// naming an unknown class, or an inheritance cycle. Unresolvable
    /// *uses* are not errors here.
    pub fn build(program: &Program) -> Result<Self> {
        let mut builder = IndexBuilder {
            index: DeclarationIndex::default(),
            decl_vars: HashMap::new(),
        };
        builder.collect(program);
        builder.resolve_superclasses(program)?;
        builder.check_cycles(program)?;
        builder.resolve_uses(program);
        Ok(builder.index)
    }

    // ── Symbol access ────────────────────────────────────────────

    pub fn class(&self, id: ClassId) -> &ClassSymbol {
        &self.classes[id.0 as usize]
    }

    pub fn method(&self, id: MethodId) -> &MethodSymbol {
        &self.methods[id.0 as usize]
    }

    pub fn var(&self, id: VarId) -> &VarSymbol {
        &self.vars[id.0 as usize]
    }

    /// Look up a class by source name.
    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// The direct superclass, if any.
    pub fn superclass_of(&self, id: ClassId) -> Option<ClassId> {
        self.class(id).superclass
    }

    // ── Use-site maps ────────────────────────────────────────────

    pub fn var_use(&self, use_site: NodeId) -> Option<VarId> {
        self.var_uses.get(&use_site).copied()
    }

    pub fn field_use(&self, use_site: NodeId) -> Option<VarId> {
        self.field_uses.get(&use_site).copied()
    }

    pub fn method_use(&self, use_site: NodeId) -> Option<MethodId> {
        self.method_uses.get(&use_site).copied()
    }

    // ── Tree structure ───────────────────────────────────────────

    /// The parent of a node, if it has one.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied()
    }

    /// Walk the parent chain until a class declaration is reached.
    ///
    /// `None` for nodes inside the main method, which has no enclosing
    /// class declaration.
    pub fn nearest_enclosing_class(&self, node: NodeId) -> Option<ClassId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(&cid) = self.class_nodes.get(&n) {
                return Some(cid);
            }
            current = self.parent_of(n);
        }
        None
    }

    // ── Member lookup along the inheritance chain ────────────────

    /// Find a field by name on a class or any of its ancestors.
    /// Within one class, the first declaration wins.
    pub(crate) fn field_on(&self, class: ClassId, name: &str) -> Option<VarId> {
        let mut current = Some(class);
        while let Some(cid) = current {
            for &vid in &self.class(cid).fields {
                if self.var(vid).name == name {
                    return Some(vid);
                }
            }
            current = self.class(cid).superclass;
        }
        None
    }

    /// Find a method by name on a class or any of its ancestors.
    pub(crate) fn method_on(&self, class: ClassId, name: &str) -> Option<MethodId> {
        let mut current = Some(class);
        while let Some(cid) = current {
            for &mid in &self.class(cid).methods {
                if self.method(mid).name == name {
                    return Some(mid);
                }
            }
            current = self.class(cid).superclass;
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────

/// Scope of the body currently being resolved.
struct UseCx<'p> {
    /// Params and locals of the enclosing method (or main locals).
    /// First declaration of a name wins.
    scope: HashMap<&'p str, VarId>,
    /// The enclosing class; `None` inside the main method.
    class: Option<ClassId>,
}

struct IndexBuilder {
    index: DeclarationIndex,
    /// Declaration node → its variable symbol, for scope construction.
    decl_vars: HashMap<NodeId, VarId>,
}

impl IndexBuilder {
    // ── Phase one: declarations and parent links ─────────────────

    fn collect(&mut self, program: &Program) {
        // Register all class names before members, so a field of class A
        // may have type B declared further down.
        for class in &program.classes {
            let cid = ClassId(self.index.classes.len() as u32);
            self.index.classes.push(ClassSymbol {
                node: class.id,
                name: class.name.name.clone(),
                superclass: None,
                fields: Vec::new(),
                methods: Vec::new(),
                span: class.span,
            });
            self.index
                .class_names
                .entry(class.name.name.clone())
                .or_insert(cid);
            self.index.class_nodes.insert(class.id, cid);
        }

        self.collect_main(&program.main);

        for (i, class) in program.classes.iter().enumerate() {
            let cid = ClassId(i as u32);
            for field in &class.fields {
                let vid = self.push_var(field, VarKind::Field(cid));
                self.index.classes[i].fields.push(vid);
                self.index.parents.insert(field.id, class.id);
            }
            for method in &class.methods {
                let mid = MethodId(self.index.methods.len() as u32);
                self.index.methods.push(MethodSymbol {
                    node: method.id,
                    name: method.name.name.clone(),
                    owner: cid,
                    ret_type: method.ret_type.clone(),
                    params: Vec::new(),
                    locals: Vec::new(),
                    span: method.span,
                });
                self.index.classes[i].methods.push(mid);
                self.index.parents.insert(method.id, class.id);

                for param in &method.params {
                    let vid = self.push_var(param, VarKind::Param(mid));
                    self.index.methods[mid.0 as usize].params.push(vid);
                    self.index.parents.insert(param.id, method.id);
                }
                for local in &method.locals {
                    let vid = self.push_var(local, VarKind::Local(mid));
                    self.index.methods[mid.0 as usize].locals.push(vid);
                    self.index.parents.insert(local.id, method.id);
                }
                for stmt in &method.stmts {
                    self.record_stmt_parents(stmt, method.id);
                }
                self.record_expr_parents(&method.ret_exp, method.id);
            }
        }
    }

    fn collect_main(&mut self, main: &MainClass) {
        for local in &main.locals {
            self.push_var(local, VarKind::MainLocal);
            self.index.parents.insert(local.id, main.id);
        }
        for stmt in &main.stmts {
            self.record_stmt_parents(stmt, main.id);
        }
    }

    fn push_var(&mut self, decl: &VarDecl, kind: VarKind) -> VarId {
        let vid = VarId(self.index.vars.len() as u32);
        self.index.vars.push(VarSymbol {
            node: decl.id,
            name: decl.name.name.clone(),
            ty: decl.ty.clone(),
            kind,
            span: decl.span,
        });
        self.decl_vars.insert(decl.id, vid);
        vid
    }

    fn record_stmt_parents(&mut self, stmt: &Stmt, parent: NodeId) {
        self.index.parents.insert(stmt.id, parent);
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.record_stmt_parents(s, stmt.id);
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.record_expr_parents(cond, stmt.id);
                self.record_stmt_parents(then_branch, stmt.id);
                self.record_stmt_parents(else_branch, stmt.id);
            }
            StmtKind::While { cond, body } => {
                self.record_expr_parents(cond, stmt.id);
                self.record_stmt_parents(body, stmt.id);
            }
            StmtKind::Assign { lhs, rhs } => {
                self.record_expr_parents(lhs, stmt.id);
                self.record_expr_parents(rhs, stmt.id);
            }
            StmtKind::Call(expr) => self.record_expr_parents(expr, stmt.id),
        }
    }

    fn record_expr_parents(&mut self, expr: &Expr, parent: NodeId) {
        self.index.parents.insert(expr.id, parent);
        match &expr.kind {
            ExprKind::Binary { left, right, .. } => {
                self.record_expr_parents(left, expr.id);
                self.record_expr_parents(right, expr.id);
            }
            ExprKind::Not(operand) | ExprKind::Neg(operand) => {
                self.record_expr_parents(operand, expr.id);
            }
            ExprKind::NewArray { size } => self.record_expr_parents(size, expr.id),
            ExprKind::ArrayLookup { array, index } => {
                self.record_expr_parents(array, expr.id);
                self.record_expr_parents(index, expr.id);
            }
            ExprKind::FieldAccess { object, .. } => self.record_expr_parents(object, expr.id),
            ExprKind::MethodCall { object, args, .. } => {
                self.record_expr_parents(object, expr.id);
                for arg in args {
                    self.record_expr_parents(arg, expr.id);
                }
            }
            ExprKind::IntLit(_)
            | ExprKind::True
            | ExprKind::False
            | ExprKind::This
            | ExprKind::Identifier(_)
            | ExprKind::NewObject { .. } => {}
        }
    }

    // ── Phase two: superclass links ──────────────────────────────

    fn resolve_superclasses(&mut self, program: &Program) -> Result<()> {
        for (i, class) in program.classes.iter().enumerate() {
            if let Some(superclass) = &class.superclass {
                let sid = *self.index.class_names.get(&superclass.name).ok_or_else(|| {
                    MjError::new(
                        ErrorCode::UNKNOWN_CLASS,
                        format!(
                            "no suitable class declaration for '{}' found",
                            superclass.name
                        ),
                        superclass.span,
                    )
                })?;
                self.index.classes[i].superclass = Some(sid);
            }
        }
        Ok(())
    }

    /// Reject cyclic `extends` chains so every later ancestor walk is total.
    fn check_cycles(&self, program: &Program) -> Result<()> {
        let limit = self.index.classes.len();
        for (i, class) in program.classes.iter().enumerate() {
            let mut current = self.index.classes[i].superclass;
            let mut steps = 0usize;
            while let Some(sid) = current {
                steps += 1;
                if steps > limit {
                    return Err(MjError::new(
                        ErrorCode::INHERITANCE_CYCLE,
                        format!(
                            "cyclic inheritance involving class '{}'",
                            class.name.name
                        ),
                        class.name.span,
                    ));
                }
                current = self.index.classes[sid.0 as usize].superclass;
            }
        }
        Ok(())
    }

    // ── Phase three: use sites ───────────────────────────────────

    fn resolve_uses(&mut self, program: &Program) {
        let mut scope = HashMap::new();
        for local in &program.main.locals {
            scope
                .entry(local.name.name.as_str())
                .or_insert(self.decl_vars[&local.id]);
        }
        let cx = UseCx { scope, class: None };
        for stmt in &program.main.stmts {
            self.resolve_stmt(stmt, &cx);
        }

        for (i, class) in program.classes.iter().enumerate() {
            let cid = ClassId(i as u32);
            for method in &class.methods {
                let mut scope = HashMap::new();
                for param in &method.params {
                    scope
                        .entry(param.name.name.as_str())
                        .or_insert(self.decl_vars[&param.id]);
                }
                for local in &method.locals {
                    scope
                        .entry(local.name.name.as_str())
                        .or_insert(self.decl_vars[&local.id]);
                }
                let cx = UseCx {
                    scope,
                    class: Some(cid),
                };
                for stmt in &method.stmts {
                    self.resolve_stmt(stmt, &cx);
                }
                self.resolve_expr(&method.ret_exp, &cx);
            }
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt, cx: &UseCx<'_>) {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.resolve_stmt(s, cx);
                }
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(cond, cx);
                self.resolve_stmt(then_branch, cx);
                self.resolve_stmt(else_branch, cx);
            }
            StmtKind::While { cond, body } => {
                self.resolve_expr(cond, cx);
                self.resolve_stmt(body, cx);
            }
            StmtKind::Assign { lhs, rhs } => {
                self.resolve_expr(lhs, cx);
                self.resolve_expr(rhs, cx);
            }
            StmtKind::Call(expr) => self.resolve_expr(expr, cx),
        }
    }

    fn resolve_expr(&mut self, expr: &Expr, cx: &UseCx<'_>) {
        match &expr.kind {
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left, cx);
                self.resolve_expr(right, cx);
            }
            ExprKind::Not(operand) | ExprKind::Neg(operand) => self.resolve_expr(operand, cx),
            ExprKind::NewArray { size } => self.resolve_expr(size, cx),
            ExprKind::ArrayLookup { array, index } => {
                self.resolve_expr(array, cx);
                self.resolve_expr(index, cx);
            }
            ExprKind::Identifier(ident) => {
                if let Some(vid) = self.lookup_var(&ident.name, cx) {
                    self.index.var_uses.insert(expr.id, vid);
                }
            }
            ExprKind::FieldAccess { object, field } => {
                self.resolve_expr(object, cx);
                if let Some(Type::Class(cid)) = self.static_type(object, cx) {
                    if let Some(vid) = self.index.field_on(cid, &field.name) {
                        self.index.field_uses.insert(expr.id, vid);
                    }
                }
            }
            ExprKind::MethodCall {
                object,
                method,
                args,
            } => {
                self.resolve_expr(object, cx);
                for arg in args {
                    self.resolve_expr(arg, cx);
                }
                if let Some(Type::Class(cid)) = self.static_type(object, cx) {
                    if let Some(mid) = self.index.method_on(cid, &method.name) {
                        self.index.method_uses.insert(expr.id, mid);
                    }
                }
            }
            ExprKind::IntLit(_)
            | ExprKind::True
            | ExprKind::False
            | ExprKind::This
            | ExprKind::NewObject { .. } => {}
        }
    }

    /// Scope chain for a bare identifier: method scope, then own and
    /// inherited fields.
    fn lookup_var(&self, name: &str, cx: &UseCx<'_>) -> Option<VarId> {
        if let Some(&vid) = cx.scope.get(name) {
            return Some(vid);
        }
        cx.class.and_then(|cid| self.index.field_on(cid, name))
    }

    /// Structural receiver typing, available already during index
    /// construction. Returns `None` wherever the type cannot be
    /// determined; the use site is then simply not resolved.
    fn static_type(&self, expr: &Expr, cx: &UseCx<'_>) -> Option<Type> {
        match &expr.kind {
            ExprKind::Binary { op, .. } => Some(match op {
                BinaryOp::And | BinaryOp::Less => Type::Bool,
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => Type::Int,
            }),
            ExprKind::Not(_) => Some(Type::Bool),
            ExprKind::Neg(_) | ExprKind::IntLit(_) => Some(Type::Int),
            ExprKind::True | ExprKind::False => Some(Type::Bool),
            ExprKind::This => cx.class.map(Type::Class),
            ExprKind::Identifier(ident) => {
                let vid = self.lookup_var(&ident.name, cx)?;
                self.annotated_type(&self.index.vars[vid.0 as usize].ty)
            }
            ExprKind::NewArray { .. } => Some(Type::IntArray),
            ExprKind::NewObject { class } => self
                .index
                .class_names
                .get(&class.name)
                .copied()
                .map(Type::Class),
            ExprKind::ArrayLookup { .. } => Some(Type::Int),
            ExprKind::FieldAccess { object, field } => {
                let receiver = self.static_type(object, cx)?;
                if field.name == "length" && receiver == Type::IntArray {
                    return Some(Type::Int);
                }
                let Type::Class(cid) = receiver else {
                    return None;
                };
                let vid = self.index.field_on(cid, &field.name)?;
                self.annotated_type(&self.index.vars[vid.0 as usize].ty)
            }
            ExprKind::MethodCall { object, method, .. } => {
                let Type::Class(cid) = self.static_type(object, cx)? else {
                    return None;
                };
                let mid = self.index.method_on(cid, &method.name)?;
                self.annotated_type(&self.index.methods[mid.0 as usize].ret_type)
            }
        }
    }

    /// Turn a syntactic annotation into a semantic type. `None` if the
    /// annotation names an unknown class.
    fn annotated_type(&self, ann: &TypeAnn) -> Option<Type> {
        match &ann.kind {
            TypeKind::Int => Some(Type::Int),
            TypeKind::Bool => Some(Type::Bool),
            TypeKind::IntArray => Some(Type::IntArray),
            TypeKind::Class(name) => self.index.class_names.get(name).copied().map(Type::Class),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
