//! The Name Resolver — a query façade over the Declaration Index.
//!
//! Resolution work happened when the index was built; these queries only
//! read the maps. The error policy lives here: a use the index could not
//! resolve becomes a structured error at query time, carrying the span of
//! the offending name. Uses that are never queried (most importantly the
//! `System.out.println` receiver chain) therefore never fail.

use minijava_types::ast::{Ident, NodeId};
use minijava_types::{ErrorCode, MjError, Result};

use crate::symbols::{ClassId, DeclarationIndex, MethodSymbol, VarSymbol};

/// Read-only name resolution queries against a built [`DeclarationIndex`].
#[derive(Clone, Copy)]
pub struct NameResolver<'a> {
    index: &'a DeclarationIndex,
}

impl<'a> NameResolver<'a> {
    /// Create a resolver over an index.
    pub fn new(index: &'a DeclarationIndex) -> Self {
        Self { index }
    }

    /// The underlying index.
    pub fn index(&self) -> &'a DeclarationIndex {
        self.index
    }

    /// Resolve a bare identifier use to its variable declaration.
    pub fn variable_use(&self, use_site: NodeId, name: &Ident) -> Result<&'a VarSymbol> {
        match self.index.var_use(use_site) {
            Some(vid) => Ok(self.index.var(vid)),
            None => Err(MjError::new(
                ErrorCode::UNKNOWN_VARIABLE,
                format!("no suitable variable declaration for '{}' found", name.name),
                name.span,
            )),
        }
    }

    /// Resolve a field access to the field's declaration.
    pub fn field_access(&self, use_site: NodeId, field: &Ident) -> Result<&'a VarSymbol> {
        match self.index.field_use(use_site) {
            Some(vid) => Ok(self.index.var(vid)),
            None => Err(MjError::new(
                ErrorCode::UNKNOWN_FIELD,
                format!("no suitable field declaration for '{}' found", field.name),
                field.span,
            )),
        }
    }

    /// Resolve a method call to the method's declaration.
    pub fn method_call(&self, use_site: NodeId, method: &Ident) -> Result<&'a MethodSymbol> {
        match self.index.method_use(use_site) {
            Some(mid) => Ok(self.index.method(mid)),
            None => Err(MjError::new(
                ErrorCode::UNKNOWN_METHOD,
                format!("no suitable method declaration for '{}' found", method.name),
                method.span,
            )),
        }
    }

    /// Resolve a class-type reference by name.
    pub fn class_reference(&self, name: &Ident) -> Result<ClassId> {
        self.index.class_by_name(&name.name).ok_or_else(|| {
            MjError::new(
                ErrorCode::UNKNOWN_CLASS,
                format!("no suitable class declaration for '{}' found", name.name),
                name.span,
            )
        })
    }

    /// The direct superclass of a class, if any.
    pub fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        self.index.superclass_of(class)
    }

    /// The class declaration lexically enclosing a node, if any.
    /// Total: nodes inside the main method yield `None`.
    pub fn nearest_enclosing_class(&self, node: NodeId) -> Option<ClassId> {
        self.index.nearest_enclosing_class(node)
    }
}
