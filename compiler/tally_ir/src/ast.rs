//! Syntax of one compilation unit.
//!
//! Expressions are arena-allocated and referenced by [`ExprId`]; statements
//! and declarations own their children directly. Every expression carries
//! the type the host's type checker resolved for it, and identifiers carry
//! the object they refer to.

use crate::{Name, Span, TypeId};

/// Index of an expression in a unit's [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ExprId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Index of a declared object in a unit's object table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ObjectId(u32);

impl ObjectId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ObjectId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ObjectKind {
    Const,
    Var,
    TypeName,
    Func,
}

/// A declared entity: constant, variable, type name or function.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Object {
    pub name: Name,
    pub kind: ObjectKind,
    pub ty: TypeId,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Shl,
    Shr,
    BitOr,
    BitAnd,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Ident(Name),
    /// `base.field`, also used for package-qualified names.
    Selector { base: ExprId, field: Name },
    Index { base: ExprId, index: ExprId },
    Call { func: ExprId, args: Vec<ExprId> },
    Int(u64),
    Str(Name),
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `base.(T)`; `ty` is `None` for the `base.(type)` form of a type switch.
    TypeAssert { base: ExprId, ty: Option<ExprId> },
    /// `*x`: pointer type or dereference.
    Star(ExprId),
    Paren(ExprId),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Resolved static type, `None` where the host recorded none.
    pub ty: Option<TypeId>,
    /// Object an identifier (or qualified identifier) refers to.
    pub object: Option<ObjectId>,
}

/// Flat storage for a unit's expressions.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena::default()
    }

    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` expressions.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let raw = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded {} entries", u32::MAX));
        self.exprs.push(expr);
        ExprId(raw)
    }

    /// `None` for an id this arena never handed out.
    #[inline]
    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

// === Declarations ===

/// One element of an interface type literal.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum InterfaceElem {
    /// `a, b(x int) string`: method names sharing one signature shape.
    Method {
        names: Vec<Name>,
        params: usize,
        results: usize,
        span: Span,
    },
    /// An embedded interface.
    Embedded(ExprId),
}

/// Right-hand side of a type declaration as written.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeDef {
    /// A type expression: identifier, qualified name, pointer, ...
    Expr(ExprId),
    Interface(Vec<InterfaceElem>),
    Struct(Vec<(Name, ExprId)>),
}

/// `type Name Def` or `type Name = Def`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeDecl {
    pub name: Name,
    pub span: Span,
    pub def: TypeDef,
    pub alias: bool,
    /// Type the declared name resolves to.
    pub ty: TypeId,
}

/// A name introduced by a value spec.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Binding {
    pub name: Name,
    pub object: ObjectId,
    pub span: Span,
}

/// One line of a constant group: `A, B T = x, y`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ValueSpec {
    pub names: Vec<Binding>,
    /// Initializers; empty when the line repeats the previous one.
    pub values: Vec<ExprId>,
    pub span: Span,
}

/// `const ( ... )`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConstGroup {
    pub specs: Vec<ValueSpec>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FuncDecl {
    pub name: Name,
    pub span: Span,
    pub body: Vec<Stmt>,
}

// === Statements ===

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClauseKind {
    Case(Vec<ExprId>),
    Default,
}

/// `case a, b:` or `default:` with its body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CaseClause {
    pub kind: ClauseKind,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl CaseClause {
    /// Explicit labels; empty for the default clause.
    pub fn labels(&self) -> &[ExprId] {
        match &self.kind {
            ClauseKind::Case(labels) => labels,
            ClauseKind::Default => &[],
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self.kind, ClauseKind::Default)
    }
}

/// A value switch: `switch tag { ... }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SwitchStmt {
    /// `None` for the tagless `switch { case cond: ... }` form.
    pub tag: Option<ExprId>,
    pub clauses: Vec<CaseClause>,
    pub span: Span,
}

/// Guard of a type switch.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeSwitchGuard {
    /// `switch x.(type)`
    Expr(ExprId),
    /// `switch v := x.(type)`
    Assign { lhs: Vec<Name>, rhs: Vec<ExprId> },
}

/// A type switch: `switch v := x.(type) { ... }`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeSwitchStmt {
    pub guard: TypeSwitchGuard,
    pub clauses: Vec<CaseClause>,
    pub span: Span,
}

impl TypeSwitchStmt {
    pub fn has_default(&self) -> bool {
        self.clauses.iter().any(CaseClause::is_default)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Stmt {
    Expr(ExprId, Span),
    Assign {
        lhs: Vec<ExprId>,
        rhs: Vec<ExprId>,
        span: Span,
    },
    Const(ConstGroup),
    Block(Vec<Stmt>, Span),
    If {
        cond: ExprId,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
        span: Span,
    },
    For {
        body: Vec<Stmt>,
        span: Span,
    },
    Return(Vec<ExprId>, Span),
    Switch(SwitchStmt),
    TypeSwitch(TypeSwitchStmt),
}

#[cfg(test)]
mod tests;
