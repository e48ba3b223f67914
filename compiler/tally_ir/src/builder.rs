//! Host-side construction of the program model.
//!
//! The host (or a test) materializes the whole program before any pass
//! runs: packages, type declarations, constants and function bodies, each
//! already resolved. Spans are synthesized from a per-unit cursor so every
//! node gets a distinct position.
//!
//! ```text
//! let mut program = ProgramBuilder::new();
//! let a = program.package("a");
//! let mut unit = program.unit(a, "a/a.go");
//! let foo = unit.defined_type("Foo", TypeId::INT);
//! let iota = unit.iota();
//! let line = unit.const_spec(&["Foo1"], foo, vec![iota]);
//! unit.add_const_group(vec![line]);
//! unit.finish();
//! let program = program.finish();
//! ```

use rustc_hash::FxHashMap;

use crate::ast::{
    BinaryOp, Binding, CaseClause, ClauseKind, ConstGroup, Expr, ExprArena, ExprId, ExprKind,
    FuncDecl, InterfaceElem, Object, ObjectId, ObjectKind, Stmt, SwitchStmt, TypeDecl, TypeDef,
    TypeSwitchGuard, TypeSwitchStmt, ValueSpec,
};
use crate::{
    Method, MethodSig, Name, PackageId, Program, Signature, Span, StringInterner, TypeId,
    TypeKind, TypePool, Unit, UnitId,
};

/// Builds a [`Program`].
pub struct ProgramBuilder {
    pool: TypePool,
    interner: StringInterner,
    units: Vec<Unit>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        ProgramBuilder {
            pool: TypePool::new(),
            interner: StringInterner::new(),
            units: Vec::new(),
        }
    }

    /// Register a package.
    pub fn package(&mut self, name: &str) -> PackageId {
        let name = self.interner.intern(name);
        self.pool.add_package(name)
    }

    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn pool(&self) -> &TypePool {
        &self.pool
    }

    /// Intern `*elem` in the shared pool.
    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.pool.pointer(elem)
    }

    /// Start a new unit in `package`.
    pub fn unit(&mut self, package: PackageId, path: &str) -> UnitBuilder<'_> {
        let id = UnitId::from_raw(
            u32::try_from(self.units.len()).unwrap_or_else(|_| panic!("too many units")),
        );
        UnitBuilder {
            program: self,
            unit: Unit {
                id,
                package,
                path: path.to_owned(),
                imports: Vec::new(),
                types: Vec::new(),
                consts: Vec::new(),
                funcs: Vec::new(),
                arena: ExprArena::new(),
                objects: Vec::new(),
                has_errors: false,
            },
            type_objects: FxHashMap::default(),
            cursor: 1,
        }
    }

    /// Freeze the program.
    pub fn finish(self) -> Program {
        Program {
            pool: self.pool,
            interner: self.interner,
            units: self.units,
        }
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds one [`Unit`]; call [`finish`](UnitBuilder::finish) to add it.
pub struct UnitBuilder<'b> {
    program: &'b mut ProgramBuilder,
    unit: Unit,
    /// Type-name objects created for spelled type references.
    type_objects: FxHashMap<TypeId, ObjectId>,
    cursor: u32,
}

impl UnitBuilder<'_> {
    fn next_span(&mut self) -> Span {
        let span = Span::new(self.cursor, self.cursor + 1);
        self.cursor += 1;
        span
    }

    pub fn name(&mut self, s: &str) -> Name {
        self.program.interner.intern(s)
    }

    /// Method names starting with a lowercase letter are package-scoped.
    fn method_scope(&self, name: &str) -> Option<PackageId> {
        match name.chars().next() {
            Some(c) if c.is_uppercase() => None,
            _ => Some(self.unit.package),
        }
    }

    pub fn import(&mut self, package: PackageId) {
        self.unit.imports.push(package);
    }

    /// Flag the unit as carrying type errors reported by the host.
    pub fn mark_errors(&mut self) {
        self.unit.has_errors = true;
    }

    fn add_object(&mut self, name: Name, kind: ObjectKind, ty: TypeId) -> ObjectId {
        let id = ObjectId::from_raw(
            u32::try_from(self.unit.objects.len()).unwrap_or_else(|_| panic!("too many objects")),
        );
        let span = self.next_span();
        self.unit.objects.push(Object {
            name,
            kind,
            ty,
            span,
        });
        id
    }

    /// Most recently declared object with the given name.
    pub fn object_named(&self, name: &str) -> Option<ObjectId> {
        let name = self.program.interner.get(name)?;
        self.unit
            .objects
            .iter()
            .rposition(|object| object.name == name)
            .and_then(|index| u32::try_from(index).ok())
            .map(ObjectId::from_raw)
    }

    // === Expressions ===

    pub fn expr(&mut self, kind: ExprKind, ty: Option<TypeId>) -> ExprId {
        let span = self.next_span();
        self.unit.arena.alloc(Expr {
            kind,
            span,
            ty,
            object: None,
        })
    }

    fn expr_with_object(
        &mut self,
        kind: ExprKind,
        ty: Option<TypeId>,
        object: Option<ObjectId>,
    ) -> ExprId {
        let span = self.next_span();
        self.unit.arena.alloc(Expr {
            kind,
            span,
            ty,
            object,
        })
    }

    /// The auto-increment token `iota`.
    pub fn iota(&mut self) -> ExprId {
        self.expr(ExprKind::Ident(Name::IOTA), Some(TypeId::INT))
    }

    pub fn int_lit(&mut self, value: u64) -> ExprId {
        self.expr(ExprKind::Int(value), Some(TypeId::INT))
    }

    pub fn str_lit(&mut self, value: &str) -> ExprId {
        let value = self.name(value);
        self.expr(ExprKind::Str(value), Some(TypeId::STRING))
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let ty = self.unit.arena.get(left).and_then(|expr| expr.ty);
        self.expr(ExprKind::Binary { op, left, right }, ty)
    }

    pub fn paren(&mut self, inner: ExprId) -> ExprId {
        let ty = self.unit.arena.get(inner).and_then(|expr| expr.ty);
        self.expr(ExprKind::Paren(inner), ty)
    }

    pub fn call(&mut self, func: ExprId, args: Vec<ExprId>, ty: Option<TypeId>) -> ExprId {
        self.expr(ExprKind::Call { func, args }, ty)
    }

    /// `T(arg)`: a conversion to `ty`.
    pub fn conversion(&mut self, ty: TypeId, arg: ExprId) -> ExprId {
        let func = self.type_ref(ty);
        self.call(func, vec![arg], Some(ty))
    }

    pub fn selector(&mut self, base: ExprId, field: &str, ty: Option<TypeId>) -> ExprId {
        let field = self.name(field);
        self.expr(ExprKind::Selector { base, field }, ty)
    }

    pub fn index(&mut self, base: ExprId, index: ExprId, ty: Option<TypeId>) -> ExprId {
        self.expr(ExprKind::Index { base, index }, ty)
    }

    /// `base.(type)`.
    pub fn type_assert(&mut self, base: ExprId) -> ExprId {
        let ty = self.unit.arena.get(base).and_then(|expr| expr.ty);
        self.expr(ExprKind::TypeAssert { base, ty: None }, ty)
    }

    /// An identifier referring to a declared object.
    pub fn object_ref(&mut self, object: ObjectId) -> ExprId {
        let (name, ty) = match self.unit.objects.get(object.raw() as usize) {
            Some(obj) => (obj.name, Some(obj.ty)),
            None => (Name::EMPTY, None),
        };
        self.expr_with_object(ExprKind::Ident(name), ty, Some(object))
    }

    /// An expression spelling `ty` the way a source file would: bare names
    /// for local and predeclared types, qualified names for imported ones,
    /// `*T` for pointers.
    pub fn type_ref(&mut self, ty: TypeId) -> ExprId {
        let kind = self.program.pool.get(ty).cloned();
        match kind {
            Some(TypeKind::Basic(basic)) => {
                let name = self.name(basic.name());
                let object = self.type_object(name, ty);
                self.expr_with_object(ExprKind::Ident(name), Some(ty), Some(object))
            }
            Some(TypeKind::Named { name, package, .. } | TypeKind::Alias { name, package, .. }) => {
                let object = self.type_object(name, ty);
                if package == self.unit.package {
                    self.expr_with_object(ExprKind::Ident(name), Some(ty), Some(object))
                } else {
                    let package_name = self.program.pool.package_name(package);
                    let base = self.expr(ExprKind::Ident(package_name), None);
                    self.expr_with_object(
                        ExprKind::Selector { base, field: name },
                        Some(ty),
                        Some(object),
                    )
                }
            }
            Some(TypeKind::Pointer(elem)) => {
                let inner = self.type_ref(elem);
                self.expr(ExprKind::Star(inner), Some(ty))
            }
            _ => self.expr(ExprKind::Ident(Name::EMPTY), Some(ty)),
        }
    }

    fn type_object(&mut self, name: Name, ty: TypeId) -> ObjectId {
        if let Some(&object) = self.type_objects.get(&ty) {
            return object;
        }
        let object = self.add_object(name, ObjectKind::TypeName, ty);
        self.type_objects.insert(ty, object);
        object
    }

    // === Declarations ===

    fn declare_type(&mut self, name: Name, def: TypeDef, alias: bool, ty: TypeId) {
        let span = self.next_span();
        let object = self.add_object(name, ObjectKind::TypeName, ty);
        self.type_objects.insert(ty, object);
        self.unit.types.push(TypeDecl {
            name,
            span,
            def,
            alias,
            ty,
        });
    }

    /// `type Name Underlying`.
    pub fn defined_type(&mut self, name: &str, underlying: TypeId) -> TypeId {
        let name = self.name(name);
        let def = TypeDef::Expr(self.type_ref(underlying));
        let ty = self.program.pool.named(name, self.unit.package);
        self.program.pool.set_underlying(ty, underlying);
        self.declare_type(name, def, false, ty);
        ty
    }

    /// `type Name = Target`.
    pub fn alias_type(&mut self, name: &str, target: TypeId) -> TypeId {
        let name = self.name(name);
        let def = TypeDef::Expr(self.type_ref(target));
        let ty = self.program.pool.alias(name, self.unit.package, target);
        self.declare_type(name, def, true, ty);
        ty
    }

    /// `type Name struct{}`.
    pub fn struct_type(&mut self, name: &str) -> TypeId {
        let name = self.name(name);
        let underlying = self.program.pool.structure(Vec::new());
        let ty = self.program.pool.named(name, self.unit.package);
        self.program.pool.set_underlying(ty, underlying);
        self.declare_type(name, TypeDef::Struct(Vec::new()), false, ty);
        ty
    }

    /// `type Name interface { m1(...); m2(...) }`.
    pub fn interface_type(&mut self, name: &str, methods: &[(&str, Signature)]) -> TypeId {
        let name = self.name(name);
        let mut sigs = Vec::with_capacity(methods.len());
        let mut elems = Vec::with_capacity(methods.len());
        for (method, sig) in methods {
            let scope = self.method_scope(method);
            let method_name = self.name(method);
            let span = self.next_span();
            elems.push(InterfaceElem::Method {
                names: vec![method_name],
                params: sig.params.len(),
                results: sig.results.len(),
                span,
            });
            sigs.push(MethodSig::new(method_name, scope, sig.clone()));
        }
        let underlying = self.program.pool.interface(sigs);
        let ty = self.program.pool.named(name, self.unit.package);
        self.program.pool.set_underlying(ty, underlying);
        self.declare_type(name, TypeDef::Interface(elems), false, ty);
        ty
    }

    /// `func (r T) name(...)` or `func (r *T) name(...)` when `pointer_receiver`.
    ///
    /// A pointer receiver spells `*T`, so the pointer type enters the pool;
    /// a value receiver leaves `*T` out until some unit writes it.
    pub fn method(&mut self, receiver: TypeId, name: &str, sig: Signature, pointer_receiver: bool) {
        if pointer_receiver {
            self.program.pool.pointer(receiver);
        }
        let scope = self.method_scope(name);
        let name = self.name(name);
        self.program.pool.add_method(
            receiver,
            Method {
                sig: MethodSig::new(name, scope, sig),
                pointer_receiver,
            },
        );
    }

    /// Declare a variable object.
    pub fn var(&mut self, name: &str, ty: TypeId) -> ObjectId {
        let name = self.name(name);
        self.add_object(name, ObjectKind::Var, ty)
    }

    /// One constant line: `names ty = values`. Every name, including `_`,
    /// gets a constant object of type `ty`.
    pub fn const_spec(&mut self, names: &[&str], ty: TypeId, values: Vec<ExprId>) -> ValueSpec {
        let span = self.next_span();
        let names = names
            .iter()
            .map(|name| {
                let name = self.name(name);
                let object = self.add_object(name, ObjectKind::Const, ty);
                let span = self.next_span();
                Binding { name, object, span }
            })
            .collect();
        ValueSpec {
            names,
            values,
            span,
        }
    }

    fn const_group(&mut self, specs: Vec<ValueSpec>) -> ConstGroup {
        let span = self.next_span();
        ConstGroup { specs, span }
    }

    /// Add a top-level `const ( ... )` group.
    pub fn add_const_group(&mut self, specs: Vec<ValueSpec>) {
        let group = self.const_group(specs);
        self.unit.consts.push(group);
    }

    /// A `const ( ... )` group local to a function body.
    pub fn local_const_group(&mut self, specs: Vec<ValueSpec>) -> Stmt {
        Stmt::Const(self.const_group(specs))
    }

    pub fn func(&mut self, name: &str, body: Vec<Stmt>) {
        let name = self.name(name);
        let span = self.next_span();
        self.unit.funcs.push(FuncDecl { name, span, body });
    }

    // === Statements ===

    pub fn expr_stmt(&mut self, expr: ExprId) -> Stmt {
        let span = self.next_span();
        Stmt::Expr(expr, span)
    }

    pub fn block(&mut self, stmts: Vec<Stmt>) -> Stmt {
        let span = self.next_span();
        Stmt::Block(stmts, span)
    }

    pub fn case(&mut self, labels: Vec<ExprId>) -> CaseClause {
        let span = self.next_span();
        CaseClause {
            kind: ClauseKind::Case(labels),
            body: Vec::new(),
            span,
        }
    }

    pub fn default_case(&mut self) -> CaseClause {
        let span = self.next_span();
        CaseClause {
            kind: ClauseKind::Default,
            body: Vec::new(),
            span,
        }
    }

    /// `switch tag { clauses }`.
    pub fn switch(&mut self, tag: Option<ExprId>, clauses: Vec<CaseClause>) -> Stmt {
        let span = self.next_span();
        Stmt::Switch(SwitchStmt { tag, clauses, span })
    }

    /// `switch subject.(type)` or `switch binding := subject.(type)`.
    pub fn type_switch(
        &mut self,
        subject: ExprId,
        binding: Option<&str>,
        clauses: Vec<CaseClause>,
    ) -> Stmt {
        let assert = self.type_assert(subject);
        let guard = match binding {
            Some(binding) => TypeSwitchGuard::Assign {
                lhs: vec![self.name(binding)],
                rhs: vec![assert],
            },
            None => TypeSwitchGuard::Expr(assert),
        };
        self.type_switch_with_guard(guard, clauses)
    }

    /// A type switch with an explicitly built guard.
    pub fn type_switch_with_guard(
        &mut self,
        guard: TypeSwitchGuard,
        clauses: Vec<CaseClause>,
    ) -> Stmt {
        let span = self.next_span();
        Stmt::TypeSwitch(TypeSwitchStmt {
            guard,
            clauses,
            span,
        })
    }

    /// Add the unit to the program.
    pub fn finish(self) -> UnitId {
        let id = self.unit.id;
        self.program.units.push(self.unit);
        id
    }
}
