//! Program-wide type pool.
//!
//! Every resolved type in the analyzed program lives in one [`TypePool`] and
//! is referenced by a 32-bit [`TypeId`]. Structural types (pointers,
//! interfaces, structs, signatures) are interned so equal shapes share one
//! index; named types and aliases get a fresh index per declaration.
//!
//! # Canonical identity
//!
//! An alias declaration (`type B = a.Member`) gets its own entry so the
//! surface spelling is preserved for display, but it is never a distinct
//! type. [`TypePool::canonical`] chases alias chains (and aliases nested
//! under pointers) down to one representative `TypeId`. All identity
//! comparisons go through it; surface spellings are never compared.
//!
//! # Method sets
//!
//! Method sets follow the usual rules for structural interfaces: a named
//! type's own method set holds its value-receiver methods, a pointer to a
//! named type adds the pointer-receiver methods. Unexported (lowercase)
//! method names are scoped to their declaring package, so they only match
//! a method of the same name declared in the same package.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::{Name, StringInterner};

/// A 32-bit index into the type pool.
///
/// Equality of `TypeId`s is equality of *entries*; use
/// [`TypePool::canonical`] or [`TypePool::identical`] to compare types.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// The native integer type `int`.
    pub const INT: Self = Self::basic(BasicKind::Int);
    /// The `string` type.
    pub const STRING: Self = Self::basic(BasicKind::String);

    /// Sentinel value indicating no type (unresolved).
    pub const NONE: Self = Self(u32::MAX);

    /// The pre-interned index of a basic type.
    #[inline]
    pub const fn basic(kind: BasicKind) -> Self {
        Self(kind as u32)
    }

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "TypeId(NONE)")
        } else {
            write!(f, "TypeId({})", self.0)
        }
    }
}

/// Identity of a package (the scope for unexported names).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PackageId(u32);

impl PackageId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Predeclared basic types.
///
/// The discriminant doubles as the pre-interned pool index.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u32)]
pub enum BasicKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Bool,
}

impl BasicKind {
    pub const ALL: [BasicKind; 14] = [
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::String,
        BasicKind::Bool,
    ];

    /// Source spelling of the type.
    pub const fn name(self) -> &'static str {
        match self {
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::String => "string",
            BasicKind::Bool => "bool",
        }
    }

    /// Look up a basic type by its spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Parameter and result types of a function or method.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Signature {
    pub params: Vec<TypeId>,
    pub results: Vec<TypeId>,
}

impl Signature {
    /// `func()`: no parameters, no results.
    pub fn empty() -> Self {
        Signature::default()
    }

    pub fn new(params: Vec<TypeId>, results: Vec<TypeId>) -> Self {
        Signature { params, results }
    }

    /// True for `func()`.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.results.is_empty()
    }
}

/// A method name and signature, as listed by an interface or declared on a
/// named type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodSig {
    pub name: Name,
    /// Declaring package for unexported names, `None` for exported ones.
    pub scope: Option<PackageId>,
    pub sig: Signature,
}

impl MethodSig {
    pub fn new(name: Name, scope: Option<PackageId>, sig: Signature) -> Self {
        MethodSig { name, scope, sig }
    }

    /// Same method identity: same name, and same package when unexported.
    #[inline]
    pub fn same_id(&self, other: &MethodSig) -> bool {
        self.name == other.name && self.scope == other.scope
    }
}

/// A method declared on a named type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Method {
    pub sig: MethodSig,
    pub pointer_receiver: bool,
}

/// Type entry stored in the pool.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Basic(BasicKind),
    /// A defined type (`type T U`). `underlying` is `NONE` until resolved.
    Named {
        name: Name,
        package: PackageId,
        underlying: TypeId,
        methods: Vec<Method>,
    },
    /// An alias declaration (`type A = T`), transparent for identity.
    Alias {
        name: Name,
        package: PackageId,
        target: TypeId,
    },
    Pointer(TypeId),
    Struct(Vec<(Name, TypeId)>),
    Interface(Vec<MethodSig>),
    Func(Signature),
}

/// The program-wide type pool.
#[derive(Clone, Debug)]
pub struct TypePool {
    types: Vec<TypeKind>,
    /// Structural entries only; named types and aliases are never deduplicated.
    interned: FxHashMap<TypeKind, TypeId>,
    packages: Vec<Name>,
}

impl TypePool {
    /// Create a pool with every basic type pre-interned at its fixed index.
    pub fn new() -> Self {
        let mut pool = TypePool {
            types: Vec::with_capacity(64),
            interned: FxHashMap::default(),
            packages: Vec::new(),
        };
        for kind in BasicKind::ALL {
            pool.intern(TypeKind::Basic(kind));
        }
        pool
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let raw = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type pool exceeded {} entries", u32::MAX));
        self.types.push(kind);
        TypeId(raw)
    }

    fn intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.interned.get(&kind) {
            return id;
        }
        let id = self.push(kind.clone());
        self.interned.insert(kind, id);
        id
    }

    // === Construction ===

    /// Register a package name.
    pub fn add_package(&mut self, name: Name) -> PackageId {
        let raw = u32::try_from(self.packages.len())
            .unwrap_or_else(|_| panic!("too many packages"));
        self.packages.push(name);
        PackageId(raw)
    }

    /// Declare a named type whose underlying type is not yet known.
    pub fn named(&mut self, name: Name, package: PackageId) -> TypeId {
        self.push(TypeKind::Named {
            name,
            package,
            underlying: TypeId::NONE,
            methods: Vec::new(),
        })
    }

    /// Resolve the underlying type of a named type.
    pub fn set_underlying(&mut self, named: TypeId, to: TypeId) {
        match self.types.get_mut(named.0 as usize) {
            Some(TypeKind::Named { underlying, .. }) => *underlying = to,
            _ => tracing::warn!(?named, "set_underlying on a type that is not named"),
        }
    }

    /// Attach a method to a named type.
    pub fn add_method(&mut self, named: TypeId, method: Method) {
        match self.types.get_mut(named.0 as usize) {
            Some(TypeKind::Named { methods, .. }) => methods.push(method),
            _ => tracing::warn!(?named, "add_method on a type that is not named"),
        }
    }

    /// Declare an alias for `target`.
    pub fn alias(&mut self, name: Name, package: PackageId, target: TypeId) -> TypeId {
        self.push(TypeKind::Alias {
            name,
            package,
            target,
        })
    }

    /// Intern `*elem`.
    ///
    /// The canonical form `*canonical(elem)` is interned alongside, so
    /// [`canonical`](Self::canonical) can always find it.
    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        let canonical_elem = self.canonical(elem);
        if canonical_elem != elem {
            self.pointer(canonical_elem);
        }
        self.intern(TypeKind::Pointer(elem))
    }

    pub fn interface(&mut self, methods: Vec<MethodSig>) -> TypeId {
        self.intern(TypeKind::Interface(methods))
    }

    pub fn structure(&mut self, fields: Vec<(Name, TypeId)>) -> TypeId {
        self.intern(TypeKind::Struct(fields))
    }

    pub fn func(&mut self, sig: Signature) -> TypeId {
        self.intern(TypeKind::Func(sig))
    }

    // === Queries ===

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeKind> {
        self.types.get(id.0 as usize)
    }

    /// Name of a registered package.
    pub fn package_name(&self, package: PackageId) -> Name {
        self.packages
            .get(package.0 as usize)
            .copied()
            .unwrap_or(Name::EMPTY)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: basic types are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All entries in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeKind)> + '_ {
        (0u32..).zip(self.types.iter()).map(|(raw, kind)| (TypeId(raw), kind))
    }

    /// The representative identity of `id`, stable across alias spellings.
    pub fn canonical(&self, id: TypeId) -> TypeId {
        let mut current = id;
        // Alias chains are acyclic in a resolved program; the bound only
        // protects against malformed input.
        for _ in 0..=self.types.len() {
            match self.get(current) {
                Some(TypeKind::Alias { target, .. }) => current = *target,
                Some(TypeKind::Pointer(elem)) => {
                    let canonical_elem = self.canonical(*elem);
                    if canonical_elem == *elem {
                        return current;
                    }
                    return self
                        .interned
                        .get(&TypeKind::Pointer(canonical_elem))
                        .copied()
                        .unwrap_or(current);
                }
                _ => return current,
            }
        }
        current
    }

    /// Whether two types are the same type.
    pub fn identical(&self, a: TypeId, b: TypeId) -> bool {
        let (a, b) = (self.canonical(a), self.canonical(b));
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Some(TypeKind::Pointer(x)), Some(TypeKind::Pointer(y))) => self.identical(*x, *y),
            (Some(TypeKind::Func(s1)), Some(TypeKind::Func(s2))) => self.signature_identical(s1, s2),
            (Some(TypeKind::Struct(f1)), Some(TypeKind::Struct(f2))) => {
                f1.len() == f2.len()
                    && f1
                        .iter()
                        .zip(f2)
                        .all(|((n1, t1), (n2, t2))| n1 == n2 && self.identical(*t1, *t2))
            }
            (Some(TypeKind::Interface(m1)), Some(TypeKind::Interface(m2))) => {
                m1.len() == m2.len()
                    && m1.iter().all(|m| {
                        m2.iter()
                            .any(|n| m.same_id(n) && self.signature_identical(&m.sig, &n.sig))
                    })
            }
            _ => false,
        }
    }

    fn signature_identical(&self, a: &Signature, b: &Signature) -> bool {
        let same = |xs: &[TypeId], ys: &[TypeId]| {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| self.identical(*x, *y))
        };
        same(&a.params, &b.params) && same(&a.results, &b.results)
    }

    /// The underlying type: named types are unwrapped until a structural or
    /// basic type is reached. Returns `NONE` for unresolved named types.
    pub fn underlying(&self, id: TypeId) -> TypeId {
        let mut current = self.canonical(id);
        for _ in 0..=self.types.len() {
            match self.get(current) {
                Some(TypeKind::Named { underlying, .. }) => {
                    if underlying.is_none() {
                        return TypeId::NONE;
                    }
                    current = self.canonical(*underlying);
                }
                _ => return current,
            }
        }
        current
    }

    /// True when the canonical entry is a named (defined) type.
    pub fn is_named(&self, id: TypeId) -> bool {
        matches!(self.get(self.canonical(id)), Some(TypeKind::Named { .. }))
    }

    /// Methods required by an interface type, `None` for non-interfaces.
    pub fn interface_methods(&self, id: TypeId) -> Option<&[MethodSig]> {
        match self.get(self.underlying(id)) {
            Some(TypeKind::Interface(methods)) => Some(methods),
            _ => None,
        }
    }

    pub fn is_interface(&self, id: TypeId) -> bool {
        self.interface_methods(id).is_some()
    }

    /// Methods callable on a value of type `id`.
    pub fn method_set(&self, id: TypeId) -> Vec<&MethodSig> {
        let id = self.canonical(id);
        if let Some(methods) = self.interface_methods(id) {
            return methods.iter().collect();
        }
        match self.get(id) {
            Some(TypeKind::Named { methods, .. }) => methods
                .iter()
                .filter(|m| !m.pointer_receiver)
                .map(|m| &m.sig)
                .collect(),
            Some(TypeKind::Pointer(elem)) => {
                let elem = self.canonical(*elem);
                match self.get(elem) {
                    Some(TypeKind::Named { methods, .. }) if !self.is_interface(elem) => {
                        methods.iter().map(|m| &m.sig).collect()
                    }
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    /// Whether every method of interface `iface` is in the method set of `ty`.
    pub fn implements(&self, ty: TypeId, iface: TypeId) -> bool {
        let Some(required) = self.interface_methods(iface) else {
            return false;
        };
        let available = self.method_set(ty);
        required.iter().all(|req| {
            available
                .iter()
                .any(|m| m.same_id(req) && self.signature_identical(&m.sig, &req.sig))
        })
    }

    /// Whether a value of type `value` may be assigned to a slot of type `target`.
    pub fn assignable(&self, value: TypeId, target: TypeId) -> bool {
        self.identical(value, target) || (self.is_interface(target) && self.implements(value, target))
    }

    // === Display ===

    /// Render a type with package-qualified names, e.g. `*a.Member1`.
    pub fn display(&self, id: TypeId, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id, interner);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId, interner: &StringInterner) {
        match self.get(id) {
            None => out.push_str("<invalid>"),
            Some(TypeKind::Basic(kind)) => out.push_str(kind.name()),
            Some(
                TypeKind::Named { name, package, .. } | TypeKind::Alias { name, package, .. },
            ) => {
                let package = interner.lookup(self.package_name(*package));
                if !package.is_empty() {
                    out.push_str(package);
                    out.push('.');
                }
                out.push_str(interner.lookup(*name));
            }
            Some(TypeKind::Pointer(elem)) => {
                out.push('*');
                self.write_type(out, *elem, interner);
            }
            Some(TypeKind::Struct(fields)) => {
                out.push_str("struct{");
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(interner.lookup(*name));
                    out.push(' ');
                    self.write_type(out, *ty, interner);
                }
                out.push('}');
            }
            Some(TypeKind::Interface(methods)) => {
                out.push_str("interface{");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(interner.lookup(method.name));
                    self.write_signature(out, &method.sig, interner);
                }
                out.push('}');
            }
            Some(TypeKind::Func(sig)) => {
                out.push_str("func");
                self.write_signature(out, sig, interner);
            }
        }
    }

    fn write_signature(&self, out: &mut String, sig: &Signature, interner: &StringInterner) {
        out.push('(');
        for (i, param) in sig.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, *param, interner);
        }
        out.push(')');
        match sig.results.as_slice() {
            [] => {}
            [single] => {
                out.push(' ');
                self.write_type(out, *single, interner);
            }
            results => {
                out.push_str(" (");
                for (i, result) in results.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, *result, interner);
                }
                out.push(')');
            }
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
