//! Compilation units and the whole-program view.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::{ConstGroup, ExprArena, ExprId, ExprKind, FuncDecl, Object, ObjectId, TypeDecl};
use crate::{PackageId, StringInterner, TypeId, TypePool};

/// Index of a unit within its [`Program`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct UnitId(u32);

impl UnitId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        UnitId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One source file's parsed and type-resolved representation.
#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub package: PackageId,
    pub path: String,
    pub imports: Vec<PackageId>,
    pub types: Vec<TypeDecl>,
    /// Top-level constant groups; groups local to function bodies appear as
    /// `Stmt::Const` inside `funcs`.
    pub consts: Vec<ConstGroup>,
    pub funcs: Vec<FuncDecl>,
    pub arena: ExprArena,
    pub objects: Vec<Object>,
    /// The host's type checker reported errors for this unit.
    pub has_errors: bool,
}

impl Unit {
    /// Syntax of an expression, `None` for an id this unit never allocated.
    #[inline]
    pub fn kind_of(&self, id: ExprId) -> Option<&ExprKind> {
        self.arena.get(id).map(|expr| &expr.kind)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.raw() as usize)
    }

    /// Resolved static type of an expression.
    #[inline]
    pub fn type_of(&self, id: ExprId) -> Option<TypeId> {
        self.arena.get(id).and_then(|expr| expr.ty)
    }

    /// Object an identifier expression refers to.
    #[inline]
    pub fn object_of(&self, id: ExprId) -> Option<ObjectId> {
        self.arena.get(id).and_then(|expr| expr.object)
    }
}

/// The analyzed program: every unit plus the shared type information.
#[derive(Clone, Debug)]
pub struct Program {
    pub pool: TypePool,
    pub interner: StringInterner,
    pub units: Vec<Unit>,
}

impl Program {
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    /// Render a type for diagnostics.
    pub fn display_type(&self, ty: TypeId) -> String {
        self.pool.display(ty, &self.interner)
    }

    /// Units ordered so that every unit comes after the units of the
    /// packages it imports. Import cycles are broken in declaration order.
    pub fn units_in_dependency_order(&self) -> Vec<&Unit> {
        let mut by_package: FxHashMap<PackageId, Vec<usize>> = FxHashMap::default();
        for (index, unit) in self.units.iter().enumerate() {
            by_package.entry(unit.package).or_default().push(index);
        }

        let mut order = Vec::with_capacity(self.units.len());
        let mut done = FxHashSet::default();
        let mut in_progress = FxHashSet::default();
        for index in 0..self.units.len() {
            self.visit_unit(index, &by_package, &mut done, &mut in_progress, &mut order);
        }
        order.into_iter().map(|index| &self.units[index]).collect()
    }

    fn visit_unit(
        &self,
        index: usize,
        by_package: &FxHashMap<PackageId, Vec<usize>>,
        done: &mut FxHashSet<usize>,
        in_progress: &mut FxHashSet<usize>,
        order: &mut Vec<usize>,
    ) {
        if done.contains(&index) {
            return;
        }
        if !in_progress.insert(index) {
            tracing::debug!(unit = %self.units[index].path, "import cycle; keeping declaration order");
            return;
        }
        let unit = &self.units[index];
        for import in &unit.imports {
            if *import == unit.package {
                continue;
            }
            for &dep in by_package.get(import).map_or(&[][..], Vec::as_slice) {
                self.visit_unit(dep, by_package, done, in_progress, order);
            }
        }
        in_progress.remove(&index);
        if done.insert(index) {
            order.push(index);
        }
    }
}
