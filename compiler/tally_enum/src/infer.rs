//! Enum inference.
//!
//! Three steps over one unit:
//!
//! 1. **Seed**: every non-alias type declaration spelled `type T int`.
//! 2. **Disqualify**: a constant line of a candidate's type that declares
//!    several names, or whose initializer is neither `iota` nor `T(iota)`,
//!    removes the candidate. Lines without an initializer repeat the
//!    previous one and never disqualify.
//! 3. **Populate**: every constant of a surviving candidate's type becomes
//!    a member, in declaration order. Candidates left without members are
//!    dropped.

use rustc_hash::{FxHashMap, FxHashSet};
use tally_ir::ast::{ConstGroup, ExprId, ExprKind, ObjectId, ObjectKind, TypeDef, ValueSpec};
use tally_ir::visitor::Visitor;
use tally_ir::{Name, Program, TypeId, Unit};

/// A closed enumeration recovered from a unit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumCandidate {
    /// Canonical identity of the defined type.
    pub ty: TypeId,
    pub name: Name,
    /// Member constants in declaration order, the discard slot included.
    pub members: Vec<ObjectId>,
}

/// Frozen result of enum inference for one unit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnumTable {
    enums: Vec<EnumCandidate>,
    by_type: FxHashMap<TypeId, usize>,
}

impl EnumTable {
    /// The enumeration whose canonical type is `ty`.
    pub fn get(&self, ty: TypeId) -> Option<&EnumCandidate> {
        self.by_type.get(&ty).map(|&index| &self.enums[index])
    }

    /// Enumerations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EnumCandidate> {
        self.enums.iter()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    fn push(&mut self, candidate: EnumCandidate) {
        self.by_type.insert(candidate.ty, self.enums.len());
        self.enums.push(candidate);
    }
}

/// Collects every constant group of a unit, top-level and local.
#[derive(Default)]
struct ConstGroups<'ast> {
    groups: Vec<&'ast ConstGroup>,
}

impl<'ast> Visitor<'ast> for ConstGroups<'ast> {
    fn visit_const_group(&mut self, group: &'ast ConstGroup) {
        self.groups.push(group);
    }
}

/// Recover the closed enumerations declared in `unit`.
#[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.path))]
pub fn infer_enums(program: &Program, unit: &Unit) -> EnumTable {
    let mut candidates: Vec<(TypeId, Name)> = unit
        .types
        .iter()
        .filter(|decl| !decl.alias && spells_int(unit, &decl.def))
        .map(|decl| (program.pool.canonical(decl.ty), decl.name))
        .collect();
    if candidates.is_empty() {
        return EnumTable::default();
    }

    let mut collector = ConstGroups::default();
    collector.visit_unit(unit);
    let specs: Vec<&ValueSpec> = collector
        .groups
        .iter()
        .copied()
        .flat_map(|group| group.specs.iter())
        .collect();

    let mut disqualified = FxHashSet::default();
    for spec in &specs {
        disqualify_line(program, unit, spec, &candidates, &mut disqualified);
    }
    candidates.retain(|(ty, _)| !disqualified.contains(ty));

    let mut members: FxHashMap<TypeId, Vec<ObjectId>> = FxHashMap::default();
    for binding in specs.iter().flat_map(|spec| spec.names.iter()) {
        let Some(ty) = const_type(program, unit, binding.object) else {
            continue;
        };
        if candidates.iter().any(|(candidate, _)| *candidate == ty) {
            members.entry(ty).or_default().push(binding.object);
        }
    }

    let mut table = EnumTable::default();
    for (ty, name) in candidates {
        match members.remove(&ty) {
            Some(members) => {
                tracing::debug!(
                    name = program.interner.lookup(name),
                    members = members.len(),
                    "inferred enum"
                );
                table.push(EnumCandidate { ty, name, members });
            }
            None => tracing::trace!(name = program.interner.lookup(name), "enum has no members"),
        }
    }
    table
}

/// `type T int`: a bare, unqualified spelling of the predeclared `int`.
fn spells_int(unit: &Unit, def: &TypeDef) -> bool {
    let TypeDef::Expr(expr) = def else {
        return false;
    };
    matches!(unit.kind_of(*expr), Some(ExprKind::Ident(Name::INT)))
        && unit.type_of(*expr) == Some(TypeId::INT)
}

fn disqualify_line(
    program: &Program,
    unit: &Unit,
    spec: &ValueSpec,
    candidates: &[(TypeId, Name)],
    disqualified: &mut FxHashSet<TypeId>,
) {
    let offending = spec.names.len() > 1
        || (!spec.values.is_empty()
            && !(spec.values.len() == 1 && is_iota_initializer(unit, spec.values[0])));
    if !offending {
        return;
    }
    for binding in &spec.names {
        let Some(ty) = const_type(program, unit, binding.object) else {
            continue;
        };
        if candidates.iter().any(|(candidate, _)| *candidate == ty) && disqualified.insert(ty) {
            tracing::debug!(
                name = program.interner.lookup(binding.name),
                "line disqualifies enum candidate"
            );
        }
    }
}

/// `iota` or a one-argument conversion `T(iota)`.
fn is_iota_initializer(unit: &Unit, expr: ExprId) -> bool {
    match unit.kind_of(expr) {
        Some(ExprKind::Ident(Name::IOTA)) => true,
        Some(ExprKind::Call { func, args }) => {
            args.len() == 1
                && matches!(unit.kind_of(args[0]), Some(ExprKind::Ident(Name::IOTA)))
                && unit
                    .object_of(*func)
                    .and_then(|object| unit.object(object))
                    .is_some_and(|object| object.kind == ObjectKind::TypeName)
        }
        _ => false,
    }
}

/// Canonical type of a constant object.
fn const_type(program: &Program, unit: &Unit, object: ObjectId) -> Option<TypeId> {
    unit.object(object)
        .filter(|object| object.kind == ObjectKind::Const)
        .map(|object| program.pool.canonical(object.ty))
}

#[cfg(test)]
mod tests;
