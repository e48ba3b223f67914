//! Variant discovery.

use tally_ir::ast::{InterfaceElem, TypeDecl, TypeDef};
use tally_ir::{Name, Program, StringInterner, TypeId, TypeKind, TypePool, Unit};

use crate::ClosedVariantSet;

/// The first marker method declared directly in an interface declaration:
/// a method with a lowercase name, no parameters and no results.
pub fn marker_method(decl: &TypeDecl, interner: &StringInterner) -> Option<Name> {
    let TypeDef::Interface(elems) = &decl.def else {
        return None;
    };
    elems.iter().find_map(|elem| match elem {
        InterfaceElem::Method {
            names,
            params: 0,
            results: 0,
            ..
        } => names.iter().copied().find(|&name| {
            interner
                .lookup(name)
                .starts_with(|c: char| c.is_ascii_lowercase())
        }),
        _ => None,
    })
}

/// Variant sets for every marker interface declared in `unit`.
///
/// Members are drawn from the whole program, so every unit must be in the
/// program before discovery runs.
#[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.path))]
pub fn discover_variants(program: &Program, unit: &Unit) -> Vec<ClosedVariantSet> {
    let mut sets = Vec::new();
    for decl in unit.types.iter().filter(|decl| !decl.alias) {
        let Some(marker) = marker_method(decl, &program.interner) else {
            continue;
        };
        let interface = program.pool.canonical(decl.ty);
        if !program.pool.is_interface(interface) {
            tracing::trace!(
                name = program.interner.lookup(decl.name),
                "marker declaration did not resolve to an interface"
            );
            continue;
        }
        let members = members_of(&program.pool, interface);
        tracing::debug!(
            interface = %program.display_type(interface),
            marker = program.interner.lookup(marker),
            members = members.len(),
            "discovered variant set"
        );
        sets.push(ClosedVariantSet {
            interface,
            marker,
            members,
        });
    }
    sets
}

/// Concrete types assignable to `interface`, one per identity, in pool order.
fn members_of(pool: &TypePool, interface: TypeId) -> Vec<TypeId> {
    let mut members: Vec<TypeId> = Vec::new();
    for (id, kind) in pool.iter() {
        if matches!(kind, TypeKind::Alias { .. })
            || pool.canonical(id) != id
            || pool.is_interface(id)
            || !pool.assignable(id, interface)
        {
            continue;
        }
        let duplicate = members.iter().any(|&member| {
            member == id || (pool.assignable(id, member) && pool.assignable(member, id))
        });
        if !duplicate {
            members.push(id);
        }
    }
    members
}
