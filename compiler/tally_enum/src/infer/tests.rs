use super::*;
use pretty_assertions::assert_eq;
use tally_ir::{BasicKind, ProgramBuilder, UnitBuilder};

fn build(f: impl FnOnce(&mut UnitBuilder<'_>)) -> Program {
    let mut program = ProgramBuilder::new();
    let a = program.package("a");
    let mut unit = program.unit(a, "a/a.go");
    f(&mut unit);
    unit.finish();
    program.finish()
}

/// `const ( first T = iota; rest... )`.
fn sequential(unit: &mut UnitBuilder<'_>, ty: TypeId, names: &[&str]) -> Vec<ValueSpec> {
    let mut specs = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let values = if i == 0 { vec![unit.iota()] } else { Vec::new() };
        specs.push(unit.const_spec(&[name], ty, values));
    }
    specs
}

fn infer(program: &Program) -> EnumTable {
    infer_enums(program, &program.units[0])
}

fn enum_names(program: &Program, table: &EnumTable) -> Vec<String> {
    table
        .iter()
        .map(|candidate| program.interner.lookup(candidate.name).to_owned())
        .collect()
}

fn member_names(program: &Program, candidate: &EnumCandidate) -> Vec<String> {
    let unit = &program.units[0];
    candidate
        .members
        .iter()
        .filter_map(|&member| unit.object(member))
        .map(|object| program.interner.lookup(object.name).to_owned())
        .collect()
}

#[test]
fn sequential_group_is_an_enum() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let specs = sequential(unit, foo, &["Foo1", "Foo2", "Foo3"]);
        unit.add_const_group(specs);
    });
    let foo = program.units[0].types[0].ty;

    let table = infer(&program);
    assert_eq!(table.len(), 1);
    let candidate = table.get(foo).unwrap();
    assert_eq!(candidate.ty, foo);
    assert_eq!(member_names(&program, candidate), ["Foo1", "Foo2", "Foo3"]);
}

#[test]
fn conversion_of_iota_qualifies() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let iota = unit.iota();
        let first = unit.conversion(foo, iota);
        let specs = vec![
            unit.const_spec(&["Foo1"], foo, vec![first]),
            unit.const_spec(&["Foo2"], foo, Vec::new()),
        ];
        unit.add_const_group(specs);
    });

    let table = infer(&program);
    assert_eq!(enum_names(&program, &table), ["Foo"]);
    let candidate = table.iter().next().unwrap();
    assert_eq!(member_names(&program, candidate), ["Foo1", "Foo2"]);
}

#[test]
fn literal_initializer_disqualifies() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let mut specs = sequential(unit, foo, &["Foo1", "Foo2"]);
        let seven = unit.int_lit(7);
        specs.push(unit.const_spec(&["Foo3"], foo, vec![seven]));
        unit.add_const_group(specs);
    });

    assert!(infer(&program).is_empty());
}

#[test]
fn arithmetic_on_iota_disqualifies() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let iota = unit.iota();
        let one = unit.int_lit(1);
        let shifted = unit.binary(tally_ir::ast::BinaryOp::Shl, one, iota);
        let specs = vec![unit.const_spec(&["Foo1"], foo, vec![shifted])];
        unit.add_const_group(specs);
    });

    assert!(infer(&program).is_empty());
}

#[test]
fn several_names_on_one_line_disqualify() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let (x, y) = (unit.iota(), unit.iota());
        let specs = vec![unit.const_spec(&["Foo1", "Foo2"], foo, vec![x, y])];
        unit.add_const_group(specs);
    });

    assert!(infer(&program).is_empty());
}

#[test]
fn other_representations_never_qualify() {
    let program = build(|unit| {
        let sized = unit.defined_type("Sized", TypeId::basic(BasicKind::Int8));
        let unsigned = unit.defined_type("Unsigned", TypeId::basic(BasicKind::Uint));
        let text = unit.defined_type("Text", TypeId::STRING);
        let base = unit.defined_type("Base", TypeId::INT);
        let derived = unit.defined_type("Derived", base);
        let alias = unit.alias_type("Alias", TypeId::INT);
        for (ty, name) in [
            (sized, "S1"),
            (unsigned, "U1"),
            (text, "T1"),
            (derived, "D1"),
            (alias, "A1"),
        ] {
            let specs = sequential(unit, ty, &[name]);
            unit.add_const_group(specs);
        }
    });

    assert!(infer(&program).is_empty());
}

#[test]
fn offending_line_only_drops_its_own_candidate() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let bar = unit.defined_type("Bar", TypeId::INT);
        let mut specs = sequential(unit, foo, &["Foo1", "Foo2"]);
        let three = unit.int_lit(3);
        specs.push(unit.const_spec(&["Bar1"], bar, vec![three]));
        unit.add_const_group(specs);
    });

    assert_eq!(enum_names(&program, &infer(&program)), ["Foo"]);
}

#[test]
fn shared_line_drops_every_candidate_named_on_it() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let bar = unit.defined_type("Bar", TypeId::INT);
        let baz = unit.defined_type("Baz", TypeId::INT);
        let (x, y) = (unit.iota(), unit.iota());
        let foo1 = unit.const_spec(&["Foo1"], foo, vec![x]);
        let bar1 = unit.const_spec(&["Bar1"], bar, vec![y]);
        let mut shared = unit.const_spec(&["Foo2"], foo, Vec::new());
        shared.names.extend(bar1.names.iter().copied());
        let baz_specs = sequential(unit, baz, &["Baz1"]);
        unit.add_const_group(vec![foo1, shared]);
        unit.add_const_group(baz_specs);
    });

    assert_eq!(enum_names(&program, &infer(&program)), ["Baz"]);
}

#[test]
fn discard_consumes_a_member_slot() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let specs = sequential(unit, foo, &["_", "Foo1", "Foo2"]);
        unit.add_const_group(specs);
    });

    let table = infer(&program);
    let candidate = table.iter().next().unwrap();
    assert_eq!(member_names(&program, candidate), ["_", "Foo1", "Foo2"]);
}

#[test]
fn candidate_without_constants_is_dropped() {
    let program = build(|unit| {
        unit.defined_type("Foo", TypeId::INT);
    });

    assert!(infer(&program).is_empty());
}

#[test]
fn constants_local_to_a_function_count() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let top = sequential(unit, foo, &["Foo1"]);
        unit.add_const_group(top);
        let local = unit.const_spec(&["Foo2"], foo, Vec::new());
        let group = unit.local_const_group(vec![local]);
        let block = unit.block(vec![group]);
        unit.func("f", vec![block]);
    });

    let table = infer(&program);
    let candidate = table.iter().next().unwrap();
    assert_eq!(member_names(&program, candidate), ["Foo1", "Foo2"]);
}

#[test]
fn inference_is_idempotent() {
    let program = build(|unit| {
        let foo = unit.defined_type("Foo", TypeId::INT);
        let bar = unit.defined_type("Bar", TypeId::INT);
        let foo_specs = sequential(unit, foo, &["Foo1", "Foo2"]);
        let bar_specs = sequential(unit, bar, &["Bar1", "_", "Bar2"]);
        unit.add_const_group(foo_specs);
        unit.add_const_group(bar_specs);
    });

    assert_eq!(infer(&program), infer(&program));
    assert_eq!(enum_names(&program, &infer(&program)), ["Foo", "Bar"]);
}
