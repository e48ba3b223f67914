use super::*;
use pretty_assertions::assert_eq;

struct Ctx {
    pool: TypePool,
    interner: StringInterner,
    pkg_a: PackageId,
    pkg_b: PackageId,
}

fn ctx() -> Ctx {
    let mut interner = StringInterner::new();
    let mut pool = TypePool::new();
    let pkg_a = pool.add_package(interner.intern("a"));
    let pkg_b = pool.add_package(interner.intern("b"));
    Ctx {
        pool,
        interner,
        pkg_a,
        pkg_b,
    }
}

impl Ctx {
    fn struct_named(&mut self, name: &str, package: PackageId) -> TypeId {
        let name = self.interner.intern(name);
        let underlying = self.pool.structure(Vec::new());
        let ty = self.pool.named(name, package);
        self.pool.set_underlying(ty, underlying);
        ty
    }

    fn marker_interface(&mut self, name: &str, method: &str, package: PackageId) -> TypeId {
        let name = self.interner.intern(name);
        let method = self.interner.intern(method);
        let iface = self
            .pool
            .interface(vec![MethodSig::new(method, Some(package), Signature::empty())]);
        let ty = self.pool.named(name, package);
        self.pool.set_underlying(ty, iface);
        ty
    }

    fn marker_method(&mut self, on: TypeId, method: &str, package: PackageId, pointer: bool) {
        let method = self.interner.intern(method);
        self.pool.add_method(
            on,
            Method {
                sig: MethodSig::new(method, Some(package), Signature::empty()),
                pointer_receiver: pointer,
            },
        );
    }

    fn alias(&mut self, name: &str, package: PackageId, target: TypeId) -> TypeId {
        let name = self.interner.intern(name);
        self.pool.alias(name, package, target)
    }
}

#[test]
fn basic_types_have_fixed_indices() {
    let pool = TypePool::new();
    for kind in BasicKind::ALL {
        assert_eq!(pool.get(TypeId::basic(kind)), Some(&TypeKind::Basic(kind)));
    }
    assert_eq!(TypeId::INT, TypeId::basic(BasicKind::Int));
    assert_eq!(BasicKind::from_name("uint"), Some(BasicKind::Uint));
    assert_eq!(BasicKind::from_name("integer"), None);
}

#[test]
fn canonical_chases_alias_chains() {
    let mut c = ctx();
    let member = c.struct_named("Member1", c.pkg_a);
    let first = c.alias("Bar1", c.pkg_b, member);
    let second = c.alias("Baz", c.pkg_b, first);
    assert_eq!(c.pool.canonical(second), member);
    assert!(c.pool.identical(first, second));
    assert!(c.pool.is_named(second));
}

#[test]
fn pointer_to_alias_canonicalizes_to_pointer_to_target() {
    let mut c = ctx();
    let member = c.struct_named("Member1", c.pkg_a);
    let alias = c.alias("M", c.pkg_b, member);
    let via_alias = c.pool.pointer(alias);
    let direct = c.pool.pointer(member);
    assert_ne!(via_alias, direct);
    assert_eq!(c.pool.canonical(via_alias), direct);
    assert!(c.pool.identical(via_alias, direct));
}

#[test]
fn alias_of_pointer_is_transparent() {
    let mut c = ctx();
    let member = c.struct_named("Member2", c.pkg_a);
    let ptr = c.pool.pointer(member);
    let alias = c.alias("Bar2", c.pkg_b, ptr);
    assert_eq!(c.pool.canonical(alias), ptr);
}

#[test]
fn pointer_receiver_methods_only_on_pointer() {
    let mut c = ctx();
    let iface = c.marker_interface("Foo", "tag", c.pkg_a);
    let member = c.struct_named("Member1", c.pkg_a);
    c.marker_method(member, "tag", c.pkg_a, true);
    let ptr = c.pool.pointer(member);

    assert!(!c.pool.implements(member, iface));
    assert!(c.pool.implements(ptr, iface));
    assert!(c.pool.assignable(ptr, iface));
    assert!(!c.pool.assignable(iface, ptr));
}

#[test]
fn value_receiver_methods_on_both() {
    let mut c = ctx();
    let iface = c.marker_interface("Foo", "tag", c.pkg_a);
    let member = c.struct_named("Member1", c.pkg_a);
    c.marker_method(member, "tag", c.pkg_a, false);
    let ptr = c.pool.pointer(member);
    assert!(c.pool.implements(member, iface));
    assert!(c.pool.implements(ptr, iface));
}

#[test]
fn unexported_methods_are_package_scoped() {
    let mut c = ctx();
    let iface = c.marker_interface("Foo", "tag", c.pkg_a);
    let outsider = c.struct_named("Outsider", c.pkg_b);
    c.marker_method(outsider, "tag", c.pkg_b, false);
    assert!(!c.pool.implements(outsider, iface));
}

#[test]
fn signatures_must_match() {
    let mut c = ctx();
    let iface = c.marker_interface("Foo", "tag", c.pkg_a);
    let member = c.struct_named("Member1", c.pkg_a);
    let tag = c.interner.intern("tag");
    c.pool.add_method(
        member,
        Method {
            sig: MethodSig::new(
                tag,
                Some(c.pkg_a),
                Signature::new(vec![TypeId::INT], Vec::new()),
            ),
            pointer_receiver: false,
        },
    );
    assert!(!c.pool.implements(member, iface));
}

#[test]
fn interface_satisfies_interface_with_fewer_methods() {
    let mut c = ctx();
    let small = c.marker_interface("Small", "tag", c.pkg_a);
    let tag = c.interner.intern("tag");
    let other = c.interner.intern("Other");
    let big_iface = c.pool.interface(vec![
        MethodSig::new(tag, Some(c.pkg_a), Signature::empty()),
        MethodSig::new(other, None, Signature::empty()),
    ]);
    let big_name = c.interner.intern("Big");
    let big = c.pool.named(big_name, c.pkg_a);
    c.pool.set_underlying(big, big_iface);

    assert!(c.pool.is_interface(big));
    assert!(c.pool.assignable(big, small));
    assert!(!c.pool.assignable(small, big));
}

#[test]
fn structural_types_are_interned() {
    let mut c = ctx();
    let f1 = c.pool.func(Signature::new(vec![TypeId::INT], vec![TypeId::STRING]));
    let f2 = c.pool.func(Signature::new(vec![TypeId::INT], vec![TypeId::STRING]));
    assert_eq!(f1, f2);
    let p1 = c.pool.pointer(TypeId::INT);
    let p2 = c.pool.pointer(TypeId::INT);
    assert_eq!(p1, p2);
}

#[test]
fn named_types_are_never_deduplicated() {
    let mut c = ctx();
    let first = c.struct_named("T", c.pkg_a);
    let second = c.struct_named("T", c.pkg_b);
    assert_ne!(first, second);
    assert!(!c.pool.identical(first, second));
}

#[test]
fn underlying_unwraps_named_chains() {
    let mut c = ctx();
    let inner_name = c.interner.intern("Inner");
    let inner = c.pool.named(inner_name, c.pkg_a);
    c.pool.set_underlying(inner, TypeId::INT);
    let outer_name = c.interner.intern("Outer");
    let outer = c.pool.named(outer_name, c.pkg_a);
    c.pool.set_underlying(outer, inner);
    assert_eq!(c.pool.underlying(outer), TypeId::INT);

    let pending_name = c.interner.intern("Pending");
    let pending = c.pool.named(pending_name, c.pkg_a);
    assert!(c.pool.underlying(pending).is_none());
    assert!(!c.pool.is_interface(pending));
}

#[test]
fn display_is_package_qualified() {
    let mut c = ctx();
    let member = c.struct_named("Member1", c.pkg_a);
    let ptr = c.pool.pointer(member);
    let alias = c.alias("Bar1", c.pkg_b, ptr);
    assert_eq!(c.pool.display(ptr, &c.interner), "*a.Member1");
    assert_eq!(c.pool.display(alias, &c.interner), "b.Bar1");
    assert_eq!(
        c.pool.display(c.pool.canonical(alias), &c.interner),
        "*a.Member1"
    );
    let f = c.pool.func(Signature::new(
        vec![TypeId::INT, TypeId::STRING],
        vec![TypeId::INT, TypeId::STRING],
    ));
    assert_eq!(
        c.pool.display(f, &c.interner),
        "func(int, string) (int, string)"
    );
    assert_eq!(c.pool.display(TypeId::NONE, &c.interner), "<invalid>");
}
