use super::*;

fn arena_with(n: u32) -> (ExprArena, Vec<ExprId>) {
    let mut arena = ExprArena::new();
    let ids = (0..n)
        .map(|i| {
            arena.alloc(Expr {
                kind: ExprKind::Int(u64::from(i)),
                span: Span::new(i, i + 1),
                ty: Some(TypeId::INT),
                object: None,
            })
        })
        .collect();
    (arena, ids)
}

#[test]
fn arena_allocates_sequential_ids() {
    let (arena, ids) = arena_with(3);
    assert_eq!(arena.len(), 3);
    assert_eq!(ids[2].raw(), 2);
    let expr = arena.get(ids[1]).unwrap();
    assert_eq!(expr.kind, ExprKind::Int(1));
    assert_eq!(expr.span, Span::new(1, 2));
}

#[test]
fn foreign_ids_are_not_found() {
    let (arena, _) = arena_with(2);
    assert!(arena.get(ExprId::from_raw(2)).is_none());
    assert!(ExprArena::new().get(ExprId::from_raw(0)).is_none());
}

#[test]
fn default_clause_has_no_labels() {
    let (_, ids) = arena_with(2);
    let case = CaseClause {
        kind: ClauseKind::Case(ids.clone()),
        body: Vec::new(),
        span: Span::new(0, 1),
    };
    let default = CaseClause {
        kind: ClauseKind::Default,
        body: Vec::new(),
        span: Span::new(1, 2),
    };
    assert_eq!(case.labels(), ids.as_slice());
    assert!(!case.is_default());
    assert!(default.labels().is_empty());
    assert!(default.is_default());

    let switch = TypeSwitchStmt {
        guard: TypeSwitchGuard::Expr(ids[0]),
        clauses: vec![case, default],
        span: Span::new(5, 9),
    };
    assert!(switch.has_default());
    assert_eq!(switch.span, Span::new(5, 9));
}
