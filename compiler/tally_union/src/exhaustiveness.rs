//! Type switch exhaustiveness over closed variant sets.
//!
//! Only two guard shapes are checked, `switch x.(type)` and
//! `switch v := x.(type)`, and only when `x` is a plain identifier whose
//! static type is a named marker interface with an exported fact. Anything
//! else is skipped silently.

use tally_diagnostic::{Diagnostic, ErrorCode};
use tally_ir::ast::{ExprId, ExprKind, TypeSwitchGuard, TypeSwitchStmt};
use tally_ir::visitor::{walk_type_switch, Visitor};
use tally_ir::{Program, TypeId, Unit};

use crate::{ClosedVariantSet, FactStore};

/// Report every type switch in `unit` over a marker interface that
/// neither labels each variant nor has a default clause.
#[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.path))]
pub fn check_type_switches(program: &Program, unit: &Unit, facts: &FactStore) -> Vec<Diagnostic> {
    let mut checker = TypeSwitchChecker {
        program,
        unit,
        facts,
        diagnostics: Vec::new(),
    };
    checker.visit_unit(unit);
    checker.diagnostics
}

struct TypeSwitchChecker<'a> {
    program: &'a Program,
    unit: &'a Unit,
    facts: &'a FactStore,
    diagnostics: Vec<Diagnostic>,
}

impl<'ast> Visitor<'ast> for TypeSwitchChecker<'_> {
    fn visit_type_switch(&mut self, switch: &'ast TypeSwitchStmt) {
        self.check(switch);
        walk_type_switch(self, switch);
    }
}

impl TypeSwitchChecker<'_> {
    fn check(&mut self, switch: &TypeSwitchStmt) {
        let Some(subject) = self.subject(switch) else {
            tracing::trace!(span = ?switch.span, "unsupported type switch guard");
            return;
        };
        let Some(ty) = self.unit.type_of(subject) else {
            return;
        };
        let pool = &self.program.pool;
        let ty = pool.canonical(ty);
        if !pool.is_named(ty) {
            return;
        }
        let Some(set) = self.facts.import(ty) else {
            tracing::debug!(
                ty = %self.program.display_type(ty),
                "no variant set; not a variant dispatch"
            );
            return;
        };
        if !pool.identical(set.interface, ty) {
            return;
        }
        if switch.has_default() {
            tracing::trace!(span = ?switch.span, "default clause covers remaining variants");
            return;
        }

        let labeled: Vec<TypeId> = switch
            .clauses
            .iter()
            .flat_map(|clause| clause.labels().iter())
            .filter_map(|&label| self.unit.type_of(label))
            .map(|label| pool.canonical(label))
            .collect();
        let missing: Vec<TypeId> = set
            .members
            .iter()
            .copied()
            .filter(|&member| !labeled.iter().any(|&label| pool.identical(label, member)))
            .collect();
        if missing.is_empty() {
            return;
        }

        tracing::debug!(
            span = ?switch.span,
            missing = missing.len(),
            "non-total type switch over union"
        );
        let diagnostic = self.non_total(set, &missing, switch);
        self.diagnostics.push(diagnostic);
    }

    /// The identifier asserted on by the guard.
    fn subject(&self, switch: &TypeSwitchStmt) -> Option<ExprId> {
        let assert = match &switch.guard {
            TypeSwitchGuard::Expr(expr) => *expr,
            TypeSwitchGuard::Assign { rhs, .. } if rhs.len() == 1 => rhs[0],
            TypeSwitchGuard::Assign { .. } => return None,
        };
        let Some(&ExprKind::TypeAssert { base, ty: None }) = self.unit.kind_of(assert) else {
            return None;
        };
        matches!(self.unit.kind_of(base), Some(ExprKind::Ident(_))).then_some(base)
    }

    fn non_total(
        &self,
        set: &ClosedVariantSet,
        missing: &[TypeId],
        switch: &TypeSwitchStmt,
    ) -> Diagnostic {
        let names: Vec<String> = missing
            .iter()
            .map(|&member| self.program.display_type(member))
            .collect();
        Diagnostic::error(ErrorCode::E0002)
            .with_message(format!(
                "{} {}: missing {}",
                ErrorCode::E0002.description(),
                self.program.display_type(set.interface),
                names.join(", ")
            ))
            .with_label(switch.span, "type switch does not handle every variant")
            .with_note("add the missing cases or a default clause")
    }
}
