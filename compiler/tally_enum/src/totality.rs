//! Enum switch totality.

use rustc_hash::FxHashSet;
use tally_diagnostic::{Diagnostic, ErrorCode};
use tally_ir::ast::{ExprKind, ObjectId, SwitchStmt};
use tally_ir::visitor::{walk_switch, Visitor};
use tally_ir::{Program, Unit};

use crate::{EnumCandidate, EnumTable};

/// Report every value switch in `unit` over one of its enumerations that
/// leaves a member without an explicit case label.
#[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.path))]
pub fn check_switches(program: &Program, unit: &Unit, enums: &EnumTable) -> Vec<Diagnostic> {
    if enums.is_empty() {
        return Vec::new();
    }
    let mut checker = SwitchChecker {
        program,
        unit,
        enums,
        diagnostics: Vec::new(),
    };
    checker.visit_unit(unit);
    checker.diagnostics
}

struct SwitchChecker<'a> {
    program: &'a Program,
    unit: &'a Unit,
    enums: &'a EnumTable,
    diagnostics: Vec<Diagnostic>,
}

impl<'ast> Visitor<'ast> for SwitchChecker<'_> {
    fn visit_switch(&mut self, switch: &'ast SwitchStmt) {
        self.check(switch);
        walk_switch(self, switch);
    }
}

impl SwitchChecker<'_> {
    fn check(&mut self, switch: &SwitchStmt) {
        let Some(tag) = switch.tag else {
            return;
        };
        let Some(ty) = self.unit.type_of(tag) else {
            return;
        };
        let Some(candidate) = self.enums.get(self.program.pool.canonical(ty)) else {
            return;
        };

        let labeled: FxHashSet<ObjectId> = switch
            .clauses
            .iter()
            .flat_map(|clause| clause.labels().iter())
            .filter(|&&label| matches!(self.unit.kind_of(label), Some(ExprKind::Ident(_))))
            .filter_map(|&label| self.unit.object_of(label))
            .collect();
        let missing: Vec<ObjectId> = candidate
            .members
            .iter()
            .copied()
            .filter(|member| !labeled.contains(member))
            .collect();
        if missing.is_empty() {
            return;
        }

        tracing::debug!(
            span = ?switch.span,
            missing = missing.len(),
            "non-total switch over enum"
        );
        let diagnostic = self.non_total(candidate, &missing, switch);
        self.diagnostics.push(diagnostic);
    }

    fn non_total(
        &self,
        candidate: &EnumCandidate,
        missing: &[ObjectId],
        switch: &SwitchStmt,
    ) -> Diagnostic {
        let names: Vec<&str> = missing
            .iter()
            .map(|&member| {
                self.unit
                    .object(member)
                    .map_or("_", |object| self.program.interner.lookup(object.name))
            })
            .collect();
        let mut diagnostic = Diagnostic::error(ErrorCode::E0001)
            .with_message(format!(
                "{} {}: missing {}",
                ErrorCode::E0001.description(),
                self.program.display_type(candidate.ty),
                names.join(", ")
            ))
            .with_label(switch.span, "switch does not cover every member");
        if switch.clauses.iter().any(|clause| clause.is_default()) {
            diagnostic = diagnostic
                .with_note("a default clause does not make a switch over an enum total");
        }
        if names.contains(&"_") {
            diagnostic =
                diagnostic.with_note("the discard member `_` can never be named in a case label");
        }
        diagnostic
    }
}
