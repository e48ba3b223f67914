//! Running scheduled passes over a program.

use rustc_hash::FxHashMap;
use tally_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue};
use tally_enum::EnumTable;
use tally_ir::{Program, Unit, UnitId};
use tally_union::FactStore;

use crate::{CheckConfig, DriverError, Finding, PassId, PassStats, Report, Schedule};

/// Runs a [`Schedule`] over whole programs.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    schedule: Schedule,
    diagnostics: DiagnosticConfig,
}

/// State threaded between passes during one run.
#[derive(Default)]
struct RunState {
    enums: FxHashMap<UnitId, EnumTable>,
    facts: FactStore,
}

impl Driver {
    pub fn new(config: &CheckConfig) -> Result<Self, DriverError> {
        Ok(Driver {
            schedule: config.schedule()?,
            diagnostics: config.diagnostics.clone(),
        })
    }

    pub fn with_schedule(schedule: Schedule, diagnostics: DiagnosticConfig) -> Self {
        Driver {
            schedule,
            diagnostics,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Run every scheduled pass over every unit of `program`.
    ///
    /// Each pass visits all units, in import order, before the next pass
    /// starts. Units the host flagged with type errors are skipped by the
    /// passes that do not run despite errors.
    #[tracing::instrument(level = "debug", skip_all, fields(units = program.units.len()))]
    pub fn run(&self, program: &Program) -> Report {
        let units = program.units_in_dependency_order();
        let mut state = RunState::default();
        let mut queue = DiagnosticQueue::new(self.diagnostics.clone());
        let mut passes = Vec::with_capacity(self.schedule.passes().len());

        for &pass in self.schedule.passes() {
            let _span = tracing::debug_span!("pass", pass = pass.name()).entered();
            let mut stats = PassStats::new(pass);
            for unit in &units {
                if unit.has_errors && !pass.run_despite_errors() {
                    tracing::trace!(unit = %unit.path, "unit has type errors; skipped");
                    stats.units_skipped += 1;
                    continue;
                }
                stats.units_checked += 1;
                let diagnostics = run_pass(pass, program, unit, &mut state);
                stats.diagnostics += diagnostics.len();
                queue.extend(unit.id, diagnostics);
            }
            passes.push(stats);
        }

        let dropped = queue.dropped();
        let findings = queue
            .flush()
            .into_iter()
            .map(|(unit, diagnostic)| Finding {
                unit,
                path: program
                    .unit(unit)
                    .map(|unit| unit.path.clone())
                    .unwrap_or_default(),
                pass: PassId::reporting(diagnostic.code),
                diagnostic,
            })
            .collect();
        Report {
            findings,
            passes,
            facts: state.facts,
            dropped,
        }
    }
}

fn run_pass(
    pass: PassId,
    program: &Program,
    unit: &Unit,
    state: &mut RunState,
) -> Vec<Diagnostic> {
    match pass {
        PassId::EnumInference => {
            let table = tally_enum::infer_enums(program, unit);
            state.enums.insert(unit.id, table);
            Vec::new()
        }
        PassId::EnumTotality => match state.enums.get(&unit.id) {
            Some(table) => tally_enum::check_switches(program, unit, table),
            None => Vec::new(),
        },
        PassId::VariantDiscovery => {
            for set in tally_union::discover_variants(program, unit) {
                if let Err(err) = state.facts.export(set) {
                    tracing::debug!(unit = %unit.path, %err, "ignoring variant set");
                }
            }
            Vec::new()
        }
        PassId::MatchExhaustiveness => {
            tally_union::check_type_switches(program, unit, &state.facts)
        }
    }
}
