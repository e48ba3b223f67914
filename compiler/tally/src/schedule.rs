//! Pass scheduling.

use rustc_hash::FxHashSet;

use crate::{DriverError, PassId};

/// An ordered list of passes closed over their dependencies.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule {
    passes: Vec<PassId>,
}

impl Schedule {
    /// Every pass.
    pub fn all() -> Self {
        Schedule {
            passes: PassId::ALL.to_vec(),
        }
    }

    /// Schedule the passes named in `selection` and everything they require.
    pub fn new<S: AsRef<str>>(selection: &[S]) -> Result<Self, DriverError> {
        let passes = selection
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                PassId::from_name(name).ok_or_else(|| DriverError::UnknownPass(name.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_passes(&passes))
    }

    /// Schedule `selection` and everything it requires, dependencies first.
    pub fn from_passes(selection: &[PassId]) -> Self {
        let selected: FxHashSet<PassId> = selection.iter().copied().collect();
        let mut order = Vec::new();
        let mut done = FxHashSet::default();
        // Roots are visited in registry order.
        for pass in PassId::ALL.into_iter().filter(|pass| selected.contains(pass)) {
            visit(pass, &mut done, &mut order);
        }
        tracing::debug!(passes = ?order, "scheduled passes");
        Schedule { passes: order }
    }

    pub fn passes(&self) -> &[PassId] {
        &self.passes
    }

    pub fn contains(&self, pass: PassId) -> bool {
        self.passes.contains(&pass)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::all()
    }
}

/// `PassId::requires` only names passes earlier in `PassId::ALL`, so the
/// dependency graph is acyclic.
fn visit(pass: PassId, done: &mut FxHashSet<PassId>, order: &mut Vec<PassId>) {
    if !done.insert(pass) {
        return;
    }
    for &required in pass.requires() {
        visit(required, done, order);
    }
    order.push(pass);
}

#[cfg(test)]
mod tests;
