//! Variant-set facts shared between units.

use rustc_hash::FxHashMap;
use tally_ir::{Name, TypeId};
use thiserror::Error;

/// The closed set of concrete types implementing a marker interface.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ClosedVariantSet {
    /// Canonical identity of the marker interface; the fact key.
    pub interface: TypeId,
    pub marker: Name,
    /// Canonical member identities in discovery order.
    pub members: Vec<TypeId>,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FactError {
    #[error("variant set for type {0:?} was already exported")]
    AlreadyExported(TypeId),
}

/// Write-once store of variant sets keyed by interface identity.
#[derive(Clone, Debug, Default)]
pub struct FactStore {
    facts: FxHashMap<TypeId, ClosedVariantSet>,
    order: Vec<TypeId>,
}

impl FactStore {
    pub fn new() -> Self {
        FactStore::default()
    }

    /// Publish a variant set. A key can be exported once; later exports
    /// leave the first fact in place and fail.
    pub fn export(&mut self, set: ClosedVariantSet) -> Result<(), FactError> {
        let key = set.interface;
        if self.facts.contains_key(&key) {
            return Err(FactError::AlreadyExported(key));
        }
        self.facts.insert(key, set);
        self.order.push(key);
        Ok(())
    }

    /// The variant set exported for canonical interface identity `key`.
    pub fn import(&self, key: TypeId) -> Option<&ClosedVariantSet> {
        self.facts.get(&key)
    }

    /// Facts in export order.
    pub fn iter(&self) -> impl Iterator<Item = &ClosedVariantSet> {
        self.order.iter().filter_map(|key| self.facts.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
