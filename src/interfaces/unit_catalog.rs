// ============================================================================
// Unit Catalog Interface
// Defines the contract for resolving unit symbols
// ============================================================================

use crate::domain::{Dimension, Unit};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Source of units addressed by symbol.
/// Implementations can be static tables, user-defined sets, databases, etc.
pub trait UnitCatalog: Send + Sync {
    /// Unit registered under `symbol`
    fn unit(&self, symbol: &str) -> Option<Unit>;

    /// All known units
    fn units(&self) -> Vec<Unit>;

    /// Units tagged with `dimension`
    fn units_in(&self, dimension: &Dimension) -> Vec<Unit> {
        self.units()
            .into_iter()
            .filter(|unit| unit.dimension() == dimension)
            .collect()
    }
}

/// Mutable catalog held in memory, keyed by symbol
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    units: RwLock<HashMap<String, Unit>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with `units`; later symbols replace earlier ones.
    pub fn with_units(units: impl IntoIterator<Item = Unit>) -> Self {
        let catalog = Self::new();
        for unit in units {
            catalog.insert(unit);
        }
        catalog
    }

    /// Insert a unit, returning the one it replaced.
    pub fn insert(&self, unit: Unit) -> Option<Unit> {
        let previous = self.units.write().insert(unit.symbol().to_string(), unit);
        if let Some(replaced) = &previous {
            tracing::debug!(symbol = replaced.symbol(), "unit replaced in catalog");
        }
        previous
    }

    pub fn remove(&self, symbol: &str) -> Option<Unit> {
        self.units.write().remove(symbol)
    }

    pub fn len(&self) -> usize {
        self.units.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.read().is_empty()
    }
}

impl UnitCatalog for InMemoryCatalog {
    fn unit(&self, symbol: &str) -> Option<Unit> {
        self.units.read().get(symbol).cloned()
    }

    /// Sorted by symbol
    fn units(&self) -> Vec<Unit> {
        let mut units: Vec<Unit> = self.units.read().values().cloned().collect();
        units.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        units
    }
}
