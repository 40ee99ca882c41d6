// ============================================================================
// Dimension Registry
// Runtime mapping from custom dimension ids to minimal exponent vectors
// ============================================================================

use crate::domain::{CustomDimension, Dimension, DimensionVector};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::LazyLock;

static GLOBAL: LazyLock<DimensionRegistry> = LazyLock::new(DimensionRegistry::new);

/// Thread-safe store of custom dimension exponent vectors.
///
/// Standard dimensions never touch the map; their vectors come from
/// [`StandardDimension::minimal_exponents`](crate::domain::StandardDimension::minimal_exponents).
/// Register every custom dimension before building the units that use it:
/// units snapshot their vector at construction.
#[derive(Debug, Default)]
pub struct DimensionRegistry {
    /// Custom dimension id → exponent vector
    entries: RwLock<HashMap<String, DimensionVector>>,
}

impl DimensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide registry
    pub fn global() -> &'static DimensionRegistry {
        &GLOBAL
    }

    /// Register (or replace) the vector for a custom dimension.
    ///
    /// Returns the previously registered vector, if any.
    pub fn register(
        &self,
        dimension: &CustomDimension,
        vector: DimensionVector,
    ) -> Option<DimensionVector> {
        let previous = self.entries.write().insert(dimension.id.clone(), vector);
        tracing::debug!(
            id = %dimension.id,
            %vector,
            replaced = previous.is_some(),
            "custom dimension registered"
        );
        previous
    }

    /// Remove a custom dimension, returning its vector if it was registered.
    pub fn unregister(&self, dimension: &CustomDimension) -> Option<DimensionVector> {
        let removed = self.entries.write().remove(&dimension.id);
        tracing::debug!(
            id = %dimension.id,
            found = removed.is_some(),
            "custom dimension unregistered"
        );
        removed
    }

    /// Exponent vector for any dimension.
    ///
    /// Standard dimensions resolve without locking; custom dimensions need a
    /// prior registration.
    pub fn lookup(&self, dimension: &Dimension) -> Option<DimensionVector> {
        match dimension {
            Dimension::Standard(standard) => standard.minimal_exponents(),
            Dimension::Custom(custom) => self.lookup_id(&custom.id),
        }
    }

    /// Exponent vector for a custom dimension id.
    pub fn lookup_id(&self, id: &str) -> Option<DimensionVector> {
        self.entries.read().get(id).copied()
    }

    pub fn contains(&self, dimension: &CustomDimension) -> bool {
        self.entries.read().contains_key(&dimension.id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Registered ids in sorted order.
    pub fn registered_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StandardDimension;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_register_and_lookup() {
        let registry = DimensionRegistry::new();
        let flux = CustomDimension::new("flux");
        assert!(registry.is_empty());
        assert_eq!(registry.lookup(&Dimension::from(flux.clone())), None);

        assert_eq!(registry.register(&flux, DimensionVector::new(1, 0, -2)), None);
        assert_eq!(
            registry.register(&flux, DimensionVector::new(2, 0, -2)),
            Some(DimensionVector::new(1, 0, -2))
        );
        assert_eq!(
            registry.lookup(&Dimension::from(flux.clone())),
            Some(DimensionVector::new(2, 0, -2))
        );
        assert!(registry.contains(&flux));
        assert_eq!(registry.len(), 1);

        assert_eq!(
            registry.unregister(&flux),
            Some(DimensionVector::new(2, 0, -2))
        );
        assert_eq!(registry.unregister(&flux), None);
        assert!(!registry.contains(&flux));
    }

    #[test]
    fn test_standard_lookup_is_pure() {
        let registry = DimensionRegistry::new();
        assert_eq!(
            registry.lookup(&Dimension::from(StandardDimension::Energy)),
            Some(DimensionVector::new(2, 1, -2))
        );
        assert_eq!(
            registry.lookup(&Dimension::from(StandardDimension::Temperature)),
            None
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registered_ids_sorted() {
        let registry = DimensionRegistry::new();
        for id in ["zeta", "alpha", "mu"] {
            registry.register(&CustomDimension::new(id), DimensionVector::DIMENSIONLESS);
        }
        assert_eq!(registry.registered_ids(), vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn test_global_registry_is_shared() {
        let dimension = CustomDimension::new("registry-test-global-shared");
        DimensionRegistry::global().register(&dimension, DimensionVector::new(0, 2, 0));
        assert_eq!(
            DimensionRegistry::global().lookup_id("registry-test-global-shared"),
            Some(DimensionVector::new(0, 2, 0))
        );
        DimensionRegistry::global().unregister(&dimension);
    }

    #[test]
    fn test_concurrent_access() {
        let registry = Arc::new(DimensionRegistry::new());

        thread::scope(|scope| {
            for worker in 0..8 {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    for i in 0..100 {
                        let dimension = CustomDimension::new(format!("w{worker}-d{i}"));
                        registry.register(&dimension, DimensionVector::new(worker, i, 0));
                        assert_eq!(
                            registry.lookup_id(&dimension.id),
                            Some(DimensionVector::new(worker, i, 0))
                        );
                    }
                });
            }
        });

        assert_eq!(registry.len(), 800);
    }
}
