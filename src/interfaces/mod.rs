// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod unit_catalog;

pub use unit_catalog::{InMemoryCatalog, UnitCatalog};
