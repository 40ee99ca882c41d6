// ============================================================================
// Engine Module
// Contains the dimension registry and unit conversion logic
// ============================================================================

mod compound;
mod conversion;
mod planck;
mod registry;

pub use compound::compound;
pub use conversion::{convert_via_planck, convert_within_dimension, ConversionEngine};
pub use planck::{
    from_planck_count, planck_length, planck_mass, planck_time, planck_unit, to_planck_count,
};
pub use registry::DimensionRegistry;
