// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod dimension;
pub mod errors;
pub mod unit;

pub use config::{with_config, AngleMode, CalculationConfig, ConfigGuard, MAX_ROOT_ITERATIONS};
pub use dimension::{BaseAxis, CustomDimension, Dimension, DimensionVector, StandardDimension};
pub use errors::{UnitError, UnitResult};
pub use unit::{KindPolicy, NumericKind, Unit, UnitBuilder, UnitValue};
