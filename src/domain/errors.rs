// ============================================================================
// Unit Errors
// Failures while constructing or composing units
// ============================================================================

use crate::numeric::NumericError;
use thiserror::Error;

/// Errors raised by unit construction and composition.
///
/// Conversion between incompatible units is not an error: those requests
/// return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Scale of zero would make every conversion divide by zero
    #[error("unit {symbol} has a zero scale")]
    ZeroScale { symbol: String },

    /// Units with an offset cannot be multiplied together
    #[error("affine unit {symbol} cannot be part of a compound unit")]
    AffineComponent { symbol: String },

    /// Compound unit built from nothing
    #[error("compound unit needs at least one component")]
    EmptyCompound,

    /// Custom dimension used before registration
    #[error("custom dimension {id:?} is not registered")]
    UnregisteredDimension { id: String },

    /// Arithmetic failure while deriving scale or offset
    #[error(transparent)]
    Numeric(#[from] NumericError),
}

/// Result type alias for unit operations
pub type UnitResult<T> = Result<T, UnitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            UnitError::AffineComponent {
                symbol: "°C".to_string()
            }
            .to_string(),
            "affine unit °C cannot be part of a compound unit"
        );
        assert_eq!(
            UnitError::from(NumericError::DivisionByZero).to_string(),
            "division by zero"
        );
    }
}
