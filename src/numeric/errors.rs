// ============================================================================
// Numeric Errors
// Error taxonomy for exact arithmetic, hyperoperations and root extraction
// ============================================================================

use thiserror::Error;

/// Broad category of a [`NumericError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operand outside the mathematical domain of the operation
    Domain,
    /// Arithmetic failure (zero divisor, unusable exponent, non-finite input)
    Arithmetic,
    /// Operation parameters outside the configured limits
    Configuration,
    /// Literal could not be parsed
    Parse,
}

/// Errors that can occur during numeric operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// Root degree was zero or negative
    #[error("invalid root degree {0}: degree must be positive")]
    InvalidRootDegree(i64),
    /// Root requested of a negative number
    #[error("cannot take the root of a negative number")]
    NegativeRadicand,
    /// Factorial family called with a negative operand
    #[error("factorial is undefined for negative operand {0}")]
    NegativeFactorial(String),

    /// Attempted division (or remainder) by zero
    #[error("division by zero")]
    DivisionByZero,
    /// Exponent has a fractional part
    #[error("exponent must be an integer, got {0}")]
    NonIntegralExponent(String),
    /// Exponent or resulting scale does not fit a machine word
    #[error("exponent overflow: {0}")]
    ExponentOverflow(String),
    /// NaN or infinite float payload
    #[error("non-finite floating point value")]
    NonFinite,
    /// Integer operand required
    #[error("expected an integer, got {0}")]
    NotAnInteger(String),
    /// Conversion would lose significant digits
    #[error("precision loss: {0}")]
    PrecisionLoss(String),

    /// Hyperoperation height has a fractional part
    #[error("hyperoperation height must be an integer, got {0}")]
    NonIntegralHeight(String),
    /// Hyperoperation height is negative
    #[error("hyperoperation height must be non-negative, got {0}")]
    NegativeHeight(String),
    /// Hyperoperation level above the configured maximum
    #[error("hyperoperation level {level} exceeds configured maximum {max}")]
    HyperLevelTooHigh { level: u32, max: u32 },
    /// Intermediate result would outgrow the configured ceiling
    #[error("hyperoperation ceiling exceeded: {0}")]
    HyperCeilingExceeded(String),
    /// Operand above the configured maximum for the operation
    #[error("operand {operand} exceeds configured maximum {max}")]
    OperandTooLarge { operand: String, max: u64 },
    /// Calculation configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input string is not a decimal literal
    #[error("invalid numeric literal: {0:?}")]
    InvalidLiteral(String),
}

impl NumericError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NumericError::InvalidRootDegree(_)
            | NumericError::NegativeRadicand
            | NumericError::NegativeFactorial(_) => ErrorKind::Domain,
            NumericError::DivisionByZero
            | NumericError::NonIntegralExponent(_)
            | NumericError::ExponentOverflow(_)
            | NumericError::NonFinite
            | NumericError::NotAnInteger(_)
            | NumericError::PrecisionLoss(_) => ErrorKind::Arithmetic,
            NumericError::NonIntegralHeight(_)
            | NumericError::NegativeHeight(_)
            | NumericError::HyperLevelTooHigh { .. }
            | NumericError::HyperCeilingExceeded(_)
            | NumericError::OperandTooLarge { .. }
            | NumericError::InvalidConfig(_) => ErrorKind::Configuration,
            NumericError::InvalidLiteral(_) => ErrorKind::Parse,
        }
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
