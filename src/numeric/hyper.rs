// ============================================================================
// Hyperoperations
// Addition → multiplication → exponentiation → tetration → ... with ceilings
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::value::NumericValue;
use crate::domain::config::CalculationConfig;
use num_traits::ToPrimitive;

const LOG10_2: f64 = std::f64::consts::LOG10_2;

/// Generalized hyperoperation `H(base, height, level)` under an explicit
/// configuration.
///
/// - level 0: `base + height`
/// - level 1: `base · height`
/// - level 2: `base ** height`
/// - level ≥ 3: `H(base, 0) = 1`, otherwise `acc = H(base, acc, level - 1)`
///   folded `height` times starting from `acc = 1`
///
/// Recursion depth is bounded by `level`; iteration by `config.max_height`;
/// growth by `config.max_digits`.
///
/// # Errors
/// - `HyperLevelTooHigh` above `config.max_hyper_level`
/// - `NegativeHeight` / `NonIntegralHeight` for an unusable height at level ≥ 3
/// - `HyperCeilingExceeded` when the height or result size passes the ceiling
pub fn hyper_with(
    base: &NumericValue,
    height: &NumericValue,
    level: u32,
    config: &CalculationConfig,
) -> NumericResult<NumericValue> {
    if level > config.max_hyper_level {
        return Err(NumericError::HyperLevelTooHigh {
            level,
            max: config.max_hyper_level,
        });
    }

    match level {
        0 => base.checked_add(height),
        1 => base.checked_mul(height),
        2 => guarded_pow(base, height, config),
        _ => {
            let steps = height_steps(height, config)?;
            let mut acc = NumericValue::ONE;
            for _ in 0..steps {
                acc = if level == 3 {
                    guarded_pow(base, &acc, config)?
                } else {
                    hyper_with(base, &acc, level - 1, config)?
                };
                check_magnitude(&acc, config)?;
            }
            Ok(acc)
        },
    }
}

/// Validate a hyperoperation height and convert it to an iteration count.
fn height_steps(height: &NumericValue, config: &CalculationConfig) -> NumericResult<u64> {
    if height.is_negative() {
        return Err(NumericError::NegativeHeight(height.to_string()));
    }
    let integral = height
        .to_integer()
        .map_err(|_| NumericError::NonIntegralHeight(height.to_string()))?;
    integral
        .to_u64()
        .filter(|steps| *steps <= config.max_height)
        .ok_or_else(|| {
            NumericError::HyperCeilingExceeded(format!(
                "height {integral} exceeds maximum {}",
                config.max_height
            ))
        })
}

/// Exponentiation that refuses results estimated to exceed `max_digits`.
fn guarded_pow(
    base: &NumericValue,
    exponent: &NumericValue,
    config: &CalculationConfig,
) -> NumericResult<NumericValue> {
    // A negative exponent still materialises base ** |exponent| before the reciprocal
    if !exponent.is_zero() {
        let magnitude = base.abs().to_f64().log10().max(0.0);
        let per_step = magnitude + f64::from(base.scale());
        let estimate = exponent.abs().to_f64() * per_step;
        if estimate > config.max_digits as f64 {
            return Err(NumericError::HyperCeilingExceeded(format!(
                "{base} ** {exponent} needs about {estimate:.0} digits, maximum {}",
                config.max_digits
            )));
        }
    }
    base.pow(exponent)
}

fn check_magnitude(value: &NumericValue, config: &CalculationConfig) -> NumericResult<()> {
    let (mantissa, _) = value.mantissa_and_scale()?;
    let digits = (mantissa.bits() as f64 * LOG10_2).ceil() as u64;
    if digits > config.max_digits {
        return Err(NumericError::HyperCeilingExceeded(format!(
            "intermediate result has {digits} digits, maximum {}",
            config.max_digits
        )));
    }
    Ok(())
}

impl NumericValue {
    /// Hyperoperation of the given level using the process-wide configuration.
    pub fn hyper(&self, height: &Self, level: u32) -> NumericResult<Self> {
        hyper_with(self, height, level, &CalculationConfig::current())
    }

    /// Tetration (level 3): iterated exponentiation.
    pub fn tetrate(&self, height: &Self) -> NumericResult<Self> {
        self.hyper(height, 3)
    }

    /// Pentation (level 4): iterated tetration.
    pub fn pentate(&self, height: &Self) -> NumericResult<Self> {
        self.hyper(height, 4)
    }

    /// Hexation (level 5).
    pub fn hexate(&self, height: &Self) -> NumericResult<Self> {
        self.hyper(height, 5)
    }

    /// Heptation (level 6).
    pub fn heptate(&self, height: &Self) -> NumericResult<Self> {
        self.hyper(height, 6)
    }

    /// Octation (level 7).
    pub fn octate(&self, height: &Self) -> NumericResult<Self> {
        self.hyper(height, 7)
    }

    /// Enneation (level 8).
    pub fn enneate(&self, height: &Self) -> NumericResult<Self> {
        self.hyper(height, 8)
    }

    /// Decation (level 9).
    pub fn decate(&self, height: &Self) -> NumericResult<Self> {
        self.hyper(height, 9)
    }
}
