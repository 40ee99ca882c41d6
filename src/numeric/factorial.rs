// ============================================================================
// Factorial Family
// n!, derangements and step factorials over big-integer accumulators
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::value::NumericValue;
use crate::domain::config::CalculationConfig;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Validate a factorial operand against the configured ceiling.
fn operand(n: &NumericValue, config: &CalculationConfig) -> NumericResult<u64> {
    let integral = n.to_integer()?;
    if integral.is_negative() {
        return Err(NumericError::NegativeFactorial(n.to_string()));
    }
    integral
        .to_u64()
        .filter(|v| *v <= config.max_factorial_operand)
        .ok_or_else(|| NumericError::OperandTooLarge {
            operand: n.to_string(),
            max: config.max_factorial_operand,
        })
}

/// Product of n, n−step, n−2·step, … while the term exceeds 1.
fn step_product(n: u64, step: u64) -> BigInt {
    let mut acc = BigInt::one();
    let mut term = n;
    while term > 1 {
        acc *= term;
        term = term.saturating_sub(step);
    }
    acc
}

/// `n!` under an explicit configuration.
///
/// # Errors
/// - `NotAnInteger` for fractional operands
/// - `NegativeFactorial` for negative operands
/// - `OperandTooLarge` above `config.max_factorial_operand`
pub fn factorial_with(n: &NumericValue, config: &CalculationConfig) -> NumericResult<NumericValue> {
    let n = operand(n, config)?;
    Ok(NumericValue::integer(step_product(n, 1)))
}

/// Generalized step factorial: `n (n−step) (n−2·step) …`.
///
/// `step = 2` is the double factorial, `3` the triple factorial and so on.
pub fn step_factorial_with(
    n: &NumericValue,
    step: u64,
    config: &CalculationConfig,
) -> NumericResult<NumericValue> {
    if step == 0 {
        return Err(NumericError::InvalidConfig(
            "factorial step must be positive".to_string(),
        ));
    }
    let n = operand(n, config)?;
    Ok(NumericValue::integer(step_product(n, step)))
}

/// Number of derangements of `n` elements (`!n`).
///
/// Built bottom-up: D(0)=1, D(1)=0, D(k)=(k−1)(D(k−1)+D(k−2)).
pub fn subfactorial_with(
    n: &NumericValue,
    config: &CalculationConfig,
) -> NumericResult<NumericValue> {
    let n = operand(n, config)?;
    let len = usize::try_from(n).map_err(|_| NumericError::OperandTooLarge {
        operand: n.to_string(),
        max: config.max_factorial_operand,
    })?;

    let mut table: Vec<BigInt> = Vec::with_capacity(len + 1);
    table.push(BigInt::one());
    table.push(BigInt::zero());
    for k in 2..=len {
        let next = (&table[k - 1] + &table[k - 2]) * (k - 1);
        table.push(next);
    }
    Ok(NumericValue::integer(table.swap_remove(len)))
}

impl NumericValue {
    /// `self!` using the process-wide configuration.
    pub fn factorial(&self) -> NumericResult<Self> {
        factorial_with(self, &CalculationConfig::current())
    }

    /// Derangement count `!self` using the process-wide configuration.
    pub fn subfactorial(&self) -> NumericResult<Self> {
        subfactorial_with(self, &CalculationConfig::current())
    }

    /// Step factorial using the process-wide configuration.
    pub fn step_factorial(&self, step: u64) -> NumericResult<Self> {
        step_factorial_with(self, step, &CalculationConfig::current())
    }

    /// `self!!`
    pub fn double_factorial(&self) -> NumericResult<Self> {
        self.step_factorial(2)
    }

    /// `self!!!`
    pub fn triple_factorial(&self) -> NumericResult<Self> {
        self.step_factorial(3)
    }

    /// `self!!!!`
    pub fn quadruple_factorial(&self) -> NumericResult<Self> {
        self.step_factorial(4)
    }
}
