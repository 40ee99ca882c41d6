// ============================================================================
// Planck Normalisation
// Expresses SI magnitudes as counts of Planck base units
// ============================================================================
//
// A quantity with exponent vector (a, b, c) has Planck unit lP^a · mP^b · tP^c.
// Counts are computed as si · den / num where num collects the positive powers
// and den the negative ones, so each conversion performs a single division.

use super::conversion::ensure_finite;
use crate::domain::{DimensionVector, Unit};
use crate::numeric::{NumericResult, NumericValue};

/// Planck length in metres (CODATA 2018): 1.616255e-35
pub fn planck_length() -> NumericValue {
    NumericValue::decimal(1_616_255, 41)
}

/// Planck mass in kilograms (CODATA 2018): 2.176434e-8
pub fn planck_mass() -> NumericValue {
    NumericValue::decimal(2_176_434, 14)
}

/// Planck time in seconds (CODATA 2018): 5.391247e-44
pub fn planck_time() -> NumericValue {
    NumericValue::decimal(5_391_247, 50)
}

/// Numerator and denominator of the Planck unit for `vector`.
fn planck_factors(vector: DimensionVector) -> NumericResult<(NumericValue, NumericValue)> {
    let mut numerator = NumericValue::ONE;
    let mut denominator = NumericValue::ONE;

    for (base, exponent) in [
        (planck_length(), vector.length),
        (planck_mass(), vector.mass),
        (planck_time(), vector.time),
    ] {
        if exponent > 0 {
            numerator = numerator.checked_mul(&base.powi(i64::from(exponent))?)?;
        } else if exponent < 0 {
            denominator = denominator.checked_mul(&base.powi(-i64::from(exponent))?)?;
        }
    }

    Ok((numerator, denominator))
}

/// Planck unit value for an exponent vector, e.g. `lP/tP` for a speed.
pub fn planck_unit(vector: DimensionVector) -> NumericResult<NumericValue> {
    let (numerator, denominator) = planck_factors(vector)?;
    numerator.checked_div(&denominator)
}

fn count_from_si(si: &NumericValue, vector: DimensionVector) -> NumericResult<NumericValue> {
    let (numerator, denominator) = planck_factors(vector)?;
    si.checked_mul(&denominator)?.checked_div(&numerator)
}

fn si_from_count(count: &NumericValue, vector: DimensionVector) -> NumericResult<NumericValue> {
    let (numerator, denominator) = planck_factors(vector)?;
    count.checked_mul(&numerator)?.checked_div(&denominator)
}

/// Magnitude of `value` (in `unit`) as a count of Planck units.
///
/// Returns `Ok(None)` when the unit has no exponent vector.
///
/// # Errors
/// `NonFinite` for a NaN or infinite input, or any arithmetic failure.
pub fn to_planck_count(value: &NumericValue, unit: &Unit) -> NumericResult<Option<NumericValue>> {
    ensure_finite(value)?;
    let Some(vector) = unit.exponents() else {
        return Ok(None);
    };
    let si = unit.to_si(value)?;
    count_from_si(&si, vector).map(Some)
}

/// Magnitude in `unit` of `count` Planck units.
pub fn from_planck_count(count: &NumericValue, unit: &Unit) -> NumericResult<Option<NumericValue>> {
    ensure_finite(count)?;
    let Some(vector) = unit.exponents() else {
        return Ok(None);
    };
    let si = si_from_count(count, vector)?;
    unit.from_si(&si).map(Some)
}
