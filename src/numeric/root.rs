// ============================================================================
// Root Extraction
// Newton iteration over the f64 projection of a value
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::value::NumericValue;
use crate::domain::config::CalculationConfig;

/// Relative convergence tolerance for Newton iteration.
pub const ROOT_TOLERANCE: f64 = 1e-12;

/// `degree`-th root of `x` under an explicit configuration.
///
/// Newton's method seeded at `x / degree`. Exact precision is dropped here:
/// the radicand is projected to `f64` and the result is a `Float` value.
/// Iteration stops after `config.root_iterations()` steps or once a step
/// moves less than [`ROOT_TOLERANCE`] relative to the current estimate.
/// A step whose `y^(degree-1)` over- or underflows restarts once from the
/// `powf` estimate.
///
/// # Errors
/// - `InvalidRootDegree` if `degree <= 0`
/// - `NegativeRadicand` if `x < 0`
/// - `NonFinite` if `x` does not fit an `f64` or iteration diverges
pub fn nth_root_with(
    x: &NumericValue,
    degree: i64,
    config: &CalculationConfig,
) -> NumericResult<NumericValue> {
    if degree <= 0 {
        return Err(NumericError::InvalidRootDegree(degree));
    }
    if x.is_negative() {
        return Err(NumericError::NegativeRadicand);
    }

    let radicand = x.to_f64();
    if !radicand.is_finite() {
        return Err(NumericError::NonFinite);
    }
    if radicand == 0.0 {
        return Ok(NumericValue::ZERO);
    }
    if degree == 1 {
        return Ok(x.clone());
    }

    let power = i32::try_from(degree - 1).map_err(|_| NumericError::InvalidRootDegree(degree))?;
    let n = degree as f64;
    let mut y = radicand / n;
    let mut reseeded = false;
    for _ in 0..config.root_iterations() {
        let scaled = y.powi(power);
        let next = ((n - 1.0) * y + radicand / scaled) / n;
        if !(scaled > 0.0 && scaled.is_finite() && next > 0.0 && next.is_finite()) {
            if reseeded {
                return Err(NumericError::NonFinite);
            }
            y = radicand.powf(n.recip());
            reseeded = true;
            continue;
        }

        let delta = (next - y).abs();
        y = next;
        if delta <= ROOT_TOLERANCE * y {
            break;
        }
    }

    if !y.is_finite() {
        return Err(NumericError::NonFinite);
    }
    Ok(NumericValue::Float(y))
}

impl NumericValue {
    /// `degree`-th root using the process-wide configuration.
    pub fn nth_root(&self, degree: i64) -> NumericResult<Self> {
        nth_root_with(self, degree, &CalculationConfig::current())
    }

    /// Square root.
    pub fn sqrt(&self) -> NumericResult<Self> {
        self.nth_root(2)
    }

    /// Cube root.
    pub fn cbrt(&self) -> NumericResult<Self> {
        self.nth_root(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(value: &NumericValue, expected: f64) -> bool {
        (value.to_f64() - expected).abs() < 1e-9
    }

    #[test]
    fn test_square_and_cube_roots() {
        assert!(close(&NumericValue::from(16).sqrt().unwrap(), 4.0));
        assert!(close(&NumericValue::from(2).sqrt().unwrap(), std::f64::consts::SQRT_2));
        assert!(close(&NumericValue::from(27).cbrt().unwrap(), 3.0));
        assert!(close(&"0.25".parse::<NumericValue>().unwrap().sqrt().unwrap(), 0.5));
        assert!(close(&NumericValue::from(1024).nth_root(10).unwrap(), 2.0));
    }

    #[test]
    fn test_trivial_roots() {
        assert!(NumericValue::ZERO.sqrt().unwrap().is_zero());
        let x: NumericValue = "12.5".parse().unwrap();
        assert_eq!(x.nth_root(1).unwrap(), x);
    }

    #[test]
    fn test_root_errors() {
        assert_eq!(
            NumericValue::from(4).nth_root(0),
            Err(NumericError::InvalidRootDegree(0))
        );
        assert_eq!(
            NumericValue::from(4).nth_root(-2),
            Err(NumericError::InvalidRootDegree(-2))
        );
        assert_eq!(
            NumericValue::from(-4).sqrt(),
            Err(NumericError::NegativeRadicand)
        );
        assert_eq!(
            NumericValue::from(f64::INFINITY).sqrt(),
            Err(NumericError::NonFinite)
        );
    }

    #[test]
    fn test_iteration_budget_is_respected() {
        // One Newton step from the seed 16 / 2 = 8 lands on (8 + 16 / 8) / 2 = 5
        let config = CalculationConfig::new().with_precision(1);
        let rough = nth_root_with(&NumericValue::from(16), 2, &config).unwrap();
        assert_eq!(rough.to_f64(), 5.0);
    }

    #[test]
    fn test_large_radicand_converges() {
        let x = NumericValue::from(10).powi(40).unwrap();
        let root = nth_root_with(&x, 2, &CalculationConfig::precise()).unwrap();
        assert!((root.to_f64() / 1e20 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tiny_radicand_converges_relatively() {
        let x: NumericValue = "0.000000000000000000000000000001".parse().unwrap();
        let root = x.sqrt().unwrap();
        assert!((root.to_f64() / 1e-15 - 1.0).abs() < 1e-9, "got {root}");
    }

    #[test]
    fn test_high_degree_roots_recover_from_underflow() {
        let root = NumericValue::from(2).nth_root(1000).unwrap();
        assert!((root.to_f64() / 2f64.powf(0.001) - 1.0).abs() < 1e-12, "got {root}");

        let root = NumericValue::from(1e300).nth_root(100).unwrap();
        assert!((root.to_f64() / 1000.0 - 1.0).abs() < 1e-12, "got {root}");
    }
}
