// ============================================================================
// Arithmetic Engine
// Scale alignment, exact + - * / %, comparison and integer exponentiation
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::value::{pow10, NumericValue};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

/// Extra fractional digits a quotient carries beyond its operands' scale.
pub const DIVISION_PRECISION: u32 = 10;

/// Bring two values to a common scale.
///
/// Returns `(mantissa_a, mantissa_b, common_scale)`; the operand with the
/// smaller scale has its mantissa multiplied by 10^|Δscale|.
///
/// # Errors
/// Returns `NonFinite` if either operand is a NaN or infinite float.
pub fn align(a: &NumericValue, b: &NumericValue) -> NumericResult<(BigInt, BigInt, u32)> {
    let (ma, sa) = a.mantissa_and_scale()?;
    let (mb, sb) = b.mantissa_and_scale()?;
    Ok(match sa.cmp(&sb) {
        Ordering::Equal => (ma, mb, sa),
        Ordering::Less => (ma * pow10(sb - sa), mb, sb),
        Ordering::Greater => (ma, mb * pow10(sa - sb), sa),
    })
}

impl NumericValue {
    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition at the common scale.
    #[inline]
    pub fn checked_add(&self, rhs: &Self) -> NumericResult<Self> {
        if let (NumericValue::Int(a), NumericValue::Int(b)) = (self, rhs) {
            if let Some(sum) = a.checked_add(*b) {
                return Ok(NumericValue::Int(sum));
            }
        }
        let (a, b, scale) = align(self, rhs)?;
        Ok(Self::from_parts(a + b, scale))
    }

    /// Checked subtraction at the common scale.
    #[inline]
    pub fn checked_sub(&self, rhs: &Self) -> NumericResult<Self> {
        if let (NumericValue::Int(a), NumericValue::Int(b)) = (self, rhs) {
            if let Some(diff) = a.checked_sub(*b) {
                return Ok(NumericValue::Int(diff));
            }
        }
        let (a, b, scale) = align(self, rhs)?;
        Ok(Self::from_parts(a - b, scale))
    }

    /// Checked multiplication. The result scale is the sum of the operand
    /// scales, so no digits are lost.
    #[inline]
    pub fn checked_mul(&self, rhs: &Self) -> NumericResult<Self> {
        if let (NumericValue::Int(a), NumericValue::Int(b)) = (self, rhs) {
            if let Some(product) = a.checked_mul(*b) {
                return Ok(NumericValue::Int(product));
            }
        }
        let (ma, sa) = self.mantissa_and_scale()?;
        let (mb, sb) = rhs.mantissa_and_scale()?;
        let scale = sa
            .checked_add(sb)
            .ok_or_else(|| NumericError::ExponentOverflow(format!("scale {sa} + {sb}")))?;
        Ok(Self::from_parts(ma * mb, scale))
    }

    /// Checked division with [`DIVISION_PRECISION`] extra digits.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    #[inline]
    pub fn checked_div(&self, rhs: &Self) -> NumericResult<Self> {
        self.checked_div_with_precision(rhs, DIVISION_PRECISION)
    }

    /// Checked division carrying `precision` digits beyond the larger
    /// operand scale. The quotient is truncated toward zero.
    pub fn checked_div_with_precision(&self, rhs: &Self, precision: u32) -> NumericResult<Self> {
        let (ma, sa) = self.mantissa_and_scale()?;
        let (mb, sb) = rhs.mantissa_and_scale()?;
        if mb.is_zero() {
            return Err(NumericError::DivisionByZero);
        }

        let target = sa
            .max(sb)
            .checked_add(precision)
            .ok_or_else(|| NumericError::ExponentOverflow(format!("quotient scale {sa}/{sb}")))?;
        // (ma·10^-sa) / (mb·10^-sb) · 10^target = ma · 10^(target - sa + sb) / mb
        let shift = u32::try_from(u64::from(target - sa) + u64::from(sb))
            .map_err(|_| NumericError::ExponentOverflow(format!("quotient shift {target}")))?;

        Ok(Self::from_parts(ma * pow10(shift) / mb, target))
    }

    /// Checked remainder at the common scale. The sign follows the dividend.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    #[inline]
    pub fn checked_rem(&self, rhs: &Self) -> NumericResult<Self> {
        let (a, b, scale) = align(self, rhs)?;
        if b.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::from_parts(a % b, scale))
    }

    /// Raise to an integral exponent.
    ///
    /// # Errors
    /// - `NonIntegralExponent` if `exponent` has a fractional part
    /// - `ExponentOverflow` if it does not fit a machine word
    /// - `DivisionByZero` for zero raised to a negative power
    pub fn pow(&self, exponent: &Self) -> NumericResult<Self> {
        let integral = exponent
            .to_integer()
            .map_err(|_| NumericError::NonIntegralExponent(exponent.to_string()))?;
        let e = integral
            .to_i64()
            .ok_or_else(|| NumericError::ExponentOverflow(format!("exponent {integral}")))?;
        self.powi(e)
    }

    /// Raise to a machine-integer exponent.
    ///
    /// Negative exponents yield the reciprocal of the positive power.
    pub fn powi(&self, exponent: i64) -> NumericResult<Self> {
        let magnitude = u32::try_from(exponent.unsigned_abs()).map_err(|_| {
            NumericError::ExponentOverflow(format!("exponent {exponent} exceeds 32 bits"))
        })?;
        let (mantissa, scale) = self.mantissa_and_scale()?;
        let scale = scale.checked_mul(magnitude).ok_or_else(|| {
            NumericError::ExponentOverflow(format!("scale {scale} × exponent {magnitude}"))
        })?;

        let power = Self::from_parts(mantissa.pow(magnitude), scale);
        if exponent >= 0 {
            Ok(power)
        } else {
            Self::ONE.checked_div(&power)
        }
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Exact comparison after scale alignment.
    ///
    /// # Errors
    /// Returns `NonFinite` if either side is a NaN or infinite float.
    pub fn cmp_exact(&self, other: &Self) -> NumericResult<Ordering> {
        if let (NumericValue::Int(a), NumericValue::Int(b)) = (self, other) {
            return Ok(a.cmp(b));
        }
        let (a, b, _) = align(self, other)?;
        Ok(a.cmp(&b))
    }

    /// Returns the smaller of two values.
    pub fn min_exact(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Returns the larger of two values.
    pub fn max_exact(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp_exact(other), Ok(Ordering::Equal))
    }
}

impl PartialOrd for NumericValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.cmp_exact(other).ok()
    }
}

impl Neg for &NumericValue {
    type Output = NumericValue;

    fn neg(self) -> NumericValue {
        match self {
            NumericValue::Int(v) => match v.checked_neg() {
                Some(n) => NumericValue::Int(n),
                None => NumericValue::BigInt(-BigInt::from(*v)),
            },
            NumericValue::Float(f) => NumericValue::Float(-f),
            NumericValue::BigInt(v) => NumericValue::BigInt(-v),
            NumericValue::Decimal { mantissa, scale } => NumericValue::Decimal {
                mantissa: -mantissa,
                scale: *scale,
            },
        }
    }
}

impl Neg for NumericValue {
    type Output = NumericValue;

    #[inline]
    fn neg(self) -> NumericValue {
        -&self
    }
}

// Infallible operators for ergonomics (panic on error - use checked_* in production)
macro_rules! forward_binop {
    (
        $Trait:ident,
        $method:ident,
        $Assign:ident,
        $assign_method:ident,
        $checked:ident,
        $op:literal
    ) => {
        impl $Trait<&NumericValue> for &NumericValue {
            type Output = NumericValue;

            #[inline]
            fn $method(self, rhs: &NumericValue) -> NumericValue {
                self.$checked(rhs)
                    .unwrap_or_else(|err| panic!("NumericValue {} failed: {}", $op, err))
            }
        }

        impl $Trait<NumericValue> for NumericValue {
            type Output = NumericValue;

            #[inline]
            fn $method(self, rhs: NumericValue) -> NumericValue {
                $Trait::$method(&self, &rhs)
            }
        }

        impl $Trait<&NumericValue> for NumericValue {
            type Output = NumericValue;

            #[inline]
            fn $method(self, rhs: &NumericValue) -> NumericValue {
                $Trait::$method(&self, rhs)
            }
        }

        impl $Trait<NumericValue> for &NumericValue {
            type Output = NumericValue;

            #[inline]
            fn $method(self, rhs: NumericValue) -> NumericValue {
                $Trait::$method(self, &rhs)
            }
        }

        impl $Assign<&NumericValue> for NumericValue {
            #[inline]
            fn $assign_method(&mut self, rhs: &NumericValue) {
                *self = $Trait::$method(&*self, rhs);
            }
        }

        impl $Assign<NumericValue> for NumericValue {
            #[inline]
            fn $assign_method(&mut self, rhs: NumericValue) {
                *self = $Trait::$method(&*self, &rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, checked_add, "addition");
forward_binop!(Sub, sub, SubAssign, sub_assign, checked_sub, "subtraction");
forward_binop!(Mul, mul, MulAssign, mul_assign, checked_mul, "multiplication");
forward_binop!(Div, div, DivAssign, div_assign, checked_div, "division");
forward_binop!(Rem, rem, RemAssign, rem_assign, checked_rem, "remainder");

// ============================================================================
// Tests
// ============================================================================
