// ============================================================================
// Numeric Value
// Exact tagged numeric representation: native, big-integer and scaled decimal
// ============================================================================

use super::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exact numeric value.
///
/// A closed sum over the four representations the kernel works with. The
/// scaled form stores `mantissa × 10^-scale`; `scale` is unsigned so it can
/// never describe a negative exponent.
///
/// Equality and ordering align both operands to a common scale and compare
/// mantissas exactly, so `"1.0"`, `"1"` and `1_i64` are all equal. Float
/// payloads take part through their shortest round-trip decimal string.
///
/// # Example
/// ```
/// use exact_units::numeric::NumericValue;
///
/// let a: NumericValue = "1.0".parse().unwrap();
/// let b = NumericValue::from(1);
/// assert_eq!(a, b);
///
/// let third = NumericValue::from(1).checked_div(&NumericValue::from(3)).unwrap();
/// assert_eq!(third.to_string(), "0.3333333333");
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericValue {
    /// Native machine integer
    Int(i64),
    /// Native binary float
    Float(f64),
    /// Arbitrary-precision integer
    BigInt(BigInt),
    /// Arbitrary-precision mantissa with an implied decimal point
    Decimal { mantissa: BigInt, scale: u32 },
}

/// Compute 10^n as a big integer
pub(crate) fn pow10(n: u32) -> BigInt {
    BigInt::from(10u32).pow(n)
}

impl NumericValue {
    /// Zero value
    pub const ZERO: Self = NumericValue::Int(0);

    /// One
    pub const ONE: Self = NumericValue::Int(1);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a scaled decimal from its mantissa and scale.
    ///
    /// `decimal(12345, 2)` is `123.45`. The value keeps the `Decimal`
    /// representation even when `scale` is zero.
    pub fn decimal(mantissa: impl Into<BigInt>, scale: u32) -> Self {
        NumericValue::Decimal {
            mantissa: mantissa.into(),
            scale,
        }
    }

    /// Build an arithmetic result, collapsing scale-zero values to integers.
    pub(crate) fn from_parts(mantissa: BigInt, scale: u32) -> Self {
        if scale == 0 {
            Self::integer(mantissa)
        } else {
            NumericValue::Decimal { mantissa, scale }
        }
    }

    /// Narrowest integer representation of `value`.
    pub(crate) fn integer(value: BigInt) -> Self {
        match value.to_i64() {
            Some(v) => NumericValue::Int(v),
            None => NumericValue::BigInt(value),
        }
    }

    /// Parse a literal, degrading to a zero decimal when it is malformed.
    ///
    /// Prefer [`str::parse`], which reports malformed input.
    pub fn parse_or_zero(literal: &str) -> Self {
        match literal.parse() {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(literal, %err, "unparsable numeric literal degraded to zero");
                Self::decimal(0, 0)
            },
        }
    }

    // ========================================================================
    // Decomposition
    // ========================================================================

    /// Split into `(mantissa, scale)` such that value = mantissa × 10^-scale.
    ///
    /// # Errors
    /// Returns `NonFinite` for NaN or infinite float payloads.
    pub fn mantissa_and_scale(&self) -> NumericResult<(BigInt, u32)> {
        match self {
            NumericValue::Int(v) => Ok((BigInt::from(*v), 0)),
            NumericValue::BigInt(v) => Ok((v.clone(), 0)),
            NumericValue::Decimal { mantissa, scale } => Ok((mantissa.clone(), *scale)),
            NumericValue::Float(f) => {
                if !f.is_finite() {
                    return Err(NumericError::NonFinite);
                }
                // Display yields the shortest round-trip digits, never exponent form
                parse_literal(&f.to_string()).ok_or(NumericError::NonFinite)
            },
        }
    }

    /// Decimal places carried by this value (0 for integers).
    pub fn scale(&self) -> u32 {
        match self {
            NumericValue::Int(_) | NumericValue::BigInt(_) => 0,
            NumericValue::Decimal { scale, .. } => *scale,
            NumericValue::Float(_) => self.mantissa_and_scale().map(|(_, s)| s).unwrap_or(0),
        }
    }

    /// Same value with trailing fractional zeros removed.
    pub fn normalized(&self) -> NumericResult<Self> {
        let (mut mantissa, mut scale) = self.mantissa_and_scale()?;
        let ten = BigInt::from(10u32);
        while scale > 0 {
            let (quotient, remainder) = mantissa.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            mantissa = quotient;
            scale -= 1;
        }
        Ok(Self::from_parts(mantissa, scale))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if value is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            NumericValue::Int(v) => *v == 0,
            NumericValue::Float(f) => *f == 0.0,
            NumericValue::BigInt(v) => v.is_zero(),
            NumericValue::Decimal { mantissa, .. } => mantissa.is_zero(),
        }
    }

    /// Check if value is strictly negative.
    pub fn is_negative(&self) -> bool {
        match self {
            NumericValue::Int(v) => *v < 0,
            NumericValue::Float(f) => *f < 0.0,
            NumericValue::BigInt(v) => v.is_negative(),
            NumericValue::Decimal { mantissa, .. } => mantissa.is_negative(),
        }
    }

    /// Check if value is strictly positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && !self.is_negative() && !self.is_nan()
    }

    fn is_nan(&self) -> bool {
        matches!(self, NumericValue::Float(f) if f.is_nan())
    }

    /// True when the value has no fractional part.
    pub fn is_integer(&self) -> bool {
        match self {
            NumericValue::Int(_) | NumericValue::BigInt(_) => true,
            NumericValue::Float(f) => f.is_finite() && f.fract() == 0.0,
            NumericValue::Decimal { mantissa, scale } => (mantissa % pow10(*scale)).is_zero(),
        }
    }

    /// -1, 0 or 1 according to the sign.
    pub fn signum(&self) -> i32 {
        if self.is_negative() {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Exact integer value.
    ///
    /// # Errors
    /// Returns `NotAnInteger` if the value has a fractional part.
    pub fn to_integer(&self) -> NumericResult<BigInt> {
        let (mantissa, scale) = self.mantissa_and_scale()?;
        let (quotient, remainder) = mantissa.div_rem(&pow10(scale));
        if !remainder.is_zero() {
            return Err(NumericError::NotAnInteger(self.to_string()));
        }
        Ok(quotient)
    }

    /// Exact integer value if it fits in an `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            NumericValue::Int(v) => Some(*v),
            _ => self.to_integer().ok()?.to_i64(),
        }
    }

    /// Nearest `f64`. Values beyond the float range become infinite.
    pub fn to_f64(&self) -> f64 {
        match self {
            NumericValue::Int(v) => *v as f64,
            NumericValue::Float(f) => *f,
            _ => self.to_string().parse().unwrap_or(f64::NAN),
        }
    }

    /// Convert from `rust_decimal::Decimal`.
    pub fn from_decimal(d: rust_decimal::Decimal) -> Self {
        Self::from_parts(BigInt::from(d.mantissa()), d.scale())
    }

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if the value needs more than 28 decimal
    /// places or 96 bits of mantissa.
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let (mantissa, scale) = self.normalized()?.mantissa_and_scale()?;
        let raw = mantissa
            .to_i128()
            .ok_or_else(|| NumericError::PrecisionLoss(self.to_string()))?;
        rust_decimal::Decimal::try_from_i128_with_scale(raw, scale)
            .map_err(|_| NumericError::PrecisionLoss(self.to_string()))
    }
}

// ============================================================================
// Literal Parsing
// ============================================================================

/// Parse `-?[0-9]+(\.[0-9]+)?` into a mantissa and scale.
pub(crate) fn parse_literal(s: &str) -> Option<(BigInt, u32)> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (int_str, frac_str) = match body.split_once('.') {
        Some((int_str, frac_str)) => {
            if frac_str.is_empty() {
                return None;
            }
            (int_str, frac_str)
        },
        None => (body, ""),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_str.is_empty() || !all_digits(int_str) || !all_digits(frac_str) {
        return None;
    }

    let digits = format!("{int_str}{frac_str}");
    let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    if negative {
        mantissa = -mantissa;
    }
    let scale = u32::try_from(frac_str.len()).ok()?;
    Some((mantissa, scale))
}

impl std::str::FromStr for NumericValue {
    type Err = NumericError;

    /// Parse a decimal literal.
    ///
    /// # Examples
    /// - "123" -> Int(123)
    /// - "123.450" -> Decimal { mantissa: 123450, scale: 3 }
    /// - "99999999999999999999" -> BigInt
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (mantissa, scale) =
            parse_literal(trimmed).ok_or_else(|| NumericError::InvalidLiteral(s.to_string()))?;
        if scale == 0 {
            Ok(Self::integer(mantissa))
        } else {
            Ok(NumericValue::Decimal { mantissa, scale })
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for NumericValue {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for NumericValue {
    fn from(v: i64) -> Self {
        NumericValue::Int(v)
    }
}

impl From<i32> for NumericValue {
    fn from(v: i32) -> Self {
        NumericValue::Int(i64::from(v))
    }
}

impl From<u32> for NumericValue {
    fn from(v: u32) -> Self {
        NumericValue::Int(i64::from(v))
    }
}

impl From<u64> for NumericValue {
    fn from(v: u64) -> Self {
        Self::integer(BigInt::from(v))
    }
}

impl From<f64> for NumericValue {
    fn from(v: f64) -> Self {
        NumericValue::Float(v)
    }
}

impl From<BigInt> for NumericValue {
    fn from(v: BigInt) -> Self {
        NumericValue::BigInt(v)
    }
}

impl From<rust_decimal::Decimal> for NumericValue {
    fn from(d: rust_decimal::Decimal) -> Self {
        Self::from_decimal(d)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

fn format_scaled(f: &mut fmt::Formatter<'_>, mantissa: &BigInt, scale: u32) -> fmt::Result {
    let digits = mantissa.abs().to_string();
    let sign = if mantissa.is_negative() { "-" } else { "" };
    if scale == 0 {
        return write!(f, "{sign}{digits}");
    }

    let scale = scale as usize;
    let padded = format!("{:0>width$}", digits, width = scale + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    write!(f, "{sign}{int_part}.{frac_part}")
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Int(v) => write!(f, "{v}"),
            NumericValue::Float(v) => write!(f, "{v}"),
            NumericValue::BigInt(v) => write!(f, "{v}"),
            NumericValue::Decimal { mantissa, scale } => format_scaled(f, mantissa, *scale),
        }
    }
}

impl fmt::Debug for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Int(v) => write!(f, "Int({v})"),
            NumericValue::Float(v) => write!(f, "Float({v:?})"),
            NumericValue::BigInt(v) => write!(f, "BigInt({v})"),
            NumericValue::Decimal { mantissa, scale } => {
                write!(f, "Decimal({self}, mantissa={mantissa}, scale={scale})")
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_constants() {
        assert_eq!(NumericValue::ZERO.to_i64(), Some(0));
        assert_eq!(NumericValue::ONE.to_i64(), Some(1));
        assert!(NumericValue::default().is_zero());
    }

    #[test]
    fn test_from_str() {
        let x: NumericValue = "123.456".parse().unwrap();
        assert_eq!(x.mantissa_and_scale().unwrap(), (BigInt::from(123_456), 3));

        let y: NumericValue = "-0.001".parse().unwrap();
        assert!(y.is_negative());
        assert_eq!(y.scale(), 3);

        let z: NumericValue = "42".parse().unwrap();
        assert!(matches!(z, NumericValue::Int(42)));

        let big: NumericValue = "123456789012345678901234567890".parse().unwrap();
        assert!(matches!(big, NumericValue::BigInt(_)));
    }

    #[test]
    fn test_from_str_invalid() {
        for literal in ["", "abc", "1.", ".5", "1.2.3", "--1", "+1", "1e5", "1,5"] {
            let result: Result<NumericValue, _> = literal.parse();
            assert_eq!(
                result.unwrap_err(),
                NumericError::InvalidLiteral(literal.to_string()),
                "literal {literal:?}"
            );
        }
    }

    #[test]
    fn test_parse_or_zero() {
        let bad = NumericValue::parse_or_zero("not_a_number");
        assert!(bad.is_zero());
        assert!(matches!(bad, NumericValue::Decimal { .. }));

        assert_eq!(NumericValue::parse_or_zero("2.5").to_string(), "2.5");
    }

    #[test]
    fn test_display() {
        assert_eq!(NumericValue::decimal(12345, 2).to_string(), "123.45");
        assert_eq!(NumericValue::decimal(5, 3).to_string(), "0.005");
        assert_eq!(NumericValue::decimal(-5, 2).to_string(), "-0.05");
        assert_eq!(NumericValue::decimal(-1200, 2).to_string(), "-12.00");
        assert_eq!(NumericValue::decimal(7, 0).to_string(), "7");
        assert_eq!(NumericValue::from(-3).to_string(), "-3");
        assert_eq!(NumericValue::from(0.1).to_string(), "0.1");
    }

    #[test]
    fn test_float_decomposition_uses_shortest_digits() {
        let (mantissa, scale) = NumericValue::from(0.1).mantissa_and_scale().unwrap();
        assert_eq!(mantissa, BigInt::from(1));
        assert_eq!(scale, 1);

        let (mantissa, scale) = NumericValue::from(-2.5).mantissa_and_scale().unwrap();
        assert_eq!(mantissa, BigInt::from(-25));
        assert_eq!(scale, 1);

        assert_eq!(
            NumericValue::from(f64::NAN).mantissa_and_scale(),
            Err(NumericError::NonFinite)
        );
        assert_eq!(
            NumericValue::from(f64::INFINITY).mantissa_and_scale(),
            Err(NumericError::NonFinite)
        );
    }

    #[test]
    fn test_is_integer() {
        assert!(NumericValue::from(5).is_integer());
        assert!(NumericValue::decimal(500, 2).is_integer());
        assert!(!NumericValue::decimal(501, 2).is_integer());
        assert!(NumericValue::from(3.0).is_integer());
        assert!(!NumericValue::from(3.5).is_integer());
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(
            NumericValue::decimal(1200, 2).to_integer().unwrap(),
            BigInt::from(12)
        );
        assert!(matches!(
            NumericValue::decimal(1201, 2).to_integer(),
            Err(NumericError::NotAnInteger(_))
        ));
        assert_eq!(NumericValue::decimal(-300, 2).to_i64(), Some(-3));
    }

    #[test]
    fn test_normalized() {
        let x = NumericValue::decimal(12300, 4).normalized().unwrap();
        assert_eq!(x.mantissa_and_scale().unwrap(), (BigInt::from(123), 2));

        let y = NumericValue::decimal(500, 2).normalized().unwrap();
        assert!(matches!(y, NumericValue::Int(5)));
    }

    #[test]
    fn test_sign_helpers() {
        let neg = NumericValue::decimal(-15, 1);
        assert_eq!(neg.signum(), -1);
        assert_eq!(neg.abs().to_string(), "1.5");
        assert_eq!(NumericValue::ZERO.signum(), 0);
        assert!(NumericValue::from(2).is_positive());
        assert!(!NumericValue::from(f64::NAN).is_positive());
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(NumericValue::decimal(25, 1).to_f64(), 2.5);
        assert_eq!(NumericValue::from(7).to_f64(), 7.0);
        let huge = NumericValue::BigInt(BigInt::from(10u32).pow(400));
        assert!(huge.to_f64().is_infinite());
    }

    #[test]
    fn test_decimal_interop() {
        let d = Decimal::new(12345, 2);
        let x = NumericValue::from_decimal(d);
        assert_eq!(x.to_string(), "123.45");
        assert_eq!(x.to_decimal().unwrap(), d);

        let long = NumericValue::decimal(1, 40);
        assert!(matches!(
            long.to_decimal(),
            Err(NumericError::PrecisionLoss(_))
        ));

        // Trailing zeros beyond 28 places are dropped before conversion
        let padded = NumericValue::decimal(BigInt::from(10u32).pow(35), 35);
        assert_eq!(padded.to_decimal().unwrap(), Decimal::ONE);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let x = NumericValue::decimal(12345, 2);
        let json = serde_json::to_string(&x).unwrap();
        let back: NumericValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "123.45");
    }
}
