// ============================================================================
// Unit Conversion Engine
// Direct (same-dimension) and Planck-invariant conversion
// ============================================================================

use super::planck::{from_planck_count, to_planck_count};
use crate::domain::{KindPolicy, Unit};
use crate::interfaces::UnitCatalog;
use crate::numeric::{NumericError, NumericResult, NumericValue};
use std::sync::Arc;

/// Reject NaN and infinite float inputs before any unit lookup.
pub(crate) fn ensure_finite(value: &NumericValue) -> NumericResult<()> {
    match value {
        NumericValue::Float(float) if !float.is_finite() => Err(NumericError::NonFinite),
        _ => Ok(()),
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Convert between units sharing a dimension tag.
///
/// `target = (value · source.scale + source.offset − target.offset) / target.scale`
///
/// Returns `Ok(None)` when the dimensions differ or `policy` rejects the kind
/// pair.
///
/// # Errors
/// `NonFinite` for a NaN or infinite input, or any failure of the scale and
/// offset arithmetic.
pub fn convert_within_dimension(
    value: &NumericValue,
    source: &Unit,
    target: &Unit,
    policy: KindPolicy,
) -> NumericResult<Option<NumericValue>> {
    ensure_finite(value)?;
    if source.dimension() != target.dimension() {
        tracing::debug!(
            source = source.symbol(),
            target = target.symbol(),
            "dimension mismatch"
        );
        return Ok(None);
    }
    if !policy.permits(source.kind(), target.kind()) {
        tracing::debug!(
            source = source.symbol(),
            target = target.symbol(),
            ?policy,
            "numeric kind rejected"
        );
        return Ok(None);
    }
    if source == target {
        return Ok(Some(value.clone()));
    }

    let si = source.to_si(value)?;
    target.from_si(&si).map(Some)
}

/// Convert through a Planck-unit count.
///
/// Both units need an exponent vector (`Ok(None)` otherwise); the vectors
/// themselves may differ, in which case the result is the natural-unit
/// reading of the quantity (one second maps to the distance light travels
/// in a second).
pub fn convert_via_planck(
    value: &NumericValue,
    source: &Unit,
    target: &Unit,
) -> NumericResult<Option<NumericValue>> {
    ensure_finite(value)?;
    if target.exponents().is_none() {
        return Ok(None);
    }
    match to_planck_count(value, source)? {
        Some(count) => from_planck_count(&count, target),
        None => Ok(None),
    }
}

// ============================================================================
// Conversion Engine
// ============================================================================

/// Symbol-driven converter over a [`UnitCatalog`].
///
/// Tries direct conversion first and falls back to Planck normalisation for
/// units with equal exponent vectors but different dimension tags.
pub struct ConversionEngine {
    catalog: Arc<dyn UnitCatalog>,
    policy: KindPolicy,
}

impl ConversionEngine {
    pub fn new(catalog: Arc<dyn UnitCatalog>) -> Self {
        Self {
            catalog,
            policy: KindPolicy::default(),
        }
    }

    /// Builder method: Set kind policy
    pub fn with_policy(mut self, policy: KindPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> KindPolicy {
        self.policy
    }

    pub fn catalog(&self) -> &Arc<dyn UnitCatalog> {
        &self.catalog
    }

    /// Convert between two units.
    pub fn convert(
        &self,
        value: &NumericValue,
        source: &Unit,
        target: &Unit,
    ) -> NumericResult<Option<NumericValue>> {
        if let Some(result) = convert_within_dimension(value, source, target, self.policy)? {
            return Ok(Some(result));
        }

        let equivalent = matches!(
            (source.exponents(), target.exponents()),
            (Some(a), Some(b)) if a == b
        );
        if !equivalent || !self.policy.permits(source.kind(), target.kind()) {
            return Ok(None);
        }

        tracing::debug!(
            source = source.symbol(),
            target = target.symbol(),
            "falling back to planck conversion"
        );
        convert_via_planck(value, source, target)
    }

    /// Convert between two units looked up by symbol.
    ///
    /// Unknown symbols yield `Ok(None)`.
    pub fn convert_symbols(
        &self,
        value: &NumericValue,
        source: &str,
        target: &str,
    ) -> NumericResult<Option<NumericValue>> {
        let Some(source_unit) = self.catalog.unit(source) else {
            tracing::debug!(symbol = source, "unknown source unit");
            return Ok(None);
        };
        let Some(target_unit) = self.catalog.unit(target) else {
            tracing::debug!(symbol = target, "unknown target unit");
            return Ok(None);
        };
        self.convert(value, &source_unit, &target_unit)
    }
}

impl std::fmt::Debug for ConversionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionEngine")
            .field("units", &self.catalog.units().len())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomDimension, DimensionVector, NumericKind, StandardDimension};
    use crate::interfaces::InMemoryCatalog;

    fn metre() -> Unit {
        Unit::linear("metre", "m", StandardDimension::Length, 1).unwrap()
    }

    fn kilometre() -> Unit {
        Unit::linear("kilometre", "km", StandardDimension::Length, 1000).unwrap()
    }

    fn celsius() -> Unit {
        Unit::builder("degree Celsius", "°C", StandardDimension::Temperature, 1)
            .with_offset(NumericValue::decimal(27315, 2))
            .build()
            .unwrap()
    }

    fn fahrenheit() -> Unit {
        let ratio = NumericValue::from(5).checked_div(&NumericValue::from(9)).unwrap();
        let offset = NumericValue::decimal(45967, 2).checked_mul(&ratio).unwrap();
        Unit::builder("degree Fahrenheit", "°F", StandardDimension::Temperature, ratio)
            .with_offset(offset)
            .build()
            .unwrap()
    }

    fn close(actual: &NumericValue, expected: impl Into<NumericValue>, tolerance: &str) -> bool {
        let expected: NumericValue = expected.into();
        let tolerance: NumericValue = tolerance.parse().unwrap();
        (actual - &expected).abs() <= tolerance
    }

    #[test]
    fn test_direct_round_trip() {
        let value = NumericValue::from(5);
        let metres = convert_within_dimension(&value, &kilometre(), &metre(), KindPolicy::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(metres, NumericValue::from(5000));

        let back = convert_within_dimension(&metres, &metre(), &kilometre(), KindPolicy::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_identity_conversion() {
        let value = NumericValue::decimal(12345, 3);
        assert_eq!(
            convert_within_dimension(&value, &metre(), &metre(), KindPolicy::Strict),
            Ok(Some(value))
        );
    }

    #[test]
    fn test_cross_dimension_is_none() {
        let kilogram = Unit::linear("kilogram", "kg", StandardDimension::Mass, 1).unwrap();
        assert_eq!(
            convert_within_dimension(&NumericValue::ONE, &metre(), &kilogram, KindPolicy::AllowAll),
            Ok(None)
        );
    }

    #[test]
    fn test_kind_policy_applies() {
        let complex_metre = Unit::builder("complex metre", "m~", StandardDimension::Length, 1)
            .with_kind(NumericKind::Complex)
            .build()
            .unwrap();
        let value = NumericValue::from(2);

        assert_eq!(
            convert_within_dimension(&value, &metre(), &complex_metre, KindPolicy::Strict),
            Ok(None)
        );
        assert_eq!(
            convert_within_dimension(&value, &metre(), &complex_metre, KindPolicy::AllowPromotion),
            Ok(Some(value.clone()))
        );
        assert_eq!(
            convert_within_dimension(&value, &complex_metre, &metre(), KindPolicy::AllowPromotion),
            Ok(None)
        );
    }

    #[test]
    fn test_temperature_conversion() {
        let freezing = convert_within_dimension(
            &NumericValue::ZERO,
            &celsius(),
            &fahrenheit(),
            KindPolicy::Strict,
        )
        .unwrap()
        .unwrap();
        assert!(close(&freezing, 32, "0.001"), "got {freezing}");

        let boiling = convert_within_dimension(
            &NumericValue::from(212),
            &fahrenheit(),
            &celsius(),
            KindPolicy::Strict,
        )
        .unwrap()
        .unwrap();
        assert!(close(&boiling, 100, "0.001"), "got {boiling}");
    }

    #[test]
    fn test_planck_round_trip() {
        let value = NumericValue::from(42);
        let there = convert_via_planck(&value, &kilometre(), &metre()).unwrap().unwrap();
        assert!(close(&there, 42_000, "0.000000001"));
        let back = convert_via_planck(&there, &metre(), &kilometre()).unwrap().unwrap();
        assert!(close(&back, 42, "0.000000001"));
    }

    #[test]
    fn test_planck_natural_units() {
        let second = Unit::linear("second", "s", StandardDimension::Time, 1).unwrap();
        let light_second = convert_via_planck(&NumericValue::ONE, &second, &metre())
            .unwrap()
            .unwrap();
        assert!((light_second.to_f64() - 299_792_458.0).abs() < 1e4);
    }

    #[test]
    fn test_planck_requires_exponents() {
        assert_eq!(convert_via_planck(&NumericValue::ONE, &celsius(), &metre()), Ok(None));
        assert_eq!(convert_via_planck(&NumericValue::ONE, &metre(), &celsius()), Ok(None));
    }

    #[test]
    fn test_engine_falls_back_to_planck() {
        let reach = CustomDimension::new("reach");
        let span = Unit::builder("span", "span", reach, "0.2286".parse::<NumericValue>().unwrap())
            .with_exponents(DimensionVector::new(1, 0, 0))
            .build()
            .unwrap();

        let catalog = Arc::new(InMemoryCatalog::with_units([metre(), kilometre(), span]));
        let engine = ConversionEngine::new(catalog);

        // Same tag: exact direct conversion
        assert_eq!(
            engine.convert_symbols(&NumericValue::from(2), "km", "m"),
            Ok(Some(NumericValue::from(2000)))
        );

        // Different tags, same exponents: Planck fallback
        let metres = engine
            .convert_symbols(&NumericValue::from(10), "span", "m")
            .unwrap()
            .unwrap();
        assert!(close(&metres, "2.286".parse::<NumericValue>().unwrap(), "0.000000001"));

        assert_eq!(engine.convert_symbols(&NumericValue::ONE, "m", "parsec"), Ok(None));
    }

    #[test]
    fn test_engine_rejects_unrelated_dimensions() {
        let kilogram = Unit::linear("kilogram", "kg", StandardDimension::Mass, 1).unwrap();
        let catalog = Arc::new(InMemoryCatalog::with_units([metre(), kilogram]));
        let engine = ConversionEngine::new(catalog).with_policy(KindPolicy::AllowAll);
        assert_eq!(engine.policy(), KindPolicy::AllowAll);
        assert_eq!(engine.convert_symbols(&NumericValue::ONE, "m", "kg"), Ok(None));
    }

    #[test]
    fn test_non_finite_input_is_an_error() {
        let nan = NumericValue::Float(f64::NAN);
        let infinity = NumericValue::Float(f64::INFINITY);
        let kilogram = Unit::linear("kilogram", "kg", StandardDimension::Mass, 1).unwrap();

        assert_eq!(
            convert_within_dimension(&nan, &metre(), &kilometre(), KindPolicy::Strict),
            Err(NumericError::NonFinite)
        );
        assert_eq!(
            convert_within_dimension(&nan, &metre(), &metre(), KindPolicy::Strict),
            Err(NumericError::NonFinite)
        );
        assert_eq!(
            convert_within_dimension(&infinity, &metre(), &kilogram, KindPolicy::Strict),
            Err(NumericError::NonFinite)
        );
        assert_eq!(
            convert_via_planck(&infinity, &kilometre(), &metre()),
            Err(NumericError::NonFinite)
        );

        let catalog = Arc::new(InMemoryCatalog::with_units([metre(), kilometre()]));
        let engine = ConversionEngine::new(catalog);
        assert_eq!(
            engine.convert_symbols(&nan, "m", "km"),
            Err(NumericError::NonFinite)
        );
    }
}
