// ============================================================================
// Compound Units
// Products of unit powers, e.g. m·s⁻¹ or kg·m²·s⁻²
// ============================================================================

use crate::domain::{
    CustomDimension, Dimension, DimensionVector, NumericKind, StandardDimension, Unit, UnitError,
    UnitResult,
};
use crate::numeric::{NumericError, NumericValue};

/// Build a unit from `(component, power)` pairs.
///
/// The scale is the product of component scales raised to their powers,
/// accumulated as one fraction and divided once. The exponent vector is the
/// power-weighted sum of component vectors (absent if any component lacks
/// one). The dimension is the standard dimension owning that vector, or a
/// custom dimension keyed by `symbol`.
///
/// # Errors
/// `EmptyCompound` for no components, `AffineComponent` if any component
/// has an offset, `ExponentOverflow` if a summed exponent leaves `i32`.
pub fn compound(
    name: impl Into<String>,
    symbol: impl Into<String>,
    components: &[(Unit, i32)],
) -> UnitResult<Unit> {
    let name = name.into();
    let symbol = symbol.into();

    let Some((first, _)) = components.first() else {
        return Err(UnitError::EmptyCompound);
    };
    if let Some((affine, _)) = components.iter().find(|(unit, _)| unit.is_affine()) {
        return Err(UnitError::AffineComponent {
            symbol: affine.symbol().to_string(),
        });
    }

    let mut numerator = NumericValue::ONE;
    let mut denominator = NumericValue::ONE;
    let mut exponents = Some(DimensionVector::DIMENSIONLESS);

    for (unit, power) in components {
        let factor = unit.scale().powi(i64::from(power.unsigned_abs()))?;
        if *power >= 0 {
            numerator = numerator.checked_mul(&factor)?;
        } else {
            denominator = denominator.checked_mul(&factor)?;
        }
        if let (Some(acc), Some(vector)) = (exponents, unit.exponents()) {
            let summed = vector
                .checked_scaled(*power)
                .and_then(|weighted| acc.checked_add(weighted))
                .ok_or_else(|| {
                    NumericError::ExponentOverflow(format!("{acc} + ({vector})^{power}"))
                })?;
            exponents = Some(summed);
        } else {
            exponents = None;
        }
    }
    let scale = numerator.checked_div(&denominator)?;

    let kind = if components.iter().all(|(unit, _)| unit.kind() == first.kind()) {
        first.kind()
    } else {
        NumericKind::Abstract
    };

    let dimension = match exponents.and_then(StandardDimension::from_minimal_exponents) {
        Some(standard) => Dimension::Standard(standard),
        None => Dimension::Custom(
            CustomDimension::new(symbol.clone()).with_display_name(name.clone()),
        ),
    };

    tracing::debug!(%symbol, %dimension, components = components.len(), "compound unit built");

    let builder = Unit::builder(name, symbol, dimension, scale).with_kind(kind);
    match exponents {
        Some(vector) => builder.with_exponents(vector).build(),
        None => builder.build(),
    }
}
