// ============================================================================
// Unit Domain Model
// ============================================================================

use super::dimension::{Dimension, DimensionVector};
use super::errors::{UnitError, UnitResult};
use crate::engine::{convert_via_planck, convert_within_dimension, DimensionRegistry};
use crate::numeric::{NumericResult, NumericValue};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Number system a unit's magnitudes live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumericKind {
    Real,
    Imaginary,
    Complex,
    /// Counts, scores and other non-physical magnitudes
    Abstract,
}

/// Which numeric-kind pairs a direct conversion accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KindPolicy {
    /// Kinds must match exactly
    #[default]
    Strict,
    /// Also allow real → complex
    AllowPromotion,
    /// Ignore kinds
    AllowAll,
}

impl KindPolicy {
    /// Whether converting from `source` to `target` kind is allowed.
    pub fn permits(self, source: NumericKind, target: NumericKind) -> bool {
        match self {
            KindPolicy::Strict => source == target,
            KindPolicy::AllowPromotion => {
                source == target || (source == NumericKind::Real && target == NumericKind::Complex)
            },
            KindPolicy::AllowAll => true,
        }
    }
}

// ============================================================================
// Unit
// ============================================================================

/// Immutable unit descriptor.
///
/// `scale` and `offset` map a magnitude in this unit to the coherent SI
/// base: `si = value · scale + offset`. Only affine units (temperature
/// scales) carry a nonzero offset. The exponent vector is captured when the
/// unit is built and never re-read from a registry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    name: String,
    symbol: String,
    dimension: Dimension,
    kind: NumericKind,
    scale: NumericValue,
    offset: NumericValue,
    exponents: Option<DimensionVector>,
    notes: Option<String>,
}

impl Unit {
    /// Start building a unit. Kind defaults to `Real`, offset to zero.
    pub fn builder(
        name: impl Into<String>,
        symbol: impl Into<String>,
        dimension: impl Into<Dimension>,
        scale: impl Into<NumericValue>,
    ) -> UnitBuilder {
        UnitBuilder {
            name: name.into(),
            symbol: symbol.into(),
            dimension: dimension.into(),
            kind: NumericKind::Real,
            scale: scale.into(),
            offset: NumericValue::ZERO,
            exponents: None,
            notes: None,
        }
    }

    /// Linear real unit with intrinsic exponents.
    pub fn linear(
        name: impl Into<String>,
        symbol: impl Into<String>,
        dimension: impl Into<Dimension>,
        scale: impl Into<NumericValue>,
    ) -> UnitResult<Self> {
        Self::builder(name, symbol, dimension, scale).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    pub fn scale(&self) -> &NumericValue {
        &self.scale
    }

    pub fn offset(&self) -> &NumericValue {
        &self.offset
    }

    /// Exponent vector snapshotted at construction.
    pub fn exponents(&self) -> Option<DimensionVector> {
        self.exponents
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// True when conversion needs an additive offset.
    pub fn is_affine(&self) -> bool {
        !self.offset.is_zero()
    }

    /// Magnitude in the SI base: `value · scale + offset`.
    pub fn to_si(&self, value: &NumericValue) -> NumericResult<NumericValue> {
        value.checked_mul(&self.scale)?.checked_add(&self.offset)
    }

    /// Magnitude in this unit from an SI base value: `(si − offset) / scale`.
    pub fn from_si(&self, si: &NumericValue) -> NumericResult<NumericValue> {
        si.checked_sub(&self.offset)?.checked_div(&self.scale)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

// ============================================================================
// Unit Builder
// ============================================================================

/// Builder for [`Unit`]
///
/// # Example
/// ```
/// use exact_units::domain::{StandardDimension, Unit};
///
/// let kilometre = Unit::builder("kilometre", "km", StandardDimension::Length, 1000)
///     .with_notes("1000 metres")
///     .build()
///     .unwrap();
/// assert!(!kilometre.is_affine());
/// ```
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    name: String,
    symbol: String,
    dimension: Dimension,
    kind: NumericKind,
    scale: NumericValue,
    offset: NumericValue,
    exponents: Option<DimensionVector>,
    notes: Option<String>,
}

impl UnitBuilder {
    /// Builder method: Set numeric kind
    pub fn with_kind(mut self, kind: NumericKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method: Set additive offset (affine units)
    pub fn with_offset(mut self, offset: impl Into<NumericValue>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Builder method: Set exponents explicitly
    pub fn with_exponents(mut self, exponents: DimensionVector) -> Self {
        self.exponents = Some(exponents);
        self
    }

    /// Builder method: Set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build using explicit or intrinsic (standard dimension) exponents.
    ///
    /// A custom dimension without explicit exponents yields a unit with no
    /// exponent vector; it still converts directly but not via Planck units.
    pub fn build(self) -> UnitResult<Unit> {
        let exponents = self.exponents.or_else(|| self.dimension.intrinsic_exponents());
        self.finish(exponents)
    }

    /// Build, snapshotting custom-dimension exponents from `registry`.
    ///
    /// # Errors
    /// Returns `UnregisteredDimension` if the unit has a custom dimension,
    /// no explicit exponents, and the registry does not know the dimension.
    pub fn build_registered(self, registry: &DimensionRegistry) -> UnitResult<Unit> {
        let exponents = match self.exponents {
            Some(explicit) => explicit,
            None => registry.lookup(&self.dimension).ok_or_else(|| match &self.dimension {
                Dimension::Custom(custom) => UnitError::UnregisteredDimension {
                    id: custom.id.clone(),
                },
                Dimension::Standard(standard) => UnitError::UnregisteredDimension {
                    id: standard.name().to_string(),
                },
            })?,
        };
        self.finish(Some(exponents))
    }

    fn finish(self, exponents: Option<DimensionVector>) -> UnitResult<Unit> {
        // Reject NaN and infinite payloads up front
        self.scale.mantissa_and_scale()?;
        self.offset.mantissa_and_scale()?;
        if self.scale.is_zero() {
            return Err(UnitError::ZeroScale {
                symbol: self.symbol,
            });
        }

        Ok(Unit {
            name: self.name,
            symbol: self.symbol,
            dimension: self.dimension,
            kind: self.kind,
            scale: self.scale,
            offset: self.offset,
            exponents,
            notes: self.notes,
        })
    }
}

// ============================================================================
// Unit Value
// ============================================================================

/// Magnitude paired with its unit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitValue {
    value: NumericValue,
    unit: Unit,
}

impl UnitValue {
    pub fn new(value: impl Into<NumericValue>, unit: Unit) -> Self {
        Self {
            value: value.into(),
            unit,
        }
    }

    pub fn value(&self) -> &NumericValue {
        &self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn into_parts(self) -> (NumericValue, Unit) {
        (self.value, self.unit)
    }

    /// Magnitude in the SI base.
    pub fn to_si(&self) -> NumericResult<NumericValue> {
        self.unit.to_si(&self.value)
    }

    /// Direct conversion; `Ok(None)` if dimensions or kinds are incompatible.
    pub fn convert_to(
        &self,
        target: &Unit,
        policy: KindPolicy,
    ) -> NumericResult<Option<UnitValue>> {
        let converted = convert_within_dimension(&self.value, &self.unit, target, policy)?;
        Ok(converted.map(|value| UnitValue::new(value, target.clone())))
    }

    /// Planck-invariant conversion; `Ok(None)` if either unit lacks exponents.
    pub fn convert_via_planck(&self, target: &Unit) -> NumericResult<Option<UnitValue>> {
        let converted = convert_via_planck(&self.value, &self.unit, target)?;
        Ok(converted.map(|value| UnitValue::new(value, target.clone())))
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol)
    }
}
