// ============================================================================
// Dimension Model
// Minimal length/mass/time basis, standard dimensions and custom dimensions
// ============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Minimal Dimension Vector
// ============================================================================

/// Axis of the minimal dimension basis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BaseAxis {
    Length,
    Mass,
    Time,
}

/// Integer exponents over the length/mass/time basis.
///
/// The all-zero vector is dimensionless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionVector {
    pub length: i32,
    pub mass: i32,
    pub time: i32,
}

impl DimensionVector {
    /// Dimensionless vector
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0);

    pub const fn new(length: i32, mass: i32, time: i32) -> Self {
        Self { length, mass, time }
    }

    /// Vector with a single nonzero axis.
    pub const fn axis(axis: BaseAxis, exponent: i32) -> Self {
        match axis {
            BaseAxis::Length => Self::new(exponent, 0, 0),
            BaseAxis::Mass => Self::new(0, exponent, 0),
            BaseAxis::Time => Self::new(0, 0, exponent),
        }
    }

    pub const fn exponent(&self, axis: BaseAxis) -> i32 {
        match axis {
            BaseAxis::Length => self.length,
            BaseAxis::Mass => self.mass,
            BaseAxis::Time => self.time,
        }
    }

    pub const fn is_dimensionless(&self) -> bool {
        self.length == 0 && self.mass == 0 && self.time == 0
    }

    /// Every exponent multiplied by `factor` (a unit raised to a power).
    ///
    /// # Panics
    /// If an exponent overflows `i32`; use [`checked_scaled`](Self::checked_scaled).
    pub fn scaled(self, factor: i32) -> Self {
        self.checked_scaled(factor)
            .unwrap_or_else(|| panic!("dimension exponent overflow: {self} scaled by {factor}"))
    }

    /// `scaled`, or `None` if an exponent overflows.
    pub const fn checked_scaled(self, factor: i32) -> Option<Self> {
        match (
            self.length.checked_mul(factor),
            self.mass.checked_mul(factor),
            self.time.checked_mul(factor),
        ) {
            (Some(length), Some(mass), Some(time)) => Some(Self::new(length, mass, time)),
            _ => None,
        }
    }

    /// Component-wise sum, or `None` if an exponent overflows.
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match (
            self.length.checked_add(rhs.length),
            self.mass.checked_add(rhs.mass),
            self.time.checked_add(rhs.time),
        ) {
            (Some(length), Some(mass), Some(time)) => Some(Self::new(length, mass, time)),
            _ => None,
        }
    }
}

// Infallible operators for ergonomics (panic on overflow - use checked_* for untrusted powers)
impl Add for DimensionVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.checked_add(rhs)
            .unwrap_or_else(|| panic!("dimension exponent overflow: {self} + {rhs}"))
    }
}

impl Sub for DimensionVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for DimensionVector {
    type Output = Self;

    fn neg(self) -> Self {
        self.scaled(-1)
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let parts: Vec<String> = [("L", self.length), ("M", self.mass), ("T", self.time)]
            .into_iter()
            .filter(|(_, e)| *e != 0)
            .map(|(symbol, e)| if e == 1 { symbol.to_string() } else { format!("{symbol}^{e}") })
            .collect();
        write!(f, "{}", parts.join("·"))
    }
}

// ============================================================================
// Standard Dimension
// ============================================================================

/// Named physical categories known to the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StandardDimension {
    Dimensionless,
    Length,
    Mass,
    Time,
    Area,
    Volume,
    Speed,
    Acceleration,
    Jerk,
    Force,
    Energy,
    Power,
    Pressure,
    Frequency,
    Density,
    Momentum,
    Action,
    VolumetricFlow,
    DynamicViscosity,
    KinematicViscosity,
    Angle,
    Temperature,
    ElectricCurrent,
    ElectricCharge,
    Voltage,
    Resistance,
    LuminousIntensity,
    AmountOfSubstance,
    Information,
}

impl StandardDimension {
    /// All standard dimensions in canonical order.
    pub const ALL: [StandardDimension; 29] = [
        StandardDimension::Dimensionless,
        StandardDimension::Length,
        StandardDimension::Mass,
        StandardDimension::Time,
        StandardDimension::Area,
        StandardDimension::Volume,
        StandardDimension::Speed,
        StandardDimension::Acceleration,
        StandardDimension::Jerk,
        StandardDimension::Force,
        StandardDimension::Energy,
        StandardDimension::Power,
        StandardDimension::Pressure,
        StandardDimension::Frequency,
        StandardDimension::Density,
        StandardDimension::Momentum,
        StandardDimension::Action,
        StandardDimension::VolumetricFlow,
        StandardDimension::DynamicViscosity,
        StandardDimension::KinematicViscosity,
        StandardDimension::Angle,
        StandardDimension::Temperature,
        StandardDimension::ElectricCurrent,
        StandardDimension::ElectricCharge,
        StandardDimension::Voltage,
        StandardDimension::Resistance,
        StandardDimension::LuminousIntensity,
        StandardDimension::AmountOfSubstance,
        StandardDimension::Information,
    ];

    /// Decomposition into the length/mass/time basis.
    ///
    /// `None` for dimensions the basis cannot express (temperature,
    /// electrical and photometric quantities, amount of substance,
    /// information).
    pub fn minimal_exponents(self) -> Option<DimensionVector> {
        let v = DimensionVector::new;
        match self {
            StandardDimension::Dimensionless | StandardDimension::Angle => Some(v(0, 0, 0)),
            StandardDimension::Length => Some(v(1, 0, 0)),
            StandardDimension::Mass => Some(v(0, 1, 0)),
            StandardDimension::Time => Some(v(0, 0, 1)),
            StandardDimension::Area => Some(v(2, 0, 0)),
            StandardDimension::Volume => Some(v(3, 0, 0)),
            StandardDimension::Speed => Some(v(1, 0, -1)),
            StandardDimension::Acceleration => Some(v(1, 0, -2)),
            StandardDimension::Jerk => Some(v(1, 0, -3)),
            StandardDimension::Force => Some(v(1, 1, -2)),
            StandardDimension::Energy => Some(v(2, 1, -2)),
            StandardDimension::Power => Some(v(2, 1, -3)),
            StandardDimension::Pressure => Some(v(-1, 1, -2)),
            StandardDimension::Frequency => Some(v(0, 0, -1)),
            StandardDimension::Density => Some(v(-3, 1, 0)),
            StandardDimension::Momentum => Some(v(1, 1, -1)),
            StandardDimension::Action => Some(v(2, 1, -1)),
            StandardDimension::VolumetricFlow => Some(v(3, 0, -1)),
            StandardDimension::DynamicViscosity => Some(v(-1, 1, -1)),
            StandardDimension::KinematicViscosity => Some(v(2, 0, -1)),
            StandardDimension::Temperature
            | StandardDimension::ElectricCurrent
            | StandardDimension::ElectricCharge
            | StandardDimension::Voltage
            | StandardDimension::Resistance
            | StandardDimension::LuminousIntensity
            | StandardDimension::AmountOfSubstance
            | StandardDimension::Information => None,
        }
    }

    /// First standard dimension (in canonical order) with this decomposition.
    pub fn from_minimal_exponents(vector: DimensionVector) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.minimal_exponents() == Some(vector))
    }

    pub fn name(self) -> &'static str {
        match self {
            StandardDimension::Dimensionless => "dimensionless",
            StandardDimension::Length => "length",
            StandardDimension::Mass => "mass",
            StandardDimension::Time => "time",
            StandardDimension::Area => "area",
            StandardDimension::Volume => "volume",
            StandardDimension::Speed => "speed",
            StandardDimension::Acceleration => "acceleration",
            StandardDimension::Jerk => "jerk",
            StandardDimension::Force => "force",
            StandardDimension::Energy => "energy",
            StandardDimension::Power => "power",
            StandardDimension::Pressure => "pressure",
            StandardDimension::Frequency => "frequency",
            StandardDimension::Density => "density",
            StandardDimension::Momentum => "momentum",
            StandardDimension::Action => "action",
            StandardDimension::VolumetricFlow => "volumetric flow",
            StandardDimension::DynamicViscosity => "dynamic viscosity",
            StandardDimension::KinematicViscosity => "kinematic viscosity",
            StandardDimension::Angle => "angle",
            StandardDimension::Temperature => "temperature",
            StandardDimension::ElectricCurrent => "electric current",
            StandardDimension::ElectricCharge => "electric charge",
            StandardDimension::Voltage => "voltage",
            StandardDimension::Resistance => "resistance",
            StandardDimension::LuminousIntensity => "luminous intensity",
            StandardDimension::AmountOfSubstance => "amount of substance",
            StandardDimension::Information => "information",
        }
    }
}

// ============================================================================
// Custom Dimension
// ============================================================================

/// User-defined dimension identified by `id`.
///
/// Equality and hashing use `id` only; display name and notes are metadata.
/// A custom dimension has no exponent vector until it is registered with a
/// [`DimensionRegistry`](crate::engine::DimensionRegistry).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomDimension {
    pub id: String,
    pub display_name: Option<String>,
    pub notes: Option<String>,
}

impl CustomDimension {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            notes: None,
        }
    }

    /// Builder method: Set display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Builder method: Set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl PartialEq for CustomDimension {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CustomDimension {}

impl Hash for CustomDimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ============================================================================
// Dimension
// ============================================================================

/// Dimension tag carried by a unit.
///
/// Two dimensions are the same only by identity: the same standard case or
/// the same custom id. Equal exponent vectors are not enough.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimension {
    Standard(StandardDimension),
    Custom(CustomDimension),
}

impl Dimension {
    /// Exponents known without consulting a registry.
    pub fn intrinsic_exponents(&self) -> Option<DimensionVector> {
        match self {
            Dimension::Standard(standard) => standard.minimal_exponents(),
            Dimension::Custom(_) => None,
        }
    }
}

impl From<StandardDimension> for Dimension {
    fn from(standard: StandardDimension) -> Self {
        Dimension::Standard(standard)
    }
}

impl From<CustomDimension> for Dimension {
    fn from(custom: CustomDimension) -> Self {
        Dimension::Custom(custom)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Standard(standard) => write!(f, "{}", standard.name()),
            Dimension::Custom(custom) => {
                write!(f, "{}", custom.display_name.as_deref().unwrap_or(&custom.id))
            },
        }
    }
}
