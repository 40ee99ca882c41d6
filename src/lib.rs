// ============================================================================
// Exact Units Library
// Arbitrary-precision decimal arithmetic with dimensional unit conversion
// ============================================================================

//! # Exact Units
//!
//! An exact numeric kernel and a dimension-aware unit conversion engine.
//!
//! ## Features
//!
//! - **Exact decimal arithmetic** over a closed `i64 / f64 / BigInt / scaled decimal` sum
//! - **Hyperoperations** from addition up to level 9, bounded by configurable ceilings
//! - **Factorial family** (n!, derangements, step factorials) and Newton root extraction
//! - **Dimension model** with standard dimensions, custom dimensions and a runtime registry
//! - **Unit conversion** directly, through Planck-unit counts, and via compound units
//!
//! ## Example
//!
//! ```rust
//! use exact_units::prelude::*;
//!
//! let metre = Unit::linear("metre", "m", StandardDimension::Length, 1).unwrap();
//! let kilometre = Unit::linear("kilometre", "km", StandardDimension::Length, 1000).unwrap();
//!
//! // Exact direct conversion
//! let metres = convert_within_dimension(
//!     &NumericValue::from(3),
//!     &kilometre,
//!     &metre,
//!     KindPolicy::Strict,
//! );
//! assert_eq!(metres, Ok(Some(NumericValue::from(3000))));
//!
//! // Compound units compose scales and exponent vectors
//! let second = Unit::linear("second", "s", StandardDimension::Time, 1).unwrap();
//! let speed = compound("metre per second", "m/s", &[(metre, 1), (second, -1)]).unwrap();
//! assert_eq!(speed.dimension(), &Dimension::Standard(StandardDimension::Speed));
//!
//! // Hyperoperations: 2↑↑3 = 2^(2^2)
//! let tower = NumericValue::from(2).tetrate(&NumericValue::from(3)).unwrap();
//! assert_eq!(tower, NumericValue::from(16));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        with_config, AngleMode, CalculationConfig, ConfigGuard, CustomDimension, Dimension,
        DimensionVector, KindPolicy, NumericKind, StandardDimension, Unit, UnitBuilder,
        UnitError, UnitResult, UnitValue,
    };
    pub use crate::engine::{
        compound, convert_via_planck, convert_within_dimension, from_planck_count,
        to_planck_count, ConversionEngine, DimensionRegistry,
    };
    pub use crate::interfaces::{InMemoryCatalog, UnitCatalog};
    pub use crate::numeric::{ErrorKind, NumericError, NumericResult, NumericValue};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::numeric::hyper_with;
    use std::sync::Arc;

    fn value(literal: &str) -> NumericValue {
        literal.parse().unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        let ratio = value("5").checked_div(&value("9")).unwrap();
        let fahrenheit_offset = value("459.67").checked_mul(&ratio).unwrap();

        InMemoryCatalog::with_units([
            Unit::linear("metre", "m", StandardDimension::Length, 1).unwrap(),
            Unit::linear("kilometre", "km", StandardDimension::Length, 1000).unwrap(),
            Unit::linear("kilogram", "kg", StandardDimension::Mass, 1).unwrap(),
            Unit::linear("second", "s", StandardDimension::Time, 1).unwrap(),
            Unit::linear("hour", "h", StandardDimension::Time, 3600).unwrap(),
            Unit::linear("kelvin", "K", StandardDimension::Temperature, 1).unwrap(),
            Unit::builder("degree Celsius", "°C", StandardDimension::Temperature, 1)
                .with_offset(value("273.15"))
                .build()
                .unwrap(),
            Unit::builder("degree Fahrenheit", "°F", StandardDimension::Temperature, ratio)
                .with_offset(fahrenheit_offset)
                .build()
                .unwrap(),
        ])
    }

    #[test]
    fn test_arithmetic_properties() {
        let a = value("1.25");
        let b = value("-7.5");
        let c = NumericValue::from(3);

        assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        assert_eq!(&a * &b, &b * &a);
        assert_eq!(value("1.0"), value("1"));
        assert_eq!(value("1"), NumericValue::from(1));

        let third = NumericValue::from(1) / NumericValue::from(3);
        assert!(third.to_string().starts_with("0.3333333333"));
    }

    #[test]
    fn test_hyper_and_factorial_properties() {
        let a = NumericValue::from(3);
        let b = NumericValue::from(4);
        assert_eq!(a.hyper(&b, 0).unwrap(), NumericValue::from(7));
        assert_eq!(a.hyper(&b, 1).unwrap(), NumericValue::from(12));
        assert_eq!(a.hyper(&b, 2).unwrap(), NumericValue::from(81));
        for level in 3..=9 {
            assert_eq!(a.hyper(&NumericValue::ZERO, level).unwrap(), NumericValue::ONE);
        }
        assert!(matches!(
            a.hyper(&NumericValue::ZERO, 10),
            Err(NumericError::HyperLevelTooHigh { level: 10, max: 9 })
        ));

        assert_eq!(NumericValue::from(5).factorial().unwrap(), NumericValue::from(120));
        assert_eq!(NumericValue::from(4).subfactorial().unwrap(), NumericValue::from(9));
        assert_eq!(
            NumericValue::from(-1).factorial().unwrap_err().kind(),
            ErrorKind::Domain
        );
    }

    #[test]
    fn test_catalog_conversions() {
        let engine = ConversionEngine::new(Arc::new(catalog()));

        let km = engine
            .convert_symbols(&NumericValue::from(1000), "m", "km")
            .unwrap()
            .unwrap();
        assert_eq!(km, NumericValue::from(1));
        assert_eq!(
            engine.convert_symbols(&km, "km", "m"),
            Ok(Some(NumericValue::from(1000)))
        );

        assert_eq!(engine.convert_symbols(&NumericValue::ONE, "m", "kg"), Ok(None));
        assert_eq!(
            engine.convert_symbols(&NumericValue::Float(f64::NAN), "m", "km"),
            Err(NumericError::NonFinite)
        );

        let fahrenheit = engine
            .convert_symbols(&NumericValue::ZERO, "°C", "°F")
            .unwrap()
            .unwrap();
        assert!((fahrenheit - NumericValue::from(32)).abs() < value("0.001"));

        let kelvin = engine
            .convert_symbols(&NumericValue::from(100), "°C", "K")
            .unwrap()
            .unwrap();
        assert_eq!(kelvin, value("373.15"));
    }

    #[test]
    fn test_compound_units_in_catalog() {
        let catalog = catalog();
        let km = catalog.unit("km").unwrap();
        let hour = catalog.unit("h").unwrap();
        let kmh = compound("kilometre per hour", "km/h", &[(km, 1), (hour, -1)]).unwrap();
        let mps = compound(
            "metre per second",
            "m/s",
            &[(catalog.unit("m").unwrap(), 1), (catalog.unit("s").unwrap(), -1)],
        )
        .unwrap();
        let direct = Unit::linear("metre per second", "m/s", StandardDimension::Speed, 1).unwrap();
        assert_eq!(mps.scale(), direct.scale());

        catalog.insert(kmh);
        catalog.insert(mps);
        let engine = ConversionEngine::new(Arc::new(catalog));
        let speed = engine
            .convert_symbols(&NumericValue::from(72), "km/h", "m/s")
            .unwrap()
            .unwrap();
        assert!((speed - NumericValue::from(20)).abs() < value("0.00001"));
    }

    #[test]
    fn test_registered_custom_dimension_converts_via_planck() {
        let registry = DimensionRegistry::new();
        let stride = CustomDimension::new("stride").with_display_name("stride length");
        registry.register(&stride, DimensionVector::new(1, 0, 0));

        let pace = Unit::builder("pace", "pace", stride, value("0.762"))
            .build_registered(&registry)
            .unwrap();
        let metre = Unit::linear("metre", "m", StandardDimension::Length, 1).unwrap();

        // Different tags: no direct path
        assert_eq!(
            convert_within_dimension(&NumericValue::ONE, &pace, &metre, KindPolicy::Strict),
            Ok(None)
        );

        let metres = UnitValue::new(100, pace)
            .convert_via_planck(&metre)
            .unwrap()
            .unwrap();
        assert!((metres.value() - &value("76.2")).abs() < value("0.000000001"));
    }

    #[test]
    fn test_explicit_config_threading() {
        let tight = CalculationConfig::default().with_max_digits(10);
        let err = hyper_with(&NumericValue::from(10), &NumericValue::from(3), 3, &tight)
            .unwrap_err();
        assert!(matches!(err, NumericError::HyperCeilingExceeded(_)));
        assert_eq!(err.kind(), ErrorKind::Configuration);

        // The global slot is untouched by explicit threading
        assert_eq!(
            CalculationConfig::current().max_digits,
            CalculationConfig::DEFAULT.max_digits
        );
    }
}
