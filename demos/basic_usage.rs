// ============================================================================
// Basic Usage Example
// ============================================================================

use exact_units::prelude::*;
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    println!("=== Exact Units Example ===\n");

    // Exact arithmetic
    let a: NumericValue = "0.1".parse().unwrap();
    let b: NumericValue = "0.2".parse().unwrap();
    println!("0.1 + 0.2 = {}", &a + &b);
    println!("1 / 3     = {}", NumericValue::from(1) / NumericValue::from(3));
    println!("2 ** 100  = {}", NumericValue::from(2).powi(100).unwrap());

    // Hyperoperations and factorials
    println!("\n=== Kernel ===");
    let two = NumericValue::from(2);
    println!("2↑↑4 = {}", two.tetrate(&NumericValue::from(4)).unwrap());
    println!("2↑↑↑3 = {}", two.pentate(&NumericValue::from(3)).unwrap());
    println!("25!  = {}", NumericValue::from(25).factorial().unwrap());
    println!("!10  = {}", NumericValue::from(10).subfactorial().unwrap());
    println!("√2   ≈ {}", two.sqrt().unwrap());

    match NumericValue::from(10).tetrate(&NumericValue::from(5)) {
        Ok(value) => println!("10↑↑5 = {value}"),
        Err(err) => println!("10↑↑5 refused: {err}"),
    }

    // Unit catalog
    let ratio = NumericValue::from(5) / NumericValue::from(9);
    let fahrenheit_offset = "459.67".parse::<NumericValue>().unwrap() * &ratio;
    let mile_scale = "1609.344".parse::<NumericValue>().unwrap();
    let catalog = Arc::new(InMemoryCatalog::with_units([
        Unit::linear("metre", "m", StandardDimension::Length, 1).unwrap(),
        Unit::linear("kilometre", "km", StandardDimension::Length, 1000).unwrap(),
        Unit::linear("mile", "mi", StandardDimension::Length, mile_scale).unwrap(),
        Unit::linear("kilogram", "kg", StandardDimension::Mass, 1).unwrap(),
        Unit::builder("degree Celsius", "°C", StandardDimension::Temperature, 1)
            .with_offset("273.15".parse::<NumericValue>().unwrap())
            .build()
            .unwrap(),
        Unit::builder("degree Fahrenheit", "°F", StandardDimension::Temperature, ratio)
            .with_offset(fahrenheit_offset)
            .build()
            .unwrap(),
    ]));
    let engine = ConversionEngine::new(catalog.clone());

    println!("\n=== Conversions ===");
    for (value, from, to) in [
        ("26.2", "mi", "km"),
        ("1000", "m", "km"),
        ("100", "°C", "°F"),
        ("1", "m", "kg"),
    ] {
        let input: NumericValue = value.parse().unwrap();
        match engine.convert_symbols(&input, from, to) {
            Ok(Some(result)) => println!("{value} {from} = {result} {to}"),
            Ok(None) => println!("{value} {from} cannot be expressed in {to}"),
            Err(err) => println!("{value} {from} -> {to} failed: {err}"),
        }
    }

    // Compound units
    println!("\n=== Compound Units ===");
    let second = Unit::linear("second", "s", StandardDimension::Time, 1).unwrap();
    let hour = Unit::linear("hour", "h", StandardDimension::Time, 3600).unwrap();
    if let (Some(metre), Some(kilometre)) = (catalog.unit("m"), catalog.unit("km")) {
        let mps = compound("metre per second", "m/s", &[(metre, 1), (second.clone(), -1)]).unwrap();
        let kmh = compound("kilometre per hour", "km/h", &[(kilometre, 1), (hour, -1)]).unwrap();
        println!("{mps}: dimension {}, scale {}", mps.dimension(), mps.scale());
        println!("{kmh}: dimension {}, scale {}", kmh.dimension(), kmh.scale());

        let speed = UnitValue::new(100, kmh);
        if let Ok(Some(converted)) = speed.convert_to(&mps, KindPolicy::Strict) {
            println!("{speed} = {converted}");
        }
    }

    // Planck normalisation
    println!("\n=== Planck Units ===");
    let metre = Unit::linear("metre", "m", StandardDimension::Length, 1).unwrap();
    if let Ok(Some(count)) = to_planck_count(&NumericValue::ONE, &metre) {
        println!("1 m = {} Planck lengths", count.to_f64());
    }
    if let Ok(Some(light_second)) = convert_via_planck(&NumericValue::ONE, &second, &metre) {
        println!("1 s in natural units ≈ {} m", light_second.to_f64());
    }
}
