//! iConvert Units - Unit registry, resolver and conversion engine
//!
//! Converts a numeric amount between two units of the same physical
//! dimension. Unit tokens are resolved case-insensitively through explicit
//! aliases, SI prefix composition and plural forms.
//!
//! Categories:
//! - Length (m, km, ft, mile, etc.)
//! - Mass (kg, g, lb, oz, etc.)
//! - Time (s, min, h, day, etc.)
//! - Temperature (K, degC, degF, degR)
//! - Current (A, mA, etc.)
//! - Amount (mol, mmol, etc.)
//! - Luminosity (cd)
//! - Area (m², ft², acre, etc.)
//! - Volume (L, mL, gal, etc.)
//! - Velocity (m/s, km/h, mph, etc.)
//! - Acceleration (m/s², g0)
//! - Force (N, lbf, etc.)
//! - Energy (J, cal, kWh, etc.)
//! - Power (W, hp, etc.)
//! - Pressure (Pa, bar, psi, etc.)
//! - Frequency (Hz, rpm, etc.)
//! - Electrical (V, ohm, Coul)
//! - Data (bit, byte, MB, GiB, etc.)
//! - Angle (rad, deg, etc.)
//!
//! ```no_run
//! use iconvert_units::Converter;
//!
//! let converter = Converter::builtin().expect("builtin catalog is consistent");
//! let km = converter.convert_query("10 km to m");
//! ```

mod unit;
mod convert;
mod parse;
mod units;
pub mod prefix;

pub use iconvert_core::{Dimension, ConversionError, RegistryError, Severity};
pub use unit::Unit;
pub use prefix::Prefix;
pub use units::{UnitRegistry, RegistryBuilder};
pub use parse::{normalize, parse_unit, parse_amount, ConversionRequest, ResolveOptions, UnitParser};
pub use convert::{convert, Conversion, ConversionResult, Converter};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn converter() -> Converter {
        Converter::builtin().unwrap()
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!((actual - expected).abs() <= tolerance, "expected {}, got {}", expected, actual);
    }

    mod scenarios {
        use super::*;

        #[test]
        fn test_kilometers_to_meters() {
            let result = converter().convert_by_name(10.0, "km", "m").unwrap();
            assert_eq!(result.value, 10_000.0);
        }

        #[test]
        fn test_freezing_point() {
            let result = converter().convert_by_name(0.0, "celsius", "fahrenheit").unwrap();
            assert_close(result.value, 32.0, 1e-9);
        }

        #[test]
        fn test_mass_to_volume_rejected() {
            let err = converter().convert_by_name(5.0, "kg", "liter").unwrap_err();
            assert!(matches!(err, ConversionError::DimensionMismatch { .. }));
            assert_eq!(err.code(), "DIMENSION_MISMATCH");
        }

        #[test]
        fn test_unknown_unit() {
            let err = converter().convert_by_name(3.0, "banana", "m").unwrap_err();
            assert_eq!(err, ConversionError::UnitNotFound { token: "banana".to_string() });
        }

        #[test]
        fn test_mile_to_kilometers() {
            let result = converter().convert_by_name(1.0, "mile", "km").unwrap();
            assert_close(result.value, 1.60934, 1e-4);
        }

        #[test]
        fn test_megawatt_to_kilowatt() {
            let result = converter().convert_by_name(1.0, "MW", "kW").unwrap();
            assert_eq!(result.value, 1000.0);
            assert_eq!(result.from.name, "megawatt");
        }

        #[test]
        fn test_kilonewton_to_newton() {
            let result = converter().convert_by_name(2.0, "kN", "N").unwrap();
            assert_eq!(result.value, 2000.0);
        }
    }

    mod properties {
        use super::*;

        #[test]
        fn test_round_trip() {
            let c = converter();
            let units = c.registry().units();
            let mut checked = 0;

            for from in units {
                for to in units.iter().filter(|u| u.category == from.category && u.is_compatible(from)) {
                    let there = c.convert(42.5, from, to).unwrap();
                    let back = c.convert(there, to, from).unwrap();
                    assert_close(back, 42.5, 1e-9);
                    checked += 1;
                }
            }

            assert!(checked > units.len());
        }

        #[test]
        fn test_identity() {
            let c = converter();
            for unit in c.registry().units() {
                assert_eq!(c.convert(7.25, unit, unit).unwrap(), 7.25, "{}", unit.symbol);
            }
        }

        #[test]
        fn test_aliases_agree() {
            let c = converter();
            let spelled = c.convert_by_name(3.0, "kilometres", "Metres").unwrap().value;
            let symbol = c.convert_by_name(3.0, "km", "m").unwrap().value;
            assert_eq!(spelled, symbol);
        }
    }

    mod concurrency {
        use super::*;

        #[test]
        fn test_shared_registry_across_threads() {
            let registry = Arc::new(UnitRegistry::builtin().unwrap());
            let converter = Converter::new(registry);

            std::thread::scope(|s| {
                for i in 0..8 {
                    let converter = converter.clone();
                    s.spawn(move || {
                        let amount = i as f64;
                        let result = converter.convert_by_name(amount, "km", "m").unwrap();
                        assert_eq!(result.value, amount * 1000.0);
                    });
                }
            });
        }

        #[test]
        fn test_converter_is_send_sync() {
            fn assert_send_sync<T: Send + Sync>() {}
            assert_send_sync::<Converter>();
            assert_send_sync::<Conversion>();
        }
    }
}
