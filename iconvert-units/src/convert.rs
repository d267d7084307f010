//! Conversion engine and the `Converter` entry point
//!
//! `convert` is the pure engine: dimension check, then
//! `base = amount * from.scale + from.offset` and
//! `result = (base - to.offset) / to.scale`. No rounding is applied.
//! Between purely multiplicative units a base value too large for `f64`
//! falls back to the scale ratio, so only the result itself can overflow.
//!
//! `Converter` bundles a shared registry with resolver options and folds
//! token resolution and conversion into one call.

use std::fmt;
use std::sync::Arc;
use tracing::debug;
use iconvert_core::{ConversionError, RegistryError};
use crate::Unit;
use crate::parse::{ConversionRequest, ResolveOptions, UnitParser};
use crate::units::UnitRegistry;

/// Convert an amount between two resolved units
pub fn convert(amount: f64, from: &Unit, to: &Unit) -> Result<f64, ConversionError> {
    if !from.is_compatible(to) {
        return Err(ConversionError::DimensionMismatch {
            from: from.symbol.clone(),
            to: to.symbol.clone(),
            from_dim: from.dimension,
            to_dim: to.dimension,
        });
    }

    if !amount.is_finite() {
        return Err(ConversionError::invalid_amount(amount.to_string()));
    }

    if from == to {
        return Ok(amount);
    }

    let value = if from.has_offset() || to.has_offset() {
        to.from_base(from.to_base(amount))
    } else {
        rescale(amount, from.scale, to.scale)
    };
    if !value.is_finite() {
        return Err(ConversionError::NumericOverflow {
            amount,
            from: from.symbol.clone(),
            to: to.symbol.clone(),
        });
    }

    Ok(value)
}

fn rescale(amount: f64, from_scale: f64, to_scale: f64) -> f64 {
    let base = amount * from_scale;
    if base.is_finite() {
        base / to_scale
    } else {
        amount * (from_scale / to_scale)
    }
}

/// Successful conversion with the units it was resolved to
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Amount as supplied
    pub amount: f64,
    /// Amount expressed in `to`
    pub value: f64,
    pub from: Arc<Unit>,
    pub to: Arc<Unit>,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {} {}", self.amount, self.from, self.value, self.to)
    }
}

/// Success or one of the per-request failure kinds
pub type ConversionResult = Result<Conversion, ConversionError>;

/// Resolves unit tokens and converts amounts against one shared registry
#[derive(Debug, Clone)]
pub struct Converter {
    registry: Arc<UnitRegistry>,
    options: ResolveOptions,
}

impl Converter {
    pub fn new(registry: Arc<UnitRegistry>) -> Self {
        Self { registry, options: ResolveOptions::default() }
    }

    /// Converter over the built-in catalog
    pub fn builtin() -> Result<Self, RegistryError> {
        Ok(Self::new(Arc::new(UnitRegistry::builtin()?)))
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    pub fn parser(&self) -> UnitParser<'_> {
        UnitParser::new(&self.registry).with_options(self.options)
    }

    /// Resolve a unit token
    pub fn resolve_unit(&self, token: &str) -> Result<Arc<Unit>, ConversionError> {
        self.parser().resolve(token)
    }

    /// Convert between two already resolved units
    pub fn convert(&self, amount: f64, from: &Unit, to: &Unit) -> Result<f64, ConversionError> {
        convert(amount, from, to)
    }

    /// Resolve both tokens, then convert
    pub fn convert_by_name(&self, amount: f64, from: &str, to: &str) -> ConversionResult {
        let result = self.resolve_and_convert(amount, from, to);
        if let Err(ref e) = result {
            debug!(amount, from, to, code = e.code(), error = %e, "conversion failed");
        }
        result
    }

    /// Run a parsed request
    pub fn execute(&self, request: &ConversionRequest) -> ConversionResult {
        self.convert_by_name(request.amount, &request.from, &request.to)
    }

    /// Parse a query line ("10 km to m") and run it
    pub fn convert_query(&self, line: &str) -> ConversionResult {
        let request: ConversionRequest = line.parse().map_err(|e: ConversionError| {
            debug!(line, code = e.code(), error = %e, "query rejected");
            e
        })?;
        self.execute(&request)
    }

    fn resolve_and_convert(&self, amount: f64, from: &str, to: &str) -> ConversionResult {
        let parser = self.parser();
        let from = parser.resolve(from)?;
        let to = parser.resolve(to)?;
        let value = convert(amount, &from, &to)?;

        Ok(Conversion { amount, value, from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconvert_core::Dimension;

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length")
    }

    fn kilometer() -> Unit {
        Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length")
    }

    fn kilogram() -> Unit {
        Unit::new("kg", "kilogram", Dimension::MASS, 1.0, "mass")
    }

    fn celsius() -> Unit {
        Unit::with_offset("degC", "celsius", Dimension::TEMPERATURE, 1.0, 273.15, "temperature")
    }

    fn fahrenheit() -> Unit {
        Unit::with_offset("degF", "fahrenheit", Dimension::TEMPERATURE, 5.0 / 9.0, 459.67 * 5.0 / 9.0, "temperature")
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!((actual - expected).abs() <= tolerance, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_scale_conversion() {
        assert_eq!(convert(5000.0, &meter(), &kilometer()).unwrap(), 5.0);
        assert_eq!(convert(10.0, &kilometer(), &meter()).unwrap(), 10_000.0);
    }

    #[test]
    fn test_affine_conversion() {
        assert_close(convert(0.0, &celsius(), &fahrenheit()).unwrap(), 32.0);
        assert_close(convert(100.0, &celsius(), &fahrenheit()).unwrap(), 212.0);
        assert_close(convert(-40.0, &fahrenheit(), &celsius()).unwrap(), -40.0);
    }

    #[test]
    fn test_identity_is_exact() {
        for amount in [0.0, 1.0, -3.25, 1e-300, 123_456.789] {
            assert_eq!(convert(amount, &fahrenheit(), &fahrenheit()).unwrap(), amount);
            assert_eq!(convert(amount, &kilometer(), &kilometer()).unwrap(), amount);
        }
    }

    #[test]
    fn test_negative_amounts_allowed() {
        assert_eq!(convert(-2.0, &kilogram(), &kilogram()).unwrap(), -2.0);
        assert_eq!(convert(-2.0, &kilometer(), &meter()).unwrap(), -2000.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = convert(5.0, &kilogram(), &meter()).unwrap_err();
        assert_eq!(err, ConversionError::DimensionMismatch {
            from: "kg".to_string(),
            to: "m".to_string(),
            from_dim: Dimension::MASS,
            to_dim: Dimension::LENGTH,
        });
    }

    #[test]
    fn test_mismatch_reported_before_bad_amount() {
        let err = convert(f64::NAN, &kilogram(), &meter()).unwrap_err();
        assert_eq!(err.code(), "DIMENSION_MISMATCH");
    }

    #[test]
    fn test_mismatch_checked_before_identity_shortcut() {
        let fake = Unit::new("m", "meter", Dimension::TIME, 1.0, "length");
        assert!(convert(1.0, &meter(), &fake).is_err());
    }

    #[test]
    fn test_invalid_amount() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = convert(amount, &meter(), &kilometer()).unwrap_err();
            assert!(matches!(err, ConversionError::InvalidAmount { .. }));
        }
    }

    #[test]
    fn test_numeric_overflow() {
        let err = convert(f64::MAX, &kilometer(), &meter()).unwrap_err();
        assert!(matches!(err, ConversionError::NumericOverflow { .. }));
        assert_eq!(err.code(), "NUMERIC_OVERFLOW");
    }

    #[test]
    fn test_huge_amount_between_large_units() {
        let ly = Unit::new("ly", "light year", Dimension::LENGTH, 9_460_730_472_580_800.0, "length");
        let pc = Unit::new("pc", "parsec", Dimension::LENGTH, 3.085_677_581_491_367e16, "length");

        let value = convert(1e300, &ly, &pc).unwrap();
        assert!((value / 3.066_013_937_855_506e299 - 1.0).abs() < 1e-9, "got {}", value);

        let back = convert(value, &pc, &ly).unwrap();
        assert!((back / 1e300 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_converter_by_name() {
        let converter = Converter::builtin().unwrap();
        let conversion = converter.convert_by_name(10.0, "km", "m").unwrap();

        assert_eq!(conversion.value, 10_000.0);
        assert_eq!(conversion.amount, 10.0);
        assert_eq!(conversion.from.symbol, "km");
        assert_eq!(conversion.to.symbol, "m");
    }

    #[test]
    fn test_converter_resolution_errors_first() {
        let converter = Converter::builtin().unwrap();
        let err = converter.convert_by_name(f64::NAN, "banana", "m").unwrap_err();
        assert_eq!(err, ConversionError::unit_not_found("banana"));

        let err = converter.convert_by_name(1.0, "m", "banana").unwrap_err();
        assert_eq!(err, ConversionError::unit_not_found("banana"));
    }

    #[test]
    fn test_converter_execute_request() {
        let converter = Converter::builtin().unwrap();
        let request = ConversionRequest::new(2.0, "hours", "min");
        assert_eq!(converter.execute(&request).unwrap().value, 120.0);
    }

    #[test]
    fn test_converter_query() {
        let converter = Converter::builtin().unwrap();

        let conversion = converter.convert_query("converter 1 GiB to MiB").unwrap();
        assert_eq!(conversion.value, 1024.0);

        let err = converter.convert_query("ten km m").unwrap_err();
        assert_eq!(err, ConversionError::invalid_amount("ten"));
    }

    #[test]
    fn test_converter_respects_options() {
        let converter = Converter::builtin().unwrap().with_options(ResolveOptions::strict());
        assert!(converter.convert_by_name(1.0, "dam", "m").is_err());
        assert!(converter.convert_by_name(1.0, "km", "m").is_ok());
    }

    #[test]
    fn test_conversion_display() {
        let converter = Converter::builtin().unwrap();
        let conversion = converter.convert_by_name(10.0, "km", "m").unwrap();
        assert_eq!(conversion.to_string(), "10 km = 10000 m");
    }

    #[test]
    fn test_converter_with_custom_registry() {
        let registry = UnitRegistry::builder()
            .with_unit(Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length").prefixable())
            .with_unit(Unit::new("ft", "foot", Dimension::LENGTH, 0.3048, "length").aliases(&["feet"]))
            .build()
            .unwrap();
        let converter = Converter::new(Arc::new(registry));

        assert_close(converter.convert_by_name(1.0, "feet", "cm").unwrap().value, 30.48);
        assert!(converter.convert_by_name(1.0, "mile", "m").is_err());
    }
}
