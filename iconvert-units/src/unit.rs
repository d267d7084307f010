//! Unit representation with conversion factors

use std::fmt;
use serde::{Serialize, Deserialize};
use iconvert_core::{Dimension, RegistryError};
use crate::prefix::Prefix;

/// Represents a physical unit with its dimension and its linear transform
/// to the base unit of that dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "degC")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "celsius")
    pub name: String,
    /// Extra accepted spellings besides symbol and name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to the base unit (base = value * scale + offset)
    pub scale: f64,
    /// Offset for affine units like Celsius and Fahrenheit
    #[serde(default)]
    pub offset: f64,
    /// Category for organization (e.g., "length", "mass", "time")
    pub category: String,
    /// Whether SI prefixes may be composed with this unit
    #[serde(default)]
    pub prefixable: bool,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        scale: f64,
        category: &str,
    ) -> Self {
        Self::with_offset(symbol, name, dimension, scale, 0.0, category)
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        scale: f64,
        offset: f64,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            aliases: Vec::new(),
            dimension,
            scale,
            offset,
            category: category.to_string(),
            prefixable: false,
        }
    }

    /// Builder: add accepted spellings
    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Builder: allow SI prefix composition ("km", "kilogram", "ms")
    pub fn prefixable(mut self) -> Self {
        self.prefixable = true;
        self
    }

    /// Symbol, name and aliases, in that order
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.symbol.as_str())
            .chain(std::iter::once(self.name.as_str()))
            .chain(self.aliases.iter().map(|a| a.as_str()))
    }

    /// Check if this is the base unit of its dimension
    pub fn is_base(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.offset != 0.0
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Convert a value from the base unit to this unit
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }

    /// Compose an SI prefix with this unit (e.g., kilo + meter -> km).
    /// The result keeps the dimension and cannot be prefixed again.
    pub fn with_prefix(&self, prefix: &Prefix) -> Unit {
        Unit {
            symbol: format!("{}{}", prefix.symbol, self.symbol),
            name: format!("{}{}", prefix.name, self.name),
            aliases: Vec::new(),
            dimension: self.dimension,
            scale: self.scale * prefix.factor,
            offset: self.offset,
            category: self.category.clone(),
            prefixable: false,
        }
    }

    /// Check the transform invariants: finite positive scale, finite offset,
    /// and no prefixes on affine units
    pub fn validate(&self) -> Result<(), RegistryError> {
        let scale_ok = self.scale.is_finite() && self.scale > 0.0;
        let offset_ok = self.offset.is_finite() && !(self.prefixable && self.has_offset());
        if scale_ok && offset_ok {
            Ok(())
        } else {
            Err(RegistryError::InvalidScale {
                unit: self.name.clone(),
                scale: self.scale,
                offset: self.offset,
            })
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix;

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length").prefixable()
    }

    fn kilometer() -> Unit {
        Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", Dimension::TIME, 1.0, "time")
    }

    fn celsius() -> Unit {
        Unit::with_offset("degC", "celsius", Dimension::TEMPERATURE, 1.0, 273.15, "temperature")
    }

    #[test]
    fn test_base_unit() {
        assert!(meter().is_base());
        assert!(!kilometer().is_base());
        assert!(!celsius().is_base());
    }

    #[test]
    fn test_compatible_units() {
        let m = meter();
        let km = kilometer();
        let s = second();

        assert!(m.is_compatible(&km));
        assert!(!m.is_compatible(&s));
    }

    #[test]
    fn test_to_base() {
        assert_eq!(kilometer().to_base(5.0), 5000.0);
        assert_eq!(celsius().to_base(0.0), 273.15);
    }

    #[test]
    fn test_from_base() {
        assert_eq!(kilometer().from_base(5000.0), 5.0);
        assert_eq!(celsius().from_base(273.15), 0.0);
    }

    #[test]
    fn test_spellings() {
        let m = meter().aliases(&["metre"]);
        let all: Vec<&str> = m.spellings().collect();
        assert_eq!(all, vec!["m", "meter", "metre"]);
    }

    #[test]
    fn test_with_prefix() {
        let kilo = prefix::by_name("kilo").unwrap();
        let km = meter().with_prefix(kilo);

        assert_eq!(km.symbol, "km");
        assert_eq!(km.name, "kilometer");
        assert_eq!(km.dimension, Dimension::LENGTH);
        assert_eq!(km.scale, 1000.0);
        assert!(!km.prefixable);
    }

    #[test]
    fn test_validate() {
        assert!(meter().validate().is_ok());
        assert!(celsius().validate().is_ok());

        let zero = Unit::new("z", "zero", Dimension::LENGTH, 0.0, "length");
        assert!(matches!(zero.validate(), Err(RegistryError::InvalidScale { .. })));

        let negative = Unit::new("n", "negative", Dimension::LENGTH, -1.0, "length");
        assert!(negative.validate().is_err());

        let nan = Unit::new("x", "nan", Dimension::LENGTH, f64::NAN, "length");
        assert!(nan.validate().is_err());

        assert!(celsius().prefixable().validate().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(celsius().to_string(), "degC");
    }
}
