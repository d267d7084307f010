//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as an 8-element vector:
//! [length, mass, time, current, temperature, amount, luminosity, information]
//!
//! The first seven slots are the SI base quantities. The last one is a
//! non-physical bucket for digital information, so that bits and bytes stay
//! apart from angles and other dimensionless quantities.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Number of basis slots in a dimension vector
pub const BASIS_LEN: usize = 8;

/// Dimension indices for the basis quantities
pub const LENGTH: usize = 0;
pub const MASS: usize = 1;
pub const TIME: usize = 2;
pub const CURRENT: usize = 3;
pub const TEMPERATURE: usize = 4;
pub const AMOUNT: usize = 5;
pub const LUMINOSITY: usize = 6;
pub const INFORMATION: usize = 7;

const SYMBOLS: [&str; BASIS_LEN] = ["L", "M", "T", "I", "Θ", "N", "J", "B"];

/// Represents the dimensions of a physical quantity
/// as exponents of the basis quantities.
///
/// Two units can be converted into each other iff their dimensions are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, current, temperature, amount, luminosity, information]
    pub exponents: [i32; BASIS_LEN],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension::base(None);

    /// Length dimension [L]
    pub const LENGTH: Dimension = Dimension::base(Some(LENGTH));

    /// Mass dimension [M]
    pub const MASS: Dimension = Dimension::base(Some(MASS));

    /// Time dimension [T]
    pub const TIME: Dimension = Dimension::base(Some(TIME));

    /// Electric current dimension [I]
    pub const CURRENT: Dimension = Dimension::base(Some(CURRENT));

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = Dimension::base(Some(TEMPERATURE));

    /// Amount of substance dimension [N]
    pub const AMOUNT: Dimension = Dimension::base(Some(AMOUNT));

    /// Luminous intensity dimension [J]
    pub const LUMINOSITY: Dimension = Dimension::base(Some(LUMINOSITY));

    /// Digital information [B]
    pub const INFORMATION: Dimension = Dimension::base(Some(INFORMATION));

    /// Area [L^2]
    pub const AREA: Dimension = Dimension::LENGTH.power(2);

    /// Volume [L^3]
    pub const VOLUME: Dimension = Dimension::LENGTH.power(3);

    /// Velocity [L T^-1]
    pub const VELOCITY: Dimension = Dimension::LENGTH.divide(&Dimension::TIME);

    /// Acceleration [L T^-2]
    pub const ACCELERATION: Dimension = Dimension::VELOCITY.divide(&Dimension::TIME);

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension::MASS.multiply(&Dimension::ACCELERATION);

    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension::FORCE.multiply(&Dimension::LENGTH);

    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension::ENERGY.divide(&Dimension::TIME);

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension::FORCE.divide(&Dimension::AREA);

    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = Dimension::TIME.invert();

    /// Electric charge [I T]
    pub const CHARGE: Dimension = Dimension::CURRENT.multiply(&Dimension::TIME);

    /// Voltage [M L^2 T^-3 I^-1]
    pub const VOLTAGE: Dimension = Dimension::POWER.divide(&Dimension::CURRENT);

    /// Resistance [M L^2 T^-3 I^-2]
    pub const RESISTANCE: Dimension = Dimension::VOLTAGE.divide(&Dimension::CURRENT);

    /// Create a new dimension from exponents
    pub const fn new(exponents: [i32; BASIS_LEN]) -> Self {
        Dimension { exponents }
    }

    const fn base(slot: Option<usize>) -> Self {
        let mut exponents = [0i32; BASIS_LEN];
        if let Some(i) = slot {
            exponents[i] = 1;
        }
        Dimension { exponents }
    }

    /// Exponent of one basis quantity
    pub const fn exponent(&self, slot: usize) -> i32 {
        self.exponents[slot]
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub const fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; BASIS_LEN];
        let mut i = 0;
        while i < BASIS_LEN {
            result[i] = self.exponents[i] + other.exponents[i];
            i += 1;
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub const fn divide(&self, other: &Dimension) -> Dimension {
        let mut result = [0i32; BASIS_LEN];
        let mut i = 0;
        while i < BASIS_LEN {
            result[i] = self.exponents[i] - other.exponents[i];
            i += 1;
        }
        Dimension { exponents: result }
    }

    /// Raise to integer power (multiply exponents)
    pub const fn power(&self, exp: i32) -> Dimension {
        let mut result = [0i32; BASIS_LEN];
        let mut i = 0;
        while i < BASIS_LEN {
            result[i] = self.exponents[i] * exp;
            i += 1;
        }
        Dimension { exponents: result }
    }

    /// Invert dimensions (negate exponents)
    pub const fn invert(&self) -> Dimension {
        self.power(-1)
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        const NAMED: [(Dimension, &str); 21] = [
            (Dimension::DIMENSIONLESS, "dimensionless"),
            (Dimension::LENGTH, "length"),
            (Dimension::MASS, "mass"),
            (Dimension::TIME, "time"),
            (Dimension::CURRENT, "current"),
            (Dimension::TEMPERATURE, "temperature"),
            (Dimension::AMOUNT, "amount"),
            (Dimension::LUMINOSITY, "luminosity"),
            (Dimension::INFORMATION, "information"),
            (Dimension::AREA, "area"),
            (Dimension::VOLUME, "volume"),
            (Dimension::VELOCITY, "velocity"),
            (Dimension::ACCELERATION, "acceleration"),
            (Dimension::FORCE, "force"),
            (Dimension::ENERGY, "energy"),
            (Dimension::POWER, "power"),
            (Dimension::PRESSURE, "pressure"),
            (Dimension::FREQUENCY, "frequency"),
            (Dimension::CHARGE, "charge"),
            (Dimension::VOLTAGE, "voltage"),
            (Dimension::RESISTANCE, "resistance"),
        ];

        NAMED.iter()
            .find(|(dim, _)| dim == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(SYMBOLS[i].to_string());
                } else {
                    parts.push(format!("{}^{}", SYMBOLS[i], exp));
                }
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
