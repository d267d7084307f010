//! Unit definitions and the registry that owns them
//!
//! The registry is built once, checked for alias collisions, and never
//! mutated afterwards. Share it behind an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use iconvert_core::{Dimension, RegistryError};
use crate::Unit;
use crate::parse::normalize;

/// Registry of all known units, keyed by normalized alias
#[derive(Debug)]
pub struct UnitRegistry {
    units: Vec<Arc<Unit>>,
    aliases: HashMap<String, Arc<Unit>>,
}

impl UnitRegistry {
    /// Registry populated with the built-in catalog
    pub fn builtin() -> Result<Self, RegistryError> {
        RegistryBuilder::with_builtin_units().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Get a unit by symbol, name or alias (case- and whitespace-insensitive)
    pub fn lookup(&self, token: &str) -> Option<Arc<Unit>> {
        self.get_normalized(&normalize(token)).cloned()
    }

    /// Get a unit by an already normalized key
    pub(crate) fn get_normalized(&self, key: &str) -> Option<&Arc<Unit>> {
        self.aliases.get(key)
    }

    /// All units in registration order
    pub fn units(&self) -> &[Arc<Unit>] {
        &self.units
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.iter()
            .filter(|u| u.category == category)
            .map(|u| u.as_ref())
            .collect()
    }

    /// Distinct categories in registration order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for unit in &self.units {
            if !seen.contains(&unit.category.as_str()) {
                seen.push(&unit.category);
            }
        }
        seen
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

/// Collects unit definitions and checks them into a `UnitRegistry`
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    units: Vec<Unit>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder populated with the built-in catalog
    pub fn with_builtin_units() -> Self {
        let mut builder = Self::new();
        builder.register_all_units();
        builder
    }

    /// Builder: add one unit
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.register(unit);
        self
    }

    /// Validate every unit and index its spellings.
    ///
    /// Fails on the first invalid transform, empty alias, or alias claimed
    /// by two different units.
    pub fn build(self) -> Result<UnitRegistry, RegistryError> {
        let mut owners: HashMap<String, usize> = HashMap::new();

        for (index, unit) in self.units.iter().enumerate() {
            unit.validate()?;

            for spelling in unit.spellings() {
                let key = normalize(spelling);
                if key.is_empty() {
                    return Err(RegistryError::EmptyAlias { unit: unit.name.clone() });
                }
                if let Some(&owner) = owners.get(&key) {
                    if owner != index {
                        return Err(RegistryError::DuplicateAlias {
                            alias: key,
                            existing: self.units[owner].name.clone(),
                            incoming: unit.name.clone(),
                        });
                    }
                    continue;
                }
                owners.insert(key, index);
            }
        }

        let units: Vec<Arc<Unit>> = self.units.into_iter().map(Arc::new).collect();
        let aliases: HashMap<String, Arc<Unit>> = owners.into_iter()
            .map(|(key, index)| (key, Arc::clone(&units[index])))
            .collect();

        debug!(units = units.len(), aliases = aliases.len(), "unit registry built");

        Ok(UnitRegistry { units, aliases })
    }

    fn register(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_current_units();
        self.register_amount_units();
        self.register_luminosity_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_velocity_units();
        self.register_acceleration_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_frequency_units();
        self.register_electrical_units();
        self.register_data_units();
        self.register_angle_units();
    }

    fn register_length_units(&mut self) {
        // SI length units
        self.register(Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length").prefixable().aliases(&["metre"]));
        self.register(Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length").aliases(&["kilometre"]));
        self.register(Unit::new("cm", "centimeter", Dimension::LENGTH, 0.01, "length").aliases(&["centimetre"]));
        self.register(Unit::new("mm", "millimeter", Dimension::LENGTH, 0.001, "length").aliases(&["millimetre"]));
        self.register(Unit::new("um", "micrometer", Dimension::LENGTH, 1e-6, "length").aliases(&["micrometre", "micron", "µm", "μm"]));

        // Imperial/US length units
        self.register(Unit::new("in", "inch", Dimension::LENGTH, 0.0254, "length").aliases(&["inches"]));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, 0.3048, "length").aliases(&["feet"]));
        self.register(Unit::new("yd", "yard", Dimension::LENGTH, 0.9144, "length"));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, 1609.344, "length"));
        self.register(Unit::new("nmi", "nautical mile", Dimension::LENGTH, 1852.0, "length"));

        // Astronomical
        self.register(Unit::new("au", "astronomical unit", Dimension::LENGTH, 149_597_870_700.0, "length"));
        self.register(Unit::new("ly", "light year", Dimension::LENGTH, 9_460_730_472_580_800.0, "length").aliases(&["lightyear"]));
        self.register(Unit::new("pc", "parsec", Dimension::LENGTH, 3.085_677_581_491_367e16, "length"));
    }

    fn register_mass_units(&mut self) {
        // Kilogram is the base; gram carries the prefixes
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, 1.0, "mass").aliases(&["kilogramme"]));
        self.register(Unit::new("g", "gram", Dimension::MASS, 0.001, "mass").prefixable().aliases(&["gramme"]));
        self.register(Unit::new("mg", "milligram", Dimension::MASS, 1e-6, "mass"));
        self.register(Unit::new("t", "tonne", Dimension::MASS, 1000.0, "mass").aliases(&["metric ton"]));

        // Imperial/US mass units
        self.register(Unit::new("lb", "pound", Dimension::MASS, 0.453_592_37, "mass").aliases(&["lbs"]));
        self.register(Unit::new("oz", "ounce", Dimension::MASS, 0.028_349_523_125, "mass"));
        self.register(Unit::new("st", "stone", Dimension::MASS, 6.350_293_18, "mass"));
        self.register(Unit::new("ton", "short ton", Dimension::MASS, 907.184_74, "mass"));
        self.register(Unit::new("lton", "long ton", Dimension::MASS, 1016.046_908_8, "mass"));

        self.register(Unit::new("ct", "carat", Dimension::MASS, 0.0002, "mass"));
        self.register(Unit::new("gr", "grain", Dimension::MASS, 0.000_064_798_91, "mass"));
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("s", "second", Dimension::TIME, 1.0, "time").prefixable().aliases(&["sec"]));
        self.register(Unit::new("ms", "millisecond", Dimension::TIME, 0.001, "time"));
        self.register(Unit::new("min", "minute", Dimension::TIME, 60.0, "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, 3600.0, "time").aliases(&["hr"]));
        self.register(Unit::new("d", "day", Dimension::TIME, 86_400.0, "time"));
        self.register(Unit::new("wk", "week", Dimension::TIME, 604_800.0, "time"));
        self.register(Unit::new("mo", "month", Dimension::TIME, 2_629_746.0, "time")); // average
        self.register(Unit::new("yr", "year", Dimension::TIME, 31_556_952.0, "time").aliases(&["y"])); // average
    }

    fn register_temperature_units(&mut self) {
        // Kelvin is the base unit
        self.register(Unit::new("K", "kelvin", Dimension::TEMPERATURE, 1.0, "temperature").prefixable());

        // K = C + 273.15
        self.register(Unit::with_offset(
            "degC", "celsius", Dimension::TEMPERATURE,
            1.0,
            273.15,
            "temperature",
        ).aliases(&["C", "°C", "degree celsius", "degrees celsius"]));

        // K = (F + 459.67) * 5/9
        self.register(Unit::with_offset(
            "degF", "fahrenheit", Dimension::TEMPERATURE,
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
            "temperature",
        ).aliases(&["F", "°F", "degree fahrenheit", "degrees fahrenheit"]));

        // K = R * 5/9
        self.register(Unit::new("degR", "rankine", Dimension::TEMPERATURE, 5.0 / 9.0, "temperature")
            .aliases(&["R", "°R"]));
    }

    fn register_current_units(&mut self) {
        self.register(Unit::new("A", "ampere", Dimension::CURRENT, 1.0, "current").prefixable().aliases(&["amp"]));
    }

    fn register_amount_units(&mut self) {
        self.register(Unit::new("mol", "mole", Dimension::AMOUNT, 1.0, "amount").prefixable());
    }

    fn register_luminosity_units(&mut self) {
        self.register(Unit::new("cd", "candela", Dimension::LUMINOSITY, 1.0, "luminosity").prefixable());
    }

    fn register_area_units(&mut self) {
        self.register(Unit::new("m2", "square meter", Dimension::AREA, 1.0, "area").aliases(&["m²", "sq m", "sqm", "square metre"]));
        self.register(Unit::new("km2", "square kilometer", Dimension::AREA, 1e6, "area").aliases(&["km²", "sq km"]));
        self.register(Unit::new("cm2", "square centimeter", Dimension::AREA, 1e-4, "area").aliases(&["cm²", "sq cm"]));
        self.register(Unit::new("mm2", "square millimeter", Dimension::AREA, 1e-6, "area").aliases(&["mm²"]));
        self.register(Unit::new("ha", "hectare", Dimension::AREA, 10_000.0, "area"));
        self.register(Unit::new("ac", "acre", Dimension::AREA, 4046.856_422_4, "area"));
        self.register(Unit::new("ft2", "square foot", Dimension::AREA, 0.092_903_04, "area").aliases(&["ft²", "sq ft", "sqft", "square feet"]));
        self.register(Unit::new("in2", "square inch", Dimension::AREA, 0.000_645_16, "area").aliases(&["in²", "sq in", "square inches"]));
        self.register(Unit::new("yd2", "square yard", Dimension::AREA, 0.836_127_36, "area").aliases(&["yd²", "sq yd"]));
        self.register(Unit::new("mi2", "square mile", Dimension::AREA, 2_589_988.110_336, "area").aliases(&["mi²", "sq mi"]));
    }

    fn register_volume_units(&mut self) {
        self.register(Unit::new("m3", "cubic meter", Dimension::VOLUME, 1.0, "volume").aliases(&["m³", "cubic metre"]));
        self.register(Unit::new("L", "liter", Dimension::VOLUME, 0.001, "volume").prefixable().aliases(&["litre"]));
        self.register(Unit::new("mL", "milliliter", Dimension::VOLUME, 1e-6, "volume").aliases(&["millilitre"]));
        self.register(Unit::new("cm3", "cubic centimeter", Dimension::VOLUME, 1e-6, "volume").aliases(&["cm³", "cc"]));

        // US fluid volumes
        self.register(Unit::new("gal", "gallon", Dimension::VOLUME, 0.003_785_411_784, "volume").aliases(&["us gallon"]));
        self.register(Unit::new("qt", "quart", Dimension::VOLUME, 0.000_946_352_946, "volume"));
        self.register(Unit::new("pt", "pint", Dimension::VOLUME, 0.000_473_176_473, "volume"));
        self.register(Unit::new("cup", "cup", Dimension::VOLUME, 0.000_236_588_236_5, "volume"));
        self.register(Unit::new("floz", "fluid ounce", Dimension::VOLUME, 0.000_029_573_529_562_5, "volume").aliases(&["fl oz"]));
        self.register(Unit::new("tbsp", "tablespoon", Dimension::VOLUME, 0.000_014_786_764_781_25, "volume"));
        self.register(Unit::new("tsp", "teaspoon", Dimension::VOLUME, 0.000_004_928_921_593_75, "volume"));

        // Imperial volumes
        self.register(Unit::new("impgal", "imperial gallon", Dimension::VOLUME, 0.004_546_09, "volume").aliases(&["uk gallon"]));
        self.register(Unit::new("imppt", "imperial pint", Dimension::VOLUME, 0.000_568_261_25, "volume").aliases(&["uk pint"]));

        self.register(Unit::new("ft3", "cubic foot", Dimension::VOLUME, 0.028_316_846_592, "volume").aliases(&["ft³", "cubic feet"]));
        self.register(Unit::new("in3", "cubic inch", Dimension::VOLUME, 0.000_016_387_064, "volume").aliases(&["in³"]));
    }

    fn register_velocity_units(&mut self) {
        self.register(Unit::new("m/s", "meter per second", Dimension::VELOCITY, 1.0, "velocity").aliases(&["mps", "meters per second"]));
        self.register(Unit::new("km/h", "kilometer per hour", Dimension::VELOCITY, 1000.0 / 3600.0, "velocity").aliases(&["kph", "kmh", "kmph", "kilometers per hour"]));
        self.register(Unit::new("mph", "mile per hour", Dimension::VELOCITY, 0.447_04, "velocity").aliases(&["miles per hour"]));
        self.register(Unit::new("ft/s", "foot per second", Dimension::VELOCITY, 0.3048, "velocity").aliases(&["fps", "feet per second"]));
        self.register(Unit::new("kt", "knot", Dimension::VELOCITY, 1852.0 / 3600.0, "velocity"));
    }

    fn register_acceleration_units(&mut self) {
        self.register(Unit::new("m/s2", "meter per second squared", Dimension::ACCELERATION, 1.0, "acceleration").aliases(&["m/s²"]));
        self.register(Unit::new("g0", "standard gravity", Dimension::ACCELERATION, 9.806_65, "acceleration").aliases(&["gee"]));
        self.register(Unit::new("ft/s2", "foot per second squared", Dimension::ACCELERATION, 0.3048, "acceleration").aliases(&["ft/s²"]));
    }

    fn register_force_units(&mut self) {
        self.register(Unit::new("N", "newton", Dimension::FORCE, 1.0, "force").prefixable());
        self.register(Unit::new("dyn", "dyne", Dimension::FORCE, 1e-5, "force"));
        self.register(Unit::new("lbf", "pound-force", Dimension::FORCE, 4.448_221_615_260_5, "force").aliases(&["pound force"]));
        self.register(Unit::new("MN", "meganewton", Dimension::FORCE, 1e6, "force"));
        self.register(Unit::new("kgf", "kilogram-force", Dimension::FORCE, 9.806_65, "force").aliases(&["kilogram force"]));
    }

    fn register_energy_units(&mut self) {
        self.register(Unit::new("J", "joule", Dimension::ENERGY, 1.0, "energy").prefixable());
        self.register(Unit::new("MJ", "megajoule", Dimension::ENERGY, 1e6, "energy"));
        self.register(Unit::new("GJ", "gigajoule", Dimension::ENERGY, 1e9, "energy"));
        self.register(Unit::new("cal", "calorie", Dimension::ENERGY, 4.184, "energy"));
        self.register(Unit::new("kcal", "kilocalorie", Dimension::ENERGY, 4184.0, "energy").aliases(&["food calorie"]));
        self.register(Unit::new("Wh", "watt hour", Dimension::ENERGY, 3600.0, "energy").aliases(&["watt-hour"]));
        self.register(Unit::new("kWh", "kilowatt hour", Dimension::ENERGY, 3.6e6, "energy").aliases(&["kilowatt-hour"]));
        self.register(Unit::new("MWh", "megawatt hour", Dimension::ENERGY, 3.6e9, "energy").aliases(&["megawatt-hour"]));
        self.register(Unit::new("eV", "electronvolt", Dimension::ENERGY, 1.602_176_634e-19, "energy").aliases(&["electron volt"]));
        self.register(Unit::new("BTU", "british thermal unit", Dimension::ENERGY, 1055.055_852_62, "energy"));
    }

    fn register_power_units(&mut self) {
        self.register(Unit::new("W", "watt", Dimension::POWER, 1.0, "power").prefixable());
        // Mega and giga are registered outright, like MHz below
        self.register(Unit::new("MW", "megawatt", Dimension::POWER, 1e6, "power"));
        self.register(Unit::new("GW", "gigawatt", Dimension::POWER, 1e9, "power"));
        self.register(Unit::new("hp", "horsepower", Dimension::POWER, 745.699_872, "power"));
    }

    fn register_pressure_units(&mut self) {
        self.register(Unit::new("Pa", "pascal", Dimension::PRESSURE, 1.0, "pressure").prefixable());
        self.register(Unit::new("MPa", "megapascal", Dimension::PRESSURE, 1e6, "pressure"));
        self.register(Unit::new("GPa", "gigapascal", Dimension::PRESSURE, 1e9, "pressure"));
        self.register(Unit::new("bar", "bar", Dimension::PRESSURE, 100_000.0, "pressure").prefixable());
        self.register(Unit::new("atm", "atmosphere", Dimension::PRESSURE, 101_325.0, "pressure"));
        self.register(Unit::new("psi", "pound per square inch", Dimension::PRESSURE, 6894.757_293_168, "pressure").aliases(&["pounds per square inch"]));
        self.register(Unit::new("mmHg", "millimeter of mercury", Dimension::PRESSURE, 133.322_387_415, "pressure"));
        self.register(Unit::new("torr", "torr", Dimension::PRESSURE, 101_325.0 / 760.0, "pressure"));
        self.register(Unit::new("inHg", "inch of mercury", Dimension::PRESSURE, 3386.389, "pressure"));
    }

    fn register_frequency_units(&mut self) {
        self.register(Unit::new("Hz", "hertz", Dimension::FREQUENCY, 1.0, "frequency").prefixable());
        // Case folding makes "MHz" read as millihertz; the common reading wins
        self.register(Unit::new("MHz", "megahertz", Dimension::FREQUENCY, 1e6, "frequency"));
        self.register(Unit::new("GHz", "gigahertz", Dimension::FREQUENCY, 1e9, "frequency"));
        self.register(Unit::new("THz", "terahertz", Dimension::FREQUENCY, 1e12, "frequency"));
        self.register(Unit::new("rpm", "revolution per minute", Dimension::FREQUENCY, 1.0 / 60.0, "frequency").aliases(&["revolutions per minute"]));
    }

    fn register_electrical_units(&mut self) {
        self.register(Unit::new("V", "volt", Dimension::VOLTAGE, 1.0, "electrical").prefixable());
        self.register(Unit::new("ohm", "ohm", Dimension::RESISTANCE, 1.0, "electrical").prefixable().aliases(&["Ω"]));
        self.register(Unit::new("MV", "megavolt", Dimension::VOLTAGE, 1e6, "electrical"));
        self.register(Unit::new("Mohm", "megohm", Dimension::RESISTANCE, 1e6, "electrical").aliases(&["megaohm", "MΩ"]));

        // "C" is taken by Celsius
        self.register(Unit::new("Coul", "coulomb", Dimension::CHARGE, 1.0, "electrical"));
        self.register(Unit::new("Ah", "ampere hour", Dimension::CHARGE, 3600.0, "electrical").aliases(&["ampere-hour"]));
        self.register(Unit::new("mAh", "milliampere hour", Dimension::CHARGE, 3.6, "electrical").aliases(&["milliampere-hour"]));
    }

    fn register_data_units(&mut self) {
        // Information has its own basis slot so it never converts to angles
        self.register(Unit::new("bit", "bit", Dimension::INFORMATION, 1.0, "data").prefixable());
        self.register(Unit::new("B", "byte", Dimension::INFORMATION, 8.0, "data").prefixable().aliases(&["octet"]));

        // Decimal multiples; "mb" means megabyte, not millibyte
        self.register(Unit::new("kB", "kilobyte", Dimension::INFORMATION, 8e3, "data"));
        self.register(Unit::new("MB", "megabyte", Dimension::INFORMATION, 8e6, "data"));
        self.register(Unit::new("GB", "gigabyte", Dimension::INFORMATION, 8e9, "data"));
        self.register(Unit::new("TB", "terabyte", Dimension::INFORMATION, 8e12, "data"));
        self.register(Unit::new("PB", "petabyte", Dimension::INFORMATION, 8e15, "data"));
        self.register(Unit::new("Mbit", "megabit", Dimension::INFORMATION, 1e6, "data"));
        self.register(Unit::new("Gbit", "gigabit", Dimension::INFORMATION, 1e9, "data"));

        // Binary units (IEC)
        self.register(Unit::new("KiB", "kibibyte", Dimension::INFORMATION, 8.0 * 1024.0, "data"));
        self.register(Unit::new("MiB", "mebibyte", Dimension::INFORMATION, 8.0 * 1024.0 * 1024.0, "data"));
        self.register(Unit::new("GiB", "gibibyte", Dimension::INFORMATION, 8.0 * 1024.0 * 1024.0 * 1024.0, "data"));
        self.register(Unit::new("TiB", "tebibyte", Dimension::INFORMATION, 8.0 * 1024.0 * 1024.0 * 1024.0 * 1024.0, "data"));
    }

    fn register_angle_units(&mut self) {
        // Angles are dimensionless
        self.register(Unit::new("rad", "radian", Dimension::DIMENSIONLESS, 1.0, "angle").prefixable());
        self.register(Unit::new("deg", "degree", Dimension::DIMENSIONLESS, std::f64::consts::PI / 180.0, "angle").aliases(&["°"]));
        self.register(Unit::new("grad", "gradian", Dimension::DIMENSIONLESS, std::f64::consts::PI / 200.0, "angle").aliases(&["gon"]));
        self.register(Unit::new("arcmin", "arcminute", Dimension::DIMENSIONLESS, std::f64::consts::PI / 10_800.0, "angle"));
        self.register(Unit::new("arcsec", "arcsecond", Dimension::DIMENSIONLESS, std::f64::consts::PI / 648_000.0, "angle"));
        self.register(Unit::new("turn", "turn", Dimension::DIMENSIONLESS, std::f64::consts::TAU, "angle").aliases(&["revolution"]));
    }
}
