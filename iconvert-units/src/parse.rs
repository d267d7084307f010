//! Unit token resolution and request parsing
//!
//! Resolution order for a unit token:
//! 1. exact alias ("km", "Kilometre", "fl oz")
//! 2. SI prefix + prefixable unit ("dam", "kilojoule", "µs")
//! 3. trailing "s" stripped, then 1-2 again ("meters", "megawatts")

use std::str::FromStr;
use std::sync::Arc;
use serde::{Serialize, Deserialize};
use tracing::trace;
use iconvert_core::ConversionError;
use crate::Unit;
use crate::prefix;
use crate::units::UnitRegistry;

/// Canonical form of a unit token: trimmed, lowercased, inner whitespace
/// collapsed to single spaces
pub fn normalize(token: &str) -> String {
    token.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Which resolution steps beyond exact matching are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Compose SI prefixes with prefixable units
    pub prefixes: bool,
    /// Accept a trailing plural "s"
    pub plurals: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { prefixes: true, plurals: true }
    }
}

impl ResolveOptions {
    /// Exact alias matching only
    pub fn strict() -> Self {
        Self { prefixes: false, plurals: false }
    }

    pub fn with_prefixes(mut self, enabled: bool) -> Self {
        self.prefixes = enabled;
        self
    }

    pub fn with_plurals(mut self, enabled: bool) -> Self {
        self.plurals = enabled;
        self
    }
}

/// Resolves user-supplied unit tokens against a registry
#[derive(Debug, Clone, Copy)]
pub struct UnitParser<'a> {
    registry: &'a UnitRegistry,
    options: ResolveOptions,
}

impl<'a> UnitParser<'a> {
    pub fn new(registry: &'a UnitRegistry) -> Self {
        Self { registry, options: ResolveOptions::default() }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve a token into a unit, or `UnitNotFound` carrying the token
    pub fn resolve(&self, token: &str) -> Result<Arc<Unit>, ConversionError> {
        let key = normalize(token);
        let not_found = || ConversionError::unit_not_found(token.trim());

        if key.is_empty() {
            return Err(not_found());
        }

        if let Some(unit) = self.resolve_singular(&key) {
            return Ok(unit);
        }

        if self.options.plurals {
            if let Some(singular) = key.strip_suffix('s').filter(|s| !s.is_empty()) {
                if let Some(unit) = self.resolve_singular(singular) {
                    trace!(token, singular, unit = %unit.symbol, "resolved plural");
                    return Ok(unit);
                }
            }
        }

        trace!(token, "no unit matches");
        Err(not_found())
    }

    fn resolve_singular(&self, key: &str) -> Option<Arc<Unit>> {
        if let Some(unit) = self.registry.get_normalized(key) {
            trace!(key, unit = %unit.symbol, "resolved alias");
            return Some(Arc::clone(unit));
        }

        if self.options.prefixes {
            return self.compose(key);
        }

        None
    }

    fn compose(&self, key: &str) -> Option<Arc<Unit>> {
        prefix::split_prefix(key)
            .into_iter()
            .find_map(|(p, rest)| {
                self.registry.get_normalized(rest)
                    .filter(|base| base.prefixable)
                    .map(|base| base.with_prefix(p))
            })
            .map(|unit| {
                trace!(key, unit = %unit.symbol, scale = unit.scale, "composed prefix");
                Arc::new(unit)
            })
    }
}

/// Resolve a unit token with the default options
pub fn parse_unit(registry: &UnitRegistry, token: &str) -> Result<Arc<Unit>, ConversionError> {
    UnitParser::new(registry).resolve(token)
}

/// Parse an amount, rejecting anything that is not a finite real number
pub fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    let text = text.trim();
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConversionError::invalid_amount(text))
}

/// Separators accepted between the source and target unit
const SEPARATORS: [&str; 4] = ["->", "→", " to ", " in "];

/// Leading command words accepted before the amount
const COMMANDS: [&str; 2] = ["convert", "converter"];

/// One conversion to perform: amount plus two raw unit tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { amount, from: from.into(), to: to.into() }
    }
}

impl FromStr for ConversionRequest {
    type Err = ConversionError;

    /// Parse a query line like "10 km m", "10 km to mi", "3 fl oz -> ml",
    /// "10km in m" or "convert 0 C F"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut line = s.trim();
        if let Some((first, rest)) = line.split_once(char::is_whitespace) {
            if COMMANDS.iter().any(|c| first.eq_ignore_ascii_case(c)) {
                line = rest.trim_start();
            }
        }

        let (amount, units) = split_amount(line)?;
        let (from, to) = split_units(units)?;

        Ok(ConversionRequest::new(amount, from, to))
    }
}

/// Split the leading amount off a query. The amount may be glued to the
/// unit ("10km").
fn split_amount(line: &str) -> Result<(f64, &str), ConversionError> {
    let first = line.split_whitespace().next().unwrap_or("");
    if first.is_empty() {
        return Err(ConversionError::invalid_amount(first));
    }

    // longest leading slice of the first word that is a finite number
    let parsed = first.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| {
            first[..end].parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| (v, end))
        });

    match parsed {
        Some((amount, end)) => {
            let glued = &first[end..];
            if glued.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                return Err(ConversionError::invalid_amount(first));
            }
            Ok((amount, line[end..].trim()))
        }
        None => Err(ConversionError::invalid_amount(first)),
    }
}

/// Split "from to", "from -> to" and friends into the two unit tokens
fn split_units(units: &str) -> Result<(&str, &str), ConversionError> {
    for sep in SEPARATORS {
        if let Some((from, to)) = units.split_once(sep) {
            let (from, to) = (from.trim(), to.trim());
            if from.is_empty() {
                return Err(ConversionError::unit_not_found(from));
            }
            if to.is_empty() {
                return Err(ConversionError::unit_not_found(to));
            }
            return Ok((from, to));
        }
    }

    // "10 km to" names no target
    let words: Vec<&str> = units.split_whitespace().collect();
    if words.first().into_iter().chain(words.last()).any(|w| w.eq_ignore_ascii_case("to")) {
        return Err(ConversionError::unit_not_found(""));
    }

    match words.as_slice() {
        [from, to] => Ok((*from, *to)),
        [] | [_] => Err(ConversionError::unit_not_found("")),
        _ => Err(ConversionError::unit_not_found(units)),
    }
}
