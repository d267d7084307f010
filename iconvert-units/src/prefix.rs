//! SI magnitude prefixes
//!
//! Tokens are case-folded before resolution, so single-letter symbols are
//! only accepted where they stay unambiguous in lowercase. `M` (mega) would
//! read as `m` (milli), `G` (giga) as `g` (gram) and so on; those prefixes
//! are reachable through their full word only.

/// A decimal magnitude prefix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    /// Full name, e.g. "kilo"
    pub name: &'static str,
    /// Display symbol, e.g. "k"
    pub symbol: &'static str,
    /// Multiplier applied to the base unit's scale
    pub factor: f64,
    /// Lowercase spellings accepted in front of a unit
    forms: &'static [&'static str],
}

impl Prefix {
    const fn new(name: &'static str, symbol: &'static str, factor: f64, forms: &'static [&'static str]) -> Self {
        Prefix { name, symbol, factor, forms }
    }

    /// Accepted spellings, word form first
    pub fn forms(&self) -> &'static [&'static str] {
        self.forms
    }
}

pub static PREFIXES: [Prefix; 20] = [
    Prefix::new("yotta", "Y", 1e24, &["yotta"]),
    Prefix::new("zetta", "Z", 1e21, &["zetta"]),
    Prefix::new("exa", "E", 1e18, &["exa"]),
    Prefix::new("peta", "P", 1e15, &["peta"]),
    Prefix::new("tera", "T", 1e12, &["tera"]),
    Prefix::new("giga", "G", 1e9, &["giga"]),
    Prefix::new("mega", "M", 1e6, &["mega"]),
    Prefix::new("kilo", "k", 1e3, &["kilo", "k"]),
    Prefix::new("hecto", "h", 1e2, &["hecto", "h"]),
    Prefix::new("deca", "da", 1e1, &["deca", "deka", "da"]),
    Prefix::new("deci", "d", 1e-1, &["deci", "d"]),
    Prefix::new("centi", "c", 1e-2, &["centi", "c"]),
    Prefix::new("milli", "m", 1e-3, &["milli", "m"]),
    Prefix::new("micro", "µ", 1e-6, &["micro", "u", "µ", "μ"]),
    Prefix::new("nano", "n", 1e-9, &["nano", "n"]),
    Prefix::new("pico", "p", 1e-12, &["pico", "p"]),
    Prefix::new("femto", "f", 1e-15, &["femto"]),
    Prefix::new("atto", "a", 1e-18, &["atto"]),
    Prefix::new("zepto", "z", 1e-21, &["zepto"]),
    Prefix::new("yocto", "y", 1e-24, &["yocto"]),
];

/// Look up a prefix by its full name
pub fn by_name(name: &str) -> Option<&'static Prefix> {
    PREFIXES.iter().find(|p| p.name == name)
}

/// Every way `token` splits into a known prefix and a non-empty remainder,
/// longest prefix spelling first.
pub fn split_prefix(token: &str) -> Vec<(&'static Prefix, &str)> {
    let mut splits: Vec<(&'static Prefix, &str, usize)> = PREFIXES.iter()
        .flat_map(|p| p.forms.iter().map(move |form| (p, *form)))
        .filter_map(|(p, form)| {
            token.strip_prefix(form)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (p, rest, form.len()))
        })
        .collect();

    splits.sort_by(|a, b| b.2.cmp(&a.2));
    splits.into_iter().map(|(p, rest, _)| (p, rest)).collect()
}
