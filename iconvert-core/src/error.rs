//! Structured conversion errors
//!
//! Per-request failures are values handed back to the caller, never panics.
//! Each carries a machine-readable code, a severity and, where it helps, a
//! suggestion the presentation layer can show next to the message.
//! Registry integrity failures are the only fatal kind: they happen while
//! the catalog is built and mean no conversion can be trusted.

use crate::Dimension;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_NOT_FOUND: &str = "UNIT_NOT_FOUND";
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const INVALID_AMOUNT: &str = "INVALID_AMOUNT";
    pub const NUMERIC_OVERFLOW: &str = "NUMERIC_OVERFLOW";
    pub const REGISTRY_INTEGRITY: &str = "REGISTRY_INTEGRITY";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The request failed; the caller may carry on with the next one
    Error,
    /// The unit catalog is unusable
    Fatal,
}

/// Per-request conversion failure
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionError {
    /// Token did not resolve to any alias, prefixed form or plural
    #[error("unknown unit: {token}")]
    UnitNotFound { token: String },

    /// Both units resolved but measure different things
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    DimensionMismatch {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    /// Amount is not a finite real number
    #[error("invalid amount: {input:?} is not a finite number")]
    InvalidAmount { input: String },

    /// Result of the conversion is not finite
    #[error("numeric overflow converting {amount} {from} to {to}")]
    NumericOverflow { amount: f64, from: String, to: String },
}

impl ConversionError {
    pub fn unit_not_found(token: impl Into<String>) -> Self {
        Self::UnitNotFound { token: token.into() }
    }

    pub fn invalid_amount(input: impl Into<String>) -> Self {
        Self::InvalidAmount { input: input.into() }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnitNotFound { .. } => codes::UNIT_NOT_FOUND,
            Self::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            Self::InvalidAmount { .. } => codes::INVALID_AMOUNT,
            Self::NumericOverflow { .. } => codes::NUMERIC_OVERFLOW,
        }
    }

    /// Per-request failures never take the process down
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnitNotFound { token } => {
                Some(format!("Check the spelling of '{}' or use a unit symbol such as 'km'", token))
            }
            Self::DimensionMismatch { from_dim, to_dim, .. } => {
                let describe = |d: &Dimension| d.name().map(str::to_string).unwrap_or_else(|| d.to_string());
                Some(format!("Pick two units of the same kind ({} vs {})", describe(from_dim), describe(to_dim)))
            }
            Self::InvalidAmount { .. } => Some("Enter a number such as 10 or 2.5".to_string()),
            Self::NumericOverflow { .. } => None,
        }
    }
}

/// Unit catalog is inconsistent; raised while the registry is built
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryError {
    /// One alias claimed by two different units
    #[error("alias '{alias}' is registered for both '{existing}' and '{incoming}'")]
    DuplicateAlias {
        alias: String,
        existing: String,
        incoming: String,
    },

    /// Alias normalizes to nothing
    #[error("unit '{unit}' has an empty alias")]
    EmptyAlias { unit: String },

    /// Scale must be finite and positive, offset finite
    #[error("unit '{unit}' has an invalid transform (scale {scale}, offset {offset})")]
    InvalidScale { unit: String, scale: f64, offset: f64 },
}

impl RegistryError {
    pub fn code(&self) -> &'static str {
        codes::REGISTRY_INTEGRITY
    }

    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}
