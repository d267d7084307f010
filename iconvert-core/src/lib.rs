//! iConvert Core - Fundamental types
//!
//! This crate provides the core types shared by the conversion engine:
//! - `Dimension`: exponent vector over the physical basis quantities
//! - `ConversionError`: per-request failures, returned as values
//! - `RegistryError`: fatal unit catalog inconsistencies

pub mod dimension;
mod error;

pub use dimension::Dimension;
pub use error::{ConversionError, RegistryError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Dimension, ConversionError, RegistryError, Severity};
    pub use crate::error::codes;
}
