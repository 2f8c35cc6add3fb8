//! Errors raised by unit algebra, parsing and conversion
//!
//! Every failure is immediate: no partial result is produced and nothing
//! is logged. Callers decide what to do with the error.

use thiserror::Error;
use crate::Dimension;

pub type Result<T> = std::result::Result<T, UnitError>;

/// Error type for unit and quantity operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// A symbol matched no plain, composite or prefixed unit
    #[error("unknown unit symbol '{0}'")]
    UnitNotFound(String),

    /// Two different units were assigned to the same dimension
    #[error("unit mismatch for {dimension}: '{left}' vs '{right}'")]
    UnitMismatch {
        dimension: Dimension,
        left: String,
        right: String,
    },

    /// Dimension vectors are structurally different
    #[error("dimension mismatch: [{left}] vs [{right}]")]
    DimensionMismatch { left: String, right: String },

    #[error("invalid SI prefix '{0}'")]
    InvalidSiPrefix(String),

    /// Offset units only convert at power 1
    #[error("cannot convert affine unit '{unit}' raised to power {power}")]
    AffinePower { unit: String, power: f64 },

    /// Malformed quantity or unit expression
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid unit catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid display options: {0}")]
    InvalidConfig(String),
}

impl UnitError {
    pub(crate) fn invalid(details: impl Into<String>) -> Self {
        UnitError::InvalidArgument(details.into())
    }
}
