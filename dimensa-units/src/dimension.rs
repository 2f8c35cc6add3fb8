//! Physical dimensions
//!
//! A closed set of measurement categories. Each one owns exactly one
//! canonical base unit, held by the [`Catalog`](crate::Catalog) it was
//! registered with.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::Unit;

/// A category of physical measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Mass,
    Temperature,
    Time,
    Current,
    Currency,
    Amount,
    Angle,
}

impl Dimension {
    /// Every dimension, in registry order
    pub const ALL: [Dimension; 8] = [
        Dimension::Length,
        Dimension::Mass,
        Dimension::Temperature,
        Dimension::Time,
        Dimension::Current,
        Dimension::Currency,
        Dimension::Amount,
        Dimension::Angle,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Length => "length",
            Dimension::Mass => "mass",
            Dimension::Temperature => "temperature",
            Dimension::Time => "time",
            Dimension::Current => "current",
            Dimension::Currency => "currency",
            Dimension::Amount => "amount",
            Dimension::Angle => "angle",
        }
    }

    /// The canonical base unit in the built-in catalog
    pub fn base_unit(&self) -> &'static Unit {
        crate::catalog().base_unit(*self)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
