//! Unit representation with conversion factors
//!
//! Three kinds of unit exist:
//! - [`Unit`]: a measure of one dimension with a factor and offset to its base unit
//! - [`ScaledUnit`]: a fixed multiple of a plain unit (kilogram = 1000 gram)
//! - [`CompositeUnit`]: a named quantity expression over other units (newton)
//!
//! [`UnitRef`] tags which kind a symbol resolved to.

use std::fmt;
use crate::{Dimension, Quantity, QuantityDimension};

/// A plain unit of exactly one dimension
///
/// `value_in_base = (value - base_offset) * base_factor`, so the offset is the
/// reading of this unit at the base unit's zero (-273.15 for Celsius).
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Display name (e.g., "meter")
    pub name: &'static str,
    /// Display symbol (e.g., "m")
    pub symbol: &'static str,
    pub dimension: Dimension,
    /// Size of one of this unit in base units
    pub base_factor: f64,
    /// Additive offset for affine scales (temperatures)
    pub base_offset: f64,
}

impl Unit {
    /// Create a unit with proportional conversion (no offset)
    pub const fn new(name: &'static str, symbol: &'static str, dimension: Dimension, base_factor: f64) -> Self {
        Unit {
            name,
            symbol,
            dimension,
            base_factor,
            base_offset: 0.0,
        }
    }

    /// Create a unit with offset (for temperature scales)
    pub const fn with_offset(
        name: &'static str,
        symbol: &'static str,
        dimension: Dimension,
        base_factor: f64,
        base_offset: f64,
    ) -> Self {
        Unit {
            name,
            symbol,
            dimension,
            base_factor,
            base_offset,
        }
    }

    /// Whether this unit could serve as a canonical base unit
    pub fn is_base(&self) -> bool {
        self.base_factor == 1.0 && self.base_offset == 0.0
    }

    /// Check if this unit has an offset (affine conversion)
    pub fn has_offset(&self) -> bool {
        self.base_offset != 0.0
    }

    /// Check if two units measure the same dimension
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value in this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        (value - self.base_offset) * self.base_factor
    }

    /// Convert a value in the base unit to this unit
    pub fn from_base(&self, value: f64) -> f64 {
        value / self.base_factor + self.base_offset
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// A linearly scaled alias of a plain unit
///
/// Values built from it are multiplied by `factor` and stored against `base`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledUnit {
    pub name: &'static str,
    pub symbol: &'static str,
    pub factor: f64,
    pub base: &'static Unit,
}

impl ScaledUnit {
    pub const fn new(name: &'static str, symbol: &'static str, factor: f64, base: &'static Unit) -> Self {
        ScaledUnit { name, symbol, factor, base }
    }

    pub fn dimension(&self) -> Dimension {
        self.base.dimension
    }
}

/// A named shorthand for a quantity expression, e.g. newton = "1 kg m s^-2"
///
/// Not dimension-bearing on its own: it is substituted by its quantity
/// during parsing and matched against during consolidated display.
#[derive(Debug, Clone)]
pub struct CompositeUnit {
    pub name: &'static str,
    pub symbol: &'static str,
    /// Source expression the quantity was parsed from
    pub expression: &'static str,
    pub quantity: Quantity,
}

/// Any unit a symbol can resolve to
#[derive(Debug, Clone, Copy)]
pub enum UnitRef<'a> {
    Plain(&'static Unit),
    Scaled(&'static ScaledUnit),
    Composite(&'a CompositeUnit),
}

impl<'a> UnitRef<'a> {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitRef::Plain(u) => u.symbol,
            UnitRef::Scaled(u) => u.symbol,
            UnitRef::Composite(u) => u.symbol,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitRef::Plain(u) => u.name,
            UnitRef::Scaled(u) => u.name,
            UnitRef::Composite(u) => u.name,
        }
    }

    /// Numeric factor and dimension vector contributed by `unit^power`
    pub(crate) fn expand(&self, power: f64) -> (f64, QuantityDimension) {
        match self {
            UnitRef::Plain(u) => (1.0, QuantityDimension::single(u, power)),
            UnitRef::Scaled(u) => (u.factor.powf(power), QuantityDimension::single(u.base, power)),
            UnitRef::Composite(u) => (
                u.quantity.value().powf(power),
                u.quantity.dimension().power(power),
            ),
        }
    }
}

impl From<&'static Unit> for UnitRef<'_> {
    fn from(unit: &'static Unit) -> Self {
        UnitRef::Plain(unit)
    }
}

impl From<&'static ScaledUnit> for UnitRef<'_> {
    fn from(unit: &'static ScaledUnit) -> Self {
        UnitRef::Scaled(unit)
    }
}

impl<'a> From<&'a CompositeUnit> for UnitRef<'a> {
    fn from(unit: &'a CompositeUnit) -> Self {
        UnitRef::Composite(unit)
    }
}
