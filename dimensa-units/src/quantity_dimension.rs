//! Dimension vectors
//!
//! A [`QuantityDimension`] maps each dimension present in a quantity to the
//! unit it is expressed in and the power it is raised to. Entries keep the
//! order in which their dimensions first appeared, which is also the
//! display order.
//!
//! Algebra mirrors quantity arithmetic:
//! - `multiply` adds powers (quantity multiplication)
//! - `divide` subtracts powers (quantity division)
//! - `power` / `root` scale every power (exponentiation, roots)
//!
//! Every operation returns a new vector. An entry whose power reaches
//! exactly zero is dropped. Offsets are ignored by the algebra: raising an
//! affine unit such as `degC` to a power other than 1 is representable but
//! cannot be converted afterwards (see [`QuantityDimension::convert_unit`]).

use std::fmt;
use crate::error::{Result, UnitError};
use crate::{Dimension, Quantity, Unit};

/// One dimension's unit and power
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionEntry {
    pub unit: &'static Unit,
    pub power: f64,
}

impl DimensionEntry {
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }
}

/// Sparse mapping from dimension to (unit, power)
///
/// Equality is structural: two vectors are equal when they hold the same
/// dimensions at the same powers, whatever units they are expressed in.
#[derive(Debug, Clone, Default)]
pub struct QuantityDimension {
    entries: Vec<DimensionEntry>,
}

impl QuantityDimension {
    /// Empty vector (dimensionless)
    pub fn new() -> Self {
        QuantityDimension { entries: Vec::new() }
    }

    /// A vector holding a single `unit^power`
    pub fn single(unit: &'static Unit, power: f64) -> Self {
        let mut dims = QuantityDimension::new();
        if power != 0.0 {
            dims.entries.push(DimensionEntry { unit, power });
        }
        dims
    }

    /// Build from a list of units, each at power 1
    ///
    /// Repeated units accumulate power; two different units of the same
    /// dimension fail with `UnitMismatch`.
    pub fn from_units(units: &[&'static Unit]) -> Result<Self> {
        let mut dims = QuantityDimension::new();
        for unit in units {
            dims.accumulate(*unit, 1.0)?;
        }
        Ok(dims)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DimensionEntry> {
        self.entries.iter()
    }

    pub fn get(&self, dimension: Dimension) -> Option<&DimensionEntry> {
        self.entries.iter().find(|e| e.dimension() == dimension)
    }

    pub fn contains(&self, dimension: Dimension) -> bool {
        self.get(dimension).is_some()
    }

    /// Add one unit's contribution, returning a new vector
    pub fn with_unit(&self, unit: &'static Unit, power: f64) -> Result<Self> {
        let mut dims = self.clone();
        dims.accumulate(unit, power)?;
        Ok(dims)
    }

    /// Multiply quantities: powers add per dimension
    pub fn multiply(&self, other: &QuantityDimension) -> Result<Self> {
        let mut dims = self.clone();
        for entry in &other.entries {
            dims.accumulate(entry.unit, entry.power)?;
        }
        Ok(dims)
    }

    /// Divide quantities: powers subtract per dimension
    pub fn divide(&self, other: &QuantityDimension) -> Result<Self> {
        let mut dims = self.clone();
        for entry in &other.entries {
            dims.accumulate(entry.unit, -entry.power)?;
        }
        Ok(dims)
    }

    /// Raise to a power: every stored power is multiplied by `exp`
    pub fn power(&self, exp: f64) -> Self {
        if exp == 0.0 {
            return QuantityDimension::new();
        }
        let entries = self
            .entries
            .iter()
            .map(|e| DimensionEntry { unit: e.unit, power: e.power * exp })
            .filter(|e| e.power != 0.0)
            .collect();
        QuantityDimension { entries }
    }

    /// Take a root: every stored power is divided by `degree`
    pub fn root(&self, degree: f64) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|e| DimensionEntry { unit: e.unit, power: e.power / degree })
            .filter(|e| e.power != 0.0)
            .collect();
        QuantityDimension { entries }
    }

    /// Builder step: fold `unit^power` into this vector in place
    fn accumulate(&mut self, unit: &'static Unit, power: f64) -> Result<()> {
        match self.entries.iter().position(|e| e.dimension() == unit.dimension) {
            Some(index) => {
                let entry = &mut self.entries[index];
                if entry.unit != unit {
                    return Err(UnitError::UnitMismatch {
                        dimension: unit.dimension,
                        left: entry.unit.symbol.to_string(),
                        right: unit.symbol.to_string(),
                    });
                }
                entry.power += power;
                if entry.power == 0.0 {
                    self.entries.remove(index);
                }
            }
            None => {
                if power != 0.0 {
                    self.entries.push(DimensionEntry { unit, power });
                }
            }
        }
        Ok(())
    }

    /// Re-express `target` in this vector's units where they overlap
    ///
    /// For every dimension both share, the value is scaled by
    /// `(target_factor / template_factor)^power` and the template's unit
    /// replaces the target's (the target keeps its power). Dimensions the
    /// template lacks are carried over unchanged. Offsets are ignored.
    pub fn match_units(&self, target: &Quantity) -> Quantity {
        let mut factor = 1.0;
        let mut entries = Vec::with_capacity(target.dimension().len());
        for entry in target.dimension().iter() {
            match self.get(entry.dimension()) {
                Some(template) => {
                    if template.unit != entry.unit {
                        factor *= (entry.unit.base_factor / template.unit.base_factor).powf(entry.power);
                    }
                    entries.push(DimensionEntry { unit: template.unit, power: entry.power });
                }
                None => entries.push(*entry),
            }
        }
        Quantity::new(target.value() * factor, QuantityDimension { entries })
    }

    /// Re-express `target` in the given units where they overlap
    ///
    /// Two different units of the same dimension in `units` fail with
    /// `UnitMismatch`; repeating a unit is fine.
    pub fn match_unit_list(units: &[&'static Unit], target: &Quantity) -> Result<Quantity> {
        let mut template = QuantityDimension::new();
        for unit in units {
            match template.get(unit.dimension).map(|e| e.unit) {
                Some(existing) if existing != *unit => {
                    return Err(UnitError::UnitMismatch {
                        dimension: unit.dimension,
                        left: existing.symbol.to_string(),
                        right: unit.symbol.to_string(),
                    });
                }
                Some(_) => {}
                None => template.entries.push(DimensionEntry { unit: *unit, power: 1.0 }),
            }
        }
        Ok(template.match_units(target))
    }

    /// Convert the entry for `unit`'s dimension to `unit`
    ///
    /// `new = (value - old_offset) * (old_factor / new_factor)^power + new_offset`.
    /// A quantity without that dimension, or already in `unit`, is returned
    /// unchanged. Offsets only make sense at power 1: converting between
    /// units where either side has an offset at any other power fails with
    /// `AffinePower`.
    pub fn convert_unit(target: &Quantity, unit: &'static Unit) -> Result<Quantity> {
        let dims = target.dimension();
        let Some(index) = dims.entries.iter().position(|e| e.dimension() == unit.dimension) else {
            return Ok(target.clone());
        };
        let entry = dims.entries[index];
        if entry.unit == unit {
            return Ok(target.clone());
        }
        if (entry.unit.has_offset() || unit.has_offset()) && entry.power != 1.0 {
            let offending = if entry.unit.has_offset() { entry.unit } else { unit };
            return Err(UnitError::AffinePower {
                unit: offending.symbol.to_string(),
                power: entry.power,
            });
        }

        let ratio = entry.unit.base_factor / unit.base_factor;
        let value = (target.value() - entry.unit.base_offset) * ratio.powf(entry.power) + unit.base_offset;

        let mut converted = dims.clone();
        converted.entries[index].unit = unit;
        Ok(Quantity::new(value, converted))
    }

    /// The bare value of `target` after scaling its `unit.dimension` entry to `unit`
    ///
    /// Factor only, offsets ignored.
    pub fn apply_unit(target: &Quantity, unit: &'static Unit) -> f64 {
        match target.dimension().get(unit.dimension) {
            Some(entry) if entry.unit != unit => {
                target.value() * (entry.unit.base_factor / unit.base_factor).powf(entry.power)
            }
            _ => target.value(),
        }
    }
}

impl PartialEq for QuantityDimension {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|e| {
                other
                    .get(e.dimension())
                    .map_or(false, |o| o.power == e.power)
            })
    }
}

/// `symbol` at power 1, `symbol^power` otherwise
pub(crate) fn write_entry(out: &mut String, symbol: &str, power: f64) {
    out.push_str(symbol);
    if power != 1.0 {
        out.push('^');
        out.push_str(&power.to_string());
    }
}

impl fmt::Display for QuantityDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for entry in &self.entries {
            if !out.is_empty() {
                out.push(' ');
            }
            write_entry(&mut out, entry.unit.symbol, entry.power);
        }
        write!(f, "{}", out)
    }
}
