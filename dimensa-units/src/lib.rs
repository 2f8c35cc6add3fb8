//! Dimensa Units - Dimensional analysis with unit-carrying quantities
//!
//! Quantities keep the units they were written in. Arithmetic checks
//! dimensions, re-expresses the right operand in the left operand's units,
//! and combines dimension vectors.
//!
//! Dimensions:
//! - Length (m, ft, in, yd, mi, nmi, au)
//! - Mass (g, kg, lb, oz, t)
//! - Temperature (K, degC, degF, degR)
//! - Time (s, min, h, day, wk, yr)
//! - Current (A), Currency (USD), Amount (mol)
//! - Angle (rad, deg, rev, grad, arcmin, arcsec)
//!
//! Composite units (N, J, W, Pa, Hz, C, V, ohm, L, Wh, ...) are defined by
//! quantity expressions and may take SI prefixes like plain units.

mod error;
mod dimension;
mod unit;
mod quantity_dimension;
mod quantity;
pub mod units;
pub mod prefix;
pub mod parse;
pub mod config;
pub mod format;

pub use error::{Result, UnitError};
pub use dimension::Dimension;
pub use unit::{CompositeUnit, ScaledUnit, Unit, UnitRef};
pub use quantity_dimension::{DimensionEntry, QuantityDimension};
pub use quantity::Quantity;
pub use units::{catalog, Catalog};
pub use config::{display_options, set_display_options, AngleUnit, DisplayOptions, VectorDisplay};
pub use format::{format_quantity, format_value};
pub use prefix::write_si_prefix;
