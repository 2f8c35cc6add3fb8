//! Quantity formatting
//!
//! Numbers are rounded to 12 significant digits so values that went through
//! a unit scale (123.456 kg stored as 123456.00000000001 g) print cleanly.

use crate::config::DisplayOptions;
use crate::quantity_dimension::write_entry;
use crate::units::GRAM;
use crate::{Catalog, CompositeUnit, Dimension, DimensionEntry, Quantity, QuantityDimension};

/// Render a number with at most 12 significant digits
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded: f64 = format!("{:.11e}", value).parse().unwrap_or(value);
    rounded.to_string()
}

/// Render a quantity as `<value> <units>` using `options`
pub fn format_quantity(quantity: &Quantity, options: &DisplayOptions) -> String {
    format_quantity_in(crate::catalog(), quantity, options)
}

/// Render a quantity, resolving consolidation symbols against `catalog`
pub fn format_quantity_in(catalog: &Catalog, quantity: &Quantity, options: &DisplayOptions) -> String {
    let quantity = display_angle(quantity, options);

    if options.consolidate_units {
        if let Some((value, composite, remainder)) = consolidate(catalog, &quantity, options) {
            let (scale, rest) = render_units(&remainder, options);
            let mut units = composite.symbol.to_string();
            if !rest.is_empty() {
                units.push(' ');
                units.push_str(&rest);
            }
            return join(value * scale, &units);
        }
    }

    let (scale, units) = render_units(quantity.dimension(), options);
    join(quantity.value() * scale, &units)
}

fn join(value: f64, units: &str) -> String {
    if units.is_empty() {
        format_value(value)
    } else {
        format!("{} {}", format_value(value), units)
    }
}

/// Express any angle in the configured angle unit
fn display_angle(quantity: &Quantity, options: &DisplayOptions) -> Quantity {
    if !quantity.dimension().contains(Dimension::Angle) {
        return quantity.clone();
    }
    QuantityDimension::convert_unit(quantity, options.angle_unit.unit())
        .unwrap_or_else(|_| quantity.clone())
}

/// Render a unit list, returning the value scale it implies
///
/// With kilogram display on, a gram entry renders as `kg` and the value is
/// scaled by `1000^-power` to match.
fn render_units(dims: &QuantityDimension, options: &DisplayOptions) -> (f64, String) {
    let mut scale = 1.0;
    let mut out = String::new();
    for entry in dims.iter() {
        if !out.is_empty() {
            out.push(' ');
        }
        if options.kilogram_display && entry.unit == &GRAM {
            scale *= 1000f64.powf(-entry.power);
            write_entry(&mut out, "kg", entry.power);
        } else {
            write_entry(&mut out, entry.unit.symbol, entry.power);
        }
    }
    (scale, out)
}

/// Pick the first composite unit in priority order that absorbs this quantity
///
/// A candidate's remainder is the quantity divided by the composite's
/// signature, after re-expressing the quantity in the composite's units.
/// A candidate is skipped when one of its dimensions is missing from the
/// quantity or carries a power of the other sign (seconds never render as
/// `Hz s^2`), or when its remainder has more distinct dimensions than the
/// quantity.
fn consolidate<'c>(
    catalog: &'c Catalog,
    quantity: &Quantity,
    options: &DisplayOptions,
) -> Option<(f64, &'c CompositeUnit, QuantityDimension)> {
    let dims = quantity.dimension();
    if dims.is_dimensionless() {
        return None;
    }

    for symbol in &options.consolidation_priority {
        let Some(composite) = catalog.composite(symbol) else {
            tracing::warn!(symbol = %symbol, "consolidation priority names an unknown composite unit");
            continue;
        };

        let signature = composite.quantity.dimension();
        if !signature.iter().all(|e| shares_sign(dims, e)) {
            continue;
        }
        let matched = signature.match_units(quantity);
        let Ok(remainder) = matched.dimension().divide(signature) else {
            continue;
        };
        tracing::trace!(symbol = %symbol, remainder = %remainder, "consolidation candidate");

        if remainder.len() <= dims.len() {
            let value = matched.value() / composite.quantity.value();
            return Some((value, composite, remainder));
        }
    }
    None
}

fn shares_sign(dims: &QuantityDimension, entry: &DimensionEntry) -> bool {
    dims.get(entry.dimension())
        .map_or(false, |own| own.power.signum() == entry.power.signum())
}
