//! Unit and quantity string parsing
//!
//! Grammar:
//! - quantity: `<number>[<unit-token>] [<unit-token>]*` ("123.456 kg m s^-2", "100kg")
//! - unit token: `<symbol>[^<power>]` with a signed decimal power
//!
//! Symbols resolve through [`Catalog::resolve`]. Prefixes scale the value by
//! `10^(exponent * power)`, composite units by `value^power`.

use crate::error::{Result, UnitError};
use crate::{Catalog, Quantity, QuantityDimension, UnitRef};

/// Parse a space-separated unit list into a scale factor and a dimension vector
///
/// `"km h^-1"` gives `(1000.0, m h^-1)`.
pub fn parse_unit_list(catalog: &Catalog, s: &str) -> Result<(f64, QuantityDimension)> {
    parse_tokens(catalog, s.split_whitespace())
}

/// Parse a quantity literal
pub fn parse_quantity(catalog: &Catalog, s: &str) -> Result<Quantity> {
    let s = s.trim();
    let mut tokens = s.split_whitespace();
    let first = tokens
        .next()
        .ok_or_else(|| UnitError::invalid("empty quantity string"))?;

    // "100kg": number and unit fused in the first token
    let (number, attached) = match first.parse::<f64>() {
        Ok(_) => (first, ""),
        Err(_) => split_number(first),
    };
    let value: f64 = number
        .parse()
        .map_err(|_| UnitError::invalid(format!("no number found in '{}'", s)))?;
    if !value.is_finite() {
        return Err(UnitError::invalid(format!("non-finite number '{}' in '{}'", number, s)));
    }

    let units = std::iter::once(attached)
        .filter(|t| !t.is_empty())
        .chain(tokens);
    let (factor, dims) = parse_tokens(catalog, units)?;
    Ok(Quantity::new(value * factor, dims))
}

fn parse_tokens<'s>(
    catalog: &Catalog,
    tokens: impl Iterator<Item = &'s str>,
) -> Result<(f64, QuantityDimension)> {
    let mut value = 1.0;
    let mut dims = QuantityDimension::new();

    for token in tokens {
        let (symbol, power) = split_power(token)?;
        let (unit, prefix) = catalog.resolve(symbol)?;
        let (factor, next) = absorb(&dims, unit, power)?;
        value *= factor * pow10(prefix as f64 * power);
        dims = next;
    }

    Ok((value, dims))
}

/// Fold `unit^power` into `dims`, returning the value factor it contributes
///
/// Composite expressions adopt the units already present in `dims`; plain
/// and scaled units must agree with them.
pub(crate) fn absorb(
    dims: &QuantityDimension,
    unit: UnitRef<'_>,
    power: f64,
) -> Result<(f64, QuantityDimension)> {
    let (factor, contribution) = unit.expand(power);
    match unit {
        UnitRef::Composite(_) => {
            let matched = dims.match_units(&Quantity::new(factor, contribution));
            Ok((matched.value(), dims.multiply(matched.dimension())?))
        }
        UnitRef::Plain(_) | UnitRef::Scaled(_) => Ok((factor, dims.multiply(&contribution)?)),
    }
}

/// Split "s^-2" into ("s", -2.0)
fn split_power(token: &str) -> Result<(&str, f64)> {
    let (symbol, power) = match token.split_once('^') {
        Some((symbol, exp)) => {
            let power: f64 = exp
                .parse()
                .map_err(|_| UnitError::invalid(format!("invalid power '{}' in '{}'", exp, token)))?;
            if !power.is_finite() {
                return Err(UnitError::invalid(format!("invalid power '{}' in '{}'", exp, token)));
            }
            (symbol, power)
        }
        None => (token, 1.0),
    };

    if symbol.is_empty() {
        return Err(UnitError::invalid(format!("missing unit symbol in '{}'", token)));
    }
    Ok((symbol, power))
}

/// Split a leading numeric literal from an attached unit: "1.5e3kg" -> ("1.5e3", "kg")
pub(crate) fn split_number(token: &str) -> (&str, &str) {
    let bytes = token.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }

    // Exponent only when digits follow, so "5em" keeps "em" as the unit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        if exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            end = exp_end;
        }
    }

    token.split_at(end)
}

fn pow10(exp: f64) -> f64 {
    if exp == 0.0 {
        1.0
    } else if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
        10f64.powi(exp as i32)
    } else {
        10f64.powf(exp)
    }
}
