//! SI prefixes
//!
//! Decimal prefixes only. `c` and `d` are accepted when parsing but never
//! chosen when writing, which sticks to multiples of three.

use crate::error::{Result, UnitError};

/// (symbol, decimal exponent)
const PREFIXES: [(char, i32); 16] = [
    ('a', -18),
    ('f', -15),
    ('p', -12),
    ('n', -9),
    ('u', -6),
    ('m', -3),
    ('c', -2),
    ('d', -1),
    ('k', 3),
    ('M', 6),
    ('G', 9),
    ('T', 12),
    ('P', 15),
    ('E', 18),
    ('Z', 21),
    ('Y', 24),
];

const MIN_INDEX: i32 = -18;
const MAX_INDEX: i32 = 24;

/// Decimal exponent of a prefix character
pub fn exponent(prefix: char) -> Result<i32> {
    PREFIXES
        .iter()
        .find(|(symbol, _)| *symbol == prefix)
        .map(|(_, exp)| *exp)
        .ok_or_else(|| UnitError::InvalidSiPrefix(prefix.to_string()))
}

/// Decimal exponent of a one-character prefix string
pub fn exponent_of(prefix: &str) -> Result<i32> {
    let mut chars = prefix.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => exponent(c),
        _ => Err(UnitError::InvalidSiPrefix(prefix.to_string())),
    }
}

/// Prefix character for a decimal exponent
pub fn symbol(exponent: i32) -> Result<char> {
    PREFIXES
        .iter()
        .find(|(_, exp)| *exp == exponent)
        .map(|(symbol, _)| *symbol)
        .ok_or_else(|| UnitError::InvalidSiPrefix(format!("10^{}", exponent)))
}

fn pow10(exp: i32) -> f64 {
    10f64.powi(exp)
}

/// Render `value` as a mantissa with three decimals followed by an SI prefix
///
/// The prefix exponent is `floor(log10(|value|))` snapped down to a multiple
/// of three, so the mantissa lies in `[1, 1000)`. Boundary rules:
/// - exact powers of ten at a multiple of three take the larger prefix
///   (`1000.0` renders `1.000k`), corrected if `log10` lands just below
/// - a mantissa that rounds up to `1000.000` moves to the next prefix
///   (`999.9999` renders `1.000k`)
/// - magnitudes outside `[1e-18, 1e27)` are clamped to `a` / `Y`, so the
///   mantissa leaves `[1, 1000)` there
/// - values in `[1, 1000)` get no prefix letter; zero, NaN and infinities
///   are rendered without one as well
/// - sub-unit values never use `c` or `d`: `0.05` renders `50.000m`
pub fn write_si_prefix(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.3}", value);
    }

    let magnitude = value.abs();
    let mut index = (magnitude.log10().floor() as i32).div_euclid(3) * 3;
    index = index.clamp(MIN_INDEX, MAX_INDEX);
    if index > MIN_INDEX && magnitude / pow10(index) < 1.0 {
        index -= 3;
    }
    if index < MAX_INDEX && magnitude / pow10(index) >= 1000.0 {
        index += 3;
    }
    if index < MAX_INDEX && ((magnitude / pow10(index)) * 1000.0).round() >= 1_000_000.0 {
        index += 3;
    }

    let mantissa = value / pow10(index);
    match symbol(index) {
        Ok(prefix) => format!("{:.3}{}", mantissa, prefix),
        Err(_) => format!("{:.3}", mantissa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponent_table() {
        assert_eq!(exponent('k').unwrap(), 3);
        assert_eq!(exponent('M').unwrap(), 6);
        assert_eq!(exponent('Y').unwrap(), 24);
        assert_eq!(exponent('a').unwrap(), -18);
        assert_eq!(exponent('u').unwrap(), -6);
        assert_eq!(exponent('c').unwrap(), -2);
        assert_eq!(exponent('d').unwrap(), -1);
    }

    #[test]
    fn test_invalid_prefix() {
        assert_eq!(exponent('q'), Err(UnitError::InvalidSiPrefix("q".to_string())));
        assert!(matches!(exponent_of("da"), Err(UnitError::InvalidSiPrefix(_))));
        assert!(matches!(exponent_of(""), Err(UnitError::InvalidSiPrefix(_))));
        assert_eq!(exponent_of("G").unwrap(), 9);
        assert!(symbol(1).is_err());
    }

    #[test]
    fn test_symbol_roundtrip() {
        for (c, exp) in PREFIXES {
            assert_eq!(symbol(exp).unwrap(), c);
        }
    }

    #[test]
    fn test_write_kilo() {
        assert_eq!(write_si_prefix(1234.0), "1.234k");
    }

    #[test]
    fn test_write_mega() {
        assert_eq!(write_si_prefix(1234567.0), "1.235M");
    }

    #[test]
    fn test_write_no_prefix() {
        assert_eq!(write_si_prefix(12.5), "12.500");
        assert_eq!(write_si_prefix(1.0), "1.000");
        assert_eq!(write_si_prefix(0.0), "0.000");
    }

    #[test]
    fn test_write_small() {
        assert_eq!(write_si_prefix(0.5), "500.000m");
        assert_eq!(write_si_prefix(0.000_002_5), "2.500u");
        assert_eq!(write_si_prefix(-0.5), "-500.000m");
        assert_eq!(write_si_prefix(0.05), "50.000m");
    }

    #[test]
    fn test_write_boundaries() {
        assert_eq!(write_si_prefix(1000.0), "1.000k");
        assert_eq!(write_si_prefix(1_000_000.0), "1.000M");
        assert_eq!(write_si_prefix(999.9999), "1.000k");
        assert_eq!(write_si_prefix(999.0), "999.000");
    }

    #[test]
    fn test_write_clamped() {
        assert_eq!(write_si_prefix(1e30), "1000000.000Y");
        assert_eq!(write_si_prefix(2e-20), "0.020a");
    }
}
