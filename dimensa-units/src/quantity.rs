//! Quantity type - a value with a dimension vector
//!
//! Binary operations keep the left operand's units: the right operand is
//! re-expressed in them before the arithmetic happens.
//!
//! Offsets are not applied by arithmetic. Adding `degC` to `degF` treats the
//! right operand as a temperature difference.

use std::fmt;
use std::str::FromStr;
use crate::config::{display_options, DisplayOptions};
use crate::error::{Result, UnitError};
use crate::units::RADIAN;
use crate::{Catalog, Dimension, QuantityDimension, Unit, UnitRef};

/// A physical quantity: a floating-point value and its dimension vector
#[derive(Debug, Clone)]
pub struct Quantity {
    value: f64,
    dimension: QuantityDimension,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, dimension: QuantityDimension) -> Self {
        Quantity { value, dimension }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: f64) -> Self {
        Quantity::new(value, QuantityDimension::new())
    }

    /// Build from a value and a list of units, each at power 1
    ///
    /// Scaled units multiply the value by their factor (2 kg is stored as
    /// 2000 g); composite units multiply it by their defining value.
    pub fn from_units(value: f64, units: &[UnitRef<'_>]) -> Result<Self> {
        let mut value = value;
        let mut dims = QuantityDimension::new();
        for unit in units {
            let (factor, next) = crate::parse::absorb(&dims, *unit, 1.0)?;
            value *= factor;
            dims = next;
        }
        Ok(Quantity::new(value, dims))
    }

    /// Parse a quantity literal against a specific catalog
    pub fn parse_with(catalog: &Catalog, s: &str) -> Result<Self> {
        crate::parse::parse_quantity(catalog, s)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn dimension(&self) -> &QuantityDimension {
        &self.dimension
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Check if two quantities can be added or compared
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.dimension == other.dimension
    }

    fn require_compatible(&self, other: &Quantity) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(mismatch(&self.dimension, &other.dimension))
        }
    }

    /// Add two quantities (must have equal dimension vectors)
    pub fn add(&self, other: &Quantity) -> Result<Quantity> {
        self.require_compatible(other)?;
        let converted = self.dimension.match_units(other);
        Ok(Quantity::new(self.value + converted.value, self.dimension.clone()))
    }

    /// Subtract two quantities (must have equal dimension vectors)
    pub fn sub(&self, other: &Quantity) -> Result<Quantity> {
        self.require_compatible(other)?;
        let converted = self.dimension.match_units(other);
        Ok(Quantity::new(self.value - converted.value, self.dimension.clone()))
    }

    /// Multiply two quantities (powers add)
    pub fn mul(&self, other: &Quantity) -> Result<Quantity> {
        let converted = self.dimension.match_units(other);
        let dimension = self.dimension.multiply(&converted.dimension)?;
        Ok(Quantity::new(self.value * converted.value, dimension))
    }

    /// Divide two quantities (powers subtract)
    ///
    /// Division by zero follows IEEE-754 (infinite or NaN value).
    pub fn div(&self, other: &Quantity) -> Result<Quantity> {
        let converted = self.dimension.match_units(other);
        let dimension = self.dimension.divide(&converted.dimension)?;
        Ok(Quantity::new(self.value / converted.value, dimension))
    }

    /// Multiply by a plain number
    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::new(self.value * factor, self.dimension.clone())
    }

    pub fn neg(&self) -> Quantity {
        self.scale(-1.0)
    }

    pub fn abs(&self) -> Quantity {
        Quantity::new(self.value.abs(), self.dimension.clone())
    }

    /// Raise quantity to a real power
    pub fn pow(&self, exp: f64) -> Quantity {
        Quantity::new(self.value.powf(exp), self.dimension.power(exp))
    }

    /// Take the square root; every power is halved, fractional powers persist
    ///
    /// Negative values give NaN.
    pub fn sqrt(&self) -> Quantity {
        Quantity::new(self.value.sqrt(), self.dimension.root(2.0))
    }

    /// The value in radians, for a quantity that is exactly `angle^1`
    fn radians(&self) -> Result<f64> {
        match self.dimension.get(Dimension::Angle) {
            Some(entry) if self.dimension.len() == 1 && entry.power == 1.0 => {
                Ok(QuantityDimension::apply_unit(self, &RADIAN))
            }
            _ => Err(mismatch(&self.dimension, &QuantityDimension::single(&RADIAN, 1.0))),
        }
    }

    fn require_dimensionless(&self) -> Result<f64> {
        if self.is_dimensionless() {
            Ok(self.value)
        } else {
            Err(mismatch(&self.dimension, &QuantityDimension::new()))
        }
    }

    pub fn sin(&self) -> Result<Quantity> {
        Ok(Quantity::dimensionless(self.radians()?.sin()))
    }

    pub fn cos(&self) -> Result<Quantity> {
        Ok(Quantity::dimensionless(self.radians()?.cos()))
    }

    pub fn tan(&self) -> Result<Quantity> {
        Ok(Quantity::dimensionless(self.radians()?.tan()))
    }

    /// Inverse sine of a dimensionless quantity, as an angle in radians
    pub fn asin(&self) -> Result<Quantity> {
        Ok(radians(self.require_dimensionless()?.asin()))
    }

    pub fn acos(&self) -> Result<Quantity> {
        Ok(radians(self.require_dimensionless()?.acos()))
    }

    pub fn atan(&self) -> Result<Quantity> {
        Ok(radians(self.require_dimensionless()?.atan()))
    }

    /// Angle of the point (`x`, `self`), in radians
    ///
    /// Both quantities must have equal dimension vectors.
    pub fn atan2(&self, x: &Quantity) -> Result<Quantity> {
        self.require_compatible(x)?;
        let x = self.dimension.match_units(x);
        Ok(radians(self.value.atan2(x.value)))
    }

    /// Convert the entry for `unit`'s dimension to `unit`
    pub fn convert_to(&self, unit: &'static Unit) -> Result<Quantity> {
        QuantityDimension::convert_unit(self, unit)
    }

    /// Re-express in the given units wherever this quantity has their dimension
    pub fn convert_to_units(&self, units: &[&'static Unit]) -> Result<Quantity> {
        let mut converted = self.clone();
        for unit in units {
            if let Some(existing) = converted.dimension.get(unit.dimension) {
                if existing.unit != *unit {
                    converted = converted.convert_to(unit)?;
                }
            }
        }
        // Rejects conflicting units in the list
        QuantityDimension::match_unit_list(units, &converted)
    }

    /// Convert every entry to its dimension's canonical base unit
    pub fn to_base(&self) -> Result<Quantity> {
        let dimensions: Vec<Dimension> = self.dimension.iter().map(|e| e.dimension()).collect();
        let mut converted = self.clone();
        for dimension in dimensions {
            converted = converted.convert_to(dimension.base_unit())?;
        }
        Ok(converted)
    }

    /// Equal dimensions and values within a relative tolerance
    pub fn approx_eq(&self, other: &Quantity, rel_tol: f64) -> bool {
        if !self.is_compatible(other) {
            return false;
        }
        let other = self.dimension.match_units(other);
        (self.value - other.value).abs() <= rel_tol * self.value.abs().max(other.value.abs())
    }

    /// Value with an SI prefix, then the stored units: `"1.234k m"`
    pub fn to_si_string(&self) -> String {
        let value = crate::prefix::write_si_prefix(self.value);
        if self.is_dimensionless() {
            value
        } else {
            format!("{} {}", value, self.dimension)
        }
    }

    /// Render using explicit display options instead of the global ones
    pub fn format_with(&self, options: &DisplayOptions) -> String {
        crate::format::format_quantity(self, options)
    }
}

fn radians(value: f64) -> Quantity {
    Quantity::new(value, QuantityDimension::single(&RADIAN, 1.0))
}

fn mismatch(left: &QuantityDimension, right: &QuantityDimension) -> UnitError {
    let describe = |dims: &QuantityDimension| {
        if dims.is_dimensionless() {
            "1".to_string()
        } else {
            dims.to_string()
        }
    };
    UnitError::DimensionMismatch {
        left: describe(left),
        right: describe(right),
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&display_options()))
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse::parse_quantity(crate::catalog(), s)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare after re-expressing in the same units
        if !self.is_compatible(other) {
            return false;
        }
        self.value == self.dimension.match_units(other).value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{CELSIUS, FAHRENHEIT, FOOT, GRAM, KELVIN, KILOGRAM, METER, SECOND};

    fn q(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_quantity_creation() {
        let length = Quantity::from_units(5.0, &[UnitRef::from(&METER)]).unwrap();
        assert_eq!(length.value(), 5.0);
        assert_eq!(length.dimension().to_string(), "m");
    }

    #[test]
    fn test_from_units_scaled() {
        let mass = Quantity::from_units(2.0, &[UnitRef::from(&KILOGRAM)]).unwrap();
        assert_eq!(mass.value(), 2000.0);
        assert_eq!(mass.dimension().get(Dimension::Mass).unwrap().unit, &GRAM);
    }

    #[test]
    fn test_from_units_mismatch() {
        let err = Quantity::from_units(1.0, &[(&METER).into(), (&FOOT).into()]).unwrap_err();
        assert!(matches!(err, UnitError::UnitMismatch { .. }));
    }

    #[test]
    fn test_from_units_composite() {
        let newton = crate::catalog().composite("N").unwrap();
        let force = Quantity::from_units(3.0, &[newton.into()]).unwrap();
        assert!(approx(force.value(), 3000.0));
        assert_eq!(force.dimension().len(), 3);
    }

    #[test]
    fn test_dimensionless() {
        assert!(Quantity::dimensionless(42.0).is_dimensionless());
    }

    #[test]
    fn test_add_prefers_left_units() {
        let sum = q("1 m").add(&q("1 ft")).unwrap();
        assert!(approx(sum.value(), 1.3048));
        assert_eq!(sum.dimension().to_string(), "m");

        let sum = q("1 ft").add(&q("1 m")).unwrap();
        assert!(approx(sum.value(), 1.0 + 1.0 / 0.3048));
        assert_eq!(sum.dimension().to_string(), "ft");
    }

    #[test]
    fn test_add_dimension_mismatch() {
        let err = q("5 m").add(&q("3 s")).unwrap_err();
        assert_eq!(
            err,
            UnitError::DimensionMismatch { left: "m".to_string(), right: "s".to_string() }
        );
        assert!(q("5 m").sub(&q("3 m^2")).is_err());
    }

    #[test]
    fn test_sub() {
        let diff = q("10 s").sub(&q("1 min")).unwrap();
        assert!(approx(diff.value(), -50.0));
    }

    #[test]
    fn test_mul() {
        let area = q("2 m").mul(&q("3 m")).unwrap();
        assert_eq!(area.value(), 6.0);
        assert_eq!(area.dimension().to_string(), "m^2");

        // Right operand is matched into meters first
        let area = q("2 m").mul(&q("10 ft")).unwrap();
        assert!(approx(area.value(), 6.096));
        assert_eq!(area.dimension().to_string(), "m^2");
    }

    #[test]
    fn test_div() {
        let velocity = q("100 m").div(&q("10 s")).unwrap();
        assert_eq!(velocity.value(), 10.0);
        assert_eq!(velocity.dimension().to_string(), "m s^-1");

        let ratio = q("1 m").div(&q("1 ft")).unwrap();
        assert!(ratio.is_dimensionless());
        assert!(approx(ratio.value(), 1.0 / 0.3048));
    }

    #[test]
    fn test_pow_and_sqrt() {
        let volume = q("2 m").pow(3.0);
        assert_eq!(volume.value(), 8.0);
        assert_eq!(volume.dimension().to_string(), "m^3");

        let side = q("9 m^2").sqrt();
        assert_eq!(side.value(), 3.0);
        assert_eq!(side.dimension().to_string(), "m");

        let odd = q("4 m").sqrt();
        assert_eq!(odd.dimension().to_string(), "m^0.5");
    }

    #[test]
    fn test_scale_neg_abs() {
        assert_eq!(q("2 m").scale(3.0).value(), 6.0);
        assert_eq!(q("2 m").neg().value(), -2.0);
        assert_eq!(q("-2 m").abs().value(), 2.0);
    }

    #[test]
    fn test_trig() {
        assert!(approx(q("90 deg").sin().unwrap().value(), 1.0));
        assert!(approx(q("180 deg").cos().unwrap().value(), -1.0));
        assert!(approx(q("0.7853981633974483 rad").tan().unwrap().value(), 1.0));
        assert!(q("30 deg").sin().unwrap().is_dimensionless());
    }

    #[test]
    fn test_trig_requires_single_angle() {
        for bad in ["1 m", "1 rad^2", "1 rad s^-1", "1"] {
            let err = q(bad).sin().unwrap_err();
            assert!(matches!(err, UnitError::DimensionMismatch { .. }), "{}", bad);
            assert!(q(bad).cos().is_err());
            assert!(q(bad).tan().is_err());
        }
    }

    #[test]
    fn test_inverse_trig() {
        let angle = q("1").asin().unwrap();
        assert!(approx(angle.value(), std::f64::consts::FRAC_PI_2));
        assert_eq!(angle.dimension().to_string(), "rad");
        assert!(approx(q("1").acos().unwrap().value(), 0.0));
        assert!(approx(q("1").atan().unwrap().value(), std::f64::consts::FRAC_PI_4));
        assert!(q("1 m").asin().is_err());
    }

    #[test]
    fn test_atan2() {
        let angle = q("1 m").atan2(&q("1 m")).unwrap();
        assert!(approx(angle.value(), std::f64::consts::FRAC_PI_4));

        // x is matched into the units of y
        let angle = q("0.3048 m").atan2(&q("1 ft")).unwrap();
        assert!(approx(angle.value(), std::f64::consts::FRAC_PI_4));

        assert!(q("1 m").atan2(&q("1 s")).is_err());
    }

    #[test]
    fn test_convert_to() {
        let length = q("3.048 m").convert_to(&FOOT).unwrap();
        assert!(approx(length.value(), 10.0));
        assert_eq!(length.dimension().to_string(), "ft");

        let temp = q("32 degF").convert_to(&CELSIUS).unwrap();
        assert!(approx(temp.value(), 0.0));
    }

    #[test]
    fn test_convert_round_trip() {
        let original = q("37 degC");
        let back = original
            .convert_to(&FAHRENHEIT)
            .unwrap()
            .convert_to(&KELVIN)
            .unwrap()
            .convert_to(&CELSIUS)
            .unwrap();
        assert!(approx(back.value(), 37.0));
    }

    #[test]
    fn test_convert_to_units() {
        let speed = q("36 km h^-1").convert_to_units(&[&METER, &SECOND]).unwrap();
        assert!(approx(speed.value(), 10.0));
        assert_eq!(speed.dimension().to_string(), "m s^-1");

        assert!(q("1 m").convert_to_units(&[&METER, &FOOT]).is_err());
    }

    #[test]
    fn test_to_base() {
        let base = q("2 ft min^-1").to_base().unwrap();
        assert!(approx(base.value(), 2.0 * 0.3048 / 60.0));
        assert_eq!(base.dimension().to_string(), "m s^-1");

        let base = q("25 degC").to_base().unwrap();
        assert!(approx(base.value(), 298.15));

        let angle = q("180 deg").to_base().unwrap();
        assert!(approx(angle.value(), std::f64::consts::PI));
        assert!(q("1 degC^2").to_base().is_err());
    }

    #[test]
    fn test_equality() {
        assert_eq!(q("1 km"), q("1000 m"));
        assert_ne!(q("1 m"), q("1 s"));
        assert!(q("1 ft").approx_eq(&q("0.3048 m"), 1e-12));
        assert!(!q("1 ft").approx_eq(&q("0.3 m"), 1e-12));
    }

    #[test]
    fn test_format_with() {
        let options = DisplayOptions::default();
        assert_eq!(q("2 m").format_with(&options), "2 m");
        assert_eq!(q("1.5 kg").format_with(&options), "1.5 kg");
    }

    #[test]
    fn test_display_reads_global_options() {
        use crate::config::{set_display_options, AngleUnit};

        let mass = q("2.5 kg");
        let angle = q("3.141592653589793 rad");
        assert_eq!(mass.to_string(), "2.5 kg");
        assert_eq!(angle.to_string(), "3.14159265359 rad");

        set_display_options(
            DisplayOptions::default()
                .with_kilogram_display(false)
                .with_angle_unit(AngleUnit::Degree),
        );
        assert_eq!(display_options().angle_unit, AngleUnit::Degree);
        assert_eq!(mass.to_string(), "2500 g");
        assert_eq!(format!("{}", angle), "180 deg");

        set_display_options(DisplayOptions::default());
        assert_eq!(mass.to_string(), "2.5 kg");
    }

    #[test]
    fn test_to_si_string() {
        assert_eq!(q("1234 m").to_si_string(), "1.234k m");
        assert_eq!(q("0.5 s^-1").to_si_string(), "500.000m s^-1");
        assert_eq!(q("12").to_si_string(), "12.000");
    }
}
