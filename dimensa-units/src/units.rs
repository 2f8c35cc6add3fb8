//! Unit definitions and the unit catalog
//!
//! Built in two phases: [`Catalog::new`] takes the canonical base unit of
//! every dimension, then plain, scaled and composite units are registered
//! on top. Composite expressions are parsed against the catalog as it
//! stands, so a composite may only refer to units registered before it.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::LazyLock;
use crate::error::{Result, UnitError};
use crate::{prefix, CompositeUnit, Dimension, ScaledUnit, Unit, UnitRef};

// Length
pub static METER: Unit = Unit::new("meter", "m", Dimension::Length, 1.0);
pub static FOOT: Unit = Unit::new("foot", "ft", Dimension::Length, 0.3048);
pub static INCH: Unit = Unit::new("inch", "in", Dimension::Length, 0.0254);
pub static YARD: Unit = Unit::new("yard", "yd", Dimension::Length, 0.9144);
pub static MILE: Unit = Unit::new("mile", "mi", Dimension::Length, 1609.344);
pub static NAUTICAL_MILE: Unit = Unit::new("nautical mile", "nmi", Dimension::Length, 1852.0);
pub static ASTRONOMICAL_UNIT: Unit = Unit::new("astronomical unit", "au", Dimension::Length, 149_597_870_700.0);

// Mass: the gram is the base unit, kilograms are a scaled alias
pub static GRAM: Unit = Unit::new("gram", "g", Dimension::Mass, 1.0);
pub static POUND: Unit = Unit::new("pound", "lb", Dimension::Mass, 453.592_37);
pub static OUNCE: Unit = Unit::new("ounce", "oz", Dimension::Mass, 28.349_523_125);
pub static TONNE: Unit = Unit::new("tonne", "t", Dimension::Mass, 1_000_000.0);
pub static KILOGRAM: ScaledUnit = ScaledUnit::new("kilogram", "kg", 1000.0, &GRAM);

// Temperature
pub static KELVIN: Unit = Unit::new("kelvin", "K", Dimension::Temperature, 1.0);
pub static CELSIUS: Unit = Unit::with_offset("celsius", "degC", Dimension::Temperature, 1.0, -273.15);
pub static FAHRENHEIT: Unit = Unit::with_offset("fahrenheit", "degF", Dimension::Temperature, 5.0 / 9.0, -459.67);
pub static RANKINE: Unit = Unit::new("rankine", "degR", Dimension::Temperature, 5.0 / 9.0);

// Time
pub static SECOND: Unit = Unit::new("second", "s", Dimension::Time, 1.0);
pub static MINUTE: Unit = Unit::new("minute", "min", Dimension::Time, 60.0);
pub static HOUR: Unit = Unit::new("hour", "h", Dimension::Time, 3600.0);
pub static DAY: Unit = Unit::new("day", "day", Dimension::Time, 86_400.0);
pub static WEEK: Unit = Unit::new("week", "wk", Dimension::Time, 604_800.0);
pub static YEAR: Unit = Unit::new("year", "yr", Dimension::Time, 31_556_952.0); // average Gregorian

pub static AMPERE: Unit = Unit::new("ampere", "A", Dimension::Current, 1.0);

pub static DOLLAR: Unit = Unit::new("dollar", "USD", Dimension::Currency, 1.0);

pub static MOLE: Unit = Unit::new("mole", "mol", Dimension::Amount, 1.0);

// Angle
pub static RADIAN: Unit = Unit::new("radian", "rad", Dimension::Angle, 1.0);
pub static DEGREE: Unit = Unit::new("degree", "deg", Dimension::Angle, PI / 180.0);
pub static REVOLUTION: Unit = Unit::new("revolution", "rev", Dimension::Angle, 2.0 * PI);
pub static GRADIAN: Unit = Unit::new("gradian", "grad", Dimension::Angle, PI / 200.0);
pub static ARCMINUTE: Unit = Unit::new("arcminute", "arcmin", Dimension::Angle, PI / 10_800.0);
pub static ARCSECOND: Unit = Unit::new("arcsecond", "arcsec", Dimension::Angle, PI / 648_000.0);

/// Canonical base unit of every dimension, in [`Dimension::ALL`] order
static CANONICAL: [&Unit; 8] = [&METER, &GRAM, &KELVIN, &SECOND, &AMPERE, &DOLLAR, &MOLE, &RADIAN];

static PLAIN: [&Unit; 22] = [
    &FOOT, &INCH, &YARD, &MILE, &NAUTICAL_MILE, &ASTRONOMICAL_UNIT,
    &POUND, &OUNCE, &TONNE,
    &CELSIUS, &FAHRENHEIT, &RANKINE,
    &MINUTE, &HOUR, &DAY, &WEEK, &YEAR,
    &DEGREE, &REVOLUTION, &GRADIAN, &ARCMINUTE, &ARCSECOND,
];

/// (name, symbol, expression), in definition order
static COMPOSITES: [(&str, &str, &str); 13] = [
    ("newton", "N", "1 kg m s^-2"),
    ("joule", "J", "1 N m"),
    ("watt", "W", "1 J s^-1"),
    ("pascal", "Pa", "1 N m^-2"),
    ("hertz", "Hz", "1 s^-1"),
    ("coulomb", "C", "1 A s"),
    ("volt", "V", "1 W A^-1"),
    ("ohm", "ohm", "1 V A^-1"),
    ("liter", "L", "0.001 m^3"),
    ("watt hour", "Wh", "3600 J"),
    ("standard gravity", "gn", "9.80665 m s^-2"),
    ("speed of light", "c0", "299792458 m s^-1"),
    ("avogadro constant", "NA", "6.02214076e23 mol^-1"),
];

/// Global unit catalog
static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    builtin().expect("built-in unit catalog is consistent")
});

/// The built-in catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

fn builtin() -> Result<Catalog> {
    let mut catalog = Catalog::new(&CANONICAL)?;
    for unit in PLAIN {
        catalog = catalog.with_unit(unit);
    }
    catalog = catalog.with_scaled(&KILOGRAM);
    for (name, symbol, expression) in COMPOSITES {
        catalog = catalog.with_composite(name, symbol, expression)?;
    }

    tracing::debug!(
        plain = catalog.units().count(),
        scaled = catalog.scaled.len(),
        composite = catalog.composites.len(),
        "unit catalog initialised"
    );
    Ok(catalog)
}

/// Registry of dimensions, units and composite units
#[derive(Debug)]
pub struct Catalog {
    /// Indexed by `Dimension as usize`
    bases: Vec<&'static Unit>,
    /// Per-dimension symbol tables
    symbols: HashMap<Dimension, HashMap<&'static str, &'static Unit>>,
    /// Registration order, for iteration
    order: Vec<&'static Unit>,
    scaled: HashMap<&'static str, &'static ScaledUnit>,
    composites: Vec<CompositeUnit>,
    composite_symbols: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Create a registry from one canonical base unit per dimension
    ///
    /// Every dimension must be covered exactly once, and each canonical unit
    /// must have factor 1 and offset 0.
    pub fn new(canonical: &[&'static Unit]) -> Result<Self> {
        let mut bases: [Option<&'static Unit>; 8] = [None; 8];
        for unit in canonical {
            if !unit.is_base() {
                return Err(UnitError::InvalidCatalog(format!(
                    "canonical unit '{}' must have factor 1 and offset 0",
                    unit.symbol
                )));
            }
            let slot = &mut bases[unit.dimension as usize];
            if let Some(existing) = slot {
                return Err(UnitError::InvalidCatalog(format!(
                    "dimension {} has two canonical units: '{}' and '{}'",
                    unit.dimension, existing.symbol, unit.symbol
                )));
            }
            *slot = Some(*unit);
        }

        let mut resolved = Vec::with_capacity(Dimension::ALL.len());
        for dim in Dimension::ALL {
            let unit = bases[dim as usize].ok_or_else(|| {
                UnitError::InvalidCatalog(format!("dimension {} has no canonical unit", dim))
            })?;
            resolved.push(unit);
        }

        let mut catalog = Catalog {
            bases: resolved.clone(),
            symbols: HashMap::new(),
            order: Vec::new(),
            scaled: HashMap::new(),
            composites: Vec::new(),
            composite_symbols: HashMap::new(),
        };
        for unit in resolved {
            catalog = catalog.with_unit(unit);
        }
        Ok(catalog)
    }

    /// Register a plain unit under its dimension's symbol table
    ///
    /// A symbol already taken within the dimension keeps its first unit.
    pub fn with_unit(mut self, unit: &'static Unit) -> Self {
        self.symbols
            .entry(unit.dimension)
            .or_default()
            .entry(unit.symbol)
            .or_insert(unit);
        if !self.order.iter().any(|u| std::ptr::eq(*u, unit)) {
            self.order.push(unit);
        }
        self
    }

    pub fn with_scaled(mut self, unit: &'static ScaledUnit) -> Self {
        self.scaled.entry(unit.symbol).or_insert(unit);
        self
    }

    /// Parse `expression` against this catalog and register it as a composite
    pub fn with_composite(
        mut self,
        name: &'static str,
        symbol: &'static str,
        expression: &'static str,
    ) -> Result<Self> {
        let quantity = crate::parse::parse_quantity(&self, expression)?;
        self.composite_symbols.insert(symbol, self.composites.len());
        self.composites.push(CompositeUnit {
            name,
            symbol,
            expression,
            quantity,
        });
        Ok(self)
    }

    /// Canonical base unit of a dimension
    pub fn base_unit(&self, dimension: Dimension) -> &'static Unit {
        self.bases[dimension as usize]
    }

    /// Look up a plain unit by exact symbol
    pub fn unit(&self, symbol: &str) -> Option<&'static Unit> {
        Dimension::ALL
            .iter()
            .find_map(|dim| self.unit_in(*dim, symbol))
    }

    /// Look up a plain unit by exact symbol within one dimension
    pub fn unit_in(&self, dimension: Dimension, symbol: &str) -> Option<&'static Unit> {
        self.symbols.get(&dimension)?.get(symbol).copied()
    }

    pub fn scaled(&self, symbol: &str) -> Option<&'static ScaledUnit> {
        self.scaled.get(symbol).copied()
    }

    pub fn composite(&self, symbol: &str) -> Option<&CompositeUnit> {
        self.composite_symbols
            .get(symbol)
            .map(|&index| &self.composites[index])
    }

    /// Plain units in registration order
    pub fn units(&self) -> impl Iterator<Item = &'static Unit> + '_ {
        self.order.iter().copied()
    }

    /// Composite units in definition order
    pub fn composites(&self) -> impl Iterator<Item = &CompositeUnit> {
        self.composites.iter()
    }

    /// Resolve a symbol the way the parser does
    ///
    /// Order: exact plain unit or scaled alias, exact composite, SI prefix +
    /// plain unit, SI prefix + composite. Returns the unit and the prefix
    /// exponent (0 when unprefixed).
    pub fn resolve(&self, symbol: &str) -> Result<(UnitRef<'_>, i32)> {
        if let Some(unit) = self.unit(symbol) {
            return Ok((UnitRef::Plain(unit), 0));
        }
        if let Some(unit) = self.scaled(symbol) {
            return Ok((UnitRef::Scaled(unit), 0));
        }
        if let Some(composite) = self.composite(symbol) {
            return Ok((UnitRef::Composite(composite), 0));
        }

        let mut chars = symbol.chars();
        if let Some(first) = chars.next() {
            let rest = chars.as_str();
            if !rest.is_empty() {
                if let Ok(exponent) = prefix::exponent(first) {
                    if let Some(unit) = self.unit(rest) {
                        return Ok((UnitRef::Plain(unit), exponent));
                    }
                    if let Some(composite) = self.composite(rest) {
                        return Ok((UnitRef::Composite(composite), exponent));
                    }
                }
            }
        }

        Err(UnitError::UnitNotFound(symbol.to_string()))
    }
}
