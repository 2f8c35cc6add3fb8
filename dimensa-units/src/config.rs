//! Display options
//!
//! Read by the formatting routines at every call. The process-wide instance
//! is meant to be set once at startup; concurrent writers are serialized by
//! the lock but readers may see either version.

use std::sync::{LazyLock, PoisonError, RwLock};
use serde::{Serialize, Deserialize};
use crate::error::{Result, UnitError};
use crate::units::{DEGREE, RADIAN};
use crate::Unit;

/// Unit angles are displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radian,
    Degree,
}

impl AngleUnit {
    pub fn unit(&self) -> &'static Unit {
        match self {
            AngleUnit::Radian => &RADIAN,
            AngleUnit::Degree => &DEGREE,
        }
    }
}

/// How 2D vectors render (read by vector types, not by scalar formatting)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorDisplay {
    #[default]
    Cartesian,
    Polar,
}

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub angle_unit: AngleUnit,
    pub vector_display: VectorDisplay,
    /// Show masses stored in grams as kilograms
    pub kilogram_display: bool,
    /// Collapse unit lists into composite units (N, J, ...)
    pub consolidate_units: bool,
    /// Composite symbols tried during consolidation, earliest wins ties
    pub consolidation_priority: Vec<String>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            angle_unit: AngleUnit::Radian,
            vector_display: VectorDisplay::Cartesian,
            kilogram_display: true,
            consolidate_units: false,
            consolidation_priority: ["N", "J", "W", "Pa", "V", "C", "ohm", "Hz"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DisplayOptions {
    /// Load options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| UnitError::InvalidConfig(e.to_string()))
    }

    pub fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    pub fn with_kilogram_display(mut self, enabled: bool) -> Self {
        self.kilogram_display = enabled;
        self
    }

    pub fn with_consolidation(mut self, enabled: bool) -> Self {
        self.consolidate_units = enabled;
        self
    }

    pub fn with_priority<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consolidation_priority = symbols.into_iter().map(Into::into).collect();
        self
    }
}

static DISPLAY: LazyLock<RwLock<DisplayOptions>> =
    LazyLock::new(|| RwLock::new(DisplayOptions::default()));

/// Snapshot of the process-wide display options
pub fn display_options() -> DisplayOptions {
    DISPLAY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replace the process-wide display options
pub fn set_display_options(options: DisplayOptions) {
    tracing::debug!(?options, "display options updated");
    *DISPLAY.write().unwrap_or_else(PoisonError::into_inner) = options;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DisplayOptions::default();
        assert_eq!(options.angle_unit, AngleUnit::Radian);
        assert_eq!(options.vector_display, VectorDisplay::Cartesian);
        assert!(options.kilogram_display);
        assert!(!options.consolidate_units);
        assert_eq!(options.consolidation_priority[0], "N");
    }

    #[test]
    fn test_from_json_partial() {
        let options = DisplayOptions::from_json(
            r#"{"angle_unit": "degree", "consolidate_units": true, "consolidation_priority": ["J"]}"#,
        )
        .unwrap();
        assert_eq!(options.angle_unit, AngleUnit::Degree);
        assert!(options.consolidate_units);
        assert!(options.kilogram_display);
        assert_eq!(options.consolidation_priority, vec!["J".to_string()]);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = DisplayOptions::from_json(r#"{"angle_unit": "turns"}"#).unwrap_err();
        assert!(matches!(err, UnitError::InvalidConfig(_)));
    }

    #[test]
    fn test_builders() {
        let options = DisplayOptions::default()
            .with_angle_unit(AngleUnit::Degree)
            .with_kilogram_display(false)
            .with_consolidation(true)
            .with_priority(["W"]);
        assert_eq!(options.angle_unit.unit().symbol, "deg");
        assert!(!options.kilogram_display);
        assert!(options.consolidate_units);
        assert_eq!(options.consolidation_priority, vec!["W".to_string()]);
    }
}
