//! Plot configuration and length units.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Length unit of trajectory coordinates and of plotted distances
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    #[value(name = "nm")]
    #[serde(alias = "nm")]
    Nanometers,
    #[value(name = "angstrom", alias = "A")]
    #[serde(alias = "angstrom", alias = "A")]
    Angstroms,
}

impl LengthUnit {
    fn nanometers_per_unit(self) -> f64 {
        match self {
            LengthUnit::Nanometers => 1.0,
            LengthUnit::Angstroms => 0.1,
        }
    }

    /// Convert a value expressed in `self` into `target`
    pub fn convert(self, value: f64, target: LengthUnit) -> f64 {
        if self == target {
            return value;
        }
        value * self.nanometers_per_unit() / target.nanometers_per_unit()
    }

    /// Short suffix used in axis labels
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Nanometers => "nm",
            LengthUnit::Angstroms => "Å",
        }
    }
}

/// What to do when frames do not divide evenly between datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderPolicy {
    /// Refuse the split with a descriptive error
    #[default]
    Reject,
    /// Drop the trailing frames and log a warning
    Truncate,
}

/// Settings shared by all plotters and the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Unit every distance is reported in
    pub length_unit: LengthUnit,
    /// Handling of frames left over by the equal split
    pub remainder: RemainderPolicy,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Optional caption drawn above the chart
    pub title: Option<String>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            length_unit: LengthUnit::Nanometers,
            remainder: RemainderPolicy::Reject,
            width: 1200,
            height: 600,
            title: None,
        }
    }
}

impl PlotConfig {
    /// Load a configuration from a JSON file; missing keys take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_units() {
        let nm = LengthUnit::Angstroms.convert(10.0, LengthUnit::Nanometers);
        assert!((nm - 1.0).abs() < 1e-12);
        let a = LengthUnit::Nanometers.convert(0.25, LengthUnit::Angstroms);
        assert!((a - 2.5).abs() < 1e-12);
        assert_eq!(LengthUnit::Nanometers.convert(0.3, LengthUnit::Nanometers), 0.3);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config: PlotConfig =
            serde_json::from_str(r#"{"length_unit": "angstroms", "width": 800}"#).unwrap();
        assert_eq!(config.length_unit, LengthUnit::Angstroms);
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.remainder, RemainderPolicy::Reject);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        fs::write(&path, r#"{"remainder": "truncate", "title": "Run 1"}"#).unwrap();
        let config = PlotConfig::load(&path).unwrap();
        assert_eq!(config.remainder, RemainderPolicy::Truncate);
        assert_eq!(config.title.as_deref(), Some("Run 1"));
    }
}
