//! Scenario configuration models and loaders for the satellite collision calculator.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Constellation scenario parsed from a YAML or TOML manifest.
///
/// Every field is optional so command-line flags can fill in or override any of them.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "minor_axis")]
    pub minor_axis_km: Option<f64>,
    #[serde(default, alias = "major_axis")]
    pub major_axis_km: Option<f64>,
    #[serde(default, alias = "period", alias = "periods")]
    pub periods_min: Vec<f64>,
    #[serde(default, alias = "start_point", alias = "start_points")]
    pub start_points_rad: Option<Vec<f64>>,
    #[serde(default, alias = "max_year")]
    pub max_years: Option<u32>,
    /// Output file stem for the collision table.
    #[serde(default, alias = "collision_output")]
    pub output: Option<String>,
    /// UTC epoch (`YYYY-MM-DD HH:MM:SS`) that collision times are counted from.
    #[serde(default)]
    pub epoch: Option<String>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load a scenario from a `.toml` file, or from YAML for any other extension.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

impl ScenarioConfig {
    /// Overlay `other` on top of `self`: every field set in `other` wins.
    pub fn merged_with(mut self, other: ScenarioConfig) -> ScenarioConfig {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.minor_axis_km.is_some() {
            self.minor_axis_km = other.minor_axis_km;
        }
        if other.major_axis_km.is_some() {
            self.major_axis_km = other.major_axis_km;
        }
        if !other.periods_min.is_empty() {
            self.periods_min = other.periods_min;
        }
        if other.start_points_rad.is_some() {
            self.start_points_rad = other.start_points_rad;
        }
        if other.max_years.is_some() {
            self.max_years = other.max_years;
        }
        if other.output.is_some() {
            self.output = other.output;
        }
        if other.epoch.is_some() {
            self.epoch = other.epoch;
        }
        self
    }
}
