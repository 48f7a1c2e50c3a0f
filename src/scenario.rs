//! Scenario assembly: resolves a merged configuration into a validated orbit model plus
//! the per-run search parameters, and shapes results for export.

use chrono::{Duration, NaiveDateTime};
use sat_config::ScenarioConfig;
use sat_core::constants::{DEFAULT_MAX_YEARS, DEFAULT_START_PHASE};
use sat_export::collisions::Record;
use sat_orbits::{ArgumentError, CollisionTable, ConfigurationError, OrbitModel};
use thiserror::Error;

/// Epoch format accepted in scenario files and on the command line.
pub const EPOCH_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A fully resolved run: model, start phases, horizon, and output naming.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: Option<String>,
    pub model: OrbitModel,
    /// One start phase (radians) per satellite; defaults already applied.
    pub start_points: Vec<f64>,
    pub max_years: u32,
    pub output: Option<String>,
    pub epoch: Option<NaiveDateTime>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("{0} is required (pass it on the command line or in the scenario file)")]
    Missing(&'static str),
    #[error("invalid orbit model: {0}")]
    Model(#[from] ConfigurationError),
    #[error("invalid start points: {0}")]
    StartPoints(#[from] ArgumentError),
    #[error("invalid epoch '{value}' (expected YYYY-MM-DD HH:MM:SS): {source}")]
    Epoch {
        value: String,
        source: chrono::ParseError,
    },
}

impl TryFrom<ScenarioConfig> for Scenario {
    type Error = ScenarioError;

    fn try_from(config: ScenarioConfig) -> Result<Self, Self::Error> {
        let minor = config
            .minor_axis_km
            .ok_or(ScenarioError::Missing("minor axis"))?;
        let major = config
            .major_axis_km
            .ok_or(ScenarioError::Missing("major axis"))?;
        if config.periods_min.is_empty() {
            return Err(ScenarioError::Missing("at least one period"));
        }

        let count = config.periods_min.len();
        let model = OrbitModel::new(minor, major, config.periods_min, count)?;

        let start_points = match config.start_points_rad {
            None => vec![DEFAULT_START_PHASE; count],
            Some(points) => {
                if points.len() != count {
                    return Err(ArgumentError::PhaseCountMismatch {
                        expected: count,
                        actual: points.len(),
                    }
                    .into());
                }
                if let Some(&bad) = points.iter().find(|p| !p.is_finite()) {
                    return Err(ArgumentError::NonFinitePhase(bad).into());
                }
                points
            }
        };

        let epoch = config
            .epoch
            .map(|value| {
                NaiveDateTime::parse_from_str(&value, EPOCH_FORMAT)
                    .map_err(|source| ScenarioError::Epoch { value, source })
            })
            .transpose()?;

        Ok(Scenario {
            name: config.name,
            model,
            start_points,
            max_years: config.max_years.unwrap_or(DEFAULT_MAX_YEARS),
            output: config.output,
            epoch,
        })
    }
}

impl Scenario {
    /// Start phase of the 1-based satellite `index`.
    pub fn start_phase(&self, index: usize) -> Result<f64, ArgumentError> {
        self.model.period(index)?;
        Ok(self.start_points[index - 1])
    }

    /// All-pairs collision search with this scenario's phases and horizon.
    pub fn collision_table(&self) -> Result<CollisionTable, ArgumentError> {
        self.model
            .all_pairwise_collisions(Some(&self.start_points), self.max_years)
    }

    /// Calendar timestamp of a collision `time_min` minutes after the epoch, if one is set.
    pub fn collision_epoch(&self, time_min: f64) -> Option<NaiveDateTime> {
        let epoch = self.epoch?;
        let offset = Duration::try_milliseconds((time_min * 60_000.0).round() as i64)?;
        epoch.checked_add_signed(offset)
    }

    /// Export rows for a collision table, in table order.
    pub fn export_records(&self, table: &CollisionTable) -> Vec<Record> {
        table
            .iter()
            .map(|row| {
                let (a, b) = row.pair;
                match row.collision {
                    None => Record::missing(a, b),
                    Some(c) => Record {
                        sat_a: a,
                        sat_b: b,
                        x_km: Some(c.x),
                        y_km: Some(c.y),
                        theta_deg: Some(c.theta_deg),
                        time_min: Some(c.time_min),
                        epoch_utc: self
                            .collision_epoch(c.time_min)
                            .map(|t| t.format(EPOCH_FORMAT).to_string()),
                    },
                }
            })
            .collect()
    }
}
