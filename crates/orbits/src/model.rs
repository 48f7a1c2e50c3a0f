//! Shared-ellipse orbit model: construction, positions, and angles.

use std::f64::consts::TAU;

use sat_core::angle::wrap_degrees;
use sat_core::constants::{DEFAULT_START_PHASE, SECONDS_PER_MINUTE};
use tracing::debug;

use crate::error::{ArgumentError, ConfigurationError};

/// Satellites sharing one parametric ellipse, each with its own period in minutes.
///
/// Satellites are referenced by their 1-based position in the period list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitModel {
    minor_axis: f64,
    major_axis: f64,
    periods: Vec<f64>,
}

/// Point on the ellipse plus the satellite's static plane offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub plane_offset_deg: f64,
}

/// Positions of one satellite sampled over a time array.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub plane_offset_deg: f64,
}

impl Trajectory {
    /// Iterate the `(x, y)` pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Starting phases for a whole-constellation query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartPhases<'a> {
    /// One phase broadcast to every satellite.
    Uniform(f64),
    /// One phase per satellite, in period order.
    PerSatellite(&'a [f64]),
}

impl Default for StartPhases<'_> {
    fn default() -> Self {
        StartPhases::Uniform(DEFAULT_START_PHASE)
    }
}

/// Phase angle in radians after `time_s` seconds on an orbit of `period_min` minutes.
#[inline]
pub fn phase_angle(period_min: f64, time_s: f64, phase: f64) -> f64 {
    TAU / period_min / SECONDS_PER_MINUTE * time_s + phase
}

impl OrbitModel {
    /// Build a model after validating the shape, the periods, and the declared satellite count.
    pub fn new(
        minor_axis: f64,
        major_axis: f64,
        periods: Vec<f64>,
        satellite_count: usize,
    ) -> Result<Self, ConfigurationError> {
        check_axis("minor_axis", minor_axis)?;
        check_axis("major_axis", major_axis)?;
        if periods.is_empty() {
            return Err(ConfigurationError::NoPeriods);
        }
        if satellite_count != periods.len() {
            return Err(ConfigurationError::CountMismatch {
                count: satellite_count,
                periods: periods.len(),
            });
        }
        if let Some((idx, &value)) = periods
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.is_finite() && **p > 0.0))
        {
            return Err(ConfigurationError::InvalidPeriod {
                index: idx + 1,
                value,
            });
        }

        debug!(
            minor_axis,
            major_axis,
            satellites = periods.len(),
            "orbit model constructed"
        );
        Ok(Self {
            minor_axis,
            major_axis,
            periods,
        })
    }

    /// Build a model whose satellite count is taken from the period list.
    pub fn from_periods(
        minor_axis: f64,
        major_axis: f64,
        periods: Vec<f64>,
    ) -> Result<Self, ConfigurationError> {
        let count = periods.len();
        Self::new(minor_axis, major_axis, periods, count)
    }

    pub fn minor_axis(&self) -> f64 {
        self.minor_axis
    }

    pub fn major_axis(&self) -> f64 {
        self.major_axis
    }

    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    pub fn satellite_count(&self) -> usize {
        self.periods.len()
    }

    /// Period in minutes of the 1-based satellite `index`.
    pub fn period(&self, index: usize) -> Result<f64, ArgumentError> {
        if index < 1 {
            return Err(ArgumentError::IndexBelowOne);
        }
        self.periods
            .get(index - 1)
            .copied()
            .ok_or(ArgumentError::IndexOutOfRange {
                index,
                count: self.periods.len(),
            })
    }

    /// Static plane offset of satellite `index`; satellites are spread evenly over 360°.
    pub fn plane_offset(&self, index: usize) -> Result<f64, ArgumentError> {
        self.period(index)?;
        Ok(360.0 / self.satellite_count() as f64 * (index - 1) as f64)
    }

    /// Position of satellite `index` after `time_s` seconds, starting from `phase` radians.
    pub fn position(
        &self,
        index: usize,
        time_s: f64,
        phase: f64,
    ) -> Result<Position, ArgumentError> {
        let period = self.period(index)?;
        let theta = phase_angle(period, time_s, phase);
        Ok(Position {
            x: self.minor_axis * theta.cos(),
            y: self.major_axis * theta.sin(),
            plane_offset_deg: self.plane_offset(index)?,
        })
    }

    /// Elementwise `position` over a time array (seconds).
    pub fn trajectory(
        &self,
        index: usize,
        times_s: &[f64],
        phase: f64,
    ) -> Result<Trajectory, ArgumentError> {
        let period = self.period(index)?;
        let (x, y) = times_s
            .iter()
            .map(|&t| {
                let theta = phase_angle(period, t, phase);
                (self.minor_axis * theta.cos(), self.major_axis * theta.sin())
            })
            .unzip();
        Ok(Trajectory {
            x,
            y,
            plane_offset_deg: self.plane_offset(index)?,
        })
    }

    /// Angle in degrees, wrapped into `[0, 360)`, of every satellite at `time_s` seconds.
    pub fn angle(&self, time_s: f64, phases: StartPhases<'_>) -> Result<Vec<f64>, ArgumentError> {
        if let StartPhases::PerSatellite(list) = phases {
            if list.len() != self.satellite_count() {
                return Err(ArgumentError::PhaseCountMismatch {
                    expected: self.satellite_count(),
                    actual: list.len(),
                });
            }
        }

        Ok(self
            .periods
            .iter()
            .enumerate()
            .map(|(i, &period)| {
                let phase = match phases {
                    StartPhases::Uniform(p) => p,
                    StartPhases::PerSatellite(list) => list[i],
                };
                wrap_degrees(phase_angle(period, time_s, phase).to_degrees())
            })
            .collect())
    }
}

fn check_axis(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidAxis { name, value })
    }
}
