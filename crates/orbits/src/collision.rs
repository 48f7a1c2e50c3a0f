//! Crossing-point collision search between satellites on the shared ellipse.
//!
//! Two satellites can only meet at one of two fixed candidate angles (π/2 and 3π/2), where
//! the offset orbital planes are assumed to intersect. The search walks both satellites'
//! arrival times at each candidate forward in lock step until the arrivals coincide or the
//! horizon is exceeded.

use std::f64::consts::{FRAC_PI_2, TAU};

use sat_core::constants::{DEFAULT_START_PHASE, MAX_SEARCH_STEPS};
use sat_core::units::{minutes_to_seconds, years_to_minutes};
use tracing::{debug, info};

use crate::error::ArgumentError;
use crate::model::OrbitModel;

/// Candidate crossing angles in radians.
pub const CANDIDATE_CROSSING_ANGLES: [f64; 2] = [FRAC_PI_2, 3.0 * FRAC_PI_2];

/// Angle labels (degrees) reported for a convergence in each candidate column.
///
/// The second column has always been reported as 180° rather than 270°; downstream tables
/// depend on that label.
pub const CROSSING_LABELS_DEG: [f64; 2] = [90.0, 180.0];

/// First common crossing of two satellites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub x: f64,
    pub y: f64,
    pub theta_deg: f64,
    pub time_min: f64,
}

/// One row of the all-pairs table; `collision` is `None` when the pair never meets in the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRow {
    pub pair: (usize, usize),
    pub collision: Option<Collision>,
}

/// All-pairs collision results in pair-generation order: (1,2), (1,3), ..., (2,3), ...
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionTable {
    rows: Vec<CollisionRow>,
}

impl CollisionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CollisionRow> {
        self.rows.iter()
    }

    /// Number of pairs that do collide within the horizon.
    pub fn collision_count(&self) -> usize {
        self.rows.iter().filter(|r| r.collision.is_some()).count()
    }
}

impl<'a> IntoIterator for &'a CollisionTable {
    type Item = &'a CollisionRow;
    type IntoIter = std::slice::Iter<'a, CollisionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl OrbitModel {
    /// Minutes until satellite `index` first reaches each candidate crossing angle.
    ///
    /// A time of exactly zero means the satellite starts on the crossing; it is pushed out to
    /// one full period. Negative times are left as they are.
    pub fn first_crossing_times(&self, index: usize, phase: f64) -> Result<[f64; 2], ArgumentError> {
        let period = self.period(index)?;
        if !phase.is_finite() {
            return Err(ArgumentError::NonFinitePhase(phase));
        }

        Ok(CANDIDATE_CROSSING_ANGLES.map(|angle| {
            let t = (angle - phase) / TAU * period;
            if t == 0.0 { period } else { t }
        }))
    }

    /// First time at which satellites `indices[0]` and `indices[1]` sit on the same candidate
    /// crossing, searched up to `max_years`.
    ///
    /// Only the first satellite's arrival at the first candidate is checked against the horizon.
    /// Searches that would need more than `MAX_SEARCH_STEPS` advances are rejected up front.
    /// The reported position is that of the first satellite at the collision time, which is the
    /// crossing point itself and therefore independent of the pair's order.
    #[allow(clippy::float_cmp)]
    pub fn pairwise_collision(
        &self,
        indices: [usize; 2],
        phases: [f64; 2],
        max_years: u32,
    ) -> Result<Option<Collision>, ArgumentError> {
        let [a, b] = indices;
        if a == 0 || b == 0 {
            return Err(ArgumentError::IndexBelowOne);
        }
        if a == b {
            return Err(ArgumentError::DuplicateIndex(a));
        }

        let periods = [self.period(a)?, self.period(b)?];
        let mut time = [
            self.first_crossing_times(a, phases[0])?,
            self.first_crossing_times(b, phases[1])?,
        ];
        let horizon = years_to_minutes(max_years);
        let budget = search_steps(&time, periods, horizon);
        if budget > MAX_SEARCH_STEPS {
            return Err(ArgumentError::SearchTooLong {
                steps: budget,
                limit: MAX_SEARCH_STEPS,
            });
        }

        let mut steps = 0usize;
        while time[0][0] != time[1][0] && time[0][1] != time[1][1] && time[0][0] <= horizon {
            for col in 0..CANDIDATE_CROSSING_ANGLES.len() {
                if time[0][col] > time[1][col] {
                    time[1][col] += periods[1];
                } else {
                    time[0][col] += periods[0];
                }
            }
            steps += 1;
        }
        debug!(first = a, second = b, steps, "crossing search finished");

        let Some(col) = (0..CANDIDATE_CROSSING_ANGLES.len()).find(|&c| time[0][c] == time[1][c])
        else {
            info!("Satellites {a} and {b} will not collide in {max_years} years.");
            return Ok(None);
        };

        let time_min = time[0][col];
        let position = self.position(a, minutes_to_seconds(time_min), phases[0])?;
        Ok(Some(Collision {
            x: position.x,
            y: position.y,
            theta_deg: CROSSING_LABELS_DEG[col],
            time_min,
        }))
    }

    /// Run `pairwise_collision` over every unordered pair of satellites.
    ///
    /// `phases` defaults to the north-pole start for every satellite.
    pub fn all_pairwise_collisions(
        &self,
        phases: Option<&[f64]>,
        max_years: u32,
    ) -> Result<CollisionTable, ArgumentError> {
        let n = self.satellite_count();
        let phases = match phases {
            None => vec![DEFAULT_START_PHASE; n],
            Some(list) if list.len() == n => list.to_vec(),
            Some(list) => {
                return Err(ArgumentError::PhaseCountMismatch {
                    expected: n,
                    actual: list.len(),
                });
            }
        };

        let mut rows = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 1..n {
            for j in (i + 1)..=n {
                let collision =
                    self.pairwise_collision([i, j], [phases[i - 1], phases[j - 1]], max_years)?;
                rows.push(CollisionRow {
                    pair: (i, j),
                    collision,
                });
            }
        }

        debug!(
            pairs = rows.len(),
            collisions = rows.iter().filter(|r| r.collision.is_some()).count(),
            "all-pairs collision sweep complete"
        );
        Ok(CollisionTable { rows })
    }
}

/// Upper estimate of loop iterations. Each iteration advances exactly one column-0 arrival;
/// the first satellite's stop one period past the horizon and the second's never run ahead of them.
fn search_steps(time: &[[f64; 2]; 2], periods: [f64; 2], horizon: f64) -> f64 {
    let first = ((horizon - time[0][0]) / periods[0]).max(0.0);
    let second = ((horizon + periods[0] - time[1][0]) / periods[1]).max(0.0);
    first + second
}
