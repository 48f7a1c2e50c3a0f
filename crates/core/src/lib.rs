//! Core units, constants, and shared primitives for the satellite collision workspace.

/// Time and angle constants. Periods are expressed in minutes, trajectory times in seconds.
pub mod constants {
    use std::f64::consts::FRAC_PI_2;

    /// Seconds per minute.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Minutes per (365-day) year, used to size collision search horizons.
    pub const MINUTES_PER_YEAR: f64 = 365.0 * 24.0 * 60.0;
    /// Default starting phase of every satellite: the north pole, in radians.
    pub const DEFAULT_START_PHASE: f64 = FRAC_PI_2;
    /// Default collision search horizon in years.
    pub const DEFAULT_MAX_YEARS: u32 = 2;
    /// Default number of samples for a one-period trajectory sweep.
    pub const DEFAULT_TRAJECTORY_SAMPLES: usize = 50;
    /// Largest number of lock-step advances a single pairwise collision search may take.
    pub const MAX_SEARCH_STEPS: f64 = 1.0e9;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{MINUTES_PER_YEAR, SECONDS_PER_MINUTE};

    /// Convert minutes to seconds.
    #[inline]
    pub fn minutes_to_seconds(v: f64) -> f64 {
        v * SECONDS_PER_MINUTE
    }

    /// Convert a whole number of years to minutes.
    #[inline]
    pub fn years_to_minutes(years: u32) -> f64 {
        years as f64 * MINUTES_PER_YEAR
    }
}

/// Angle helpers.
pub mod angle {
    /// Wrap an angle in degrees into `[0, 360)`.
    #[inline]
    pub fn wrap_degrees(deg: f64) -> f64 {
        let wrapped = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    /// `n` evenly spaced samples over `[start, end]`, both ends included.
    pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                    .collect()
            }
        }
    }
}
