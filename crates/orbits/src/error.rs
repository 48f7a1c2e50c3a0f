use thiserror::Error;

/// Rejected `OrbitModel` construction parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{name} must be a finite positive number of kilometres, got {value}")]
    InvalidAxis { name: &'static str, value: f64 },
    #[error("at least one satellite period is required")]
    NoPeriods,
    #[error("period of satellite {index} must be a finite positive number of minutes, got {value}")]
    InvalidPeriod { index: usize, value: f64 },
    #[error("number of satellites ({count}) does not match the number of periods ({periods})")]
    CountMismatch { count: usize, periods: usize },
}

/// Rejected call-time arguments of an `OrbitModel` query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("satellite index must be a whole number, got {0}")]
    FractionalIndex(f64),
    #[error("satellite indices start from 1; index 0 does not exist")]
    IndexBelowOne,
    #[error("satellite index {index} is out of range for {count} satellites")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("satellite {0} cannot collide with itself")]
    DuplicateIndex(usize),
    #[error("expected {expected} start phases (one per satellite), got {actual}")]
    PhaseCountMismatch { expected: usize, actual: usize },
    #[error("start phase must be a finite number of radians, got {0}")]
    NonFinitePhase(f64),
    #[error(
        "collision search would take about {steps:.0} steps (limit {limit:.0}); \
         shorten max_years or use longer periods"
    )]
    SearchTooLong { steps: f64, limit: f64 },
}

/// Convert a loosely typed satellite number (e.g. read from a file as a float) into a 1-based index.
pub fn satellite_index(value: f64) -> Result<usize, ArgumentError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ArgumentError::FractionalIndex(value));
    }
    if value < 1.0 {
        return Err(ArgumentError::IndexBelowOne);
    }
    Ok(value as usize)
}
