//! Shared-ellipse orbit kinematics and pairwise crossing-point collision search.

pub mod collision;
pub mod error;
pub mod model;

pub use collision::{
    CANDIDATE_CROSSING_ANGLES, CROSSING_LABELS_DEG, Collision, CollisionRow, CollisionTable,
};
pub use error::{ArgumentError, ConfigurationError, satellite_index};
pub use model::{OrbitModel, Position, StartPhases, Trajectory, phase_angle};
