//! Satellite collision calculator.
//!
//! Satellites share one parametric ellipse but run with their own periods and start
//! phases. The orbit model and collision search live in `sat_orbits`; this crate ties
//! them to scenario files, workbook/CSV/JSON export, and trajectory plots so the CLI and tests
//! share one façade.

pub mod plot;
pub mod scenario;

pub use sat_config as config;
pub use sat_core as primitives;
pub use sat_export as export;
pub use sat_orbits as orbits;
