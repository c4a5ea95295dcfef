mod constellation;
mod error;
mod geodetic;
mod position;
mod propagator;

pub use constellation::{
    evaluate_constellation, ConstellationEntry, EvaluationLimits, SatelliteOutcome,
};
pub use error::OrbitError;
pub use geodetic::{eci_to_geodetic, GeodeticPosition, EARTH_RADIUS_KM};
pub use position::{orbit_track, position_report, PositionReport};
pub use propagator::PropagatorState;
