use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements, Prediction};

use super::OrbitError;

/// Compiled SGP4 state for one element set: the parsed elements plus the
/// derived propagation constants. Built once per record, reused for every
/// propagation instant.
pub struct PropagatorState {
    pub elements: Elements,
    pub constants: Constants,
}

impl PropagatorState {
    pub fn from_tle(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, OrbitError> {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    /// Position and velocity in the inertial frame, km and km/s.
    pub fn propagate(&self, timestamp: DateTime<Utc>) -> Result<Prediction, OrbitError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| OrbitError::Propagation(e.to_string()))?;

        self.constants
            .propagate(minutes)
            .map_err(|e| OrbitError::Propagation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn builds_state_from_a_real_element_set() {
        let state = PropagatorState::from_tle(Some("ISS (ZARYA)".into()), ISS_LINE1, ISS_LINE2)
            .expect("valid element set");
        assert_eq!(state.elements.norad_id, 25544);
    }

    #[test]
    fn rejects_swapped_lines() {
        let result = PropagatorState::from_tle(None, ISS_LINE2, ISS_LINE1);
        assert!(result.is_err());
    }

    #[test]
    fn propagates_to_a_low_earth_orbit_state() {
        let state = PropagatorState::from_tle(Some("ISS (ZARYA)".into()), ISS_LINE1, ISS_LINE2)
            .expect("valid element set");
        // A few minutes past the element-set epoch (2008-09-20 12:25 UTC).
        let at = Utc.with_ymd_and_hms(2008, 9, 20, 13, 0, 0).unwrap();
        let prediction = state.propagate(at).expect("propagation near epoch");

        let [x, y, z] = prediction.position;
        let radius = (x * x + y * y + z * z).sqrt();
        assert!(radius > 6500.0 && radius < 7100.0, "radius {radius} km");

        let [vx, vy, vz] = prediction.velocity;
        let speed = (vx * vx + vy * vy + vz * vz).sqrt();
        assert!(speed > 6.5 && speed < 8.5, "speed {speed} km/s");
    }
}
