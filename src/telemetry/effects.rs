use crate::orbit::PositionReport;

/// Orbital effect factors feeding the telemetry model, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalEffects {
    pub eclipse_factor: f64,
    pub thermal_factor: f64,
    pub communication_factor: f64,
}

impl Default for OrbitalEffects {
    /// Full sun and a full link, with nominal thermal load.
    fn default() -> Self {
        Self {
            eclipse_factor: 1.0,
            thermal_factor: 1.0,
            communication_factor: 1.0,
        }
    }
}

impl OrbitalEffects {
    /// Derives effects from a position report.
    ///
    /// Day/night is a crude longitude-only proxy: hour angle
    /// (longitude + 180) mod 360 strictly between 90 and 270 counts as
    /// eclipse. The link factor scales with altitude up to 500 km.
    pub fn from_position(position: &PositionReport) -> Self {
        let hour_angle = (position.longitude + 180.0).rem_euclid(360.0);
        let (eclipse_factor, thermal_factor) = if hour_angle > 90.0 && hour_angle < 270.0 {
            (0.1, 0.3)
        } else {
            (1.0, 0.8)
        };

        Self {
            eclipse_factor,
            thermal_factor,
            communication_factor: (position.altitude_km / 500.0).min(1.0),
        }
    }
}
