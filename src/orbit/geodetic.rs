/// Mean Earth radius of the spherical model, km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub altitude_km: f64,
}

/// Converts an inertial position vector (km) to spherical lat/lon/altitude.
///
/// Spherical Earth, no sidereal correction: the longitude is referenced to
/// the inertial frame, not to Greenwich, so sub-satellite points are
/// approximate. Altitude is the distance above the mean radius.
pub fn eci_to_geodetic(position: [f64; 3]) -> GeodeticPosition {
    let [x, y, z] = position;
    let radius = (x * x + y * y + z * z).sqrt();

    GeodeticPosition {
        latitude_rad: z.atan2((x * x + y * y).sqrt()),
        longitude_rad: y.atan2(x),
        altitude_km: radius - EARTH_RADIUS_KM,
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn equatorial_point_on_the_x_axis() {
        let geo = eci_to_geodetic([EARTH_RADIUS_KM + 400.0, 0.0, 0.0]);
        assert!((geo.latitude_rad).abs() < 1e-12);
        assert!((geo.longitude_rad).abs() < 1e-12);
        assert!((geo.altitude_km - 400.0).abs() < 1e-9);
    }

    #[test]
    fn polar_point_on_the_z_axis() {
        let geo = eci_to_geodetic([0.0, 0.0, 7000.0]);
        assert!((geo.latitude_rad - FRAC_PI_2).abs() < 1e-12);
        assert!((geo.altitude_km - 629.0).abs() < 1e-9);
    }

    #[test]
    fn longitude_follows_the_y_axis() {
        let geo = eci_to_geodetic([0.0, 6771.0, 0.0]);
        assert!((geo.longitude_rad - FRAC_PI_2).abs() < 1e-12);
        assert!(geo.latitude_rad.abs() < 1e-12);
    }

    #[test]
    fn southern_hemisphere_is_negative_latitude() {
        let geo = eci_to_geodetic([4000.0, 0.0, -4000.0]);
        assert!(geo.latitude_rad < 0.0);
    }
}
